//! Coordinate helpers: UTM zone selection, UTM↔WGS84 conversion through
//! OSR, centroid rounding, and unit conversion. These wrap GDAL's
//! `SpatialRef`/`CoordTransform`; no projection math is done here.
use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MILES_PER_METER: f64 = 0.000621371;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

/// A UTM position. `north` selects the hemisphere variant of the zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmCoord {
    pub easting: f64,
    pub northing: f64,
    pub zone: u32,
    pub north: bool,
}

impl UtmCoord {
    pub fn hemisphere_letter(&self) -> char {
        if self.north { 'N' } else { 'S' }
    }
}

/// UTM zone for a longitude: floor((lon+180)/6)+1, clamped to [1, 60].
/// The clamp keeps lon >= 180 from spilling into a nonexistent zone 61.
pub fn utm_zone_from_lon(lon_deg: f64) -> u32 {
    let zone = ((lon_deg + 180.0) / 6.0).floor() as i64 + 1;
    zone.clamp(1, 60) as u32
}

/// EPSG code of a UTM zone (WGS84 datum): 326xx north, 327xx south.
pub fn utm_epsg(zone: u32, north: bool) -> u32 {
    let base = if north { 32600 } else { 32700 };
    base + zone
}

fn srs_lon_lat() -> Result<SpatialRef> {
    let mut srs = SpatialRef::from_epsg(4326)?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

fn srs_utm(zone: u32, north: bool) -> Result<SpatialRef> {
    if !(1..=60).contains(&zone) {
        return Err(Error::InvalidArgument {
            arg: "zone",
            value: zone.to_string(),
        });
    }
    let mut srs = SpatialRef::from_epsg(utm_epsg(zone, north))?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

fn transform_point(transform: &CoordTransform, x: f64, y: f64) -> Result<(f64, f64)> {
    let mut xs = [x];
    let mut ys = [y];
    let mut zs: [f64; 0] = [];
    transform.transform_coords(&mut xs, &mut ys, &mut zs)?;
    Ok((xs[0], ys[0]))
}

/// Convert a WGS84 position into the UTM zone derived from its longitude,
/// hemisphere from the latitude sign.
pub fn geo_to_utm(geo: GeoCoord) -> Result<UtmCoord> {
    let zone = utm_zone_from_lon(geo.lon);
    let north = geo.lat >= 0.0;
    geo_to_utm_zone(geo, zone, north)
}

/// Convert a WGS84 position into a caller-chosen UTM zone. Used when all
/// corners of a box must land in one zone.
pub fn geo_to_utm_zone(geo: GeoCoord, zone: u32, north: bool) -> Result<UtmCoord> {
    let transform = CoordTransform::new(&srs_lon_lat()?, &srs_utm(zone, north)?)?;
    let (easting, northing) = transform_point(&transform, geo.lon, geo.lat)?;
    Ok(UtmCoord {
        easting,
        northing,
        zone,
        north,
    })
}

pub fn utm_to_geo(utm: UtmCoord) -> Result<GeoCoord> {
    let transform = CoordTransform::new(&srs_utm(utm.zone, utm.north)?, &srs_lon_lat()?)?;
    let (lon, lat) = transform_point(&transform, utm.easting, utm.northing)?;
    Ok(GeoCoord { lat, lon })
}

/// Round a value to the nearest multiple of `step` (step > 0).
pub fn round_to_nearest(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

pub fn meters_to_miles(m: f64) -> f64 {
    m * MILES_PER_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_formula_matches_known_longitudes() {
        assert_eq!(utm_zone_from_lon(-180.0), 1);
        assert_eq!(utm_zone_from_lon(-77.0353), 18); // Washington Monument
        assert_eq!(utm_zone_from_lon(0.0), 31);
        assert_eq!(utm_zone_from_lon(2.3522), 31); // Paris
        assert_eq!(utm_zone_from_lon(139.6917), 54); // Tokyo
        assert_eq!(utm_zone_from_lon(179.999), 60);
    }

    #[test]
    fn zone_is_clamped_at_the_antimeridian() {
        // floor((180+180)/6)+1 = 61 without the clamp
        assert_eq!(utm_zone_from_lon(180.0), 60);
        assert_eq!(utm_zone_from_lon(185.0), 60);
        assert_eq!(utm_zone_from_lon(-200.0), 1);
    }

    #[test]
    fn epsg_codes_split_by_hemisphere() {
        assert_eq!(utm_epsg(18, true), 32618);
        assert_eq!(utm_epsg(18, false), 32718);
    }

    #[test]
    fn rounding_to_step() {
        assert_eq!(round_to_nearest(323_486.3, 10.0), 323_490.0);
        assert_eq!(round_to_nearest(323_484.9, 10.0), 323_480.0);
        // f64::round rounds half away from zero
        assert_eq!(round_to_nearest(-17.5, 5.0), -20.0);
        assert_eq!(round_to_nearest(1234.0, 1.0), 1234.0);
    }

    #[test]
    fn miles_use_fixed_factor() {
        assert_eq!(meters_to_miles(1000.0), 0.621371);
        assert_eq!(meters_to_miles(0.0), 0.0);
    }
}
