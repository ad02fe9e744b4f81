//! Normalization of heterogeneous corner representations into the
//! consistent display extents shown by the bounding-box info panel and the
//! `info` CLI command.
use crate::core::bbox::BoundingBox;
use crate::core::cities::{City, nearest_city};
use crate::core::coords::{
    GeoCoord, UtmCoord, geo_to_utm_zone, meters_to_miles, utm_to_geo, utm_zone_from_lon,
};
use crate::error::Result;

/// Corner input as it arrives from the panels: either UTM corners sharing
/// one zone/hemisphere, or lon/lat corners.
#[derive(Debug, Clone, PartialEq)]
pub enum Extent {
    Utm {
        corners: Vec<(f64, f64)>,
        zone: u32,
        north: bool,
    },
    /// Corners as (lon, lat) degrees.
    Geo { corners: Vec<(f64, f64)> },
}

impl Extent {
    pub fn is_empty(&self) -> bool {
        match self {
            Extent::Utm { corners, .. } => corners.is_empty(),
            Extent::Geo { corners } => corners.is_empty(),
        }
    }

    /// Single-centroid convenience used by callers that only know a point.
    pub fn from_utm_centroid(utm: UtmCoord) -> Self {
        Extent::Utm {
            corners: vec![(utm.easting, utm.northing)],
            zone: utm.zone,
            north: utm.north,
        }
    }

    pub fn from_geo_centroid(geo: GeoCoord) -> Self {
        Extent::Geo {
            corners: vec![(geo.lon, geo.lat)],
        }
    }
}

/// Everything the info panel displays for one extent, in both coordinate
/// systems plus derived sizes and the nearest-city sanity check.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxInfo {
    pub utm_box: BoundingBox,
    pub zone: u32,
    pub north: bool,
    pub geo_box: BoundingBox,
    pub width_m: f64,
    pub height_m: f64,
    pub width_mi: f64,
    pub height_mi: f64,
    pub centroid: GeoCoord,
    pub city: &'static City,
}

impl BoxInfo {
    /// Normalize an extent into display form. Empty extents carry no
    /// information and yield `None`.
    pub fn from_extent(extent: &Extent) -> Result<Option<BoxInfo>> {
        let info = match extent {
            Extent::Utm {
                corners,
                zone,
                north,
            } => {
                let Some(utm_box) = BoundingBox::from_corners(corners) else {
                    return Ok(None);
                };
                let geo_corners: Vec<(f64, f64)> = corners
                    .iter()
                    .map(|&(easting, northing)| {
                        let geo = utm_to_geo(UtmCoord {
                            easting,
                            northing,
                            zone: *zone,
                            north: *north,
                        })?;
                        Ok((geo.lon, geo.lat))
                    })
                    .collect::<Result<_>>()?;
                let Some(geo_box) = BoundingBox::from_corners(&geo_corners) else {
                    return Ok(None);
                };
                Self::assemble(utm_box, *zone, *north, geo_box)
            }
            Extent::Geo { corners } => {
                let Some(geo_box) = BoundingBox::from_corners(corners) else {
                    return Ok(None);
                };
                let (center_lon, center_lat) = geo_box.center();
                // Project every corner into the centroid's zone so the UTM
                // envelope is expressed in a single coordinate frame.
                let zone = utm_zone_from_lon(center_lon);
                let north = center_lat >= 0.0;
                let utm_corners: Vec<(f64, f64)> = corners
                    .iter()
                    .map(|&(lon, lat)| {
                        let utm = geo_to_utm_zone(GeoCoord { lat, lon }, zone, north)?;
                        Ok((utm.easting, utm.northing))
                    })
                    .collect::<Result<_>>()?;
                let Some(utm_box) = BoundingBox::from_corners(&utm_corners) else {
                    return Ok(None);
                };
                Self::assemble(utm_box, zone, north, geo_box)
            }
        };
        Ok(Some(info))
    }

    fn assemble(utm_box: BoundingBox, zone: u32, north: bool, geo_box: BoundingBox) -> BoxInfo {
        let (center_lon, center_lat) = geo_box.center();
        let centroid = GeoCoord {
            lat: center_lat,
            lon: center_lon,
        };
        let width_m = utm_box.width();
        let height_m = utm_box.height();
        BoxInfo {
            utm_box,
            zone,
            north,
            geo_box,
            width_m,
            height_m,
            width_mi: meters_to_miles(width_m),
            height_mi: meters_to_miles(height_m),
            centroid,
            city: nearest_city(center_lat, center_lon),
        }
    }

    pub fn hemisphere_letter(&self) -> char {
        if self.north { 'N' } else { 'S' }
    }

    /// `Easting: w..e, Northing: s..n, Zone: 18N`
    pub fn utm_line(&self) -> String {
        format!(
            "Easting: {:.2} .. {:.2}, Northing: {:.2} .. {:.2}, Zone: {}{}",
            self.utm_box.west,
            self.utm_box.east,
            self.utm_box.south,
            self.utm_box.north,
            self.zone,
            self.hemisphere_letter()
        )
    }

    pub fn geo_line(&self) -> String {
        format!(
            "Lat: {:.6} .. {:.6}, Lon: {:.6} .. {:.6}",
            self.geo_box.south, self.geo_box.north, self.geo_box.west, self.geo_box.east
        )
    }

    pub fn size_m_line(&self) -> String {
        format!("{:.1} x {:.1}", self.width_m, self.height_m)
    }

    pub fn size_mi_line(&self) -> String {
        format!("{:.3} x {:.3}", self.width_mi, self.height_mi)
    }

    pub fn city_line(&self) -> String {
        self.city.name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_extents_yield_none() {
        let extent = Extent::Geo { corners: vec![] };
        assert!(BoxInfo::from_extent(&extent).unwrap().is_none());
        let extent = Extent::Utm {
            corners: vec![],
            zone: 18,
            north: true,
        };
        assert!(BoxInfo::from_extent(&extent).unwrap().is_none());
        assert!(extent.is_empty());
    }

    #[test]
    fn centroid_extents_are_single_points() {
        let extent = Extent::from_geo_centroid(GeoCoord {
            lat: 38.8895,
            lon: -77.0353,
        });
        assert!(!extent.is_empty());
        match extent {
            Extent::Geo { ref corners } => assert_eq!(corners.len(), 1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn display_lines_format_fixed_precision() {
        let info = BoxInfo::assemble(
            BoundingBox::new(322_000.0, 4_305_000.0, 323_000.0, 4_306_000.0),
            18,
            true,
            BoundingBox::new(-77.04, 38.88, -77.03, 38.90),
        );
        assert_eq!(
            info.utm_line(),
            "Easting: 322000.00 .. 323000.00, Northing: 4305000.00 .. 4306000.00, Zone: 18N"
        );
        assert_eq!(
            info.geo_line(),
            "Lat: 38.880000 .. 38.900000, Lon: -77.040000 .. -77.030000"
        );
        assert_eq!(info.size_m_line(), "1000.0 x 1000.0");
        assert_eq!(info.size_mi_line(), "0.621 x 0.621");
        assert_eq!(info.city_line(), "Washington");
    }
}
