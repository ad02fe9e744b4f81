use std::collections::HashMap;
use std::ffi::CStr;
use std::path::Path;

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::{Dataset, Metadata};
use ndarray::Array2;
use thiserror::Error;
use tracing::warn;

use crate::core::extent::Extent;

/// Errors encountered while summarizing a raster dataset.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
    #[error("Unsupported dataset: {0}")]
    Unsupported(String),
    #[error("Dimension mismatch: expected {0}x{1}")]
    DimensionMismatch(usize, usize),
}

/// Metadata extracted from a GDAL raster dataset.
#[derive(Debug, Clone)]
pub struct RasterMetadata {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands
    pub bands: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection in WKT format ("" when the dataset carries none)
    pub projection: String,
    /// Additional metadata key-value pairs (default domain)
    pub metadata: HashMap<String, String>,
}

/// Raster summary used by the info, display, and batch-cut panels.
pub struct RasterSummary {
    pub dataset: Dataset,
    pub metadata: RasterMetadata,
}

// Helper to extract "UTM zone 18N" style naming from a projected WKT
fn parse_utm_zone(wkt: &str) -> Option<(u32, bool)> {
    const KEY: &str = "UTM zone ";
    let idx = wkt.find(KEY)?;
    let rest = &wkt[idx + KEY.len()..];
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let zone: u32 = digits.parse().ok()?;
    if !(1..=60).contains(&zone) {
        return None;
    }
    match rest[digits.len()..].chars().next()? {
        'N' | 'n' => Some((zone, true)),
        'S' | 's' => Some((zone, false)),
        _ => None,
    }
}

// EPSG 326xx/327xx authority codes are the WGS84 UTM zones
fn utm_zone_from_epsg(code: i32) -> Option<(u32, bool)> {
    match code {
        32601..=32660 => Some(((code - 32600) as u32, true)),
        32701..=32760 => Some(((code - 32700) as u32, false)),
        _ => None,
    }
}

impl RasterSummary {
    /// Open a GDAL-supported raster (e.g., GeoTIFF, ERDAS IMG, VRT, NetCDF).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let dataset = Dataset::open(path.as_ref())?;
        let (size_x, size_y) = dataset.raster_size();
        let bands = dataset.raster_count() as usize;
        if bands == 0 {
            return Err(RasterError::Unsupported("No raster bands found".into()));
        }
        let geotransform = match dataset.geo_transform() {
            Ok(gt) => gt,
            Err(_) => [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        };
        let projection = dataset.projection();
        let mut metadata_map = HashMap::new();
        if let Some(entries) = dataset.metadata_domain("") {
            for entry in entries {
                if let Some((key, val)) = entry.split_once('=') {
                    metadata_map.insert(key.to_string(), val.to_string());
                }
            }
        }
        Ok(RasterSummary {
            dataset,
            metadata: RasterMetadata {
                size_x: size_x as usize,
                size_y: size_y as usize,
                bands,
                geotransform,
                projection,
                metadata: metadata_map,
            },
        })
    }

    /// Corner coordinates in the dataset CRS, honoring the rotation terms
    /// of the geotransform. Order: top-left, top-right, bottom-right,
    /// bottom-left.
    pub fn native_corners(&self) -> [(f64, f64); 4] {
        let gt = &self.metadata.geotransform;
        let w = self.metadata.size_x as f64;
        let h = self.metadata.size_y as f64;
        let px = |col: f64, row: f64| {
            (
                gt[0] + col * gt[1] + row * gt[2],
                gt[3] + col * gt[4] + row * gt[5],
            )
        };
        [px(0.0, 0.0), px(w, 0.0), px(w, h), px(0.0, h)]
    }

    /// Centroid of the raster footprint in the dataset CRS.
    pub fn native_centroid(&self) -> (f64, f64) {
        let gt = &self.metadata.geotransform;
        let w = self.metadata.size_x as f64;
        let h = self.metadata.size_y as f64;
        (
            gt[0] + (w / 2.0) * gt[1] + (h / 2.0) * gt[2],
            gt[3] + (w / 2.0) * gt[4] + (h / 2.0) * gt[5],
        )
    }

    /// Normalize the raster footprint for the info panel: UTM corners when
    /// the CRS is a WGS84 UTM zone, otherwise lon/lat corners. A CRS that
    /// cannot be parsed degrades to native-corners-as-geographic, like a
    /// missing CRS.
    pub fn extent(&self) -> Extent {
        let corners = self.native_corners();
        if self.metadata.projection.is_empty() {
            return Extent::Geo {
                corners: corners.to_vec(),
            };
        }
        match self.classify_srs(&corners) {
            Ok(extent) => extent,
            Err(e) => {
                warn!("SRS handling failed: {e}. Passing native corners through.");
                Extent::Geo {
                    corners: corners.to_vec(),
                }
            }
        }
    }

    fn classify_srs(&self, corners: &[(f64, f64); 4]) -> Result<Extent, RasterError> {
        let mut srs = SpatialRef::from_wkt(&self.metadata.projection)?;
        srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        if srs.is_projected() {
            let zone = utm_zone_from_epsg(srs.auth_code().unwrap_or(0))
                .or_else(|| parse_utm_zone(&self.metadata.projection));
            if let Some((zone, north)) = zone {
                return Ok(Extent::Utm {
                    corners: corners.to_vec(),
                    zone,
                    north,
                });
            }
            // Projected but not UTM: reproject the corners to WGS84
            let mut target = SpatialRef::from_epsg(4326)?;
            target.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
            let transform = CoordTransform::new(&srs, &target)?;
            let mut xs: Vec<f64> = corners.iter().map(|c| c.0).collect();
            let mut ys: Vec<f64> = corners.iter().map(|c| c.1).collect();
            let mut zs: [f64; 0] = [];
            transform.transform_coords(&mut xs, &mut ys, &mut zs)?;
            return Ok(Extent::Geo {
                corners: xs.into_iter().zip(ys).collect(),
            });
        }
        Ok(Extent::Geo {
            corners: corners.to_vec(),
        })
    }

    /// The textual report `gdalinfo` prints, via the GDALInfo entry point.
    pub fn info_text(&self) -> Result<String, RasterError> {
        unsafe {
            let options = gdal_sys::GDALInfoOptionsNew(std::ptr::null_mut(), std::ptr::null_mut());
            let c_report = gdal_sys::GDALInfo(self.dataset.c_dataset(), options);
            if c_report.is_null() {
                gdal_sys::GDALInfoOptionsFree(options);
                return Err(RasterError::Unsupported(
                    "GDALInfo returned no report".into(),
                ));
            }
            let report = CStr::from_ptr(c_report).to_string_lossy().into_owned();
            gdal_sys::CPLFree(c_report as *mut std::ffi::c_void);
            gdal_sys::GDALInfoOptionsFree(options);
            Ok(report)
        }
    }

    /// Read a single band (1-based index) as an f64 ndarray of shape
    /// (height, width).
    pub fn read_band_f64(&self, index: usize) -> Result<Array2<f64>, RasterError> {
        if index == 0 || index > self.metadata.bands {
            return Err(RasterError::Unsupported(format!(
                "Band index {} out of range",
                index
            )));
        }
        let band = self.dataset.rasterband(index)?;
        let window = (self.metadata.size_x, self.metadata.size_y);
        let buf = band.read_as::<f64>((0, 0), window, window, None)?;
        let data_vec = buf.data().to_vec();
        Array2::from_shape_vec((self.metadata.size_y, self.metadata.size_x), data_vec)
            .map_err(|_| RasterError::DimensionMismatch(self.metadata.size_x, self.metadata.size_y))
    }

    /// Nodata marker of a band, if declared.
    pub fn no_data_value(&self, index: usize) -> Result<Option<f64>, RasterError> {
        Ok(self.dataset.rasterband(index)?.no_data_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utm_epsg_codes_resolve_to_zones() {
        assert_eq!(utm_zone_from_epsg(32618), Some((18, true)));
        assert_eq!(utm_zone_from_epsg(32733), Some((33, false)));
        assert_eq!(utm_zone_from_epsg(4326), None);
        assert_eq!(utm_zone_from_epsg(32661), None);
    }

    #[test]
    fn wkt_zone_names_are_scanned() {
        let wkt = r#"PROJCS["WGS 84 / UTM zone 18N",GEOGCS["WGS 84"]]"#;
        assert_eq!(parse_utm_zone(wkt), Some((18, true)));
        let wkt = r#"PROJCS["WGS 84 / UTM zone 33S",GEOGCS["WGS 84"]]"#;
        assert_eq!(parse_utm_zone(wkt), Some((33, false)));
        assert_eq!(parse_utm_zone("GEOGCS[\"WGS 84\"]"), None);
        assert_eq!(parse_utm_zone("PROJCS[\"UTM zone 99N\"]"), None);
    }
}
