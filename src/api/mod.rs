//! High-level, ergonomic library API: resolve bounding-box parameter sets to
//! KML/Shapefile outputs, summarize files for the info panels, and run
//! batch clips. Prefer these entrypoints over the low-level `io` modules
//! when embedding GISKNIFE.
use std::path::{Path, PathBuf};

use gdal::Dataset;
use gdal::spatial_ref::SpatialRef;
use gdal::vector::{Geometry, OGRwkbGeometryType};
use tracing::{info, warn};

use crate::core::bbox::BoundingBox;
use crate::core::coords::{GeoCoord, UtmCoord, geo_to_utm, round_to_nearest, utm_to_geo};
use crate::core::extent::{BoxInfo, Extent};
use crate::error::{Error, Result};
use crate::io::raster::RasterSummary;
use crate::io::vector::read_union_geometry;
use crate::io::writers::kml::write_kml;
use crate::io::writers::shapefile::write_bbox_shapefile;
use crate::types::{DatasetKind, RASTER_EXTENSIONS};

/// Centroid input of the bbox builder, in whichever CRS the user typed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Centroid {
    Utm(UtmCoord),
    Geo(GeoCoord),
}

/// Everything the bbox builder needs to resolve a box.
#[derive(Debug, Clone, PartialEq)]
pub struct BboxParams {
    pub name: String,
    pub centroid: Centroid,
    /// Round the UTM centroid to the nearest this many meters.
    pub round_step: f64,
    pub width_m: f64,
    pub height_m: f64,
}

/// A resolved box: UTM corners in one zone, ready for display or export.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBbox {
    pub utm_box: BoundingBox,
    pub zone: u32,
    pub north: bool,
}

impl BboxParams {
    /// Round the UTM centroid, then build the symmetric box around it.
    pub fn resolve(&self) -> Result<ResolvedBbox> {
        if self.round_step <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "round_step",
                value: self.round_step.to_string(),
            });
        }
        if self.width_m <= 0.0 || self.height_m <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "width/height",
                value: format!("{}x{}", self.width_m, self.height_m),
            });
        }
        let utm = match self.centroid {
            Centroid::Utm(utm) => utm,
            Centroid::Geo(geo) => geo_to_utm(geo)?,
        };
        let easting = round_to_nearest(utm.easting, self.round_step);
        let northing = round_to_nearest(utm.northing, self.round_step);
        Ok(ResolvedBbox {
            utm_box: BoundingBox::from_centroid(easting, northing, self.width_m, self.height_m),
            zone: utm.zone,
            north: utm.north,
        })
    }
}

impl ResolvedBbox {
    pub fn extent(&self) -> Extent {
        Extent::Utm {
            corners: self.utm_box.corners().to_vec(),
            zone: self.zone,
            north: self.north,
        }
    }

    /// Corners converted to WGS84, in the exporters' TL,TR,BR,BL order.
    pub fn geo_corners(&self) -> Result<Vec<GeoCoord>> {
        self.utm_box
            .corners()
            .iter()
            .map(|&(easting, northing)| {
                utm_to_geo(UtmCoord {
                    easting,
                    northing,
                    zone: self.zone,
                    north: self.north,
                })
            })
            .collect()
    }

    pub fn box_info(&self) -> Result<Option<BoxInfo>> {
        BoxInfo::from_extent(&self.extent())
    }
}

/// Resolve the parameters and write the KML (and optionally the sibling
/// shapefile). Returns the resolved box for display.
pub fn export_bbox(params: &BboxParams, kml_path: &Path, with_shapefile: bool) -> Result<ResolvedBbox> {
    let resolved = params.resolve()?;
    let corners = resolved.geo_corners()?;
    write_kml(kml_path, &params.name, &corners)?;
    info!("Wrote KML bounding box to {:?}", kml_path);
    if with_shapefile {
        let shp_path = crate::io::writers::shapefile::shapefile_path_for(kml_path);
        write_bbox_shapefile(&shp_path, &params.name, &corners)?;
        info!("Wrote shapefile bounding box to {:?}", shp_path);
    }
    Ok(resolved)
}

/// Report for the file-info panel: the GDAL info dump plus the normalized
/// extent and its display aggregation.
#[derive(Debug)]
pub struct FileReport {
    pub info_text: String,
    pub extent: Extent,
    pub box_info: Option<BoxInfo>,
}

/// Summarize a raster file for the info panel.
pub fn inspect_file(path: &Path) -> Result<FileReport> {
    let summary = RasterSummary::open(path).map_err(Error::external)?;
    let info_text = summary.info_text().map_err(Error::external)?;
    let extent = summary.extent();
    let box_info = BoxInfo::from_extent(&extent)?;
    Ok(FileReport {
        info_text,
        extent,
        box_info,
    })
}

/// Extension list first, GDAL open probe second.
pub fn is_raster_path(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if RASTER_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return true;
        }
    }
    match Dataset::open(path) {
        Ok(ds) => ds.raster_count() > 0,
        Err(_) => false,
    }
}

/// Cut geometry and CRS of a cut file: rasters contribute their
/// geotransform envelope, vectors the union of their features.
pub fn cut_geometry_and_srs(path: &Path) -> Result<(Geometry, Option<SpatialRef>)> {
    if let Ok(summary) = RasterSummary::open(path) {
        let corners = summary.native_corners();
        let bbox = BoundingBox::from_corners(&corners).ok_or_else(|| Error::EmptyCutFile {
            path: path.to_path_buf(),
        })?;
        let mut ring = Geometry::empty(OGRwkbGeometryType::wkbLinearRing)?;
        for (x, y) in bbox.corners() {
            ring.add_point_2d((x, y));
        }
        ring.add_point_2d((bbox.west, bbox.north));
        let mut geom = Geometry::empty(OGRwkbGeometryType::wkbPolygon)?;
        geom.add_geometry(ring)?;
        let srs = summary.dataset.spatial_ref().ok();
        return Ok((geom, srs));
    }
    match read_union_geometry(path) {
        Ok((geom, srs)) => Ok((geom, srs)),
        Err(_) => Err(Error::EmptyCutFile {
            path: path.to_path_buf(),
        }),
    }
}

/// Aggregate result of a batch cut. Failures never abort the batch; they
/// are collected per file and reported at the end.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_clean() {
            format!("Batch cut completed: {} file(s) processed", self.processed)
        } else {
            let mut msg = format!(
                "Batch cut finished: {} processed, {} failed\n",
                self.processed,
                self.failed.len()
            );
            for (path, err) in &self.failed {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                msg.push_str(&format!("  {}: {}\n", name, err));
            }
            msg
        }
    }
}

/// Output path for one batch-cut input: `<out_dir>/<stem><postfix><ext>`.
pub fn cut_output_path(input: &Path, out_dir: &Path, postfix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    out_dir.join(format!("{}{}{}", stem, postfix, ext))
}

/// Clip every input against the cut file, writing results into `out_dir`.
pub fn batch_cut(
    inputs: &[PathBuf],
    cut_file: &Path,
    out_dir: &Path,
    postfix: &str,
) -> Result<BatchReport> {
    let (cut_geom, cut_srs) = cut_geometry_and_srs(cut_file)?;
    std::fs::create_dir_all(out_dir)?;

    let mut report = BatchReport::default();
    for input in inputs {
        let output = cut_output_path(input, out_dir, postfix);
        let kind = if is_raster_path(input) {
            DatasetKind::Raster
        } else {
            DatasetKind::Vector
        };
        info!("Cutting {} {:?} -> {:?}", kind, input, output);
        let outcome = match kind {
            DatasetKind::Raster => {
                crate::io::warp::clip_raster(input, &output, &cut_geom, cut_srs.as_ref())
                    .map_err(|e| e.to_string())
            }
            DatasetKind::Vector => {
                crate::io::vector::clip_vector(input, &output, &cut_geom, cut_srs.as_ref())
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }
        };
        match outcome {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("Failed to cut {:?}: {}", input, e);
                report.failed.push((input.clone(), e));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utm_params_resolve_without_transforms() {
        let params = BboxParams {
            name: "test".into(),
            centroid: Centroid::Utm(UtmCoord {
                easting: 323_486.3,
                northing: 4_306_479.9,
                zone: 18,
                north: true,
            }),
            round_step: 10.0,
            width_m: 1000.0,
            height_m: 500.0,
        };
        let resolved = params.resolve().unwrap();
        // centroid rounded to 323490 / 4306480 before the box is built
        assert_eq!(resolved.utm_box.west, 322_990.0);
        assert_eq!(resolved.utm_box.east, 323_990.0);
        assert_eq!(resolved.utm_box.south, 4_306_230.0);
        assert_eq!(resolved.utm_box.north, 4_306_730.0);
        assert_eq!(resolved.zone, 18);
        assert!(resolved.north);
    }

    #[test]
    fn degenerate_params_are_rejected() {
        let mut params = BboxParams {
            name: String::new(),
            centroid: Centroid::Utm(UtmCoord {
                easting: 500_000.0,
                northing: 0.0,
                zone: 31,
                north: true,
            }),
            round_step: 0.0,
            width_m: 1000.0,
            height_m: 1000.0,
        };
        assert!(params.resolve().is_err());
        params.round_step = 1.0;
        params.width_m = 0.0;
        assert!(params.resolve().is_err());
    }

    #[test]
    fn output_paths_keep_stem_and_extension() {
        let out = cut_output_path(
            Path::new("/data/scene.tif"),
            Path::new("/out"),
            "_20260806_120000",
        );
        assert_eq!(out, PathBuf::from("/out/scene_20260806_120000.tif"));
        let out = cut_output_path(Path::new("/data/roads.shp"), Path::new("/out"), "_cut");
        assert_eq!(out, PathBuf::from("/out/roads_cut.shp"));
    }

    #[test]
    fn extension_dispatch_recognizes_rasters() {
        // Extension matches are decided without touching the filesystem.
        assert!(is_raster_path(Path::new("missing-but-named.tif")));
        assert!(is_raster_path(Path::new("UPPER.TIFF")));
    }
}
