//! Raster clipping through the `GDALWarp` application API. The
//! `GDALWarpAppOptions` struct is opaque, so options travel as the same
//! argument strings the `gdalwarp` executable takes.
use std::ffi::CString;
use std::io::Write;
use std::path::Path;

use gdal::Dataset;
use gdal::cpl::CslStringList;
use gdal::spatial_ref::SpatialRef;
use gdal::vector::Geometry;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::io::vector::{VectorError, geometry_in_srs};

#[derive(Debug, Error)]
pub enum WarpError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Vector error: {0}")]
    Vector(#[from] VectorError),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("GDALWarp failed: {0}")]
    Failed(String),
}

// extension → GDAL raster driver short name, for outputs whose extension
// GDAL cannot infer on its own
fn driver_name_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "tif" | "tiff" => Some("GTiff"),
        "img" => Some("HFA"),
        "vrt" => Some("VRT"),
        "asc" => Some("AAIGrid"),
        "bil" => Some("EHdr"),
        "nc" => Some("netCDF"),
        _ => None,
    }
}

// The warp cutline must be a datasource; export the geometry to a GeoJSON
// sidecar that lives for the duration of the call.
fn cutline_sidecar(geom: &Geometry) -> Result<NamedTempFile, WarpError> {
    let mut file = tempfile::Builder::new()
        .prefix("gisknife_cutline_")
        .suffix(".geojson")
        .tempfile()?;
    let feature = format!(
        "{{\"type\":\"FeatureCollection\",\"features\":[{{\"type\":\"Feature\",\"properties\":{{}},\"geometry\":{}}}]}}",
        geom.json()?
    );
    file.write_all(feature.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn c_path(path: &Path) -> Result<CString, WarpError> {
    let s = path
        .to_str()
        .ok_or_else(|| WarpError::InvalidPath(path.display().to_string()))?;
    Ok(CString::new(s).map_err(|_| WarpError::InvalidPath(s.to_string()))?)
}

/// Clip `input` to `cut_geom` (reprojected into the raster CRS when both
/// CRS are known and differ) and write the cropped result to `output`.
pub fn clip_raster(
    input: &Path,
    output: &Path,
    cut_geom: &Geometry,
    cut_srs: Option<&SpatialRef>,
) -> Result<(), WarpError> {
    let src = Dataset::open(input)?;
    let src_srs = src.spatial_ref().ok();
    let cutter = geometry_in_srs(cut_geom, cut_srs, src_srs.as_ref())?;
    let sidecar = cutline_sidecar(&cutter)?;

    let mut args = CslStringList::new();
    args.add_string("-cutline")?;
    args.add_string(&sidecar.path().display().to_string())?;
    args.add_string("-crop_to_cutline")?;
    if let Some(driver) = output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(driver_name_for_extension)
    {
        args.add_string("-of")?;
        args.add_string(driver)?;
    }

    let dest = c_path(output)?;
    debug!("Warping {:?} -> {:?} with cutline", input, output);
    unsafe {
        let options = gdal_sys::GDALWarpAppOptionsNew(
            args.as_ptr() as *mut *mut std::ffi::c_char,
            std::ptr::null_mut(),
        );
        if options.is_null() {
            return Err(WarpError::Failed("could not parse warp options".into()));
        }
        let mut src_handles = [src.c_dataset()];
        let mut usage_error: std::ffi::c_int = 0;
        let result = gdal_sys::GDALWarp(
            dest.as_ptr(),
            std::ptr::null_mut(),
            1,
            src_handles.as_mut_ptr(),
            options,
            &mut usage_error,
        );
        gdal_sys::GDALWarpAppOptionsFree(options);
        if result.is_null() {
            return Err(WarpError::Failed(format!(
                "no output produced for {:?}",
                input
            )));
        }
        gdal_sys::GDALClose(result);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_drivers() {
        assert_eq!(driver_name_for_extension("tif"), Some("GTiff"));
        assert_eq!(driver_name_for_extension("TIFF"), Some("GTiff"));
        assert_eq!(driver_name_for_extension("img"), Some("HFA"));
        assert_eq!(driver_name_for_extension("nc"), Some("netCDF"));
        assert_eq!(driver_name_for_extension("xyz"), None);
    }
}
