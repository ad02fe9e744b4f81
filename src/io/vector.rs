use std::path::Path;

use gdal::spatial_ref::{CoordTransform, SpatialRef};
use gdal::vector::{Feature, FieldDefn, Geometry, LayerAccess, LayerOptions, OGRwkbGeometryType};
use gdal::{Dataset, DriverManager};
use thiserror::Error;
use tracing::debug;

/// Errors encountered while reading or clipping vector datasets.
#[derive(Debug, Error)]
pub enum VectorError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
    #[error("Dataset has no layers: {0}")]
    NoLayers(String),
    #[error("Dataset has no usable geometry: {0}")]
    NoGeometry(String),
}

/// Union of all feature geometries of the first layer, plus the layer SRS.
pub fn read_union_geometry<P: AsRef<Path>>(
    path: P,
) -> Result<(Geometry, Option<SpatialRef>), VectorError> {
    let path = path.as_ref();
    let dataset = Dataset::open(path)?;
    if dataset.layer_count() == 0 {
        return Err(VectorError::NoLayers(path.display().to_string()));
    }
    let mut layer = dataset.layer(0)?;
    let srs = layer.spatial_ref();
    let mut union: Option<Geometry> = None;
    for feature in layer.features() {
        let Some(geom) = feature.geometry() else {
            continue;
        };
        union = Some(match union {
            None => geom.clone(),
            Some(acc) => acc
                .union(geom)
                .ok_or_else(|| VectorError::NoGeometry(path.display().to_string()))?,
        });
    }
    let union = union.ok_or_else(|| VectorError::NoGeometry(path.display().to_string()))?;
    Ok((union, srs))
}

/// Reproject `geom` into `target` when both CRS are known and differ.
/// With either side unknown the geometry passes through untouched.
pub fn geometry_in_srs(
    geom: &Geometry,
    source: Option<&SpatialRef>,
    target: Option<&SpatialRef>,
) -> Result<Geometry, VectorError> {
    if let (Some(source), Some(target)) = (source, target) {
        if source != target {
            let transform = CoordTransform::new(source, target)?;
            return Ok(geom.transform(&transform)?);
        }
    }
    Ok(geom.clone())
}

// Shapefiles come with sidecar files; clear all of them before rewriting.
fn remove_stale_shapefile(path: &Path) {
    for ext in ["shp", "shx", "dbf", "prj", "cpg"] {
        let sidecar = path.with_extension(ext);
        if sidecar.exists() {
            let _ = std::fs::remove_file(sidecar);
        }
    }
}

/// Clip every feature of `input` against `cut_geom` and write the result
/// as an ESRI Shapefile with the input's fields and SRS. Features whose
/// intersection is empty are dropped.
pub fn clip_vector(
    input: &Path,
    output: &Path,
    cut_geom: &Geometry,
    cut_srs: Option<&SpatialRef>,
) -> Result<usize, VectorError> {
    let dataset = Dataset::open(input)?;
    if dataset.layer_count() == 0 {
        return Err(VectorError::NoLayers(input.display().to_string()));
    }
    let mut layer = dataset.layer(0)?;
    let srs = layer.spatial_ref();
    let cutter = geometry_in_srs(cut_geom, cut_srs, srs.as_ref())?;

    remove_stale_shapefile(output);
    let geom_type = layer
        .defn()
        .geom_fields()
        .next()
        .map(|g| g.field_type())
        .unwrap_or(OGRwkbGeometryType::wkbUnknown);
    let driver = DriverManager::get_driver_by_name("ESRI Shapefile")?;
    let mut out_ds = driver.create_vector_only(output)?;
    let out_layer = out_ds.create_layer(LayerOptions {
        name: &layer.name(),
        srs: srs.as_ref(),
        ty: geom_type,
        ..Default::default()
    })?;

    // Mirror the input schema
    let field_names: Vec<String> = layer.defn().fields().map(|f| f.name()).collect();
    for field in layer.defn().fields() {
        let defn = FieldDefn::new(&field.name(), field.field_type())?;
        defn.add_to_layer(&out_layer)?;
    }

    let mut written = 0usize;
    for feature in layer.features() {
        let Some(geom) = feature.geometry() else {
            continue;
        };
        let Some(clipped) = geom.intersection(&cutter) else {
            continue;
        };
        if clipped.is_empty() {
            continue;
        }
        let mut out_feature = Feature::new(out_layer.defn())?;
        out_feature.set_geometry(clipped)?;
        for name in &field_names {
            let in_idx = feature.field_index(name)?;
            if let Some(value) = feature.field(in_idx)? {
                let out_idx = out_feature.field_index(name)?;
                out_feature.set_field(out_idx, &value)?;
            }
        }
        out_feature.create(&out_layer)?;
        written += 1;
    }
    debug!("Clipped {:?}: {} features kept", input, written);
    Ok(written)
}
