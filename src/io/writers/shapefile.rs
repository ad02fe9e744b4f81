//! ESRI Shapefile output for the bounding-box builder: the box polygon in
//! WGS84 with a single NAME attribute. The OGR driver emits the `.prj`
//! sidecar from the layer SRS.
use std::path::{Path, PathBuf};

use gdal::DriverManager;
use gdal::spatial_ref::{AxisMappingStrategy, SpatialRef};
use gdal::vector::{
    Feature, FieldDefn, Geometry, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType,
};

use crate::core::coords::GeoCoord;
use crate::error::Result;

/// Sibling `.shp` path for a chosen KML path (`area.kml` → `area.shp`).
pub fn shapefile_path_for(kml_path: &Path) -> PathBuf {
    kml_path.with_extension("shp")
}

fn bbox_polygon(corners: &[GeoCoord]) -> Result<Geometry> {
    let mut ring = Geometry::empty(OGRwkbGeometryType::wkbLinearRing)?;
    for c in corners {
        ring.add_point_2d((c.lon, c.lat));
    }
    if let Some(first) = corners.first() {
        ring.add_point_2d((first.lon, first.lat));
    }
    let mut polygon = Geometry::empty(OGRwkbGeometryType::wkbPolygon)?;
    polygon.add_geometry(ring)?;
    Ok(polygon)
}

/// Write the named bounding-box polygon as a WGS84 shapefile.
pub fn write_bbox_shapefile(path: &Path, name: &str, corners: &[GeoCoord]) -> Result<()> {
    for ext in ["shp", "shx", "dbf", "prj", "cpg"] {
        let sidecar = path.with_extension(ext);
        if sidecar.exists() {
            std::fs::remove_file(sidecar)?;
        }
    }

    let mut srs = SpatialRef::from_epsg(4326)?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    let driver = DriverManager::get_driver_by_name("ESRI Shapefile")?;
    let mut out_ds = driver.create_vector_only(path)?;
    let layer = out_ds.create_layer(LayerOptions {
        name: "bounding_box",
        srs: Some(&srs),
        ty: OGRwkbGeometryType::wkbPolygon,
        ..Default::default()
    })?;

    let name_field = FieldDefn::new("NAME", OGRFieldType::OFTString)?;
    name_field.add_to_layer(&layer)?;

    let mut feature = Feature::new(layer.defn())?;
    feature.set_geometry(bbox_polygon(corners)?)?;
    let name_idx = feature.field_index("NAME")?;
    feature.set_field_string(name_idx, name)?;
    feature.create(&layer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shp_path_replaces_extension() {
        assert_eq!(
            shapefile_path_for(Path::new("/tmp/area.kml")),
            PathBuf::from("/tmp/area.shp")
        );
        assert_eq!(
            shapefile_path_for(Path::new("area")),
            PathBuf::from("area.shp")
        );
    }
}
