#![doc = r#"
GISKNIFE — a GIS data swiss army knife.

This crate backs a small desktop utility (and companion CLI) for everyday
geospatial chores: building KML/Shapefile bounding boxes around a centroid,
inspecting raster metadata, visualizing a raster band, and batch-clipping
raster/vector files to a cut geometry. All heavy lifting (raster and
vector I/O, reprojection, warping) is delegated to GDAL/OGR/OSR; the crate
itself contributes coordinate/bbox arithmetic, a nearest-city sanity check,
and the UI glue.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Add dependency
--------------
```toml
[dependencies]
gisknife = { version = "0.1", features = ["full"] }
```

Quick start: export a bounding box
----------------------------------
```rust,no_run
use std::path::Path;
use gisknife::{BboxParams, Centroid, GeoCoord, export_bbox};

fn main() -> gisknife::Result<()> {
    let params = BboxParams {
        name: "Survey Area".to_string(),
        centroid: Centroid::Geo(GeoCoord { lat: 38.8895, lon: -77.0353 }),
        round_step: 10.0,
        width_m: 1000.0,
        height_m: 1000.0,
    };

    let resolved = export_bbox(&params, Path::new("/out/area.kml"), true)?;
    if let Some(info) = resolved.box_info()? {
        println!("{}", info.utm_line());
    }
    Ok(())
}
```

Inspect a raster
----------------
```rust,no_run
use std::path::Path;
use gisknife::inspect_file;

fn main() -> gisknife::Result<()> {
    let report = inspect_file(Path::new("/data/dem.tif"))?;
    println!("{}", report.info_text);
    if let Some(info) = report.box_info {
        println!("{} / {}", info.geo_line(), info.city_line());
    }
    Ok(())
}
```

Batch clipping
--------------
```rust,no_run
use std::path::{Path, PathBuf};
use gisknife::batch_cut;

fn main() -> gisknife::Result<()> {
    let inputs = vec![PathBuf::from("/data/dem.tif"), PathBuf::from("/data/roads.shp")];
    let report = batch_cut(&inputs, Path::new("/data/aoi.kml"), Path::new("/out"), "_clip")?;
    println!("{}", report.summary());
    Ok(())
}
```

Error handling
--------------
All public functions return `gisknife::Result<T>`; match on
`gisknife::Error` to handle specific cases, e.g. GDAL or warp errors.

Feature flags
-------------
- `gui`: builds the egui GUI module.
- `full`: enables a complete feature set for typical end-to-end workflows.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — bbox/coordinate arithmetic, city lookup, extent aggregation.
- [`io`] — GDAL/OGR readers, clippers, and the KML/Shapefile writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// GUI module (only available with gui feature)
#[cfg(feature = "gui")]
pub mod gui;

// Curated public API surface
// Types
pub use core::bbox::BoundingBox;
pub use core::cities::{CITIES, City, nearest_city};
pub use core::coords::{
    GeoCoord, UtmCoord, geo_to_utm, geo_to_utm_zone, meters_to_miles, round_to_nearest,
    utm_epsg, utm_to_geo, utm_zone_from_lon,
};
pub use core::extent::{BoxInfo, Extent};
pub use error::{Error, Result};
pub use types::{CoordMode, DatasetKind, RASTER_EXTENSIONS};

// Readers
pub use io::raster::{RasterError, RasterMetadata, RasterSummary};

// Selected writer helpers
pub use io::writers::kml::{kml_document, write_kml};
pub use io::writers::shapefile::write_bbox_shapefile;

// High-level API re-exports
pub use api::{
    BatchReport, BboxParams, Centroid, FileReport, ResolvedBbox, batch_cut, cut_geometry_and_srs,
    cut_output_path, export_bbox, inspect_file, is_raster_path,
};
