//! I/O layer over GDAL/OGR: raster summaries, vector reading/clipping,
//! warp-based raster clipping, and the KML/Shapefile `writers`.
pub mod raster;
pub use raster::{RasterError, RasterMetadata, RasterSummary};

pub mod vector;
pub use vector::VectorError;

pub mod warp;
pub use warp::WarpError;

pub mod writers;
