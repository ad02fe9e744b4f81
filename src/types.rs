//! Shared types and enums used across GISKNIFE.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which coordinate system the bbox builder form takes its centroid in.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum CoordMode {
    Utm,
    LatLon,
}

impl std::fmt::Display for CoordMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CoordMode::Utm => "UTM",
            CoordMode::LatLon => "Lat/Long",
        };
        write!(f, "{}", s)
    }
}

/// Kind of dataset a batch-cut input resolved to.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum DatasetKind {
    Raster,
    Vector,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Raster => write!(f, "raster"),
            DatasetKind::Vector => write!(f, "vector"),
        }
    }
}

/// Raster extensions recognized without probing GDAL first. Matches the
/// file-dialog filter list.
pub const RASTER_EXTENSIONS: &[&str] = &["tif", "tiff", "img", "vrt", "asc", "bil", "nc"];
