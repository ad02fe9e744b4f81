//! Crate-level error type and `Result` alias. Converts underlying I/O and
//! GDAL errors and provides semantic variants for argument validation and
//! clipping failures.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("No geometry or CRS could be derived from cut file {path:?}")]
    EmptyCutFile { path: PathBuf },

    #[error("KML write error: {0}")]
    Kml(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }
}
