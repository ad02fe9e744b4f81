use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Provide either --lat/--lon or --easting/--northing/--zone")]
    AmbiguousCentroid,

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Invalid UTM zone: {zone}. Must be between 1 and 60")]
    InvalidZone { zone: u32 },

    #[error("{count} file(s) failed to process")]
    BatchFailures { count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
