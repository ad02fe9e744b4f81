use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gisknife", version, about = "GISKNIFE CLI")]
pub struct CliArgs {
    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a bounding box around a centroid and export it as KML/SHP
    Bbox {
        /// Name of the exported KML object
        #[arg(long, default_value = "Bounding Box")]
        name: String,

        /// Centroid latitude in degrees (lat/lon mode)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Centroid longitude in degrees (lat/lon mode)
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Centroid easting in meters (UTM mode)
        #[arg(long, allow_hyphen_values = true)]
        easting: Option<f64>,

        /// Centroid northing in meters (UTM mode)
        #[arg(long, allow_hyphen_values = true)]
        northing: Option<f64>,

        /// UTM zone 1-60 (UTM mode)
        #[arg(long)]
        zone: Option<u32>,

        /// Use the southern hemisphere variant of the zone
        #[arg(long, default_value_t = false)]
        south: bool,

        /// Box width in meters
        #[arg(long, default_value_t = 1000.0)]
        width: f64,

        /// Box height in meters
        #[arg(long, default_value_t = 1000.0)]
        height: f64,

        /// Round the UTM centroid to the nearest this many meters
        #[arg(long, default_value_t = 10.0)]
        round: f64,

        /// Output KML path
        #[arg(short, long)]
        kml: PathBuf,

        /// Also write an ESRI Shapefile next to the KML
        #[arg(long, default_value_t = false)]
        shp: bool,
    },

    /// Print the GDAL info report and bounding-box summary of a raster
    Info {
        /// Raster file to inspect
        file: PathBuf,
    },

    /// Clip a batch of raster/vector files to the extent of a cut file
    Cut {
        /// Input files to clip (repeatable)
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Raster or vector file supplying the cut geometry
        #[arg(long)]
        cut_file: PathBuf,

        /// Output directory
        #[arg(long)]
        out_dir: PathBuf,

        /// Filename postfix (defaults to a _YYYYmmdd_HHMMSS timestamp)
        #[arg(long)]
        postfix: Option<String>,
    },
}
