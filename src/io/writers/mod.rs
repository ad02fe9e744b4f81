pub mod kml;
pub mod shapefile;
