use std::path::PathBuf;

use tracing::{info, warn};

use gisknife::api::{BatchReport, BboxParams, Centroid, batch_cut, export_bbox, inspect_file};
use gisknife::core::coords::{GeoCoord, UtmCoord};
use gisknife::core::extent::BoxInfo;

use super::args::{CliArgs, Command};
use super::errors::AppError;

fn centroid_from_args(
    lat: Option<f64>,
    lon: Option<f64>,
    easting: Option<f64>,
    northing: Option<f64>,
    zone: Option<u32>,
    south: bool,
) -> Result<Centroid, AppError> {
    let has_geo = lat.is_some() || lon.is_some();
    let has_utm = easting.is_some() || northing.is_some() || zone.is_some();
    if has_geo && has_utm {
        return Err(AppError::AmbiguousCentroid);
    }
    if has_geo {
        let lat = lat.ok_or(AppError::MissingArgument {
            arg: "--lat".to_string(),
        })?;
        let lon = lon.ok_or(AppError::MissingArgument {
            arg: "--lon".to_string(),
        })?;
        return Ok(Centroid::Geo(GeoCoord { lat, lon }));
    }
    let easting = easting.ok_or(AppError::MissingArgument {
        arg: "--easting".to_string(),
    })?;
    let northing = northing.ok_or(AppError::MissingArgument {
        arg: "--northing".to_string(),
    })?;
    let zone = zone.ok_or(AppError::MissingArgument {
        arg: "--zone".to_string(),
    })?;
    if !(1..=60).contains(&zone) {
        return Err(AppError::InvalidZone { zone });
    }
    Ok(Centroid::Utm(UtmCoord {
        easting,
        northing,
        zone,
        north: !south,
    }))
}

fn print_box_info(info: &BoxInfo) {
    println!("Nearest major city:     {}", info.city_line());
    println!("UTM bounding box:       {}", info.utm_line());
    println!("Lat/Long bounding box:  {}", info.geo_line());
    println!("Width/Height (meters):  {}", info.size_m_line());
    println!("Width/Height (miles):   {}", info.size_mi_line());
}

fn default_postfix() -> String {
    chrono::Local::now().format("_%Y%m%d_%H%M%S").to_string()
}

fn report_batch(report: &BatchReport) -> Result<(), AppError> {
    info!("Processed: {}", report.processed);
    if report.is_clean() {
        info!("Batch cut completed successfully");
        return Ok(());
    }
    for (path, err) in &report.failed {
        warn!("Error processing {:?}: {}", path, err);
    }
    Err(AppError::BatchFailures {
        count: report.failed.len(),
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    match args.command {
        Command::Bbox {
            name,
            lat,
            lon,
            easting,
            northing,
            zone,
            south,
            width,
            height,
            round,
            kml,
            shp,
        } => {
            let params = BboxParams {
                name,
                centroid: centroid_from_args(lat, lon, easting, northing, zone, south)?,
                round_step: round,
                width_m: width,
                height_m: height,
            };
            let resolved = export_bbox(&params, &kml, shp)?;
            if let Some(info) = resolved.box_info()? {
                print_box_info(&info);
            }
            Ok(())
        }
        Command::Info { file } => {
            let report = inspect_file(&file)?;
            println!("{}", report.info_text);
            if let Some(info) = &report.box_info {
                print_box_info(info);
            }
            Ok(())
        }
        Command::Cut {
            input,
            cut_file,
            out_dir,
            postfix,
        } => {
            let postfix = postfix.unwrap_or_else(default_postfix);
            let inputs: Vec<PathBuf> = input;
            info!(
                "Starting batch cut: {} input(s), cut file {:?}",
                inputs.len(),
                cut_file
            );
            let report = batch_cut(&inputs, &cut_file, &out_dir, &postfix)?;
            report_batch(&report)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_modes_are_mutually_exclusive() {
        let err = centroid_from_args(Some(38.0), None, Some(500_000.0), None, None, false);
        assert!(matches!(err, Err(AppError::AmbiguousCentroid)));
    }

    #[test]
    fn geo_centroid_requires_both_angles() {
        let err = centroid_from_args(Some(38.0), None, None, None, None, false);
        assert!(matches!(err, Err(AppError::MissingArgument { .. })));
        let ok = centroid_from_args(Some(38.0), Some(-77.0), None, None, None, false).unwrap();
        assert!(matches!(ok, Centroid::Geo(_)));
    }

    #[test]
    fn utm_centroid_validates_zone() {
        let err = centroid_from_args(None, None, Some(1.0), Some(2.0), Some(61), false);
        assert!(matches!(err, Err(AppError::InvalidZone { zone: 61 })));
        let ok = centroid_from_args(None, None, Some(1.0), Some(2.0), Some(18), true).unwrap();
        match ok {
            Centroid::Utm(utm) => assert!(!utm.north),
            _ => unreachable!(),
        }
    }

    #[test]
    fn postfix_is_timestamp_shaped() {
        let postfix = default_postfix();
        assert_eq!(postfix.len(), "_YYYYmmdd_HHMMSS".len());
        assert!(postfix.starts_with('_'));
    }
}
