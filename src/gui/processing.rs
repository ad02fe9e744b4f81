use super::models::GisknifeGui;
use crate::api::{BboxParams, Centroid, batch_cut};
use crate::core::coords::{GeoCoord, UtmCoord, geo_to_utm};
use crate::core::extent::BoxInfo;
use crate::core::render::{BandStats, colorize_band, legend_strip};
use crate::io::raster::RasterSummary;
use crate::types::{CoordMode, RASTER_EXTENSIONS};
use eframe::egui;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

/// GUI-specific errors
#[derive(Debug, Error)]
pub enum GuiError {
    #[error("Please add at least one input file")]
    NoInputFiles,

    #[error("Please select a cut file")]
    NoCutFile,

    #[error("Please select an output directory")]
    NoOutputDirectory,

    #[error("A batch cut is already running")]
    AlreadyProcessing,
}

impl GisknifeGui {
    /// Recompute the bbox builder readout after a form change. In lat/lon
    /// mode the UTM form fields are kept in sync so switching modes starts
    /// from the same centroid.
    pub fn refresh_bbox_info(&mut self) {
        if !self.bbox_dirty {
            return;
        }
        self.bbox_dirty = false;

        let centroid = match self.coord_mode {
            CoordMode::Utm => Centroid::Utm(UtmCoord {
                easting: self.utm_easting,
                northing: self.utm_northing,
                zone: self.utm_zone,
                north: self.utm_north,
            }),
            CoordMode::LatLon => {
                let geo = GeoCoord {
                    lat: self.lat,
                    lon: self.lon,
                };
                match geo_to_utm(geo) {
                    Ok(utm) => {
                        self.utm_easting = utm.easting;
                        self.utm_northing = utm.northing;
                        self.utm_zone = utm.zone;
                        self.utm_north = utm.north;
                    }
                    Err(e) => {
                        self.bbox_info = None;
                        self.bbox_error = Some(e.to_string());
                        return;
                    }
                }
                Centroid::Geo(geo)
            }
        };

        let params = BboxParams {
            name: self.kml_name.clone(),
            centroid,
            round_step: self.round_step as f64,
            width_m: self.width_m as f64,
            height_m: self.height_m as f64,
        };
        match params.resolve().and_then(|resolved| resolved.box_info()) {
            Ok(info) => {
                self.bbox_info = info;
                self.bbox_error = None;
            }
            Err(e) => {
                self.bbox_info = None;
                self.bbox_error = Some(e.to_string());
            }
        }
    }

    pub fn current_bbox_params(&self) -> BboxParams {
        let centroid = match self.coord_mode {
            CoordMode::Utm => Centroid::Utm(UtmCoord {
                easting: self.utm_easting,
                northing: self.utm_northing,
                zone: self.utm_zone,
                north: self.utm_north,
            }),
            CoordMode::LatLon => Centroid::Geo(GeoCoord {
                lat: self.lat,
                lon: self.lon,
            }),
        };
        BboxParams {
            name: self.kml_name.clone(),
            centroid,
            round_step: self.round_step as f64,
            width_m: self.width_m as f64,
            height_m: self.height_m as f64,
        }
    }

    /// "Create Bounding Box": ask for the KML target and export.
    pub fn export_bbox_interactive(&mut self) {
        self.bbox_dirty = true;
        self.refresh_bbox_info();
        if let Some(err) = &self.bbox_error {
            error!("Cannot export bounding box: {}", err);
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("KML Files", &["kml"])
            .set_file_name("bounding_box.kml")
            .save_file()
        else {
            return;
        };
        match crate::api::export_bbox(&self.current_bbox_params(), &path, self.save_shp) {
            Ok(_) => info!("Bounding box exported to {:?}", path),
            Err(e) => error!("Bounding box export failed: {}", e),
        }
    }

    pub fn select_info_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Raster Files", RASTER_EXTENSIONS)
            .pick_file()
        {
            info!("Selected raster for inspection: {:?}", path);
            self.load_info_file(path);
        } else {
            self.info_file = None;
            self.info_text.clear();
            self.info_box = None;
        }
    }

    fn load_info_file(&mut self, path: PathBuf) {
        match crate::api::inspect_file(&path) {
            Ok(report) => {
                self.info_text = report.info_text;
                self.info_box = report.box_info;
                self.info_file = Some(path);
            }
            Err(e) => {
                error!("Could not inspect {:?}: {}", path, e);
                self.info_text = format!("Could not retrieve GDAL info: {}", e);
                self.info_box = None;
                self.info_file = Some(path);
            }
        }
    }

    pub fn select_view_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Raster Files", &["tif", "tiff", "img"])
            .pick_file()
        {
            info!("Selected raster for display: {:?}", path);
            self.view_file = Some(path);
        } else {
            self.view_file = None;
        }
    }

    /// "Display Raster": band 1 through the rainbow colormap onto an egui
    /// texture, stats text, and the info-box extent.
    pub fn display_raster(&mut self, ctx: &egui::Context) {
        let Some(path) = self.view_file.clone() else {
            self.view_stats = "No file selected.".to_string();
            return;
        };
        match self.render_raster(ctx, &path) {
            Ok(()) => info!("Displayed raster {:?}", path),
            Err(e) => {
                error!("Error displaying raster: {}", e);
                self.view_stats = format!("Error displaying raster: {}", e);
                self.view_texture = None;
                self.legend_texture = None;
                self.view_range = None;
                self.view_box = None;
            }
        }
    }

    fn render_raster(
        &mut self,
        ctx: &egui::Context,
        path: &std::path::Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let summary = RasterSummary::open(path)?;
        let data = summary.read_band_f64(1)?;
        let no_data = summary.no_data_value(1)?;
        let stats =
            BandStats::compute(&data, no_data).ok_or("Band 1 contains no displayable samples")?;

        let rgb = colorize_band(&data, &stats, no_data);
        let image =
            egui::ColorImage::from_rgb([stats.cols, stats.rows], &rgb);
        self.view_texture =
            Some(ctx.load_texture("raster_view", image, egui::TextureOptions::NEAREST));

        let legend = legend_strip(128);
        let legend_image = egui::ColorImage::from_rgb([1, 128], &legend);
        self.legend_texture =
            Some(ctx.load_texture("raster_legend", legend_image, egui::TextureOptions::LINEAR));

        self.view_stats = stats.summary_text();
        self.view_range = Some((stats.min, stats.max));
        self.view_box = BoxInfo::from_extent(&summary.extent())?;
        Ok(())
    }

    pub fn add_batch_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new().pick_files() {
            for path in paths {
                if !self.batch_inputs.contains(&path) {
                    self.batch_inputs.push(path);
                }
            }
        }
    }

    pub fn remove_selected_inputs(&mut self) {
        let selected = std::mem::take(&mut self.batch_selected);
        let mut index = 0usize;
        self.batch_inputs.retain(|_| {
            let keep = !selected.contains(&index);
            index += 1;
            keep
        });
    }

    pub fn select_cut_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_file() {
            info!("Selected cut file: {:?}", path);
            // Only rasters feed the info box; vector cut files show no extent.
            self.cut_box = match RasterSummary::open(&path) {
                Ok(summary) => BoxInfo::from_extent(&summary.extent()).unwrap_or_else(|e| {
                    warn!("Could not summarize cut file extent: {}", e);
                    None
                }),
                Err(_) => None,
            };
            self.cut_file = Some(path);
        }
    }

    pub fn select_output_directory(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            info!("Selected output directory: {:?}", path);
            self.out_dir = Some(path);
        }
    }

    /// Kick off the batch cut on a worker thread; completion arrives on
    /// the mpsc channel drained by the app loop.
    pub fn process_batch_cut(&mut self) {
        match self.validate_batch() {
            Ok(()) => {}
            Err(e) => {
                error!("{}", e);
                return;
            }
        }

        let inputs = self.batch_inputs.clone();
        let cut_file = self.cut_file.clone().unwrap();
        let out_dir = self.out_dir.clone().unwrap();
        let postfix = self.postfix.clone();

        let (sender, receiver) = std::sync::mpsc::channel();
        self.completion_receiver = Some(receiver);
        self.is_processing = true;
        self.processing_start_time = Some(std::time::Instant::now());

        info!("Starting batch cut of {} file(s)", inputs.len());
        std::thread::spawn(move || {
            let message = match batch_cut(&inputs, &cut_file, &out_dir, &postfix) {
                Ok(report) => {
                    if !report.is_clean() {
                        warn!("{}", report.summary());
                    }
                    report.summary()
                }
                Err(e) => {
                    error!("Batch cut failed: {}", e);
                    format!("Batch cut failed: {}", e)
                }
            };
            let _ = sender.send(message);
        });
    }

    fn validate_batch(&self) -> Result<(), GuiError> {
        if self.is_processing {
            return Err(GuiError::AlreadyProcessing);
        }
        if self.batch_inputs.is_empty() {
            return Err(GuiError::NoInputFiles);
        }
        if self.cut_file.is_none() {
            return Err(GuiError::NoCutFile);
        }
        if self.out_dir.is_none() {
            return Err(GuiError::NoOutputDirectory);
        }
        Ok(())
    }
}
