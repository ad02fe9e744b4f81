use crate::core::extent::BoxInfo;
use crate::gui::logging::{GuiLogLayer, LogEntry};
use crate::types::CoordMode;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use sysinfo;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// Which panel the tab bar has selected.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ActiveTab {
    BboxBuilder,
    RasterInfo,
    RasterView,
    BatchCut,
}

impl ActiveTab {
    pub fn title(&self) -> &'static str {
        match self {
            ActiveTab::BboxBuilder => "Create KML Bounding Box",
            ActiveTab::RasterInfo => "GDAL Info on File",
            ActiveTab::RasterView => "Display Raster File",
            ActiveTab::BatchCut => "Batch Cut",
        }
    }

    pub fn all() -> [ActiveTab; 4] {
        [
            ActiveTab::BboxBuilder,
            ActiveTab::RasterInfo,
            ActiveTab::RasterView,
            ActiveTab::BatchCut,
        ]
    }
}

static LOGGING_INIT: OnceCell<()> = OnceCell::new();

pub fn init_gui_logging() {
    LOGGING_INIT.get_or_init(|| {
        let gui_layer = GuiLogLayer::new();

        // Keep eframe/winit TRACE chatter out of the panel.
        let filter = EnvFilter::new("trace")
            .add_directive("eframe=info".parse().unwrap())
            .add_directive("winit=info".parse().unwrap());

        let subscriber = Registry::default().with(gui_layer).with(filter);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

pub struct GisknifeGui {
    pub active_tab: ActiveTab,

    // Bbox builder form
    pub kml_name: String,
    pub coord_mode: CoordMode,
    pub utm_easting: f64,
    pub utm_northing: f64,
    pub utm_zone: u32,
    pub utm_north: bool,
    pub lat: f64,
    pub lon: f64,
    pub round_step: u32,
    pub width_m: u32,
    pub height_m: u32,
    pub save_shp: bool,
    pub bbox_info: Option<BoxInfo>,
    pub bbox_error: Option<String>,
    pub bbox_dirty: bool,

    // Raster info panel
    pub info_file: Option<PathBuf>,
    pub info_text: String,
    pub info_box: Option<BoxInfo>,

    // Raster view panel
    pub view_file: Option<PathBuf>,
    pub view_stats: String,
    pub view_texture: Option<eframe::egui::TextureHandle>,
    pub legend_texture: Option<eframe::egui::TextureHandle>,
    pub view_range: Option<(f64, f64)>,
    pub view_box: Option<BoxInfo>,

    // Batch cut panel
    pub batch_inputs: Vec<PathBuf>,
    pub batch_selected: BTreeSet<usize>,
    pub cut_file: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub postfix: String,
    pub cut_box: Option<BoxInfo>,

    // Options
    pub min_log_level: Level,

    // Status
    pub is_processing: bool,
    pub processing_start_time: Option<Instant>,
    pub last_processing_duration: Option<Duration>,

    // Log messages for the central panel - thread-safe
    pub log_messages: Arc<Mutex<Vec<LogEntry>>>,

    // Receiver for completion notification from background batch cuts
    pub completion_receiver: Option<std::sync::mpsc::Receiver<String>>,

    // System monitoring
    pub cpu_usage: f32,
    pub memory_usage_mb: f64,
    pub total_memory_mb: f64,
    pub system_monitor: Option<sysinfo::System>,
    pub last_system_update: Option<Instant>,
}

impl Default for GisknifeGui {
    fn default() -> Self {
        Self {
            active_tab: ActiveTab::BboxBuilder,
            kml_name: String::new(),
            coord_mode: CoordMode::LatLon,
            utm_easting: 0.0,
            utm_northing: 0.0,
            utm_zone: 18,
            utm_north: true,
            // Washington Monument
            lat: 38.8895,
            lon: -77.0353,
            round_step: 10,
            width_m: 1000,
            height_m: 1000,
            save_shp: false,
            bbox_info: None,
            bbox_error: None,
            bbox_dirty: true,
            info_file: None,
            info_text: String::new(),
            info_box: None,
            view_file: None,
            view_stats: String::new(),
            view_texture: None,
            legend_texture: None,
            view_range: None,
            view_box: None,
            batch_inputs: Vec::new(),
            batch_selected: BTreeSet::new(),
            cut_file: None,
            out_dir: None,
            postfix: chrono::Local::now().format("_%Y%m%d_%H%M%S").to_string(),
            cut_box: None,
            min_log_level: Level::INFO,
            is_processing: false,
            processing_start_time: None,
            last_processing_duration: None,
            log_messages: Arc::new(Mutex::new(Vec::new())),
            completion_receiver: None,
            cpu_usage: 0.0,
            memory_usage_mb: 0.0,
            total_memory_mb: 0.0,
            system_monitor: None,
            last_system_update: None,
        }
    }
}

impl GisknifeGui {
    pub fn save_logs_to_file(&self) -> Result<(), Box<dyn std::error::Error>> {
        let logs = self
            .log_messages
            .lock()
            .map_err(|e| format!("Failed to lock logs: {}", e))?;

        if logs.is_empty() {
            return Err("No logs to save".into());
        }

        let filtered_logs: Vec<&LogEntry> = logs
            .iter()
            .filter(|entry| {
                if self.min_log_level == Level::TRACE {
                    true
                } else {
                    entry.level == self.min_log_level
                }
            })
            .collect();

        if filtered_logs.is_empty() {
            return Err("No logs match the current filter level".into());
        }

        if let Some(save_path) = rfd::FileDialog::new()
            .add_filter("Log files", &["log"])
            .set_file_name("gisknife.log")
            .save_file()
        {
            let mut log_content = String::new();
            log_content.push_str("=== GISKNIFE Log File ===\n");
            log_content.push_str(&format!("Generated: {}\n", chrono::Utc::now().to_rfc3339()));
            log_content.push_str(&format!("Total Logs: {}\n", filtered_logs.len()));
            log_content.push_str("=========================\n\n");

            for entry in &filtered_logs {
                log_content.push_str(&format!(
                    "[{}] {} {}: {}\n",
                    entry.timestamp, entry.level, entry.target, entry.message
                ));
            }

            fs::write(&save_path, log_content)?;

            tracing::info!(
                "Filtered logs saved to: {:?} ({} entries)",
                save_path,
                filtered_logs.len()
            );

            Ok(())
        } else {
            Err("No save location selected".into())
        }
    }

    pub fn save_preset(&self) -> Result<(), Box<dyn std::error::Error>> {
        #[derive(Serialize)]
        struct GisknifePreset {
            kml_name: String,
            coord_mode: CoordMode,
            utm_easting: f64,
            utm_northing: f64,
            utm_zone: u32,
            utm_north: bool,
            lat: f64,
            lon: f64,
            round_step: u32,
            width_m: u32,
            height_m: u32,
            save_shp: bool,
            postfix: String,
        }

        let preset = GisknifePreset {
            kml_name: self.kml_name.clone(),
            coord_mode: self.coord_mode,
            utm_easting: self.utm_easting,
            utm_northing: self.utm_northing,
            utm_zone: self.utm_zone,
            utm_north: self.utm_north,
            lat: self.lat,
            lon: self.lon,
            round_step: self.round_step,
            width_m: self.width_m,
            height_m: self.height_m,
            save_shp: self.save_shp,
            postfix: self.postfix.clone(),
        };

        if let Some(save_path) = rfd::FileDialog::new()
            .add_filter("GISKNIFE Preset files", &["gisknife"])
            .set_file_name("gisknife_preset.gisknife")
            .save_file()
        {
            let mut preset_content = String::new();
            preset_content.push_str("// ==========================================\n");
            preset_content.push_str("// GISKNIFE Configuration Preset\n");
            preset_content.push_str("// ==========================================\n");
            preset_content.push_str(&format!("// Version: {}\n", env!("CARGO_PKG_VERSION")));
            preset_content.push_str(&format!(
                "// Generated: {}\n",
                chrono::Utc::now().to_rfc3339()
            ));
            preset_content.push_str("// Note: file selections are not included in presets\n");
            preset_content.push_str("// ==========================================\n\n");

            let json = serde_json::to_string_pretty(&preset)?;
            preset_content.push_str(&json);

            fs::write(&save_path, preset_content)?;

            tracing::info!("Preset saved to: {:?}", save_path);
            Ok(())
        } else {
            Err("No save location selected".into())
        }
    }

    pub fn load_preset(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(load_path) = rfd::FileDialog::new()
            .add_filter("GISKNIFE Preset files", &["gisknife"])
            .pick_file()
        {
            let content = fs::read_to_string(&load_path)?;

            // Skip the comment header by finding the first '{' character
            let json_start = content
                .find('{')
                .ok_or("Invalid preset file: no JSON content found")?;
            let json = &content[json_start..];

            #[derive(Deserialize)]
            struct GisknifePreset {
                kml_name: String,
                coord_mode: CoordMode,
                utm_easting: f64,
                utm_northing: f64,
                utm_zone: u32,
                utm_north: bool,
                lat: f64,
                lon: f64,
                round_step: u32,
                width_m: u32,
                height_m: u32,
                save_shp: bool,
                postfix: String,
            }

            let preset: GisknifePreset = serde_json::from_str(json)?;

            self.kml_name = preset.kml_name;
            self.coord_mode = preset.coord_mode;
            self.utm_easting = preset.utm_easting;
            self.utm_northing = preset.utm_northing;
            self.utm_zone = preset.utm_zone;
            self.utm_north = preset.utm_north;
            self.lat = preset.lat;
            self.lon = preset.lon;
            self.round_step = preset.round_step;
            self.width_m = preset.width_m;
            self.height_m = preset.height_m;
            self.save_shp = preset.save_shp;
            self.postfix = preset.postfix;
            self.bbox_dirty = true;

            tracing::info!("Preset loaded from: {:?}", load_path);
            Ok(())
        } else {
            Err("No preset file selected".into())
        }
    }

    /// Equivalent `gisknife bbox` invocation for the current form.
    pub fn generate_cli_command(&self) -> String {
        let mut cmd = String::from("cargo run --release --bin gisknife -- bbox");

        if !self.kml_name.trim().is_empty() {
            cmd.push_str(&format!(" --name {:?}", self.kml_name.trim()));
        }
        match self.coord_mode {
            CoordMode::LatLon => {
                cmd.push_str(&format!(" --lat {} --lon {}", self.lat, self.lon));
            }
            CoordMode::Utm => {
                cmd.push_str(&format!(
                    " --easting {} --northing {} --zone {}",
                    self.utm_easting, self.utm_northing, self.utm_zone
                ));
                if !self.utm_north {
                    cmd.push_str(" --south");
                }
            }
        }
        cmd.push_str(&format!(
            " --width {} --height {} --round {}",
            self.width_m, self.height_m, self.round_step
        ));
        cmd.push_str(" --kml <output.kml>");
        if self.save_shp {
            cmd.push_str(" --shp");
        }
        cmd.push_str(" --log");

        cmd
    }

    /// Update system statistics (CPU and memory usage)
    pub fn update_system_stats(&mut self) {
        // Only update every 2 seconds to avoid excessive system calls
        let now = Instant::now();
        if let Some(last_update) = self.last_system_update {
            if now.duration_since(last_update).as_secs() < 2 {
                return;
            }
        }

        if self.system_monitor.is_none() {
            self.system_monitor = Some(sysinfo::System::new_all());
        }

        if let Some(ref mut sys) = self.system_monitor {
            sys.refresh_all();
            self.cpu_usage = sys.global_cpu_usage();
            self.memory_usage_mb = sys.used_memory() as f64 / 1024.0 / 1024.0;
            self.total_memory_mb = sys.total_memory() as f64 / 1024.0 / 1024.0;
        }

        self.last_system_update = Some(now);
    }
}
