use super::models::GisknifeGui;
use crate::core::extent::BoxInfo;
use crate::types::CoordMode;
use eframe::egui::{Align, Color32, ComboBox, DragValue, Layout, RichText, Ui};

const FIELD_WIDTH: f32 = 110.0;

/// Reusable "Bounding Box Info" readout shared by every tab.
pub struct InfoBoxComponent;

impl InfoBoxComponent {
    pub fn render(ui: &mut Ui, info: &Option<BoxInfo>, error: Option<&str>) {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Bounding Box Info").strong());
            ui.separator();
            if let Some(err) = error {
                ui.label(RichText::new(err).color(Color32::from_rgb(255, 100, 100)));
                return;
            }
            match info {
                Some(info) => {
                    Self::row(ui, "Sanity Check, Nearest Major City:", &info.city_line());
                    Self::row(ui, "Current UTM Bounding Box:", &info.utm_line());
                    Self::row(ui, "Current Lat/Long Bounding Box:", &info.geo_line());
                    Self::row(ui, "Width/Height (meters):", &info.size_m_line());
                    Self::row(ui, "Width/Height (miles):", &info.size_mi_line());
                }
                None => {
                    Self::row(ui, "Sanity Check, Nearest Major City:", "-");
                    Self::row(ui, "Current UTM Bounding Box:", "-");
                    Self::row(ui, "Current Lat/Long Bounding Box:", "-");
                    Self::row(ui, "Width/Height (meters):", "-");
                    Self::row(ui, "Width/Height (miles):", "-");
                }
            }
        });
    }

    fn row(ui: &mut Ui, label: &str, value: &str) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(label).color(Color32::from_gray(160)));
            // Selectable so values can be copied out, like the rest of the app
            ui.add(
                eframe::egui::Label::new(RichText::new(value).monospace())
                    .selectable(true),
            );
        });
    }
}

pub struct BboxTabComponent;

impl BboxTabComponent {
    pub fn render(ui: &mut Ui, app: &mut GisknifeGui) {
        ui.heading("Create KML Bounding Box");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("KML Object Name:");
            ui.text_edit_singleline(&mut app.kml_name);
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Input Coordinate Type:");
            let old_mode = app.coord_mode;
            ComboBox::from_id_salt("coord_mode")
                .selected_text(app.coord_mode.to_string())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut app.coord_mode, CoordMode::Utm, "UTM");
                    ui.selectable_value(&mut app.coord_mode, CoordMode::LatLon, "Lat/Long");
                });
            if app.coord_mode != old_mode {
                app.bbox_dirty = true;
            }
        });

        ui.add_space(5.0);

        let utm_enabled = app.coord_mode == CoordMode::Utm;
        ui.group(|ui| {
            ui.label(RichText::new("UTM Centroid Input").strong());
            ui.add_enabled_ui(utm_enabled, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Easting:");
                    if ui
                        .add_sized(
                            [FIELD_WIDTH, 18.0],
                            DragValue::new(&mut app.utm_easting)
                                .speed(10.0)
                                .range(100_000.0..=900_000.0)
                                .fixed_decimals(2),
                        )
                        .changed()
                    {
                        app.bbox_dirty = true;
                    }
                    ui.label("Northing:");
                    if ui
                        .add_sized(
                            [FIELD_WIDTH, 18.0],
                            DragValue::new(&mut app.utm_northing)
                                .speed(10.0)
                                .range(0.0..=10_000_000.0)
                                .fixed_decimals(2),
                        )
                        .changed()
                    {
                        app.bbox_dirty = true;
                    }
                    ui.label("Zone:");
                    if ui
                        .add(DragValue::new(&mut app.utm_zone).range(1..=60))
                        .changed()
                    {
                        app.bbox_dirty = true;
                    }
                    let old_north = app.utm_north;
                    ComboBox::from_id_salt("utm_hemisphere")
                        .selected_text(if app.utm_north { "North" } else { "South" })
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut app.utm_north, true, "North");
                            ui.selectable_value(&mut app.utm_north, false, "South");
                        });
                    if app.utm_north != old_north {
                        app.bbox_dirty = true;
                    }
                });
            });
        });

        ui.group(|ui| {
            ui.label(RichText::new("Lat/Long Centroid Input").strong());
            ui.add_enabled_ui(!utm_enabled, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Latitude:");
                    if ui
                        .add_sized(
                            [FIELD_WIDTH, 18.0],
                            DragValue::new(&mut app.lat)
                                .speed(0.0001)
                                .range(-90.0..=90.0)
                                .fixed_decimals(6),
                        )
                        .changed()
                    {
                        app.bbox_dirty = true;
                    }
                    ui.label("Longitude:");
                    if ui
                        .add_sized(
                            [FIELD_WIDTH, 18.0],
                            DragValue::new(&mut app.lon)
                                .speed(0.0001)
                                .range(-180.0..=180.0)
                                .fixed_decimals(6),
                        )
                        .changed()
                    {
                        app.bbox_dirty = true;
                    }
                });
            });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Round Centroid to Nearest UTM Meter:");
            if ui
                .add(DragValue::new(&mut app.round_step).range(1..=1000))
                .changed()
            {
                app.bbox_dirty = true;
            }
        });
        ui.horizontal(|ui| {
            ui.label("Width (meters):");
            if ui
                .add(DragValue::new(&mut app.width_m).range(1..=100_000))
                .changed()
            {
                app.bbox_dirty = true;
            }
            ui.label("Height (meters):");
            if ui
                .add(DragValue::new(&mut app.height_m).range(1..=100_000))
                .changed()
            {
                app.bbox_dirty = true;
            }
        });

        ui.add_space(5.0);
        ui.checkbox(&mut app.save_shp, "Save Shapefile (SHP) alongside KML");

        ui.add_space(10.0);
        if ui.button("Create Bounding Box").clicked() {
            app.export_bbox_interactive();
        }

        ui.add_space(10.0);
        let error = app.bbox_error.clone();
        InfoBoxComponent::render(ui, &app.bbox_info, error.as_deref());
    }
}

pub struct InfoTabComponent;

impl InfoTabComponent {
    pub fn render(ui: &mut Ui, app: &mut GisknifeGui) {
        ui.heading("GDAL Info on File");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            match &app.info_file {
                Some(path) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    ui.label(RichText::new(name).color(Color32::from_rgb(255, 165, 0)));
                }
                None => {
                    ui.label(RichText::new("No file selected.").color(Color32::from_gray(120)));
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Choose GIS Raster File").clicked() {
                    app.select_info_file();
                }
            });
        });

        ui.add_space(5.0);

        eframe::egui::ScrollArea::vertical()
            .id_salt("info_text_scroll")
            .max_height(ui.available_height() - 170.0)
            .show(ui, |ui| {
                if app.info_text.is_empty() {
                    ui.label(RichText::new("No file selected.").color(Color32::from_gray(120)));
                } else {
                    ui.add(
                        eframe::egui::Label::new(RichText::new(&app.info_text).monospace())
                            .selectable(true),
                    );
                }
            });

        ui.add_space(5.0);
        InfoBoxComponent::render(ui, &app.info_box, None);
    }
}

pub struct ViewTabComponent;

impl ViewTabComponent {
    pub fn render(ui: &mut Ui, app: &mut GisknifeGui) {
        ui.heading("Display Raster File (GeoTiff/IMG)");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            match &app.view_file {
                Some(path) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    ui.label(RichText::new(name).color(Color32::from_rgb(255, 165, 0)));
                }
                None => {
                    ui.label(RichText::new("No file selected.").color(Color32::from_gray(120)));
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Display Raster").clicked() {
                    let ctx = ui.ctx().clone();
                    app.display_raster(&ctx);
                }
                if ui.button("Choose Raster File").clicked() {
                    app.select_view_file();
                }
            });
        });

        ui.add_space(5.0);

        if let Some(texture) = &app.view_texture {
            ui.horizontal(|ui| {
                ui.add(
                    eframe::egui::Image::new(texture)
                        .max_width(ui.available_width() - 60.0)
                        .max_height(320.0),
                );
                if let Some(legend) = &app.legend_texture {
                    ui.vertical(|ui| {
                        if let Some((min, max)) = app.view_range {
                            ui.label(RichText::new(format!("{:.3}", max)).small());
                            ui.add(
                                eframe::egui::Image::new(legend)
                                    .fit_to_exact_size(eframe::egui::Vec2::new(16.0, 256.0)),
                            );
                            ui.label(RichText::new(format!("{:.3}", min)).small());
                        }
                    });
                }
            });
        }

        if !app.view_stats.is_empty() {
            ui.add_space(5.0);
            ui.add(
                eframe::egui::Label::new(RichText::new(&app.view_stats).monospace())
                    .selectable(true),
            );
        }

        ui.add_space(5.0);
        InfoBoxComponent::render(ui, &app.view_box, None);
    }
}

pub struct BatchCutTabComponent;

impl BatchCutTabComponent {
    pub fn render(ui: &mut Ui, app: &mut GisknifeGui) {
        ui.heading("Batch Cut");
        ui.add_space(5.0);

        ui.label("Input Raster/Vector Files:");
        eframe::egui::ScrollArea::vertical()
            .id_salt("batch_inputs_scroll")
            .max_height(140.0)
            .show(ui, |ui| {
                for (index, path) in app.batch_inputs.iter().enumerate() {
                    let selected = app.batch_selected.contains(&index);
                    if ui
                        .selectable_label(selected, path.display().to_string())
                        .clicked()
                    {
                        if selected {
                            app.batch_selected.remove(&index);
                        } else {
                            app.batch_selected.insert(index);
                        }
                    }
                }
                if app.batch_inputs.is_empty() {
                    ui.label(
                        RichText::new("No input files added.").color(Color32::from_gray(120)),
                    );
                }
            });

        ui.horizontal(|ui| {
            if ui.button("Add Files").clicked() {
                app.add_batch_files();
            }
            if ui.button("Remove Selected").clicked() {
                app.remove_selected_inputs();
            }
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Cut File:");
            match &app.cut_file {
                Some(path) => {
                    ui.label(
                        RichText::new(path.display().to_string())
                            .color(Color32::from_rgb(255, 165, 0)),
                    );
                }
                None => {
                    ui.label(RichText::new("None selected").color(Color32::from_gray(120)));
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Select Cut File").clicked() {
                    app.select_cut_file();
                }
            });
        });

        ui.horizontal(|ui| {
            ui.label("Output Directory:");
            match &app.out_dir {
                Some(path) => {
                    ui.label(
                        RichText::new(path.display().to_string())
                            .color(Color32::from_rgb(255, 165, 0)),
                    );
                }
                None => {
                    ui.label(RichText::new("None selected").color(Color32::from_gray(120)));
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Select Output Directory").clicked() {
                    app.select_output_directory();
                }
            });
        });

        ui.horizontal(|ui| {
            ui.label("Filename Postfix:");
            ui.text_edit_singleline(&mut app.postfix);
        });

        ui.add_space(10.0);
        ui.add_enabled_ui(!app.is_processing, |ui| {
            if ui.button("Process Batch Cut").clicked() {
                app.process_batch_cut();
            }
        });
        if app.is_processing {
            ui.label(RichText::new("Cutting...").color(Color32::from_rgb(255, 165, 0)));
        }

        ui.add_space(10.0);
        InfoBoxComponent::render(ui, &app.cut_box, None);
    }
}

pub struct FooterComponent;

impl FooterComponent {
    pub fn render(ui: &mut Ui, app: &mut GisknifeGui) {
        // Update system statistics
        app.update_system_stats();

        ui.horizontal(|ui| {
            let status_color = if app.is_processing {
                Color32::from_rgb(255, 165, 0) // Orange for processing
            } else {
                Color32::from_rgb(100, 200, 100) // Green for ready
            };

            let timing_text = if app.is_processing {
                if let Some(start_time) = app.processing_start_time {
                    let elapsed = start_time.elapsed();
                    format!("Processing: {:.2?}", elapsed)
                } else {
                    "Processing...".to_string()
                }
            } else if let Some(duration) = app.last_processing_duration {
                format!("Last run: {:.2?}", duration)
            } else {
                "Ready".to_string()
            };

            ui.label(RichText::new(timing_text).color(status_color).size(14.0));

            ui.separator();

            let cpu_color = if app.cpu_usage > 80.0 {
                Color32::from_rgb(255, 100, 100)
            } else if app.cpu_usage > 50.0 {
                Color32::from_rgb(255, 165, 0)
            } else {
                Color32::from_rgb(100, 200, 100)
            };

            ui.label(
                RichText::new(format!("CPU: {:.1}%", app.cpu_usage))
                    .color(cpu_color)
                    .size(12.0),
            );

            ui.separator();

            let memory_percent = if app.total_memory_mb > 0.0 {
                (app.memory_usage_mb / app.total_memory_mb) * 100.0
            } else {
                0.0
            };

            let memory_color = if memory_percent > 80.0 {
                Color32::from_rgb(255, 100, 100)
            } else if memory_percent > 60.0 {
                Color32::from_rgb(255, 165, 0)
            } else {
                Color32::from_rgb(100, 200, 100)
            };

            ui.label(
                RichText::new(format!(
                    "RAM: {:.1} GB / {:.1} GB ({:.1}%)",
                    app.memory_usage_mb / 1024.0,
                    app.total_memory_mb / 1024.0,
                    memory_percent
                ))
                .color(memory_color)
                .size(12.0),
            );

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("To CLI").clicked() {
                    let cli_command = app.generate_cli_command();

                    let cli_entry = crate::gui::logging::LogEntry::new(
                        tracing::Level::INFO,
                        format!("CLI Command: {}", cli_command),
                        "cli".to_string(),
                    );

                    if let Ok(mut logs) = app.log_messages.lock() {
                        logs.push(cli_entry);
                    }
                }

                if ui.button("Save Preset").clicked() {
                    if let Err(e) = app.save_preset() {
                        tracing::error!("Failed to save preset: {}", e);
                    }
                }

                if ui.button("Load Preset").clicked() {
                    if let Err(e) = app.load_preset() {
                        tracing::error!("Failed to load preset: {}", e);
                    }
                }

                if ui.button("Save Logs").clicked() {
                    if let Err(e) = app.save_logs_to_file() {
                        tracing::error!("Failed to save logs: {}", e);
                    }
                }

                if ui.button("Clear").clicked() {
                    if let Ok(mut logs) = app.log_messages.lock() {
                        logs.clear();
                    }
                }

                if ui.button("Reset").clicked() {
                    *app = GisknifeGui::default();
                }
            });
        });
    }
}
