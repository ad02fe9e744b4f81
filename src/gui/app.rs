use super::components::*;
use super::models::{ActiveTab, GisknifeGui};
use crate::gui::logging::{LogEntry, get_log_buffer};
use eframe::egui;
use egui_extras::install_image_loaders;
use tracing::Level;

fn format_log_entry(entry: &LogEntry) -> egui::RichText {
    // Special handling for CLI command echoes
    if entry.target == "cli" {
        return egui::RichText::new(&entry.message)
            .color(egui::Color32::from_rgb(100, 255, 100)) // Green for CLI commands
            .monospace()
            .strong();
    }

    let (color, icon) = match entry.level {
        Level::ERROR => (egui::Color32::from_rgb(255, 100, 100), "❌"),
        Level::WARN => (egui::Color32::from_rgb(255, 200, 100), "⚠️"),
        Level::INFO => (egui::Color32::from_rgb(100, 200, 255), "ℹ️"),
        Level::DEBUG => (egui::Color32::from_rgb(150, 150, 150), "🔍"),
        Level::TRACE => (egui::Color32::from_rgb(100, 100, 100), "🔎"),
    };

    let formatted_text = format!(
        "[{}] {} {}: {}",
        entry.timestamp, icon, entry.level, entry.message
    );

    egui::RichText::new(formatted_text).color(color).monospace()
}

impl eframe::App for GisknifeGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Initialize logging and image loaders on first update
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            crate::gui::models::init_gui_logging();
            install_image_loaders(ctx);
        });

        // Dark theme
        let mut style = (*ctx.style()).clone();
        style.visuals.override_text_color = Some(egui::Color32::from_gray(220));
        style.visuals.widgets.noninteractive.bg_fill = egui::Color32::from_rgb(40, 40, 40);
        style.visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(50, 50, 50);
        style.visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(60, 60, 60);
        style.visuals.widgets.active.bg_fill = egui::Color32::from_rgb(70, 70, 70);
        style.visuals.panel_fill = egui::Color32::from_rgb(30, 30, 30);
        style.visuals.window_fill = egui::Color32::from_rgb(25, 25, 25);
        style.visuals.faint_bg_color = egui::Color32::from_rgb(45, 45, 45);
        style.visuals.extreme_bg_color = egui::Color32::from_rgb(20, 20, 20);
        ctx.set_style(style);

        // Drain log events captured by the tracing layer
        let mut has_new_logs = false;
        let log_buffer = get_log_buffer();
        let mut new_messages = Vec::new();
        if let Ok(mut buf) = log_buffer.lock() {
            if !buf.is_empty() {
                new_messages.extend(buf.drain(..));
            }
        }
        if !new_messages.is_empty() {
            if let Ok(mut logs) = self.log_messages.lock() {
                logs.extend(new_messages);
                // Keep only last 1000 messages to prevent memory issues
                let len = logs.len();
                if len > 1000 {
                    logs.drain(0..(len - 1000));
                }
            }
            has_new_logs = true;
        }

        if has_new_logs || self.is_processing {
            ctx.request_repaint();
        }

        // Check for completion of the background batch cut
        if let Some(receiver) = &mut self.completion_receiver {
            if let Ok(msg) = receiver.try_recv() {
                if let Some(start_time) = self.processing_start_time {
                    let duration = start_time.elapsed();
                    self.last_processing_duration = Some(duration);
                    tracing::info!("Batch cut completed in {:.2?}", duration);
                }

                tracing::info!("{}", msg);

                self.is_processing = false;
                self.processing_start_time = None;
                self.completion_receiver = None;
            }
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("GISKNIFE")
                        .size(28.0)
                        .color(egui::Color32::from_gray(220))
                        .strong(),
                );
                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(10.0)
                            .color(egui::Color32::WHITE),
                    );
                    ui.label(
                        egui::RichText::new("GIS DATA SWISS ARMY KNIFE")
                            .size(10.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                });
                ui.separator();
                for tab in ActiveTab::all() {
                    if ui
                        .selectable_label(self.active_tab == tab, tab.title())
                        .clicked()
                    {
                        self.active_tab = tab;
                    }
                }
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            FooterComponent::render(ui, self);
        });

        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Log Output");

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.selectable_value(&mut self.min_log_level, Level::ERROR, "ERROR");
                        ui.selectable_value(&mut self.min_log_level, Level::WARN, "WARN");
                        ui.selectable_value(&mut self.min_log_level, Level::INFO, "INFO");
                        ui.selectable_value(&mut self.min_log_level, Level::DEBUG, "DEBUG");
                        ui.selectable_value(&mut self.min_log_level, Level::TRACE, "ALL");
                    });
                });

                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if let Ok(logs) = self.log_messages.lock() {
                            if logs.is_empty() {
                                ui.label(
                                    egui::RichText::new("No log messages")
                                        .color(egui::Color32::from_gray(120)),
                                );
                            } else {
                                for entry in logs.iter() {
                                    if self.min_log_level == Level::TRACE
                                        || entry.level == self.min_log_level
                                    {
                                        ui.label(format_log_entry(entry));
                                    }
                                }
                            }
                        }
                    });
            });

        // Keep the bbox readout current before the panel draws it
        self.refresh_bbox_info();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.active_tab {
                    ActiveTab::BboxBuilder => BboxTabComponent::render(ui, self),
                    ActiveTab::RasterInfo => InfoTabComponent::render(ui, self),
                    ActiveTab::RasterView => ViewTabComponent::render(ui, self),
                    ActiveTab::BatchCut => BatchCutTabComponent::render(ui, self),
                });
        });
    }
}
