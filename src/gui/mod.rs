//! egui front end: application state (`models`), tab components
//! (`components`), the eframe app loop (`app`), background processing and
//! dialogs (`processing`), and the log-capture layer (`logging`).
pub mod app;
pub mod components;
pub mod logging;
pub mod models;
pub mod processing;
