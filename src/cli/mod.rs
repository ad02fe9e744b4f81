//! Command Line Interface (CLI) layer for GISKNIFE.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the bbox, info, and cut
//! subcommands. It wires user-provided options to the underlying library
//! functionality exposed via `gisknife::api`.
//!
//! If you are embedding GISKNIFE into another application, prefer using
//! the high-level `gisknife::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
