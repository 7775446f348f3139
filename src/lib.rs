//! `gw-defects` library crate.
//!
//! The binary (`gwd`) is a thin wrapper around this library so that:
//!
//! - the numerical core is testable without spawning processes
//! - modules are reusable (e.g., parameter scans driven from other tools)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod background;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod snr;
pub mod spectrum;
