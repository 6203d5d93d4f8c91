//! Startup logging for the service suite

pub mod logger;

pub use logger::{display_startup_banner, StartupLogger};
