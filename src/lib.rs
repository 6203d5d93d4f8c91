//! MaskService - REST backends for the mask testing workstation suite
//!
//! Six independent JSON-over-HTTP backends (login, dashboard, tests, system,
//! devices, reports) share this library. Each backend binds its own fixed
//! port; all state is process-memory only and lost on restart.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod login;
pub mod pages;
pub mod startup;
pub mod system;
pub mod testing;

pub use config::Config;
pub use error::{Result, ServiceError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "maskservice.yaml";

/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";
