//! Configuration management for MaskService

pub mod config;

pub use config::{
    AuthConfig, Config, CredentialsConfig, JwtConfig, LoggingConfig, ServerConfig, ServicePorts,
};
