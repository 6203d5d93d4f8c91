//! Startup logging for the MaskService suite

use crate::config::Config;
use tracing::{info, warn};

/// Startup logger for suite-wide information
pub struct StartupLogger;

impl StartupLogger {
    /// Display configuration and service information at startup
    pub fn display_startup_info(config: &Config, config_path: Option<&std::path::Path>) {
        info!("📁 Configuration:");
        match config_path {
            Some(path) => info!("   Config file: {:?} ✅", path),
            None => info!("   Config file: built-in defaults (no config file found)"),
        }
        info!("   Bind host: {}", config.server.host);
        info!("");

        info!("🎯 Services:");
        for (service, port) in config.server.ports.as_pairs() {
            info!(
                "   ✅ {:<10} http://{}:{}",
                service, config.server.host, port
            );
        }
        info!("");

        info!("🔐 Authentication:");
        info!(
            "   Token lifetime: {}s ({}h)",
            config.auth.jwt.expiration,
            config.auth.jwt.expiration / 3600
        );
        if config.auth.allow_default_password {
            warn!("   ⚠️  Default password fallback is enabled (development mode)");
        } else {
            info!("   ✅ Default password fallback disabled");
        }
        info!("");
    }
}

/// Display startup banner with version information
pub fn display_startup_banner(version: &str) {
    info!("");
    info!("╔══════════════════════════════════════════════════════════════╗");
    info!("║                      MaskService v{}                        ║", version);
    info!("║             Mask testing workstation REST suite              ║");
    info!("╚══════════════════════════════════════════════════════════════╝");
    info!("");
}
