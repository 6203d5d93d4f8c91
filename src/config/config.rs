//! Configuration management for the MaskService backends

use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Default functions for serde
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration() -> u64 {
    86400 // 24 hours
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration (bind host, per-service ports)
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration
    pub logging: Option<LoggingConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            logging: None,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind all services to
    #[serde(default = "default_host")]
    pub host: String,
    /// Per-service port assignments
    #[serde(default)]
    pub ports: ServicePorts,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            ports: ServicePorts::default(),
            timeout: default_timeout(),
        }
    }
}

/// Fixed port assignments, one per backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePorts {
    pub login: u16,
    pub dashboard: u16,
    pub tests: u16,
    pub system: u16,
    pub devices: u16,
    pub reports: u16,
}

impl Default for ServicePorts {
    fn default() -> Self {
        Self {
            login: 8101,
            dashboard: 8102,
            tests: 8103,
            system: 8104,
            devices: 8107,
            reports: 8108,
        }
    }
}

impl ServicePorts {
    /// All assignments as (service name, port) pairs
    pub fn as_pairs(&self) -> Vec<(&'static str, u16)> {
        vec![
            ("login", self.login),
            ("dashboard", self.dashboard),
            ("tests", self.tests),
            ("system", self.system),
            ("devices", self.devices),
            ("reports", self.reports),
        ]
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT configuration shared by every service that verifies tokens
    #[serde(default)]
    pub jwt: JwtConfig,
    /// Static role credential table
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Accept the shared default password for any role
    #[serde(default = "default_true")]
    pub allow_default_password: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            credentials: CredentialsConfig::default(),
            allow_default_password: true,
        }
    }
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT secret key for signing and validation
    pub secret: String,
    /// JWT algorithm (HS256, HS384, HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Token expiration time in seconds
    #[serde(default = "default_expiration")]
    pub expiration: u64,
    /// JWT issuer
    pub issuer: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            // No built-in secret: it must come from the config file or
            // MASKSERVICE_JWT_SECRET.
            secret: String::new(),
            algorithm: default_algorithm(),
            expiration: default_expiration(),
            issuer: None,
        }
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(ServiceError::config(
                "JWT secret must be provided via the config file or MASKSERVICE_JWT_SECRET",
            ));
        }
        if self.secret.len() < 16 {
            return Err(ServiceError::config(
                "JWT secret must be at least 16 characters",
            ));
        }
        if !matches!(self.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(ServiceError::config(format!(
                "Unsupported JWT algorithm: '{}'. Supported: HS256, HS384, HS512",
                self.algorithm
            )));
        }
        if self.expiration == 0 {
            return Err(ServiceError::config("JWT expiration must be non-zero"));
        }
        Ok(())
    }
}

/// Static credential table: one password per role plus the shared default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub operator: String,
    pub admin: String,
    pub superuser: String,
    pub serviceuser: String,
    /// Shared development password accepted for any role when
    /// `allow_default_password` is set
    pub default_password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            operator: "operator".to_string(),
            admin: "admin".to_string(),
            superuser: "superuser".to_string(),
            serviceuser: "serviceuser".to_string(),
            default_password: "default".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json, text)
    pub format: String,
}

impl Config {
    /// Load .env files in order of precedence
    fn load_env_files() {
        let env = std::env::var("MASKSERVICE_ENV")
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "development".to_string());

        // Each file overrides the previous one
        let env_specific_file = format!(".env.{}", env);
        let env_files = vec![".env", env_specific_file.as_str(), ".env.local"];

        for env_file in env_files {
            match dotenvy::from_filename(env_file) {
                Ok(_) => {
                    tracing::info!("Loaded environment variables from {}", env_file);
                }
                Err(e) if e.to_string().contains("not found") => {
                    tracing::debug!("No {} file found, skipping", env_file);
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", env_file, e);
                }
            }
        }

        tracing::info!("Environment: {}", env);
    }

    /// Load configuration from file with environment variable and CLI overrides
    pub fn load<P: AsRef<Path>>(path: P, host_override: Option<String>) -> Result<Self> {
        // Precedence: .env files < config file < env vars < CLI
        Self::load_env_files();

        let mut config = if path.as_ref().exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ServiceError::config(format!("Failed to read config file: {}", e)))?;

            serde_yaml::from_str(&content)
                .map_err(|e| ServiceError::config(format!("Failed to parse config file: {}", e)))?
        } else {
            tracing::warn!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_environment_overrides()?;

        if let Some(host) = host_override {
            config.server.host = host;
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("MASKSERVICE_HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }

        fn parse_port(var: &str) -> Result<Option<u16>> {
            match std::env::var(var) {
                Ok(port_str) if !port_str.is_empty() => {
                    let port = port_str.parse().map_err(|e| {
                        ServiceError::config(format!("Invalid {} environment variable: {}", var, e))
                    })?;
                    Ok(Some(port))
                }
                _ => Ok(None),
            }
        }

        if let Some(port) = parse_port("MASKSERVICE_LOGIN_PORT")? {
            self.server.ports.login = port;
        }
        if let Some(port) = parse_port("MASKSERVICE_DASHBOARD_PORT")? {
            self.server.ports.dashboard = port;
        }
        if let Some(port) = parse_port("MASKSERVICE_TESTS_PORT")? {
            self.server.ports.tests = port;
        }
        if let Some(port) = parse_port("MASKSERVICE_SYSTEM_PORT")? {
            self.server.ports.system = port;
        }
        if let Some(port) = parse_port("MASKSERVICE_DEVICES_PORT")? {
            self.server.ports.devices = port;
        }
        if let Some(port) = parse_port("MASKSERVICE_REPORTS_PORT")? {
            self.server.ports.reports = port;
        }

        if let Ok(secret) = std::env::var("MASKSERVICE_JWT_SECRET") {
            if !secret.is_empty() {
                self.auth.jwt.secret = secret;
            }
        }

        if let Ok(expiration_str) = std::env::var("MASKSERVICE_JWT_EXPIRATION") {
            if !expiration_str.is_empty() {
                self.auth.jwt.expiration = expiration_str.parse().map_err(|e| {
                    ServiceError::config(format!(
                        "Invalid MASKSERVICE_JWT_EXPIRATION environment variable: {}",
                        e
                    ))
                })?;
            }
        }

        if let Ok(allow_str) = std::env::var("MASKSERVICE_ALLOW_DEFAULT_PASSWORD") {
            if !allow_str.is_empty() {
                self.auth.allow_default_password = allow_str.parse().map_err(|e| {
                    ServiceError::config(format!(
                        "Invalid MASKSERVICE_ALLOW_DEFAULT_PASSWORD environment variable: {}",
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Validate the full configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(ServiceError::config("Server host cannot be empty"));
        }

        let pairs = self.server.ports.as_pairs();
        for (service, port) in &pairs {
            if *port == 0 {
                return Err(ServiceError::config(format!(
                    "Port for service '{}' cannot be 0",
                    service
                )));
            }
        }
        for (i, (service_a, port_a)) in pairs.iter().enumerate() {
            for (service_b, port_b) in pairs.iter().skip(i + 1) {
                if port_a == port_b {
                    return Err(ServiceError::config(format!(
                        "Services '{}' and '{}' are both assigned port {}",
                        service_a, service_b, port_a
                    )));
                }
            }
        }

        self.auth.jwt.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_requires_a_secret() {
        let mut config = Config::default();
        assert_eq!(config.server.ports.login, 8101);
        assert_eq!(config.server.ports.reports, 8108);
        assert!(config.auth.allow_default_password);

        // No secret is shipped in code; validation fails until one is set
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("JWT secret"));

        config.auth.jwt.secret = "injected-secret-with-length".to_string();
        assert!(config.validate().is_ok());
    }

    fn config_with_secret() -> Config {
        let mut config = Config::default();
        config.auth.jwt.secret = "test-secret-with-enough-length".to_string();
        config
    }

    #[test]
    fn test_duplicate_ports_rejected() {
        let mut config = config_with_secret();
        config.server.ports.dashboard = config.server.ports.login;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = Config::default();
        config.auth.jwt.secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_algorithm_rejected() {
        let mut config = config_with_secret();
        config.auth.jwt.algorithm = "RS256".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = r#"
server:
  host: 127.0.0.1
  ports:
    login: 9101
    dashboard: 9102
    tests: 9103
    system: 9104
    devices: 9107
    reports: 9108
auth:
  jwt:
    secret: test-secret-at-least-16-chars
    expiration: 3600
  allow_default_password: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.ports.login, 9101);
        assert_eq!(config.auth.jwt.expiration, 3600);
        assert!(!config.auth.allow_default_password);
        // Credentials fall back to the built-in table
        assert_eq!(config.auth.credentials.operator, "operator");
        assert!(config.validate().is_ok());
    }
}
