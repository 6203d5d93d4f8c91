//! Static role credential table

use crate::auth::Role;
use crate::config::{AuthConfig, CredentialsConfig};
use crate::error::{Result, ServiceError};
use tracing::debug;

/// Credential table built from configuration at startup.
///
/// A login succeeds with the role's own password, or with the shared default
/// password when `allow_default_password` is enabled.
#[derive(Debug, Clone)]
pub struct CredentialTable {
    credentials: CredentialsConfig,
    allow_default_password: bool,
}

impl CredentialTable {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            credentials: config.credentials.clone(),
            allow_default_password: config.allow_default_password,
        }
    }

    /// Password assigned to a specific role
    fn password_for(&self, role: Role) -> &str {
        match role {
            Role::Operator => &self.credentials.operator,
            Role::Admin => &self.credentials.admin,
            Role::Superuser => &self.credentials.superuser,
            Role::Serviceuser => &self.credentials.serviceuser,
        }
    }

    /// Validate a password for a role
    pub fn authenticate(&self, role: Role, password: &str) -> Result<()> {
        if password == self.password_for(role) {
            debug!("Role {} authenticated with role password", role);
            return Ok(());
        }
        if self.allow_default_password && password == self.credentials.default_password {
            debug!("Role {} authenticated with default password", role);
            return Ok(());
        }
        Err(ServiceError::auth(format!(
            "Invalid password for role {}",
            role
        )))
    }
}
