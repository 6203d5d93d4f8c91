//! Role model for MaskService
//!
//! Roles form a fixed enumeration with an explicit permission rank, so
//! comparisons are a documented total order rather than a lookup that can
//! silently miss unknown names.

use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named permission level controlling which menu and actions a user sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Operator,
    Admin,
    Superuser,
    Serviceuser,
}

impl Role {
    /// All known roles, in catalog order
    pub const ALL: [Role; 4] = [
        Role::Operator,
        Role::Admin,
        Role::Superuser,
        Role::Serviceuser,
    ];

    /// Canonical wire representation (UPPERCASE)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "OPERATOR",
            Role::Admin => "ADMIN",
            Role::Superuser => "SUPERUSER",
            Role::Serviceuser => "SERVICEUSER",
        }
    }

    /// Username assigned to logins for this role
    pub fn username(&self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Admin => "admin",
            Role::Superuser => "superuser",
            Role::Serviceuser => "serviceuser",
        }
    }

    /// Permission rank. SERVICEUSER is a lateral service role and ranks
    /// with OPERATOR rather than above ADMIN.
    pub fn rank(&self) -> u8 {
        match self {
            Role::Operator | Role::Serviceuser => 1,
            Role::Admin => 2,
            Role::Superuser => 3,
        }
    }

    /// Whether this role meets or exceeds the required role's rank
    pub fn at_least(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Parse a role, rejecting unknown names with the list of valid ones
    pub fn parse(value: &str) -> Result<Role> {
        value.parse()
    }

    fn available() -> String {
        Role::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Role {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "OPERATOR" => Ok(Role::Operator),
            "ADMIN" => Ok(Role::Admin),
            "SUPERUSER" => Ok(Role::Superuser),
            "SERVICEUSER" => Ok(Role::Serviceuser),
            other => Err(ServiceError::validation(format!(
                "Invalid role: {}. Available roles: {}",
                other,
                Role::available()
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::parse("operator").unwrap(), Role::Operator);
        assert_eq!(Role::parse("Admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("SUPERUSER").unwrap(), Role::Superuser);
        assert_eq!(Role::parse("serviceUser").unwrap(), Role::Serviceuser);
    }

    #[test]
    fn test_unknown_role_is_validation_error() {
        let err = Role::parse("GUEST").unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("OPERATOR"));
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Role::Superuser.at_least(Role::Admin));
        assert!(Role::Admin.at_least(Role::Operator));
        assert!(!Role::Operator.at_least(Role::Admin));
        // Lateral service role: operator-level, not admin-level
        assert!(Role::Serviceuser.at_least(Role::Operator));
        assert!(!Role::Serviceuser.at_least(Role::Admin));
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&Role::Serviceuser).unwrap();
        assert_eq!(json, "\"SERVICEUSER\"");
        let role: Role = serde_json::from_str("\"OPERATOR\"").unwrap();
        assert_eq!(role, Role::Operator);
    }
}
