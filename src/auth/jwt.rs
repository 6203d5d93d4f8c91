//! JWT issuance and verification for MaskService
//!
//! One `TokenService` is built from the shared auth configuration and handed
//! to every backend that issues or verifies tokens. Expiry is the only
//! invalidation mechanism; there is no revocation list.

use crate::auth::Role;
use crate::config::JwtConfig;
use crate::error::{Result, ServiceError};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Claims carried by a MaskService token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Role asserted by the token
    pub role: Role,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Token issue/verify service shared by the backends
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    expiration: u64,
    issuer: Option<String>,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Result<Self> {
        let algorithm = Self::parse_algorithm(&config.algorithm)?;

        // HMAC algorithms share one key for encoding and decoding
        let key = config.secret.as_bytes();
        let encoding_key = EncodingKey::from_secret(key);
        let decoding_key = DecodingKey::from_secret(key);

        let mut validation = Validation::new(algorithm);
        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm,
            validation,
            expiration: config.expiration,
            issuer: config.issuer.clone(),
        })
    }

    /// Parse JWT algorithm from string
    fn parse_algorithm(algorithm: &str) -> Result<Algorithm> {
        match algorithm {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(ServiceError::config(format!(
                "Unsupported JWT algorithm: '{}'. Supported: HS256, HS384, HS512",
                algorithm
            ))),
        }
    }

    fn now() -> Result<u64> {
        Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| ServiceError::auth("Failed to get current time"))?
            .as_secs())
    }

    /// Issue a token asserting a username and role
    pub fn issue(&self, username: &str, role: Role) -> Result<String> {
        let now = Self::now()?;

        let claims = TokenClaims {
            sub: username.to_string(),
            role,
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
        };

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ServiceError::auth(format!("Failed to generate token: {}", e)))
    }

    /// Verify a token, distinguishing expiry from every other failure
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        ServiceError::token_expired("Token has expired")
                    }
                    _ => ServiceError::token_invalid("Token is invalid or malformed"),
                }
            })?;

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Configured token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }

    #[cfg(test)]
    pub(crate) fn issue_with_lifetime(
        &self,
        username: &str,
        role: Role,
        lifetime: i64,
    ) -> Result<String> {
        let now = Self::now()? as i64;
        let claims = TokenClaims {
            sub: username.to_string(),
            role,
            iat: now.max(0) as u64,
            exp: (now + lifetime).max(0) as u64,
            iss: self.issuer.clone(),
        };
        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ServiceError::auth(format!("Failed to generate token: {}", e)))
    }
}
