//! HTTP handlers for the login backend

use crate::auth::{CredentialTable, Role, TokenService};
use crate::error::{Result, ServiceError};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: String,
    pub password: String,
}

/// Query parameters for token verification
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: Option<String>,
}

/// Register the login backend's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/api/login", web::post().to(login))
        .route("/api/verify", web::get().to(verify));
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("MaskService Login API v{}", crate::VERSION),
        "status": "active"
    }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "login",
        "version": crate::VERSION
    }))
}

/// Validate role+password and issue a signed token
async fn login(
    body: web::Json<LoginRequest>,
    credentials: web::Data<CredentialTable>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse> {
    let role = Role::parse(&body.role)?;
    credentials.authenticate(role, &body.password)?;

    let username = role.username();
    let token = tokens.issue(username, role)?;
    info!("Issued token for {} ({})", username, role);

    Ok(HttpResponse::Ok().json(json!({
        "token": token,
        "username": username,
        "role": role,
        "message": format!("Login successful for role {}", role),
    })))
}

/// Decode a token and return its claims, distinguishing expiry from
/// signature/structure failures
async fn verify(
    query: web::Query<VerifyQuery>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse> {
    let token = query
        .token
        .as_deref()
        .ok_or_else(|| ServiceError::validation("Missing token query parameter"))?;

    let claims = tokens.verify(token)?;

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "username": claims.sub,
        "role": claims.role,
        "expires_at": claims.exp,
    })))
}
