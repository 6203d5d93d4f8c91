//! HTTP handlers for the dashboard backend

use crate::auth::{Role, TokenService};
use crate::dashboard::catalog::{menu_for, MenuItem};
use crate::error::Result;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

fn default_role() -> String {
    "OPERATOR".to_string()
}

/// Query parameters selecting a role
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(default = "default_role")]
    pub role: String,
}

/// Query parameters for menu search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default = "default_role")]
    pub role: String,
}

/// Query parameters for menu selection tracking
#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub menu_id: String,
    #[serde(default = "default_role")]
    pub role: String,
}

/// Query parameters for user session statistics
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub token: Option<String>,
}

/// Register the dashboard backend's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/api/menu", web::get().to(get_menu))
        .route("/api/menu/search", web::get().to(search_menu))
        .route("/api/menu/track", web::post().to(track_menu_selection))
        .route("/api/user/stats", web::get().to(get_user_stats));
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("MaskService Dashboard API v{}", crate::VERSION),
        "status": "active"
    }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "dashboard",
        "version": crate::VERSION
    }))
}

/// Static ordered menu for a role
async fn get_menu(query: web::Query<MenuQuery>) -> Result<HttpResponse> {
    let role = Role::parse(&query.role)?;
    let items = menu_for(role);

    Ok(HttpResponse::Ok().json(json!({
        "role": role,
        "items": items,
        "total_items": items.len(),
    })))
}

/// Case-insensitive substring search over label and description
async fn search_menu(query: web::Query<SearchQuery>) -> Result<HttpResponse> {
    let role = Role::parse(&query.role)?;
    let needle = query.query.to_lowercase();

    let results: Vec<&MenuItem> = menu_for(role)
        .iter()
        .filter(|item| {
            item.label.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "query": query.query,
        "role": role,
        "results": results,
        "total_results": results.len(),
    })))
}

/// Acknowledge a menu selection. Nothing is persisted.
async fn track_menu_selection(query: web::Query<TrackQuery>) -> Result<HttpResponse> {
    let role = Role::parse(&query.role)?;
    debug!("Menu selection tracked: {} ({})", query.menu_id, role);

    Ok(HttpResponse::Ok().json(json!({
        "tracked": true,
        "menu_id": query.menu_id,
        "role": role,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// Session statistics from token claims; guests get a placeholder
async fn get_user_stats(
    query: web::Query<StatsQuery>,
    tokens: web::Data<TokenService>,
) -> HttpResponse {
    if let Some(token) = query.token.as_deref() {
        if let Ok(claims) = tokens.verify(token) {
            let now = Utc::now().to_rfc3339();
            return HttpResponse::Ok().json(json!({
                "username": claims.sub,
                "role": claims.role,
                "login_time": now,
                "last_activity": now,
                "session_duration": "Active",
            }));
        }
    }

    HttpResponse::Ok().json(json!({
        "username": "Guest",
        "role": Role::Operator,
        "login_time": "Not authenticated",
        "last_activity": "Not authenticated",
        "session_duration": "Not authenticated",
    }))
}
