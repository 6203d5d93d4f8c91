//! HTTP handlers for the system backend

use crate::error::Result;
use crate::system::metrics::MetricsSampler;
use crate::system::registry::ModuleRegistry;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

fn default_reason() -> String {
    "Manual restart".to_string()
}

fn default_delay() -> u64 {
    5
}

fn default_limit() -> usize {
    50
}

fn default_level() -> String {
    "all".to_string()
}

/// Payload for the simulated restart endpoint
#[derive(Debug, Deserialize)]
pub struct RestartRequest {
    #[serde(default = "default_reason")]
    pub reason: String,
    #[serde(default = "default_delay")]
    pub delay_seconds: u64,
}

/// Query parameters for the simulated log endpoint
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_level")]
    pub level: String,
}

/// Register the system backend's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/api/system/health", web::get().to(get_system_health))
        .route("/api/system/info", web::get().to(get_system_info))
        .route("/api/system/modules", web::get().to(get_system_modules))
        .route(
            "/api/system/modules/{name}/toggle",
            web::post().to(toggle_module),
        )
        .route("/api/system/restart", web::post().to(restart_system))
        .route("/api/system/shutdown", web::post().to(shutdown_system))
        .route("/api/system/status", web::get().to(get_system_status))
        .route(
            "/api/system/performance",
            web::get().to(get_performance_metrics),
        )
        .route("/api/system/logs", web::get().to(get_system_logs));
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("MaskService System API v{}", crate::VERSION),
        "status": "active"
    }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "system",
        "version": crate::VERSION
    }))
}

/// Comprehensive health: freshly sampled load plus service and module status
async fn get_system_health(
    sampler: web::Data<MetricsSampler>,
    registry: web::Data<ModuleRegistry>,
) -> Result<HttpResponse> {
    let load = sampler.sample().await?;

    // Static service map; only this process is actually observable
    let services = json!({
        "api": "online",
        "authentication": "online",
        "testing_engine": "online",
    });

    Ok(HttpResponse::Ok().json(json!({
        "status": "online",
        "timestamp": Utc::now().to_rfc3339(),
        "services": services,
        "modules": registry.active_module_names(),
        "system_load": {
            "cpu_usage": load.cpu_usage,
            "memory_usage": load.memory_usage,
            "disk_usage": load.disk_usage,
            "load_average": load.load_average,
        },
    })))
}

/// Detailed system information
async fn get_system_info(
    sampler: web::Data<MetricsSampler>,
    registry: web::Data<ModuleRegistry>,
) -> Result<HttpResponse> {
    let load = sampler.sample().await?;

    Ok(HttpResponse::Ok().json(json!({
        "name": registry.system_name(),
        "version": crate::VERSION,
        "status": registry.current_status(),
        "modules": registry.active_module_names(),
        "platform": MetricsSampler::platform(),
        "uptime": MetricsSampler::uptime_secs(),
        "memory_usage": load.memory_usage,
        "cpu_usage": load.cpu_usage,
    })))
}

async fn get_system_modules(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.list())
}

/// Toggle module status (enable/disable)
async fn toggle_module(
    path: web::Path<String>,
    registry: web::Data<ModuleRegistry>,
) -> Result<HttpResponse> {
    let name = path.into_inner();
    let module = registry.toggle(&name)?;
    info!("Module {} toggled to {}", name, module.status);

    let action = if module.status == "active" {
        "activated"
    } else {
        "deactivated"
    };
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Module {} {}", name, action),
        "module": module,
    })))
}

/// Initiate a simulated system restart
async fn restart_system(
    body: web::Json<RestartRequest>,
    registry: web::Data<ModuleRegistry>,
) -> HttpResponse {
    info!("System restart requested: {}", body.reason);
    let ack = registry.restart(&body.reason, body.delay_seconds);
    HttpResponse::Ok().json(ack)
}

/// Initiate a simulated system shutdown
async fn shutdown_system(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    info!("System shutdown requested");
    HttpResponse::Ok().json(registry.shutdown())
}

async fn get_system_status(registry: web::Data<ModuleRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.status_snapshot())
}

async fn get_performance_metrics(sampler: web::Data<MetricsSampler>) -> Result<HttpResponse> {
    let metrics = sampler.performance().await?;
    Ok(HttpResponse::Ok().json(metrics))
}

/// Simulated log entries derived from the module registry
async fn get_system_logs(
    query: web::Query<LogsQuery>,
    registry: web::Data<ModuleRegistry>,
) -> HttpResponse {
    let levels = ["INFO", "WARNING", "ERROR", "DEBUG"];
    let modules = registry.list();
    let limit = query.limit.min(500);

    let mut entries = Vec::with_capacity(limit);
    for i in 0..limit {
        let level = levels[i % levels.len()];
        if !query.level.eq_ignore_ascii_case("all") && !query.level.eq_ignore_ascii_case(level) {
            continue;
        }
        let module = &modules[i % modules.len()];
        entries.push(json!({
            "id": Uuid::new_v4().to_string(),
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "module": module.name,
            "message": format!("System operation {} completed successfully", i + 1),
            "details": format!("Processing module {}", module.name),
        }));
    }

    HttpResponse::Ok().json(json!({
        "logs": entries,
        "total": entries.len(),
        "filter": query.level,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
