//! HTTP handlers for the tests backend

use crate::error::Result;
use crate::testing::store::{ScenarioRequest, TestConfigRequest, TestStartRequest, TestStore};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

fn default_filter() -> String {
    "all".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

/// Query parameters for history filtering
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_filter")]
    pub filter: String,
}

/// Query parameters for export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub format: String,
}

/// Register the tests backend's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/api/test/start", web::post().to(start_test))
        .route("/api/test/configure", web::post().to(configure_test))
        .route("/api/scenarios", web::get().to(get_scenarios))
        .route("/api/scenarios", web::post().to(create_scenario))
        .route("/api/templates", web::get().to(get_templates))
        .route("/api/history", web::get().to(get_history))
        .route("/api/export", web::get().to(export_data))
        .route("/api/stats", web::get().to(get_stats))
        .route("/api/test/{test_id}", web::delete().to(delete_test));
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("MaskService Tests API v{}", crate::VERSION),
        "status": "active"
    }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "tests",
        "version": crate::VERSION
    }))
}

/// Start a new test session for a menu option
async fn start_test(
    body: web::Json<TestStartRequest>,
    store: web::Data<TestStore>,
) -> HttpResponse {
    let session = store.start_session(&body);
    let test_id = session["id"].clone();
    info!("Test started for option: {}", body.option);

    HttpResponse::Ok().json(json!({
        "test_id": test_id,
        "message": format!("Test started for option: {}", body.option),
        "session": session,
        "next_url": "/page/devices/js/0.1.0/",
    }))
}

/// Configure a new test from wizard data
async fn configure_test(
    body: web::Json<TestConfigRequest>,
    store: web::Data<TestStore>,
) -> HttpResponse {
    let (test_id, config) = store.configure(&body);
    info!("Test configured: {} ({})", body.name, test_id);

    HttpResponse::Ok().json(json!({
        "test_id": test_id,
        "message": "Test configured successfully",
        "config": config,
        "saved_as_template": body.save_as_template,
    }))
}

async fn get_scenarios(store: web::Data<TestStore>) -> HttpResponse {
    HttpResponse::Ok().json(store.scenarios())
}

async fn create_scenario(
    body: web::Json<ScenarioRequest>,
    store: web::Data<TestStore>,
) -> HttpResponse {
    let scenario = store.add_scenario(&body);
    HttpResponse::Ok().json(json!({
        "message": "Scenario created successfully",
        "scenario": scenario,
    }))
}

async fn get_templates(store: web::Data<TestStore>) -> HttpResponse {
    HttpResponse::Ok().json(store.templates())
}

async fn get_history(query: web::Query<HistoryQuery>, store: web::Data<TestStore>) -> HttpResponse {
    HttpResponse::Ok().json(store.history(&query.filter))
}

async fn export_data(query: web::Query<ExportQuery>, store: web::Data<TestStore>) -> HttpResponse {
    let data = store.export(&query.format);
    HttpResponse::Ok().json(json!({
        "message": format!("Data exported in {} format", query.format),
        "data": data,
        "filename": format!(
            "maskservice_tests_{}.{}",
            Utc::now().format("%Y%m%d"),
            query.format
        ),
    }))
}

async fn get_stats(store: web::Data<TestStore>) -> HttpResponse {
    HttpResponse::Ok().json(store.stats())
}

/// Delete a test from history by id
async fn delete_test(
    path: web::Path<String>,
    store: web::Data<TestStore>,
) -> Result<HttpResponse> {
    let test_id = path.into_inner();
    store.delete_history(&test_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Test {} deleted successfully", test_id),
    })))
}
