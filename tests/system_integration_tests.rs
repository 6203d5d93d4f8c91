//! System backend integration tests

use actix_web::{test, web, App};
use maskservice::system::{self, MetricsSampler, ModuleRegistry};
use serde_json::{json, Value};

macro_rules! system_app {
    ($sampler:expr, $registry:expr) => {
        test::init_service(
            App::new()
                .app_data($sampler.clone())
                .app_data($registry.clone())
                .configure(system::configure),
        )
        .await
    };
}

fn create_test_state() -> (web::Data<MetricsSampler>, web::Data<ModuleRegistry>) {
    (
        web::Data::new(MetricsSampler::new()),
        web::Data::new(ModuleRegistry::new()),
    )
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "system");
}

#[actix_web::test]
async fn test_system_health_samples_load() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::get()
        .uri("/api/system/health")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "online");

    let load = &body["system_load"];
    let memory = load["memory_usage"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&memory));
    assert!(load["cpu_usage"].as_f64().unwrap() >= 0.0);
    assert!(load["disk_usage"].as_f64().unwrap() >= 0.0);

    // Devices seeds as pending, so four modules are active
    assert_eq!(body["modules"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn test_system_info() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::get().uri("/api/system/info").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["name"], "MASKTRONIC C20");
    assert_eq!(body["status"], "online");
    assert!(!body["platform"].as_str().unwrap().is_empty());
    assert!(body["uptime"].as_u64().is_some());
}

#[actix_web::test]
async fn test_modules_listing() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::get()
        .uri("/api/system/modules")
        .to_request();
    let modules: Value = test::call_and_read_body_json(&app, req).await;

    let modules = modules.as_array().unwrap();
    assert_eq!(modules.len(), 5);
    assert_eq!(modules[0]["name"], "Authentication");
    assert_eq!(modules[0]["status"], "active");
}

#[actix_web::test]
async fn test_toggle_module_flips_status_once_per_call() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::post()
        .uri("/api/system/modules/Authentication/toggle")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["module"]["status"], "inactive");
    assert_eq!(body["message"], "Module Authentication deactivated");
    let first_update = body["module"]["last_updated"].as_str().unwrap().to_string();
    assert_ne!(first_update, "2024-01-20T10:00:00Z");

    let req = test::TestRequest::post()
        .uri("/api/system/modules/Authentication/toggle")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["module"]["status"], "active");
    assert_eq!(body["message"], "Module Authentication activated");
}

#[actix_web::test]
async fn test_toggle_unknown_module_is_404() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::post()
        .uri("/api/system/modules/Telemetry/toggle")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_restart_flips_status_and_counts() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::post()
        .uri("/api/system/restart")
        .set_json(json!({"reason": "Scheduled maintenance", "delay_seconds": 10}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "System restart initiated");
    assert_eq!(body["reason"], "Scheduled maintenance");
    assert_eq!(body["delay_seconds"], 10);
    assert!(body["restart_id"].as_str().unwrap().len() > 10);

    let req = test::TestRequest::get()
        .uri("/api/system/status")
        .to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(status["status"], "restarting");
    assert_eq!(status["restart_count"], 1);
}

#[actix_web::test]
async fn test_restart_defaults_apply() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::post()
        .uri("/api/system/restart")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["reason"], "Manual restart");
    assert_eq!(body["delay_seconds"], 5);
}

#[actix_web::test]
async fn test_shutdown_flips_status() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::post()
        .uri("/api/system/shutdown")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["final_status"], "offline");

    let req = test::TestRequest::get()
        .uri("/api/system/status")
        .to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(status["status"], "shutting_down");
}

#[actix_web::test]
async fn test_status_snapshot_counts_modules() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::get()
        .uri("/api/system/status")
        .to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(status["total_modules"], 5);
    assert_eq!(status["active_modules"], 4);
    assert_eq!(status["restart_count"], 0);
    assert!(status["current_time"].as_str().is_some());
}

#[actix_web::test]
async fn test_performance_metrics() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::get()
        .uri("/api/system/performance")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert!(body["cpu"]["count"].as_u64().unwrap() > 0);
    assert!(body["memory"]["total_gb"].as_f64().unwrap() > 0.0);
    assert!(body["disk"]["total_gb"].as_f64().is_some());
}

#[actix_web::test]
async fn test_logs_respect_limit_and_level() {
    let (sampler, registry) = create_test_state();
    let app = system_app!(sampler, registry);

    let req = test::TestRequest::get()
        .uri("/api/system/logs?limit=8")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 8);

    let req = test::TestRequest::get()
        .uri("/api/system/logs?limit=8&level=error")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|entry| entry["level"] == "ERROR"));
}
