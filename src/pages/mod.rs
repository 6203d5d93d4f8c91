//! Health-check stub backends (devices, reports)
//!
//! These pages have no server-side behavior yet; they expose the same
//! banner and liveness endpoints as the full backends so the suite is
//! uniform to probe.

use actix_web::{web, HttpResponse};
use serde_json::json;

/// Identity of a stub backend, injected as app data
#[derive(Debug, Clone)]
pub struct PageStub {
    /// Lowercase service name used in health payloads ("devices", "reports")
    pub service: &'static str,
    /// Human title used in the banner ("Devices", "Reports")
    pub title: &'static str,
}

impl PageStub {
    pub const DEVICES: PageStub = PageStub {
        service: "devices",
        title: "Devices",
    };

    pub const REPORTS: PageStub = PageStub {
        service: "reports",
        title: "Reports",
    };
}

/// Register the stub routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check));
}

async fn root(stub: web::Data<PageStub>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("MaskService {} API v{}", stub.title, crate::VERSION),
        "status": "active"
    }))
}

async fn health_check(stub: web::Data<PageStub>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": stub.service,
        "version": crate::VERSION
    }))
}
