//! Dashboard backend integration tests

use actix_web::{test, web, App};
use maskservice::auth::{Role, TokenService};
use maskservice::config::JwtConfig;
use maskservice::dashboard;
use serde_json::Value;

fn create_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_jwt_secret_key_that_is_at_least_32_characters_long".to_string(),
        algorithm: "HS256".to_string(),
        expiration: 3600,
        issuer: None,
    }
}

macro_rules! dashboard_app {
    ($tokens:expr) => {
        test::init_service(
            App::new()
                .app_data($tokens.clone())
                .configure(dashboard::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_menu_for_every_known_role() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    for (role, expected_len) in [
        ("OPERATOR", 7),
        ("ADMIN", 9),
        ("SUPERUSER", 14),
        ("SERVICEUSER", 12),
    ] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/menu?role={}", role))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "menu failed for {}", role);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["role"], role);
        assert_eq!(body["total_items"], expected_len);
        assert_eq!(body["items"].as_array().unwrap().len(), expected_len);
    }
}

#[actix_web::test]
async fn test_menu_role_is_case_insensitive_and_defaults_to_operator() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/api/menu?role=operator")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["role"], "OPERATOR");

    let req = test::TestRequest::get().uri("/api/menu").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["role"], "OPERATOR");
    assert_eq!(body["total_items"], 7);
}

#[actix_web::test]
async fn test_menu_unknown_role_is_400() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/api/menu?role=GUEST")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_menu_order_is_stable() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/api/menu?role=ADMIN")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["id"], "test_menu");
    assert_eq!(items[1]["id"], "user_data");
    assert_eq!(items.last().unwrap()["id"], "settings_system");
}

#[actix_web::test]
async fn test_search_matches_label_case_insensitively() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/api/menu/search?query=TEST%20MENU&role=OPERATOR")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total_results"], 1);
    assert_eq!(body["results"][0]["id"], "test_menu");
}

#[actix_web::test]
async fn test_search_matches_description() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    // "Raporty" appears only in descriptions for the operator menu
    let req = test::TestRequest::get()
        .uri("/api/menu/search?query=raporty&role=OPERATOR")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total_results"], 1);
    assert_eq!(body["results"][0]["id"], "test_reports");
}

#[actix_web::test]
async fn test_search_empty_result_is_ok_not_error() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/api/menu/search?query=zzzzzz&role=ADMIN")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_results"], 0);
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_search_unknown_role_is_400() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/api/menu/search?query=test&role=NOBODY")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_track_acknowledges_without_persisting() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::post()
        .uri("/api/menu/track?menu_id=test_menu&role=OPERATOR")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["tracked"], true);
    assert_eq!(body["menu_id"], "test_menu");
    assert_eq!(body["role"], "OPERATOR");
    assert!(body["timestamp"].as_str().is_some());
}

#[actix_web::test]
async fn test_user_stats_with_valid_token() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let token = tokens.issue("admin", Role::Admin).unwrap();
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get()
        .uri(&format!("/api/user/stats?token={}", token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "ADMIN");
    assert_eq!(body["session_duration"], "Active");
}

#[actix_web::test]
async fn test_user_stats_without_token_is_guest() {
    let tokens = web::Data::new(TokenService::new(&create_test_jwt_config()).unwrap());
    let app = dashboard_app!(tokens);

    let req = test::TestRequest::get().uri("/api/user/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["username"], "Guest");
    assert_eq!(body["role"], "OPERATOR");
    assert_eq!(body["session_duration"], "Not authenticated");
}
