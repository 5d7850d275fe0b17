//! REST API Tests
//!
//! Drives the full router (every resource mounted, fallback, middleware)
//! the way the server does, without binding a socket.

use std::fs;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use studify::config::StudifyConfig;
use studify::rest_api::RestServer;
use studify::store::Catalog;

// =============================================================================
// Helper Functions
// =============================================================================

fn seed() -> Value {
    json!({
        "discussions": [
            {"title": "Best note app?", "category": "Tools", "views": 12},
            {"title": "Exam stress", "category": "Wellbeing", "views": 40}
        ],
        "productivity": [
            {"title": "Pomodoro", "category": "Focus", "views": 40, "isFeatured": true},
            {"title": "Deep Work", "category": "Focus", "views": 90},
            {"title": "Time Blocking", "category": "Focus", "views": 60}
        ],
        "tools": [
            {"name": "Anki", "category": "Memory", "isFeatured": true}
        ],
        "tutorials": []
    })
}

fn router_with(config: &StudifyConfig) -> Router {
    let catalog = Catalog::new();
    catalog.seed(seed()).unwrap();
    RestServer::new(&catalog, config).unwrap().router()
}

fn router() -> Router {
    router_with(&StudifyConfig::default())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_headers(router: Router, request: Request<Body>) -> HeaderMap {
    router.oneshot(request).await.unwrap().headers().clone()
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(router(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_every_resource_is_mounted() {
    let router = router();
    for (path, total) in [
        ("/api/community/discussions", 2),
        ("/api/productivity", 3),
        ("/api/tools", 1),
        ("/api/tutorials", 0),
    ] {
        let (status, body) = get_json(router.clone(), path).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body["success"], true, "{}", path);
        assert_eq!(body["total"], total, "{}", path);
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, body) = get_json(router(), "/api/videos").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "error", "message": "Route not found"}));
}

// =============================================================================
// List Envelope
// =============================================================================

#[tokio::test]
async fn test_list_envelope() {
    let (status, body) = get_json(
        router(),
        "/api/productivity?category=Focus&sort=-views&limit=2&select=title",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["pagination"], json!({"next": {"page": 2, "limit": 2}}));
    assert_eq!(body["data"][0]["title"], "Deep Work");
    assert_eq!(body["data"][1]["title"], "Time Blocking");
    assert!(body["data"][0].get("views").is_none());
}

#[tokio::test]
async fn test_malformed_query_is_400() {
    let (status, body) = get_json(router(), "/api/productivity?views%5Bwhere%5D=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("where"));
}

#[tokio::test]
async fn test_repeated_page_uses_first_value() {
    let (status, body) = get_json(router(), "/api/productivity?page=2&page=3&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["pagination"], json!({"prev": {"page": 1, "limit": 2}}));
}

#[tokio::test]
async fn test_limit_mapping_falls_back_to_default() {
    let (status, body) = get_json(router(), "/api/productivity?limit%5Bgt%5D=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_configured_max_limit_applies() {
    let mut config = StudifyConfig::default();
    config.query.max_limit = 10;

    let (_, body) = get_json(router_with(&config), "/api/productivity?limit=1000").await;
    assert_eq!(body["count"], 3);
}

// =============================================================================
// Single Documents
// =============================================================================

#[tokio::test]
async fn test_featured_and_slug_routes() {
    let router = router();

    let (_, body) = get_json(router.clone(), "/api/productivity/featured").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Pomodoro");

    let (status, body) = get_json(router.clone(), "/api/productivity/slug/deep-work").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], 91);

    let (status, body) = get_json(router, "/api/tools/slug/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tool not found with slug of missing");
}

#[tokio::test]
async fn test_productivity_by_id_does_not_count_views() {
    let router = router();
    let (_, listing) = get_json(router.clone(), "/api/productivity?title=Pomodoro").await;
    let id = listing["data"][0]["_id"].as_str().unwrap().to_string();

    let (status, body) = get_json(router.clone(), &format!("/api/productivity/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], 40);

    let (status, body) = get_json(router, "/api/productivity/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Productivity hack not found with id of nope");
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn test_security_headers_on_every_response() {
    for uri in ["/api/health", "/api/tools", "/api/videos"] {
        let headers = get_headers(router(), Request::get(uri).body(Body::empty()).unwrap()).await;

        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff", "{}", uri);
        assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN", "{}", uri);
        assert_eq!(headers[header::REFERRER_POLICY], "no-referrer", "{}", uri);
        assert!(headers.contains_key(header::STRICT_TRANSPORT_SECURITY), "{}", uri);
    }
}

#[tokio::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let request = Request::get("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let headers = get_headers(router(), request).await;

    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_cors_ignores_unlisted_origin() {
    let request = Request::get("/api/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let headers = get_headers(router(), request).await;

    assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_cors_without_origins_allows_any() {
    let mut config = StudifyConfig::default();
    config.server.cors_origins.clear();

    let request = Request::get("/api/health")
        .header(header::ORIGIN, "https://anywhere.example")
        .body(Body::empty())
        .unwrap();
    let headers = get_headers(router_with(&config), request).await;

    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
}

#[tokio::test]
async fn test_gzip_when_accepted() {
    let request = Request::get("/api/productivity")
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();
    let headers = get_headers(router(), request).await;

    assert_eq!(headers[header::CONTENT_ENCODING], "gzip");
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_server_from_config_and_seed_files() {
    let dir = TempDir::new().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, seed().to_string()).unwrap();

    let config_path = dir.path().join("studify.json");
    fs::write(
        &config_path,
        json!({
            "server": {"port": 8081},
            "seed_path": seed_path
        })
        .to_string(),
    )
    .unwrap();

    let config = StudifyConfig::load(&config_path).unwrap();
    let catalog = Catalog::new();
    catalog
        .load_seed(config.seed_path.as_deref().unwrap())
        .unwrap();

    let server = RestServer::new(&catalog, &config).unwrap();
    assert_eq!(server.socket_addr(), "0.0.0.0:8081");

    let (_, body) = get_json(server.router(), "/api/community/discussions?sort=-views").await;
    assert_eq!(body["data"][0]["title"], "Exam stress");
}
