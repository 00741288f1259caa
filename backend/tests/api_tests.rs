//! Router tests that run without a live database
//!
//! The pool connects lazily, so only paths that reject a request before
//! touching storage are exercised here.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use coffee_tasting::{create_app, db, security, AppState, Config};

const SECRET: &str = "api-test-secret";

fn test_config(rate_limit_requests: &str) -> Config {
    Config::with_overrides([
        ("environment", "testing"),
        ("database_url_test", "postgresql://localhost:5432/coffee_tasting_test"),
        ("database_min_connections", "0"),
        ("supabase_jwt_secret", SECRET),
        ("rate_limit_requests", rate_limit_requests),
    ])
    .unwrap()
}

fn app_with(config: Config) -> Router {
    let pool = db::connect_lazy(&config).unwrap();
    create_app(AppState::new(pool, config))
}

fn app() -> Router {
    app_with(test_config("0"))
}

fn token() -> String {
    security::generate_access_token(
        SECRET,
        "HS256",
        "user-123",
        Some("taster@example.com"),
        "authenticated",
        chrono::Duration::hours(1),
    )
    .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_liveness() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Coffee Tasting API");
    assert_eq!(body["environment"], "testing");
    assert!(body.get("database").is_none());
}

#[tokio::test]
async fn test_root_banner() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Welcome to Coffee Tasting API");
    assert_eq!(body["health"], "/health");
}

#[tokio::test]
async fn test_create_roaster_requires_token() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/roasters",
            json!({ "name": "Onyx" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "UnauthorizedError");
    assert_eq!(body["error"]["status_code"], 401);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/roasters",
            json!({ "name": "Onyx" }),
            Some("not-a-jwt"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(
        body["error"]["message"],
        "Invalid authentication credentials"
    );
}

#[tokio::test]
async fn test_invalid_body_is_422() {
    let token = token();
    let response = app()
        .oneshot(post_json(
            "/api/v1/roasters",
            json!({ "name": "" }),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "ValidationError");
    assert_eq!(body["error"]["field"], "name");
}

#[tokio::test]
async fn test_malformed_json_is_422() {
    let token = token();
    let response = app()
        .oneshot(post_json(
            "/api/v1/tastings",
            json!({ "brew_method": "v60" }),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_tastings_require_token() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/tastings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_recommendations_require_token() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/recommendations/preferences")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_query_bounds_validated() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/coffees?limit=5000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let app = app_with(test_config("1"));

    let first = app
        .clone()
        .oneshot(post_json("/api/v1/roasters", json!({ "name": "Onyx" }), None))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

    let second = app
        .oneshot(post_json("/api/v1/roasters", json!({ "name": "Onyx" }), None))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(second).await;
    assert_eq!(body["error"]["type"], "RateLimitError");
}

fn debug_app() -> Router {
    let mut config = test_config("0");
    config.debug = true;
    app_with(config)
}

#[tokio::test]
async fn test_openapi_document_served_in_debug() {
    let response = debug_app()
        .oneshot(
            Request::get("/api/v1/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["info"]["title"], "Coffee Tasting API");
    assert_eq!(body["servers"][0]["url"], "/api/v1");
    assert!(body["paths"]["/tastings/{id}/notes"]["post"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_doc_pages_served_in_debug() {
    let app = debug_app();

    let swagger = app
        .clone()
        .oneshot(Request::get("/docs/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(swagger.status(), StatusCode::OK);

    let redoc = app
        .oneshot(Request::get("/redoc").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(redoc.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_docs_hidden_without_debug() {
    let app = app();

    let document = app
        .clone()
        .oneshot(
            Request::get("/api/v1/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(document.status(), StatusCode::NOT_FOUND);

    let docs = app
        .oneshot(Request::get("/docs/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(docs.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_llm_client_lives_in_state() {
    let config = test_config("0");
    let pool = db::connect_lazy(&config).unwrap();
    assert!(AppState::new(pool.clone(), config).llm.is_none());

    let mut config = test_config("0");
    config.openai_api_key = Some("sk-test".to_string());
    config.openai_model = "llama3".to_string();
    let state = AppState::new(pool, config);

    let llm = state.llm.as_ref().unwrap();
    assert_eq!(llm.model(), "llama3");
    assert_eq!(state.clone().llm.unwrap().model(), "llama3");
}
