//! Coffee Tasting API
//!
//! REST backend for recording coffee tasting notes: roasters, coffees,
//! flavor tags and tasting sessions, authenticated with Supabase access
//! tokens and stored in PostgreSQL.

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod external;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod security;
pub mod services;

pub use config::Config;

use external::LlmClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    /// Built once so every request reuses one connection pool
    pub llm: Option<LlmClient>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, config: Config) -> Self {
        let llm = LlmClient::from_config(&config);
        if llm.is_none() {
            tracing::warn!("OPENAI_API_KEY not set, preference analysis is disabled");
        }

        Self {
            db,
            config: Arc::new(config),
            llm,
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = config.cors_origin_list();
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();
    let mut api = routes::api_routes(&state);
    let mut outer = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::liveness));

    // Docs are served only when DEBUG is set
    if config.debug {
        api = api.route("/openapi.json", get(openapi::openapi_json));
        outer = outer.merge(openapi::doc_pages(&config));
    }
    let api = api.with_state(state.clone());

    middleware::rate_limited(outer, &config.api_v1_str, api, &config)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config))
        .with_state(state)
}
