//! Global request rate limiting
//!
//! One limiter instance guards the whole API: requests over
//! `RATE_LIMIT_REQUESTS` per `RATE_LIMIT_PERIOD` seconds are shed with 429.

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::Request,
    response::{IntoResponse, Response},
    BoxError, Router,
};
use tower::{
    buffer::BufferLayer, limit::RateLimitLayer, load_shed::error::Overloaded,
    load_shed::LoadShedLayer, ServiceBuilder,
};

use crate::config::Config;
use crate::error::AppError;

/// Queue depth in front of the limiter
const BUFFER_CAPACITY: usize = 1024;

async fn handle_limit_error(err: BoxError) -> Response {
    if err.is::<Overloaded>() {
        AppError::RateLimited.into_response()
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", err)).into_response()
    }
}

/// Mount `api` under `prefix`, behind a shared limiter when one is configured
pub fn rate_limited<S>(outer: Router<S>, prefix: &str, api: Router, config: &Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let limit = (config.rate_limit_requests > 0).then(|| {
        RateLimitLayer::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_period.max(1)),
        )
    });

    if limit.is_none() {
        tracing::info!("Rate limiting disabled");
    }

    let service = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_limit_error))
        .layer(BufferLayer::<Request>::new(BUFFER_CAPACITY))
        .layer(LoadShedLayer::new())
        .option_layer(limit)
        .service(api);

    outer.nest_service(prefix, service)
}
