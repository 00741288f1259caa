//! HTTP handlers for taste profile and preference analysis

use axum::{extract::State, Json};

use crate::error::{AppResult, ErrorResponse};
use crate::middleware::CurrentUser;
use crate::services::recommendation::{AnalysisResponse, TasteProfile};
use crate::services::RecommendationService;
use crate::AppState;

/// Statistics over the caller's tasting history
#[utoipa::path(
    get,
    path = "/recommendations/preferences",
    tag = "recommendations",
    responses(
        (status = 200, description = "Taste profile statistics", body = serde_json::Value),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_taste_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<TasteProfile>> {
    let service = RecommendationService::new(state.db, state.llm);
    let profile = service.taste_profile(current_user.id()).await?;
    Ok(Json(profile))
}

/// LLM analysis of the caller's preferences
#[utoipa::path(
    get,
    path = "/recommendations/analysis",
    tag = "recommendations",
    responses(
        (status = 200, description = "LLM preference analysis", body = serde_json::Value),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "LLM not configured", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_flavor_analysis(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<AnalysisResponse>> {
    let service = RecommendationService::new(state.db, state.llm);
    let analysis = service.analyze(current_user.id()).await?;
    Ok(Json(analysis))
}
