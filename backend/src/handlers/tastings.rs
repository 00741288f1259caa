//! HTTP handlers for tasting session endpoints
//!
//! Mounted behind the auth middleware; every handler acts as the caller.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::schemas::{
    TastingListQuery, TastingNoteCreate, TastingSessionCreate, TastingSessionListResponse,
    TastingSessionUpdate,
};

use crate::error::{AppResult, ErrorResponse};
use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::middleware::CurrentUser;
use crate::models::{TastingNote, TastingSession};
use crate::services::TastingService;
use crate::AppState;

/// List the caller's sessions, newest first
#[utoipa::path(
    get,
    path = "/tastings",
    tag = "tastings",
    params(TastingListQuery),
    responses(
        (status = 200, description = "The caller's sessions", body = TastingSessionListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_tastings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<TastingListQuery>,
) -> AppResult<Json<TastingSessionListResponse>> {
    let service = TastingService::new(state.db);
    let response = service.list(&query, current_user.id()).await?;
    Ok(Json(response))
}

/// Record a session together with its notes
#[utoipa::path(
    post,
    path = "/tastings",
    tag = "tastings",
    request_body = TastingSessionCreate,
    responses(
        (status = 201, description = "Session recorded", body = TastingSession),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Coffee not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_tasting(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(input): ValidatedJson<TastingSessionCreate>,
) -> AppResult<(StatusCode, Json<TastingSession>)> {
    let service = TastingService::new(state.db);
    let session = service.create(input, current_user.id()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(
    get,
    path = "/tastings/{id}",
    tag = "tastings",
    params(("id" = Uuid, Path, description = "Tasting session id")),
    responses(
        (status = 200, description = "Session with notes", body = TastingSession),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Session belongs to another user", body = ErrorResponse),
        (status = 404, description = "Tasting session not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_tasting(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(tasting_id): Path<Uuid>,
) -> AppResult<Json<TastingSession>> {
    let service = TastingService::new(state.db);
    let session = service.get(tasting_id, current_user.id()).await?;
    Ok(Json(session))
}

#[utoipa::path(
    put,
    path = "/tastings/{id}",
    tag = "tastings",
    params(("id" = Uuid, Path, description = "Tasting session id")),
    request_body = TastingSessionUpdate,
    responses(
        (status = 200, description = "Session updated", body = TastingSession),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Session belongs to another user", body = ErrorResponse),
        (status = 404, description = "Tasting session or coffee not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_tasting(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(tasting_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<TastingSessionUpdate>,
) -> AppResult<Json<TastingSession>> {
    let service = TastingService::new(state.db);
    let session = service
        .update(tasting_id, input, current_user.id())
        .await?;
    Ok(Json(session))
}

#[utoipa::path(
    delete,
    path = "/tastings/{id}",
    tag = "tastings",
    params(("id" = Uuid, Path, description = "Tasting session id")),
    responses(
        (status = 204, description = "Session and notes deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Tasting session not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_tasting(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(tasting_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = TastingService::new(state.db);
    service.delete(tasting_id, current_user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a flavor note to an existing session
#[utoipa::path(
    post,
    path = "/tastings/{id}/notes",
    tag = "tastings",
    params(("id" = Uuid, Path, description = "Tasting session id")),
    request_body = TastingNoteCreate,
    responses(
        (status = 201, description = "Note added", body = TastingNote),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Session belongs to another user", body = ErrorResponse),
        (status = 404, description = "Tasting session not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_tasting_note(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(tasting_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<TastingNoteCreate>,
) -> AppResult<(StatusCode, Json<TastingNote>)> {
    let service = TastingService::new(state.db);
    let note = service
        .add_note(tasting_id, input, current_user.id())
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}
