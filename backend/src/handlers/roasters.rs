//! HTTP handlers for roaster endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::schemas::{RoasterCreate, RoasterListQuery, RoasterListResponse, RoasterUpdate};

use crate::error::{AppResult, ErrorResponse};
use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::middleware::CurrentUser;
use crate::models::Roaster;
use crate::services::RoasterService;
use crate::AppState;

/// List roasters with optional name and location filters
#[utoipa::path(
    get,
    path = "/roasters",
    tag = "roasters",
    params(RoasterListQuery),
    responses(
        (status = 200, description = "Paginated roasters", body = RoasterListResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn list_roasters(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RoasterListQuery>,
) -> AppResult<Json<RoasterListResponse>> {
    let service = RoasterService::new(state.db);
    let response = service.list(&query).await?;
    Ok(Json(response))
}

/// Create a roaster
#[utoipa::path(
    post,
    path = "/roasters",
    tag = "roasters",
    request_body = RoasterCreate,
    responses(
        (status = 201, description = "Roaster created", body = Roaster),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_roaster(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(input): ValidatedJson<RoasterCreate>,
) -> AppResult<(StatusCode, Json<Roaster>)> {
    let service = RoasterService::new(state.db);
    let roaster = service.create(input, current_user.id()).await?;
    Ok((StatusCode::CREATED, Json(roaster)))
}

#[utoipa::path(
    get,
    path = "/roasters/{id}",
    tag = "roasters",
    params(("id" = Uuid, Path, description = "Roaster id")),
    responses(
        (status = 200, description = "Roaster", body = Roaster),
        (status = 404, description = "Roaster not found", body = ErrorResponse)
    )
)]
pub async fn get_roaster(
    State(state): State<AppState>,
    Path(roaster_id): Path<Uuid>,
) -> AppResult<Json<Roaster>> {
    let service = RoasterService::new(state.db);
    let roaster = service.get(roaster_id).await?;
    Ok(Json(roaster))
}

#[utoipa::path(
    put,
    path = "/roasters/{id}",
    tag = "roasters",
    params(("id" = Uuid, Path, description = "Roaster id")),
    request_body = RoasterUpdate,
    responses(
        (status = 200, description = "Roaster updated", body = Roaster),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Roaster not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_roaster(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(roaster_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<RoasterUpdate>,
) -> AppResult<Json<Roaster>> {
    let service = RoasterService::new(state.db);
    let roaster = service
        .update(roaster_id, input, current_user.id())
        .await?;
    Ok(Json(roaster))
}

/// Delete a roaster (soft delete)
#[utoipa::path(
    delete,
    path = "/roasters/{id}",
    tag = "roasters",
    params(("id" = Uuid, Path, description = "Roaster id")),
    responses(
        (status = 204, description = "Roaster deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Roaster not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_roaster(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(roaster_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = RoasterService::new(state.db);
    service.delete(roaster_id, current_user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Undo a soft delete
#[utoipa::path(
    post,
    path = "/roasters/{id}/restore",
    tag = "roasters",
    params(("id" = Uuid, Path, description = "Roaster id")),
    responses(
        (status = 200, description = "Roaster restored", body = Roaster),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Deleted roaster not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn restore_roaster(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(roaster_id): Path<Uuid>,
) -> AppResult<Json<Roaster>> {
    let service = RoasterService::new(state.db);
    let roaster = service.restore(roaster_id, current_user.id()).await?;
    Ok(Json(roaster))
}
