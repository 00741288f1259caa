//! HTTP handlers for flavor tag endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::schemas::{FlavorTagCreate, FlavorTagListQuery, FlavorTagListResponse, FlavorTagUpdate};

use crate::error::{AppResult, ErrorResponse};
use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::middleware::CurrentUser;
use crate::models::FlavorTag;
use crate::services::FlavorTagService;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/flavor-tags",
    tag = "flavor-tags",
    params(FlavorTagListQuery),
    responses(
        (status = 200, description = "Paginated flavor tags", body = FlavorTagListResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn list_flavor_tags(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<FlavorTagListQuery>,
) -> AppResult<Json<FlavorTagListResponse>> {
    let service = FlavorTagService::new(state.db);
    let response = service.list(&query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/flavor-tags",
    tag = "flavor-tags",
    request_body = FlavorTagCreate,
    responses(
        (status = 201, description = "Flavor tag created, or a deleted tag of the same name restored", body = FlavorTag),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_flavor_tag(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(input): ValidatedJson<FlavorTagCreate>,
) -> AppResult<(StatusCode, Json<FlavorTag>)> {
    let service = FlavorTagService::new(state.db);
    let tag = service.create(input, current_user.id()).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    get,
    path = "/flavor-tags/{id}",
    tag = "flavor-tags",
    params(("id" = Uuid, Path, description = "Flavor tag id")),
    responses(
        (status = 200, description = "Flavor tag", body = FlavorTag),
        (status = 404, description = "Flavor tag not found", body = ErrorResponse)
    )
)]
pub async fn get_flavor_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
) -> AppResult<Json<FlavorTag>> {
    let service = FlavorTagService::new(state.db);
    let tag = service.get(tag_id).await?;
    Ok(Json(tag))
}

#[utoipa::path(
    put,
    path = "/flavor-tags/{id}",
    tag = "flavor-tags",
    params(("id" = Uuid, Path, description = "Flavor tag id")),
    request_body = FlavorTagUpdate,
    responses(
        (status = 200, description = "Flavor tag updated", body = FlavorTag),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Flavor tag not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_flavor_tag(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(tag_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<FlavorTagUpdate>,
) -> AppResult<Json<FlavorTag>> {
    let service = FlavorTagService::new(state.db);
    let tag = service.update(tag_id, input, current_user.id()).await?;
    Ok(Json(tag))
}

#[utoipa::path(
    delete,
    path = "/flavor-tags/{id}",
    tag = "flavor-tags",
    params(("id" = Uuid, Path, description = "Flavor tag id")),
    responses(
        (status = 204, description = "Flavor tag deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Flavor tag not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_flavor_tag(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(tag_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = FlavorTagService::new(state.db);
    service.delete(tag_id, current_user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
