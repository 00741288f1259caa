//! HTTP handlers for coffee endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::schemas::{CoffeeCreate, CoffeeListQuery, CoffeeListResponse, CoffeeUpdate};

use crate::error::{AppResult, ErrorResponse};
use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::middleware::CurrentUser;
use crate::models::Coffee;
use crate::services::CoffeeService;
use crate::AppState;

/// List coffees filtered by roaster, name or origin country
#[utoipa::path(
    get,
    path = "/coffees",
    tag = "coffees",
    params(CoffeeListQuery),
    responses(
        (status = 200, description = "Paginated coffees", body = CoffeeListResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn list_coffees(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CoffeeListQuery>,
) -> AppResult<Json<CoffeeListResponse>> {
    let service = CoffeeService::new(state.db);
    let response = service.list(&query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/coffees",
    tag = "coffees",
    request_body = CoffeeCreate,
    responses(
        (status = 201, description = "Coffee created", body = Coffee),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Roaster not found", body = ErrorResponse),
        (status = 409, description = "Name already used by this roaster", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_coffee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(input): ValidatedJson<CoffeeCreate>,
) -> AppResult<(StatusCode, Json<Coffee>)> {
    let service = CoffeeService::new(state.db);
    let coffee = service.create(input, current_user.id()).await?;
    Ok((StatusCode::CREATED, Json(coffee)))
}

#[utoipa::path(
    get,
    path = "/coffees/{id}",
    tag = "coffees",
    params(("id" = Uuid, Path, description = "Coffee id")),
    responses(
        (status = 200, description = "Coffee with flavor tags", body = Coffee),
        (status = 404, description = "Coffee not found", body = ErrorResponse)
    )
)]
pub async fn get_coffee(
    State(state): State<AppState>,
    Path(coffee_id): Path<Uuid>,
) -> AppResult<Json<Coffee>> {
    let service = CoffeeService::new(state.db);
    let coffee = service.get(coffee_id).await?;
    Ok(Json(coffee))
}

#[utoipa::path(
    put,
    path = "/coffees/{id}",
    tag = "coffees",
    params(("id" = Uuid, Path, description = "Coffee id")),
    request_body = CoffeeUpdate,
    responses(
        (status = 200, description = "Coffee updated", body = Coffee),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Coffee or roaster not found", body = ErrorResponse),
        (status = 409, description = "Name already used by this roaster", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_coffee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(coffee_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<CoffeeUpdate>,
) -> AppResult<Json<Coffee>> {
    let service = CoffeeService::new(state.db);
    let coffee = service.update(coffee_id, input, current_user.id()).await?;
    Ok(Json(coffee))
}

/// Delete a coffee (soft delete)
#[utoipa::path(
    delete,
    path = "/coffees/{id}",
    tag = "coffees",
    params(("id" = Uuid, Path, description = "Coffee id")),
    responses(
        (status = 204, description = "Coffee deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Coffee not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_coffee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(coffee_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CoffeeService::new(state.db);
    service.delete(coffee_id, current_user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
