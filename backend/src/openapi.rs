//! OpenAPI document and the Swagger UI / ReDoc pages serving it
//!
//! Paths are relative to `API_V1_STR`, which is published as the server URL.

use axum::{extract::State, Json, Router};
use utoipa::{
    openapi::{
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
        server::Server,
        OpenApi as OpenApiDocument,
    },
    Modify, OpenApi,
};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use shared::schemas::{
    CoffeeCreate, CoffeeListResponse, CoffeeUpdate, FlavorTagCreate, FlavorTagListResponse,
    FlavorTagUpdate, RoasterCreate, RoasterListResponse, RoasterUpdate, TastingNoteCreate,
    TastingSessionCreate, TastingSessionListResponse, TastingSessionUpdate,
};

use crate::error::{ErrorDetail, ErrorResponse};
use crate::handlers;
use crate::handlers::health::HealthResponse;
use crate::models::{
    BrewMethod, Coffee, FlavorTag, GrindSize, ProcessingMethod, RoastLevel, Roaster, TastingNote,
    TastingSession,
};
use crate::{AppState, Config};

pub const SECURITY_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::roasters::list_roasters,
        handlers::roasters::create_roaster,
        handlers::roasters::get_roaster,
        handlers::roasters::update_roaster,
        handlers::roasters::delete_roaster,
        handlers::roasters::restore_roaster,
        handlers::coffees::list_coffees,
        handlers::coffees::create_coffee,
        handlers::coffees::get_coffee,
        handlers::coffees::update_coffee,
        handlers::coffees::delete_coffee,
        handlers::flavor_tags::list_flavor_tags,
        handlers::flavor_tags::create_flavor_tag,
        handlers::flavor_tags::get_flavor_tag,
        handlers::flavor_tags::update_flavor_tag,
        handlers::flavor_tags::delete_flavor_tag,
        handlers::tastings::list_tastings,
        handlers::tastings::create_tasting,
        handlers::tastings::get_tasting,
        handlers::tastings::update_tasting,
        handlers::tastings::delete_tasting,
        handlers::tastings::add_tasting_note,
        handlers::recommendations::get_taste_profile,
        handlers::recommendations::get_flavor_analysis,
    ),
    components(schemas(
        Roaster, RoasterCreate, RoasterUpdate, RoasterListResponse,
        Coffee, CoffeeCreate, CoffeeUpdate, CoffeeListResponse,
        ProcessingMethod, RoastLevel,
        FlavorTag, FlavorTagCreate, FlavorTagUpdate, FlavorTagListResponse,
        TastingSession, TastingNote, TastingSessionCreate, TastingSessionUpdate,
        TastingNoteCreate, TastingSessionListResponse,
        BrewMethod, GrindSize,
        ErrorResponse, ErrorDetail, HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Service status"),
        (name = "roasters", description = "Coffee roasting companies"),
        (name = "coffees", description = "Coffee offerings and their flavor tags"),
        (name = "flavor-tags", description = "Shared flavor vocabulary"),
        (name = "tastings", description = "The caller's tasting sessions and notes"),
        (name = "recommendations", description = "Taste profile and preference analysis"),
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut OpenApiDocument) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            SECURITY_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// The API document with title, version and server prefix from configuration
pub fn api_doc(config: &Config) -> OpenApiDocument {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.project_name.clone();
    doc.info.version = config.version.clone();
    doc.servers = Some(vec![Server::new(config.api_v1_str.clone())]);
    doc
}

/// `GET {API_V1_STR}/openapi.json`
pub async fn openapi_json(State(state): State<AppState>) -> Json<OpenApiDocument> {
    Json(api_doc(&state.config))
}

pub fn openapi_url(config: &Config) -> String {
    format!("{}/openapi.json", config.api_v1_str.trim_end_matches('/'))
}

/// `/docs` (Swagger UI) and `/redoc`, both reading the document above
pub fn doc_pages<S>(config: &Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let swagger = SwaggerUi::new("/docs")
        .config(utoipa_swagger_ui::Config::new([openapi_url(config)]));

    Router::new()
        .merge(swagger)
        .merge(Redoc::with_url("/redoc", api_doc(config)))
}
