//! Route definitions for the Coffee Tasting API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes, mounted under `API_V1_STR`
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Health check with database status (public)
        .route("/health", get(handlers::health::health_check))
        // Catalog: reads are public, writes take a bearer token
        .nest("/roasters", roaster_routes())
        .nest("/coffees", coffee_routes())
        .nest("/flavor-tags", flavor_tag_routes())
        // Protected routes
        .nest("/tastings", tasting_routes(state))
        .nest("/recommendations", recommendation_routes(state))
}

fn roaster_routes() -> Router<AppState> {
    use handlers::roasters::*;

    Router::new()
        .route("/", get(list_roasters).post(create_roaster))
        .route(
            "/:id",
            get(get_roaster).put(update_roaster).delete(delete_roaster),
        )
        .route("/:id/restore", post(restore_roaster))
}

fn coffee_routes() -> Router<AppState> {
    use handlers::coffees::*;

    Router::new()
        .route("/", get(list_coffees).post(create_coffee))
        .route(
            "/:id",
            get(get_coffee).put(update_coffee).delete(delete_coffee),
        )
}

fn flavor_tag_routes() -> Router<AppState> {
    use handlers::flavor_tags::*;

    Router::new()
        .route("/", get(list_flavor_tags).post(create_flavor_tag))
        .route(
            "/:id",
            get(get_flavor_tag)
                .put(update_flavor_tag)
                .delete(delete_flavor_tag),
        )
}

/// Tasting sessions (protected, owner only)
fn tasting_routes(state: &AppState) -> Router<AppState> {
    use handlers::tastings::*;

    Router::new()
        .route("/", get(list_tastings).post(create_tasting))
        .route(
            "/:id",
            get(get_tasting).put(update_tasting).delete(delete_tasting),
        )
        .route("/:id/notes", post(add_tasting_note))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Taste profile and preference analysis (protected)
fn recommendation_routes(state: &AppState) -> Router<AppState> {
    use handlers::recommendations::*;

    Router::new()
        .route("/preferences", get(get_taste_profile))
        .route("/analysis", get(get_flavor_analysis))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}
