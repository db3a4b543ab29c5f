// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{assessment, auth, catalog, family},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, assessment, family, catalog).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store and config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let assessment_routes = Router::new()
        .route("/questions", get(assessment::list_questions))
        // Protected assessment routes
        .merge(
            Router::new()
                .route("/submit", post(assessment::submit_assessment))
                .layer(require_auth.clone()),
        );

    let family_routes = Router::new()
        .route("/", get(family::get_overview))
        .route("/students", post(family::link_student))
        .route("/students/{id}/unlock", put(family::set_unlock))
        .route("/strategies/{mark}", post(family::toggle_strategy))
        .layer(require_auth);

    let catalog_routes = Router::new()
        .route("/parent-types", get(catalog::list_parent_types))
        .route("/child-types", get(catalog::list_child_types))
        .route("/modifiers", get(catalog::list_modifiers))
        .route("/compatibility", get(catalog::preview_compatibility));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/assessment", assessment_routes)
        .nest("/api/family", family_routes)
        .nest("/api/catalog", catalog_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
