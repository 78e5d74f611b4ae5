//! Academic catalog administration.
//!
//! Two halves live in this crate: a REST catalog service over SQLite
//! (departments, degrees, semester mappings, subjects) and the admin console
//! core in [`console`], which drives list screens against any
//! [`console::CatalogBackend`].

pub mod api;
pub mod config;
pub mod console;
pub mod db;
pub mod errors;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Departments
        .route(
            "/departments",
            get(api::list_departments).post(api::create_department),
        )
        .route(
            "/departments/{id}",
            put(api::update_department)
                .get(api::get_department)
                .delete(api::delete_department),
        )
        // Degrees
        .route("/degrees", get(api::list_degrees).post(api::create_degree))
        .route(
            "/degrees/{id}",
            put(api::update_degree)
                .get(api::get_degree)
                .delete(api::delete_degree),
        )
        // Semester mappings
        .route(
            "/semesters",
            get(api::list_semesters).post(api::create_semester),
        )
        .route(
            "/semesters/{id}",
            put(api::update_semester)
                .get(api::get_semester)
                .delete(api::delete_semester),
        )
        // Subjects
        .route("/subjects", get(api::list_subjects).post(api::create_subject))
        .route(
            "/subjects/{id}",
            put(api::update_subject)
                .get(api::get_subject)
                .delete(api::delete_subject),
        );

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
