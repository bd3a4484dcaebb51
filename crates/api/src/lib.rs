//! # Skylab API Crate
//!
//! HTTP surface of the Skylab admin backend: route handlers for users,
//! mentors, cohorts and deadlines, the services they delegate to, and the
//! OpenAPI document served next to them.

mod docs;
mod error;
mod middleware;
mod state;
mod util;

pub mod routes;
pub mod services;

pub use docs::ApiDoc;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use util::invalid_method;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(routes::health::health_check).fallback(invalid_method),
        )
        // User routes
        .route(
            "/users",
            get(routes::users::list_users).fallback(invalid_method),
        )
        .route(
            "/users/:email",
            get(routes::users::get_user)
                .post(routes::users::login)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user)
                .fallback(invalid_method),
        )
        // Mentor routes
        .route(
            "/mentors",
            get(routes::mentors::list_mentors)
                .post(routes::mentors::create_mentor)
                .fallback(invalid_method),
        )
        .route(
            "/mentors/batch",
            post(routes::mentors::create_mentors_batch).fallback(invalid_method),
        )
        .route(
            "/mentors/:email",
            get(routes::mentors::get_mentor).fallback(invalid_method),
        )
        // Cohort routes
        .route(
            "/cohorts",
            get(routes::cohorts::list_cohorts)
                .post(routes::cohorts::create_cohort)
                .fallback(invalid_method),
        )
        .route(
            "/cohorts/latest",
            get(routes::cohorts::get_latest_cohort).fallback(invalid_method),
        )
        .route(
            "/cohorts/:cohort_year",
            put(routes::cohorts::update_cohort)
                .delete(routes::cohorts::delete_cohort)
                .fallback(invalid_method),
        )
        // Deadline routes
        .route(
            "/deadlines",
            get(routes::deadlines::list_deadlines)
                .post(routes::deadlines::create_deadline)
                .fallback(invalid_method),
        )
        .route(
            "/deadlines/:deadline_id",
            get(routes::deadlines::get_deadline)
                .put(routes::deadlines::update_deadline)
                .delete(routes::deadlines::delete_deadline)
                .fallback(invalid_method),
        )
        .route(
            "/deadlines/:deadline_id/questions",
            get(routes::deadlines::get_questions)
                .put(routes::deadlines::replace_questions)
                .fallback(invalid_method),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors_layer())
        .layer(from_fn(middleware::logging_middleware))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
