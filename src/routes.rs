use crate::state::RosterState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod api;
pub mod pages;
pub mod students;

/// `/students/*` and `/api/students/*` share handlers; only the delete bodies differ.
pub fn router(state: RosterState) -> Router {
    let max_body_bytes = state.config().server_config().max_body_bytes();

    Router::new()
        .route("/", get(pages::get_index_route))
        .route("/dashboard", get(pages::get_dashboard))
        .route("/settings", get(pages::get_settings))
        .route("/static/script.js", get(pages::get_script))
        .route("/students", post(students::post_student))
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route(
            "/api/students",
            get(api::get_all_students).post(students::post_student),
        )
        .route(
            "/api/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(api::delete_student),
        )
        .route("/api/stats", get(api::get_stats))
        // enforced by the body extractor so oversized bodies still get a JSON error
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
