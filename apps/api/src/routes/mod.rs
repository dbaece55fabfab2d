pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::forms::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Panel 1: CV matching (multipart)
        .route("/api/v1/cv-match", post(handlers::handle_cv_match))
        // Panels 2 and 3: case studies (JSON)
        .route(
            "/api/v1/case-studies/generate",
            post(handlers::handle_generate_case_study),
        )
        .route(
            "/api/v1/case-studies/evaluate",
            post(handlers::handle_evaluate_case_study),
        )
        // Panel 4: question/solution comparison (multipart)
        .route(
            "/api/v1/documents/compare",
            post(handlers::handle_compare_documents),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
