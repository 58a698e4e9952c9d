pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::report::handlers as report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/resumes/analyze", post(analysis::handle_analyze))
        .route("/api/v1/resumes/report", post(analysis::handle_analyze_report))
        .route("/api/v1/chat", post(analysis::handle_chat))
        // Report API
        .route("/api/v1/reports/xlsx", post(report::handle_xlsx_report))
        .route(
            "/api/v1/reports/skills-chart",
            post(report::handle_skills_chart),
        )
        .route("/api/v1/cover-letters", post(report::handle_cover_letter))
        .route("/api/v1/roles/trends", get(report::handle_role_trends))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
