//! Axum route handlers for the Report API.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::analysis::fields::{is_sentinel, ResumeField};
use crate::analysis::record::ExtractedRecord;
use crate::errors::AppError;
use crate::report::chart::{render_skills_chart, SVG_CONTENT_TYPE};
use crate::report::cover_letter::{
    cover_letter, cover_letter_filename, generate_cover_letter, letters_for_batch,
    CoverLetterMode, TEXT_CONTENT_TYPE,
};
use crate::report::table::ReportTable;
use crate::report::trends::{role_trend, RoleTrend};
use crate::report::xlsx::{render_xlsx, REPORT_FILENAME, XLSX_CONTENT_TYPE};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct XlsxReportRequest {
    pub records: Vec<ExtractedRecord>,
    /// Adds a `Cover Letter` column when set.
    pub cover_letters: Option<CoverLetterMode>,
}

#[derive(Debug, Deserialize)]
pub struct SkillsChartRequest {
    pub skills: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub mode: CoverLetterMode,
    pub name: Option<String>,
    pub role: Option<String>,
    pub record: Option<ExtractedRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub role: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports/xlsx
///
/// Encodes already-analyzed records. Records may carry any subset of fields;
/// missing ones are written as "Not Available".
pub async fn handle_xlsx_report(
    State(state): State<AppState>,
    Json(request): Json<XlsxReportRequest>,
) -> Result<Response, AppError> {
    let bytes = spreadsheet(&request.records, request.cover_letters, &state).await?;
    Ok(attachment(XLSX_CONTENT_TYPE, REPORT_FILENAME, bytes))
}

/// POST /api/v1/reports/skills-chart
pub async fn handle_skills_chart(
    Json(request): Json<SkillsChartRequest>,
) -> Result<Response, AppError> {
    let svg = render_skills_chart(&request.skills)?;
    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response())
}

/// POST /api/v1/cover-letters
///
/// Returns a downloadable letter. `name` / `role` override the matching
/// fields of `record` when both are sent.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Response, AppError> {
    let mut record = request.record.unwrap_or_default();
    if let Some(name) = request.name {
        record.set(ResumeField::Name, name.trim());
    }
    if let Some(role) = request.role {
        record.set(ResumeField::SuggestedCareerRole, role.trim());
    }
    if record.name().is_empty() || is_sentinel(record.name()) {
        return Err(AppError::Validation(
            "a candidate name is required".to_string(),
        ));
    }

    let letter = match request.mode {
        CoverLetterMode::Template => cover_letter(record.name(), record.suggested_role()),
        CoverLetterMode::Generated => generate_cover_letter(&record, state.generator.as_ref())
            .await
            .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?,
    };

    Ok(attachment(
        TEXT_CONTENT_TYPE,
        &cover_letter_filename(record.name()),
        letter,
    ))
}

/// GET /api/v1/roles/trends?role=…
pub async fn handle_role_trends(
    Query(query): Query<RoleQuery>,
) -> Result<Json<RoleTrend>, AppError> {
    role_trend(&query.role)
        .map(Json)
        .ok_or_else(|| AppError::Validation("role must name a suggested career role".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Records → table (plus optional letters column) → xlsx bytes.
pub async fn spreadsheet(
    records: &[ExtractedRecord],
    cover_letters: Option<CoverLetterMode>,
    state: &AppState,
) -> Result<Vec<u8>, AppError> {
    let mut table = ReportTable::from_records(records);
    if let Some(mode) = cover_letters {
        let letters = letters_for_batch(records, mode, state.generator.as_ref()).await;
        table = table.with_cover_letters(&letters);
    }
    Ok(render_xlsx(&table)?)
}

/// A download response. Non-ASCII filename characters become `_` so the
/// header value stays valid.
pub fn attachment(content_type: &'static str, filename: &str, body: impl IntoResponse) -> Response {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();
    let disposition = format!("attachment; filename=\"{}\"", ascii.replace('"', "_"));
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_router;
    use crate::state::test_support::test_state;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_attachment_sanitizes_filename() {
        let response = attachment(TEXT_CONTENT_TYPE, "Zoë_Cover_Letter.txt", "hi");
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert_eq!(disposition, "attachment; filename=\"Zo__Cover_Letter.txt\"");
    }

    #[tokio::test]
    async fn test_xlsx_report_accepts_partial_records() {
        let app = build_router(test_state("unused"));
        let body = serde_json::json!({
            "records": [{"Name": "Jane Doe"}, {"Key Skills": "Rust"}],
            "cover_letters": "template"
        });
        let response = app
            .oneshot(json_request("POST", "/api/v1/reports/xlsx", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_CONTENT_TYPE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_skills_chart_returns_svg() {
        let app = build_router(test_state("unused"));
        let body = serde_json::json!({"skills": "Python, Rust, Python"});
        let response = app
            .oneshot(json_request("POST", "/api/v1/reports/skills-chart", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], SVG_CONTENT_TYPE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("<svg"));
    }

    #[tokio::test]
    async fn test_template_cover_letter_download() {
        let app = build_router(test_state("unused"));
        let body = serde_json::json!({"name": "Jane Doe", "role": "ML Engineer"});
        let response = app
            .oneshot(json_request("POST", "/api/v1/cover-letters", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane Doe_Cover_Letter.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("ML Engineer position"));
    }

    #[tokio::test]
    async fn test_generated_cover_letter_uses_generator() {
        let app = build_router(test_state("Dear team, I am Jane."));
        let body = serde_json::json!({
            "mode": "generated",
            "record": {"Name": "Jane Doe", "Suggested Career Role": "ML Engineer"}
        });
        let response = app
            .oneshot(json_request("POST", "/api/v1/cover-letters", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Dear team, I am Jane.");
    }

    #[tokio::test]
    async fn test_cover_letter_without_name_is_rejected() {
        let app = build_router(test_state("unused"));
        let body = serde_json::json!({"role": "ML Engineer"});
        let response = app
            .oneshot(json_request("POST", "/api/v1/cover-letters", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_role_trends() {
        let app = build_router(test_state("unused"));
        let request = Request::builder()
            .uri("/api/v1/roles/trends?role=Data%20Scientist")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let trend: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(trend["role"], "Data Scientist");
    }
}
