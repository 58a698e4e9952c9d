//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Query, State},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::batch::{process_batch, BatchResult};
use crate::analysis::prompts::CHAT_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::report::cover_letter::CoverLetterMode;
use crate::report::handlers::{attachment, spreadsheet};
use crate::report::xlsx::{REPORT_FILENAME, XLSX_CONTENT_TYPE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Adds a `Cover Letter` column when set.
    pub cover_letters: Option<CoverLetterMode>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/resumes/analyze
///
/// Multipart upload of one or more PDFs. Returns one record per file in
/// upload order plus a batch summary.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResult>, AppError> {
    let documents = read_uploads(multipart).await?;
    let result = process_batch(
        documents,
        state.extractor.as_ref(),
        state.generator.as_ref(),
    )
    .await;
    Ok(Json(result))
}

/// POST /api/v1/resumes/report
///
/// Same pipeline as `/analyze`, answered with the spreadsheet download.
pub async fn handle_analyze_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let documents = read_uploads(multipart).await?;
    let result = process_batch(
        documents,
        state.extractor.as_ref(),
        state.generator.as_ref(),
    )
    .await;
    let records: Vec<_> = result.records().cloned().collect();
    let bytes = spreadsheet(&records, query.cover_letters, &state).await?;
    Ok(attachment(XLSX_CONTENT_TYPE, REPORT_FILENAME, bytes))
}

/// POST /api/v1/chat
///
/// Free-form career-advice question answered by the generator.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let prompt = format!(
        "{}\n\n{PLAIN_TEXT_INSTRUCTION}",
        CHAT_PROMPT_TEMPLATE.replace("{message}", message)
    );
    let reply = state
        .generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Chat reply failed: {e}")))?;

    Ok(Json(ChatResponse { reply }))
}

/// Collects every file part of the upload. Parts without a filename are
/// ignored; anything not named `*.pdf` rejects the whole request.
async fn read_uploads(mut multipart: Multipart) -> Result<Vec<UploadedDocument>, AppError> {
    let mut documents = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(format!(
                "'{filename}' is not a PDF file"
            )));
        }
        let bytes = field.bytes().await?;
        documents.push(UploadedDocument::new(filename, bytes));
    }

    if documents.is_empty() {
        return Err(AppError::Validation(
            "upload at least one PDF file".to_string(),
        ));
    }
    Ok(documents)
}
