//! Batch pipeline: extract → interpret, one document at a time, in upload order.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::fields::is_sentinel;
use crate::analysis::interpreter::interpret;
use crate::analysis::record::ExtractedRecord;
use crate::extraction::{TextExtractor, UploadedDocument};
use crate::llm_client::TextGenerator;

/// One analyzed upload.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedResume {
    pub filename: String,
    pub record: ExtractedRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_resumes: usize,
    /// Distinct suggested roles, sorted; sentinels excluded.
    pub unique_roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub processed_at: DateTime<Utc>,
    pub resumes: Vec<AnalyzedResume>,
    pub summary: BatchSummary,
}

impl BatchResult {
    pub fn records(&self) -> impl Iterator<Item = &ExtractedRecord> {
        self.resumes.iter().map(|r| &r.record)
    }
}

/// Runs every document through the pipeline sequentially.
///
/// Never fails: an unreadable document is logged and recorded as an
/// all-`"Error"` record, and the batch moves on.
pub async fn process_batch(
    documents: Vec<UploadedDocument>,
    extractor: &dyn TextExtractor,
    generator: &dyn TextGenerator,
) -> BatchResult {
    let batch_id = Uuid::new_v4();
    let total = documents.len();
    info!(%batch_id, total, "Analyzing resume batch");

    let mut resumes = Vec::with_capacity(total);
    for (index, document) in documents.into_iter().enumerate() {
        info!(%batch_id, progress = index + 1, total, filename = %document.filename, "Processing resume");

        let record = match extractor.extract(&document).await {
            Ok(text) => interpret(&text, generator).await,
            Err(e) => {
                error!(%batch_id, filename = %document.filename, error = %e, "Skipping unprocessable document");
                ExtractedRecord::error()
            }
        };

        resumes.push(AnalyzedResume {
            filename: document.filename,
            record,
        });
    }

    let summary = summarize(resumes.iter().map(|r| &r.record));
    info!(%batch_id, total = summary.total_resumes, roles = summary.unique_roles.len(), "Batch complete");

    BatchResult {
        batch_id,
        processed_at: Utc::now(),
        resumes,
        summary,
    }
}

pub fn summarize<'a>(records: impl Iterator<Item = &'a ExtractedRecord>) -> BatchSummary {
    let mut total_resumes = 0;
    let mut roles = BTreeSet::new();
    for record in records {
        total_resumes += 1;
        let role = record.suggested_role();
        if !is_sentinel(role) {
            roles.insert(role.to_string());
        }
    }
    BatchSummary {
        total_resumes,
        unique_roles: roles.into_iter().collect(),
    }
}
