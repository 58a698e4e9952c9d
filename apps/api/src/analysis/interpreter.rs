//! Field Interpreter — prompt the generator with a résumé, then scrape
//! `Field: value` lines out of its free-text reply.
//!
//! The scrape is best effort. A field whose line is missing becomes
//! `"Not Available"`; if the generator call fails, every field becomes
//! `"Error"` and the failure is only logged.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, error};

use crate::analysis::fields::ResumeField;
use crate::analysis::prompts::{
    ANALYSIS_FORMAT_INSTRUCTION, ANALYSIS_INSTRUCTION, RESUME_CONTENT_HEADING,
};
use crate::analysis::record::ExtractedRecord;
use crate::llm_client::TextGenerator;

struct FieldPattern {
    field: ResumeField,
    regex: Regex,
}

/// One line-anchored pattern per field. Tolerates list markers, numbering
/// and markdown emphasis around the label, and a parenthetical echoed from
/// the prompt (`AI/ML Experience Score (1-3 scale): 2`).
fn field_patterns() -> &'static [FieldPattern] {
    static PATTERNS: OnceLock<Vec<FieldPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ResumeField::ALL
            .into_iter()
            .map(|field| FieldPattern {
                field,
                regex: Regex::new(&format!(
                    r"(?m)^[^\w\n]*(?:\d+[.)][ \t]*)?[*_]*{}[*_]*(?:[ \t]*\([^)\n]*\))?[*_ \t]*:(?P<value>[^\n]*)$",
                    regex::escape(field.label())
                ))
                .expect("field pattern is a valid regex"),
            })
            .collect()
    })
}

/// Builds the analysis prompt: fixed instruction, field list, format
/// instruction, then the document text.
pub fn build_prompt(resume_text: &str) -> String {
    let fields = ResumeField::ALL
        .into_iter()
        .map(|f| match f.hint() {
            Some(hint) => format!("- {} ({hint})", f.label()),
            None => format!("- {}", f.label()),
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{ANALYSIS_INSTRUCTION}\n{fields}\n\n{ANALYSIS_FORMAT_INSTRUCTION}\n\n{RESUME_CONTENT_HEADING}\n{resume_text}\n"
    )
}

/// Scrapes every field out of a model reply. Pure and deterministic.
pub fn parse_response(reply: &str) -> ExtractedRecord {
    let patterns = field_patterns();
    let known = patterns.iter().filter_map(|p| {
        let caps = p.regex.captures(reply)?;
        let line_end = caps.get(0)?.end();
        let inline = sanitize(&caps["value"]);
        let value = if inline.is_empty() {
            continuation_items(&reply[line_end..], patterns)
        } else {
            inline
        };
        (!value.is_empty()).then_some((p.field, value))
    });
    ExtractedRecord::from_partial(known)
}

/// Sends the résumé to the generator and interprets the reply.
/// Never fails: generator errors yield an all-`"Error"` record.
pub async fn interpret(resume_text: &str, generator: &dyn TextGenerator) -> ExtractedRecord {
    let prompt = build_prompt(resume_text);
    match generator.generate(&prompt).await {
        Ok(reply) => {
            debug!(reply = %reply, "Analysis reply received");
            let record = parse_response(&reply);
            debug!(?record, "Parsed analysis reply");
            record
        }
        Err(e) => {
            error!(error = %e, "Error analyzing resume");
            ExtractedRecord::error()
        }
    }
}

/// Trims, then keeps only alphanumerics, whitespace and `,.-()`.
fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-' | '(' | ')'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Bullet lines directly under an empty `Field:` line, joined with `", "`.
/// Stops at the first blank line after an item, a non-bullet line, or the
/// next field line.
fn continuation_items(rest: &str, patterns: &[FieldPattern]) -> String {
    let mut items = Vec::new();
    // The first line is the tail of the matched field line.
    for line in rest.lines().skip(1) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if items.is_empty() {
                continue;
            }
            break;
        }
        if patterns.iter().any(|p| p.regex.is_match(line)) {
            break;
        }
        let Some(item) = trimmed.strip_prefix(|c: char| matches!(c, '*' | '-' | '•')) else {
            break;
        };
        let item = sanitize(item);
        if !item.is_empty() {
            items.push(item);
        }
    }
    items.join(", ")
}
