//! Cover letters: a fixed template, or a personalised letter from the generator.

use serde::Deserialize;
use tracing::error;

use crate::analysis::fields::ERROR;
use crate::analysis::record::ExtractedRecord;
use crate::llm_client::prompts::{NO_INVENTION_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};

pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

const GENERATE_PROMPT_TEMPLATE: &str = "\
Based on the following resume data, generate a personalized cover letter \
for the candidate's suggested career role.

{record}";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverLetterMode {
    #[default]
    Template,
    Generated,
}

/// Fills the fixed letter template. Each placeholder is substituted once, so
/// braces inside `name` or `role` are copied through as written.
pub fn cover_letter(name: &str, role: &str) -> String {
    format!(
        "\
Dear Hiring Manager,

I am writing to express my interest in the {role} position at your esteemed organization. \
My name is {name}, and I am confident that my skills and experiences make me a strong candidate for this role.

Throughout my academic and professional journey, I have developed a solid foundation in key areas relevant to this position, \
including Python, Machine Learning, and Data Analysis. \
I am excited about the opportunity to contribute to your team and grow as a professional in the field.

Thank you for considering my application. I look forward to the possibility of discussing my candidacy further.

Sincerely,
{name}
"
    )
}

/// Asks the generator for a letter built from the whole record.
pub async fn generate_cover_letter(
    record: &ExtractedRecord,
    generator: &dyn TextGenerator,
) -> Result<String, LlmError> {
    let prompt = format!(
        "{}\n\n{PLAIN_TEXT_INSTRUCTION}\n{NO_INVENTION_INSTRUCTION}",
        GENERATE_PROMPT_TEMPLATE.replace("{record}", &record.to_prompt_lines())
    );
    let letter = generator.generate(&prompt).await?;
    Ok(strip_markdown_emphasis(&letter))
}

/// One letter per record, in order. A failed generation becomes `"Error"`
/// for that record only.
pub async fn letters_for_batch<'a>(
    records: impl IntoIterator<Item = &'a ExtractedRecord>,
    mode: CoverLetterMode,
    generator: &dyn TextGenerator,
) -> Vec<String> {
    let mut letters = Vec::new();
    for record in records {
        let letter = match mode {
            CoverLetterMode::Template => cover_letter(record.name(), record.suggested_role()),
            CoverLetterMode::Generated => generate_cover_letter(record, generator)
                .await
                .unwrap_or_else(|e| {
                    error!(name = record.name(), error = %e, "Cover letter generation failed");
                    ERROR.to_string()
                }),
        };
        letters.push(letter);
    }
    letters
}

/// `<name>_Cover_Letter.txt`, safe to use as a download filename.
pub fn cover_letter_filename(name: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let safe = if safe.is_empty() { "Candidate".to_string() } else { safe };
    format!("{safe}_Cover_Letter.txt")
}

/// Drops `"` and `*`, which the generator uses for emphasis.
fn strip_markdown_emphasis(text: &str) -> String {
    text.replace(['"', '*'], "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fields::ResumeField;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingGenerator {
        prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            *self.prompt.lock().unwrap() = Some(prompt.to_string());
            Ok("**Dear** \"Hiring Manager\",\nHire me.".to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[test]
    fn test_mode_deserializes_snake_case() {
        let mode: CoverLetterMode = serde_json::from_str("\"generated\"").unwrap();
        assert_eq!(mode, CoverLetterMode::Generated);
        assert_eq!(CoverLetterMode::default(), CoverLetterMode::Template);
    }

    #[tokio::test]
    async fn test_batch_letters_follow_record_order() {
        let records = [
            ExtractedRecord::from_partial([(ResumeField::Name, "Ada".to_string())]),
            ExtractedRecord::from_partial([(ResumeField::Name, "Bo".to_string())]),
        ];
        let letters = letters_for_batch(&records, CoverLetterMode::Template, &FailingGenerator).await;
        assert_eq!(letters.len(), 2);
        assert!(letters[0].contains("My name is Ada,"));
        assert!(letters[1].contains("My name is Bo,"));
    }

    #[tokio::test]
    async fn test_batch_generation_failure_marks_letter_as_error() {
        let records = [ExtractedRecord::default()];
        let letters = letters_for_batch(&records, CoverLetterMode::Generated, &FailingGenerator).await;
        assert_eq!(letters, vec![ERROR.to_string()]);
    }

    #[test]
    fn test_template_fills_name_and_role() {
        let letter = cover_letter("Jane Doe", "ML Engineer");
        assert!(letter.starts_with("Dear Hiring Manager,"));
        assert!(letter.contains("interest in the ML Engineer position"));
        assert!(letter.contains("My name is Jane Doe,"));
        assert!(letter.trim_end().ends_with("Sincerely,\nJane Doe"));
        assert!(!letter.contains('{'));
    }

    #[test]
    fn test_placeholders_in_inputs_are_not_expanded() {
        let letter = cover_letter("Jane Doe", "{name} Lead");
        assert!(letter.contains("interest in the {name} Lead position"));
        assert!(letter.contains("My name is Jane Doe,"));

        let letter = cover_letter("{role}", "ML Engineer");
        assert!(letter.contains("My name is {role},"));
        assert!(letter.contains("interest in the ML Engineer position"));
    }

    #[test]
    fn test_filename_replaces_path_characters() {
        assert_eq!(cover_letter_filename("Jane Doe"), "Jane Doe_Cover_Letter.txt");
        assert_eq!(cover_letter_filename("../a/b"), ".._a_b_Cover_Letter.txt");
        assert_eq!(cover_letter_filename("  "), "Candidate_Cover_Letter.txt");
    }

    #[tokio::test]
    async fn test_generated_letter_uses_record_and_strips_emphasis() {
        let generator = RecordingGenerator {
            prompt: Mutex::new(None),
        };
        let record = ExtractedRecord::from_partial([
            (ResumeField::Name, "Jane Doe".to_string()),
            (ResumeField::SuggestedCareerRole, "ML Engineer".to_string()),
        ]);
        let letter = generate_cover_letter(&record, &generator).await.unwrap();
        assert_eq!(letter, "Dear Hiring Manager,\nHire me.");

        let prompt = generator.prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Name: Jane Doe"));
        assert!(prompt.contains("Suggested Career Role: ML Engineer"));
    }
}
