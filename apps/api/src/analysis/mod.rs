// Résumé analysis: field model, the prompt-and-scrape interpreter, and the
// sequential batch pipeline. All generator calls go through llm_client.

pub mod batch;
pub mod fields;
pub mod handlers;
pub mod interpreter;
pub mod prompts;
pub mod record;
