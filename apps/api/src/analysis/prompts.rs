// Prompt text for résumé analysis and the career-advice chat.

/// Opening instruction of the analysis prompt. The field list follows it.
pub const ANALYSIS_INSTRUCTION: &str = "Extract the following details from the resume:";

/// Output-format instruction placed after the field list.
pub const ANALYSIS_FORMAT_INSTRUCTION: &str = "\
Answer with exactly one line per detail, in the form `Detail: value`, \
using the detail names exactly as listed above. \
Keep each value on a single line. \
If a detail is not present in the resume, write `Detail: Not Available`.";

/// Heading placed immediately before the extracted document text.
pub const RESUME_CONTENT_HEADING: &str = "Resume Content:";

/// Career-advice chat prompt. Replace `{message}` before sending.
pub const CHAT_PROMPT_TEMPLATE: &str = "\
You are a résumé analyzer and career adviser for students and graduates. \
Answer the user's question about their résumé or career concisely and practically.

Question:
{message}";
