// Shared prompt fragments.
// Each module that calls the generator keeps its own prompts.rs alongside it;
// this file holds the pieces more than one of them appends.

/// Appended to prompts whose reply is shown or downloaded as plain text.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Reply in plain text only. \
    Do NOT use markdown formatting, tables or code fences.";

/// Appended to prompts that must not invent facts about the candidate.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    Only use information present in the material provided. \
    If something is not stated, say so instead of guessing.";
