// Prompt constants for the suggestion service.
// Every system prompt forbids echoing the input back verbatim.

pub const PROJECT_SYSTEM: &str = "You are an expert resume writer. \
    Do NOT repeat the input verbatim. \
    Produce improved, concise outputs focused on impact and technologies.";

/// Replace `{text}` before sending.
pub const PROJECT_PROMPT_TEMPLATE: &str = "Return only valid JSON with keys \"title\" and \"summary\". \
    Title: short (<=80 chars). \
    Summary: 1-2 sentences emphasizing impact, technologies, and measurable result if possible. \
    Input project text: {text}";

pub const SUMMARY_SYSTEM: &str = "You are an expert resume writer. \
    Do NOT repeat the input verbatim. \
    Produce concise two-sentence professional summaries.";

/// Replace `{text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str =
    "Rewrite this summary into two concise sentences emphasizing impact and keywords: {text}";

pub const GENERAL_SYSTEM: &str = "You are an expert resume writer. \
    Do NOT repeat the input verbatim. \
    Provide short actionable suggestions.";

/// Replace `{text}` before sending.
pub const GENERAL_PROMPT_TEMPLATE: &str = "Provide 3 short suggestions to improve: {text}";

/// Offline advice returned for sections without a dedicated heuristic.
/// The third item is completed with the caller's skills.
pub const GENERAL_ADVICE: [&str; 2] = [
    "Use action verbs and quantify results.",
    "Lead with impact and technologies used.",
];
