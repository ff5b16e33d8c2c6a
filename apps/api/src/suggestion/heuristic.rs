//! Heuristic suggester — deterministic offline rewrites.
//!
//! Used when no completion provider is configured. Every function here is
//! total: any input, including empty or punctuation-only text, yields a
//! non-empty, length-bounded result.

pub const PROJECT_TITLE_MAX_CHARS: usize = 80;
pub const PROJECT_SUMMARY_MAX_CHARS: usize = 400;
pub const SUMMARY_MAX_CHARS: usize = 400;

const DEFAULT_PROJECT_TITLE: &str = "Project";
const DEFAULT_PROJECT_SUBJECT: &str = "the project";
const DEFAULT_SUMMARY_KEYWORDS: &str = "software development";
const EMPTY_SUMMARY: &str =
    "Experienced professional with strong technical skills and measurable impact.";

/// Replaces every character that is not a word character or whitespace with
/// a space, then splits on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Upper-cases the first character of each whitespace-separated word.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().to_string() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncates to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Produces an improved `(title, summary)` pair for a project description.
pub fn improve_project(text: &str) -> (String, String) {
    let words = tokenize(text);

    let title = if words.is_empty() {
        DEFAULT_PROJECT_TITLE.to_string()
    } else {
        title_case(&words[..words.len().min(4)].join(" "))
    };

    let subject = if words.is_empty() {
        DEFAULT_PROJECT_SUBJECT.to_string()
    } else {
        words[..words.len().min(3)].join(" ")
    };
    let summary = format!(
        "Led development of {subject}, using relevant technologies; \
         focused on performance and delivery with measurable outcomes."
    );

    (
        truncate_chars(&title, PROJECT_TITLE_MAX_CHARS),
        truncate_chars(&summary, PROJECT_SUMMARY_MAX_CHARS),
    )
}

/// Produces a professional summary built from the longer words of `text`.
pub fn improve_summary(text: &str) -> String {
    if text.trim().is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let keywords: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|w| w.chars().count() > 3)
        .take(6)
        .collect();
    let keywords = if keywords.is_empty() {
        DEFAULT_SUMMARY_KEYWORDS.to_string()
    } else {
        keywords.join(", ")
    };

    let summary = format!(
        "Experienced professional skilled in {keywords}. \
         Proven ability to deliver results and drive improvements."
    );
    truncate_chars(&summary, SUMMARY_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_input() -> String {
        (0..500)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_project_title_is_title_cased_first_four_tokens() {
        let (title, summary) = improve_project("Built a chat app using React and sockets");
        assert_eq!(title, "Built A Chat App");
        assert!(summary.starts_with("Led development of Built a chat,"));
    }

    #[test]
    fn test_project_strips_punctuation() {
        let (title, _) = improve_project("real-time, chat!! (app)");
        assert_eq!(title, "Real Time Chat App");
    }

    #[test]
    fn test_project_defaults_when_no_tokens() {
        for input in ["", "   ", "!!!###"] {
            let (title, summary) = improve_project(input);
            assert_eq!(title, "Project");
            assert!(summary.contains("the project"));
        }
    }

    #[test]
    fn test_summary_empty_input_uses_generic_sentence() {
        assert_eq!(improve_summary(""), EMPTY_SUMMARY);
        assert_eq!(improve_summary("   "), EMPTY_SUMMARY);
    }

    #[test]
    fn test_summary_punctuation_only_uses_default_keywords() {
        let s = improve_summary("!!!###");
        assert!(s.contains("software development"));
    }

    #[test]
    fn test_summary_keeps_long_words_only() {
        let s = improve_summary("I am a Rust dev who ships fast backend services, APIs and tooling");
        assert_eq!(
            s,
            "Experienced professional skilled in Rust, ships, fast, backend, services, APIs. \
             Proven ability to deliver results and drive improvements."
        );
    }

    #[test]
    fn test_totality_and_length_caps() {
        let long = long_input();
        for input in ["", "   ", "!!!###", long.as_str()] {
            let (title, summary) = improve_project(input);
            assert!(!title.is_empty());
            assert!(title.chars().count() <= PROJECT_TITLE_MAX_CHARS);
            assert!(!summary.is_empty());
            assert!(summary.chars().count() <= PROJECT_SUMMARY_MAX_CHARS);

            let s = improve_summary(input);
            assert!(!s.is_empty());
            assert!(s.chars().count() <= SUMMARY_MAX_CHARS);
        }
    }

    #[test]
    fn test_single_huge_token_is_capped() {
        let huge = "x".repeat(5_000);
        let (title, summary) = improve_project(&huge);
        assert_eq!(title.chars().count(), PROJECT_TITLE_MAX_CHARS);
        assert_eq!(summary.chars().count(), PROJECT_SUMMARY_MAX_CHARS);
        assert_eq!(improve_summary(&huge).chars().count(), SUMMARY_MAX_CHARS);
    }

    #[test]
    fn test_truncate_respects_multibyte_chars() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 80), "short");
    }
}
