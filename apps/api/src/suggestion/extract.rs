//! Text extractor — recovers a JSON value from free-form model output.
//!
//! Completion providers are asked for JSON but routinely wrap it in a
//! markdown fence or surround it with prose. Each strategy below is tried in
//! order and the first one that parses wins.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

type Strategy = fn(&str) -> Option<Value>;

const STRATEGIES: &[Strategy] = &[parse_whole, parse_fenced, parse_braced];

/// Attempts to recover structured data from `text`.
/// Returns `None` when no strategy finds parseable JSON.
pub fn extract_json(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    STRATEGIES.iter().find_map(|strategy| strategy(text))
}

fn parse_whole(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)(?:^|\n)```[\w+-]*[ \t]*\n?(.*?)\n?```(?:\n|$)")
            .expect("fence pattern is a valid regex")
    })
}

/// Inner content of the first ``` fence, with an optional language tag.
fn parse_fenced(text: &str) -> Option<Value> {
    let inner = fence_regex().captures(text)?.get(1)?.as_str().trim();
    serde_json::from_str(inner).ok()
}

/// Substring from the first `{` to the last `}`.
fn parse_braced(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
