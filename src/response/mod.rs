//! Model Response Handling
//!
//! Raw model text arrives wrapped in markdown fences, surrounded by
//! whitespace, or not as JSON at all. This module isolates the payload:
//! - fence stripping shared by both model calls
//! - syntax-only JSON normalization for the analysis response
//! - the lenient parser for the modernization response

pub mod modernization;

use crate::utils::{Error, Result};

pub use modernization::{parse_modernization, Modernization};

const FENCE: &str = "```";

/// Remove one surrounding markdown fence, if present.
///
/// The opening line (three backticks plus an optional language tag) is
/// dropped, and so is a closing line consisting only of three backticks.
/// The result is trimmed.
pub fn strip_fences(raw: &str) -> String {
    let text = raw.trim();
    if !text.starts_with(FENCE) {
        return text.to_string();
    }

    let mut lines: Vec<&str> = text.split('\n').skip(1).collect();
    if lines.last().map(|l| l.trim() == FENCE).unwrap_or(false) {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

/// Isolate a syntactically valid JSON payload from raw model text.
///
/// Performs no schema checks.
pub fn normalize(raw: &str) -> Result<String> {
    let payload = strip_fences(raw);
    match serde_json::from_str::<serde_json::Value>(&payload) {
        Ok(_) => Ok(payload),
        Err(e) => Err(Error::malformed(e.to_string(), raw)),
    }
}
