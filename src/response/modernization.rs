//! Modernization response parser
//!
//! Unlike the analysis response, a best-effort result beats no result
//! here: only `modernized_code` is mandatory, and text that is not JSON
//! at all is taken as the code itself.

use serde::Serialize;
use serde_json::Value;

use super::strip_fences;
use crate::utils::{Error, Result};

pub const DEFAULT_FILENAME: &str = "modernized_code.txt";
pub const DEFAULT_SUMMARY: &str = "Code modernized";
pub const FALLBACK_SUMMARY: &str = "Modernization completed (no structured response)";

/// Output of the modernization model call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modernization {
    pub modernized_code: String,
    pub filename: String,
    pub changes_summary: String,
    /// False when the response was not JSON and the fallback was used
    #[serde(skip)]
    pub structured: bool,
}

impl Modernization {
    fn fallback(code: String) -> Self {
        Self {
            modernized_code: code,
            filename: DEFAULT_FILENAME.to_string(),
            changes_summary: FALLBACK_SUMMARY.to_string(),
            structured: false,
        }
    }
}

/// Parse the modernization model response
pub fn parse_modernization(raw: &str) -> Result<Modernization> {
    let text = strip_fences(raw);

    let value: Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(_) => return Ok(Modernization::fallback(text)),
    };

    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(Error::missing("modernized_code")),
    };

    let modernized_code = match obj.get("modernized_code") {
        None | Some(Value::Null) => return Err(Error::missing("modernized_code")),
        Some(Value::String(code)) => code.clone(),
        Some(other) => {
            return Err(Error::schema(
                format!("'modernized_code' must be a string, got {}", json_kind(other)),
                raw,
            ))
        }
    };

    Ok(Modernization {
        modernized_code,
        filename: string_or(obj.get("filename"), DEFAULT_FILENAME),
        changes_summary: string_or(obj.get("changes_summary"), DEFAULT_SUMMARY),
        structured: true,
    })
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
