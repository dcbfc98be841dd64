//! Error handling for Relic

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Number of characters of model output kept for diagnostics
pub const SNIPPET_LEN: usize = 500;

/// Pipeline error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Model Output Errors ====================

    #[error("Model did not return valid JSON: {message}")]
    MalformedPayload {
        message: String,
        snippet: String,
    },

    #[error("Model output failed schema validation: {message}")]
    SchemaViolation {
        message: String,
        snippet: String,
    },

    #[error("Missing '{field}' field")]
    MissingField { field: String },

    // ==================== Collaborator Errors ====================

    #[error("Model invocation failed: {0}")]
    Model(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    pub fn malformed(message: impl Into<String>, raw: &str) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            snippet: snippet(raw),
        }
    }

    pub fn schema(message: impl Into<String>, raw: &str) -> Self {
        Self::SchemaViolation {
            message: message.into(),
            snippet: snippet(raw),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Get the raw-output snippet associated with this error
    pub fn snippet(&self) -> Option<&str> {
        match self {
            Self::MalformedPayload { snippet, .. } => Some(snippet),
            Self::SchemaViolation { snippet, .. } => Some(snippet),
            Self::MissingField { .. } | Self::Model(_) | Self::Io(_) => None,
        }
    }

    /// Stable short name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedPayload { .. } => "MalformedPayload",
            Self::SchemaViolation { .. } => "SchemaViolation",
            Self::MissingField { .. } => "MissingField",
            Self::Model(_) => "Model",
            Self::Io(_) => "Io",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// First `SNIPPET_LEN` characters of `raw`
fn snippet(raw: &str) -> String {
    raw.chars().take(SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_is_char_bounded() {
        let raw = "é".repeat(600);
        let err = Error::malformed("bad", &raw);
        assert_eq!(err.snippet().map(|s| s.chars().count()), Some(SNIPPET_LEN));
    }

    #[test]
    fn test_missing_field_message() {
        let err = Error::missing("modernized_code");
        assert_eq!(err.to_string(), "Missing 'modernized_code' field");
        assert_eq!(err.kind(), "MissingField");
        assert!(err.snippet().is_none());
    }
}
