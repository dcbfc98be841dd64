//! Structured Feedback Module
//!
//! Machine-readable run output:
//! - JSON error reports with fix suggestions
//! - IR statistics per file
//! - Batch summary

use serde::{Deserialize, Serialize};

use crate::ir::{ProjectIR, Severity};
use crate::pipeline::{BatchOutcome, FileOutcome, Stage};
use crate::utils::{Error, Result};

// ==================== Structured Error Report ====================

/// A structured diagnostic for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Diagnostic code (e.g., "E0001")
    pub code: String,

    pub level: Level,

    /// Failure class of the underlying error (e.g., "SchemaViolation")
    pub kind: Option<String>,

    /// Human-readable message
    pub message: String,

    /// Stage the diagnostic was raised in
    pub stage: Option<Stage>,

    /// Start of the raw model output, when relevant
    pub snippet: Option<String>,

    /// Suggested fixes, most confident first
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Description of the fix
    pub message: String,

    /// Confidence in this suggestion (0.0 - 1.0)
    pub confidence: f64,
}

impl Suggestion {
    fn new(message: impl Into<String>, confidence: f64) -> Self {
        Self {
            message: message.into(),
            confidence,
        }
    }
}

pub const UNSTRUCTURED_MODERNIZATION: &str = "W0001";

impl ErrorReport {
    /// Create an error report from a pipeline error
    pub fn from_error(error: &Error, stage: Option<Stage>) -> Self {
        let (code, suggestions) = generate_error_info(error);
        let mut report = Self {
            code: code.to_string(),
            level: Level::Error,
            kind: Some(error.kind().to_string()),
            message: error.to_string(),
            stage,
            snippet: error.snippet().map(str::to_string),
            suggestions,
        };
        report.sort_suggestions();
        report
    }

    /// Create a warning report
    pub fn warning(code: &str, message: &str, stage: Option<Stage>) -> Self {
        Self {
            code: code.to_string(),
            level: Level::Warning,
            kind: None,
            message: message.to_string(),
            stage,
            snippet: None,
            suggestions: vec![],
        }
    }

    /// Sort suggestions by confidence (highest first)
    pub fn sort_suggestions(&mut self) {
        self.suggestions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

/// Error code plus suggested fixes for each failure class
fn generate_error_info(error: &Error) -> (&'static str, Vec<Suggestion>) {
    match error {
        Error::MalformedPayload { snippet, .. } => {
            let mut suggestions = vec![
                Suggestion::new("Return a single JSON object with no prose around it", 0.8),
                Suggestion::new("Remove comments and trailing commas from the JSON", 0.5),
            ];
            if snippet.trim().is_empty() {
                suggestions.push(Suggestion::new(
                    "The response was empty; retry the model call",
                    0.9,
                ));
            }
            ("E0001", suggestions)
        }

        Error::SchemaViolation { message, .. } => {
            let mut suggestions = vec![Suggestion::new(
                "Compare field names and types against the IR schema",
                0.6,
            )];
            if message.contains("unknown variant") {
                suggestions.push(Suggestion::new(
                    "Use one of the allowed enum values listed in the message",
                    0.9,
                ));
            }
            if message.contains("missing field") {
                suggestions.push(Suggestion::new(
                    "Add the required field named in the message",
                    0.9,
                ));
            }
            if message.contains("invalid type") {
                suggestions.push(Suggestion::new(
                    "Sequences must be JSON arrays and names must be strings",
                    0.7,
                ));
            }
            ("E0002", suggestions)
        }

        Error::MissingField { field } => (
            "E0003",
            vec![Suggestion::new(
                format!("Include a '{}' field in the response object", field),
                0.9,
            )],
        ),

        Error::Model(_) => (
            "E0004",
            vec![
                Suggestion::new("Check that a response exists for this file and stage", 0.7),
                Suggestion::new("Check the model name and retry", 0.4),
            ],
        ),

        Error::Io(_) => (
            "E0005",
            vec![Suggestion::new("Check that the path exists and is accessible", 0.7)],
        ),
    }
}

// ==================== IR Statistics ====================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IrStats {
    pub modules: usize,
    pub functions: usize,
    pub debt_items: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl IrStats {
    pub fn from_ir(ir: &ProjectIR) -> Self {
        Self {
            modules: ir.modules.len(),
            functions: ir.function_count(),
            debt_items: ir.technical_debt.len(),
            critical: ir.debt_count(Severity::Critical),
            high: ir.debt_count(Severity::High),
            medium: ir.debt_count(Severity::Medium),
            low: ir.debt_count(Severity::Low),
        }
    }
}

// ==================== File & Run Feedback ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFeedback {
    pub filename: String,
    pub success: bool,
    pub diagnostics: Vec<ErrorReport>,
    pub stats: Option<IrStats>,
    /// Rendered document names, in bundle order
    pub documents: Vec<String>,
}

impl FileFeedback {
    /// Feedback for a single analysis response
    pub fn from_validation(filename: &str, result: &Result<ProjectIR>) -> Self {
        match result {
            Ok(ir) => Self {
                filename: filename.to_string(),
                success: true,
                diagnostics: vec![],
                stats: Some(IrStats::from_ir(ir)),
                documents: vec![],
            },
            Err(error) => Self {
                filename: filename.to_string(),
                success: false,
                diagnostics: vec![ErrorReport::from_error(error, Some(Stage::Analysis))],
                stats: None,
                documents: vec![],
            },
        }
    }

    pub fn from_outcome(outcome: &FileOutcome) -> Self {
        let filename = outcome.source.path();
        match &outcome.result {
            Ok(artifacts) => {
                let mut diagnostics = vec![];
                if !artifacts.modernization.structured {
                    diagnostics.push(ErrorReport::warning(
                        UNSTRUCTURED_MODERNIZATION,
                        "Modernization response was not JSON; raw text used as code",
                        Some(Stage::Modernization),
                    ));
                }
                Self {
                    filename,
                    success: true,
                    diagnostics,
                    stats: Some(IrStats::from_ir(&artifacts.ir)),
                    documents: artifacts
                        .documents
                        .names()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }
            }
            Err(failure) => Self {
                filename,
                success: false,
                diagnostics: vec![ErrorReport::from_error(&failure.error, Some(failure.stage))],
                stats: None,
                documents: vec![],
            },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Batch report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFeedback {
    pub model: String,
    pub processed: usize,
    pub succeeded: usize,
    pub files: Vec<FileFeedback>,
}

impl RunFeedback {
    pub fn from_batch(model: &str, outcome: &BatchOutcome) -> Self {
        Self {
            model: model.to_string(),
            processed: outcome.processed(),
            succeeded: outcome.succeeded(),
            files: outcome.files.iter().map(FileFeedback::from_outcome).collect(),
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as compact JSON (for programmatic use)
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
