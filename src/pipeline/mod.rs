//! Modernization pipeline
//!
//! Per source file: analysis -> validated IR -> skeleton ->
//! modernization -> documents. Files are processed one after another in
//! input order and a failure only affects its own file.

pub mod client;
pub mod output;

use std::fmt;
use std::fs;
use std::path::{Component, Path};

use log::{debug, info, warn};

use crate::ir::{parse_project_ir, ProjectIR};
use crate::render::{generate_skeleton, render_analysis, render_bundle, DocumentBundle};
use crate::response::{parse_modernization, Modernization};
use crate::utils::{Error, Result};

pub use client::{ClientConfig, ModelClient, ModelRequest, ReplayClient, Stage};
pub use output::write_batch;

const ANALYSIS_SYSTEM: &str = "You are a legacy code analyst. Respond with a single JSON object \
describing the file: language, original_filename, suggested_filename, summary, modules, \
technical_debt, dependencies and modernization_priority.";

const MODERNIZATION_SYSTEM: &str = "You modernize legacy code. Respond with a single JSON object \
with the fields modernized_code, filename and changes_summary.";

// ==================== Inputs & Outputs ====================

/// One legacy source file to modernize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub filename: String,
    pub folder: Option<String>,
    pub language: String,
    pub code: String,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            folder: None,
            language: language.into(),
            code: code.into(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Read a source file from disk.
    ///
    /// The filename is the path's last component and the folder is the
    /// rest of the path, so files from different directories keep apart.
    pub fn load(path: &Path, language: &str) -> Result<Self> {
        let code = fs::read_to_string(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let source = Self::new(filename, language, code);
        Ok(match path.parent().and_then(folder_of) {
            Some(folder) => source.with_folder(folder),
            None => source,
        })
    }

    /// `folder/filename`, or just the filename
    pub fn path(&self) -> String {
        match &self.folder {
            Some(folder) => format!("{}/{}", folder, self.filename),
            None => self.filename.clone(),
        }
    }
}

/// Relative folder for a parent directory: normal components only, so
/// the folder never points above or outside the output root
fn folder_of(parent: &Path) -> Option<String> {
    let parts: Vec<String> = parent
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Everything produced for one successful file
#[derive(Debug, Clone, PartialEq)]
pub struct FileArtifacts {
    pub ir: ProjectIR,
    pub skeleton: String,
    pub analysis: String,
    pub modernization: Modernization,
    pub documents: DocumentBundle,
}

/// A failure tagged with the stage it happened in
#[derive(Debug, Clone, PartialEq)]
pub struct StageError {
    pub stage: Stage,
    pub error: Error,
}

impl StageError {
    fn at(stage: Stage) -> impl FnOnce(Error) -> Self {
        move |error| Self { stage, error }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stage: {}", self.stage, self.error)
    }
}

impl std::error::Error for StageError {}

#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub source: SourceFile,
    pub result: std::result::Result<FileArtifacts, StageError>,
}

/// Per-file results of a batch, in input order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    pub files: Vec<FileOutcome>,
}

impl BatchOutcome {
    pub fn processed(&self) -> usize {
        self.files.len()
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&SourceFile, &StageError)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|e| (&f.source, e)))
    }
}

// ==================== Pipeline ====================

pub struct Pipeline<C: ModelClient> {
    client: C,
    config: ClientConfig,
}

impl<C: ModelClient> Pipeline<C> {
    pub fn new(client: C, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, stage: Stage, source: &SourceFile, system: &str, user: String) -> ModelRequest {
        ModelRequest {
            stage,
            source: source.path(),
            model: self.config.model.clone(),
            system: system.to_string(),
            user,
            temperature: self.config.temperature,
        }
    }

    /// Run every stage for one file
    pub fn process_file(&self, source: &SourceFile) -> std::result::Result<FileArtifacts, StageError> {
        info!("Analyzing {}", source.path());
        let request = self.request(
            Stage::Analysis,
            source,
            ANALYSIS_SYSTEM,
            format!(
                "Language: {}\nFilename: {}\n\n{}",
                source.language, source.filename, source.code
            ),
        );
        let raw = self
            .client
            .generate(&request)
            .map_err(StageError::at(Stage::Analysis))?;
        let ir = parse_project_ir(&raw).map_err(StageError::at(Stage::Analysis))?;
        debug!(
            "{}: {} modules, {} functions, {} debt items",
            source.path(),
            ir.modules.len(),
            ir.function_count(),
            ir.technical_debt.len()
        );

        let skeleton = generate_skeleton(&ir);
        let analysis = render_analysis(&ir);

        info!("Modernizing {}", source.path());
        let request = self.request(
            Stage::Modernization,
            source,
            MODERNIZATION_SYSTEM,
            format!("{}\n\nOriginal code:\n\n{}", analysis, source.code),
        );
        let raw = self
            .client
            .generate(&request)
            .map_err(StageError::at(Stage::Modernization))?;
        let modernization = parse_modernization(&raw).map_err(StageError::at(Stage::Modernization))?;
        if !modernization.structured {
            warn!(
                "{}: modernization response was not JSON, using it as code",
                source.path()
            );
        }

        let documents = render_bundle(
            &ir,
            &source.code,
            &modernization.modernized_code,
            &modernization.changes_summary,
        );

        Ok(FileArtifacts {
            ir,
            skeleton,
            analysis,
            modernization,
            documents,
        })
    }

    /// Process every file in order; one file's failure never stops the rest
    pub fn process_batch(&self, sources: Vec<SourceFile>) -> BatchOutcome {
        let total = sources.len();
        let mut outcome = BatchOutcome::default();

        for (i, source) in sources.into_iter().enumerate() {
            let result = self.process_file(&source);
            match &result {
                Ok(_) => info!("[{}/{}] {} done", i + 1, total, source.path()),
                Err(e) => warn!("[{}/{}] {} failed: {}", i + 1, total, source.path(), e),
            }
            outcome.files.push(FileOutcome { source, result });
        }

        info!("{}/{} files modernized", outcome.succeeded(), total);
        outcome
    }
}
