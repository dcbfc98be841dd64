//! Model client boundary
//!
//! The pipeline never talks to a model directly; it hands a
//! `ModelRequest` to a `ModelClient` and gets raw text back.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::utils::{Error, Result};

pub const DEFAULT_MODEL: &str = "mistralai/devstral-2512:free";
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_RESPONSES_DIR: &str = "responses";

pub const ENV_MODEL: &str = "RELIC_MODEL";
pub const ENV_TEMPERATURE: &str = "RELIC_TEMPERATURE";
pub const ENV_RESPONSES_DIR: &str = "RELIC_RESPONSES_DIR";

// ==================== Requests ====================

/// Pipeline stage: one of the two model calls, or writing the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Analysis,
    Modernization,
    /// Writing the output layout; never sent to a model
    Output,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Analysis => "analysis",
            Stage::Modernization => "modernization",
            Stage::Output => "output",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One model invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub stage: Stage,
    /// `folder/filename` of the source, or just `filename`
    pub source: String,
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f64,
}

/// Anything that can answer a `ModelRequest` with raw text
pub trait ModelClient {
    fn generate(&self, request: &ModelRequest) -> Result<String>;
}

// ==================== Configuration ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Model identifier passed with every request
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Root of recorded responses for `ReplayClient`
    pub responses_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            responses_dir: PathBuf::from(DEFAULT_RESPONSES_DIR),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `RELIC_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            config.model = model;
        }
        if let Some(raw) = lookup(ENV_TEMPERATURE) {
            match raw.trim().parse::<f64>() {
                Ok(t) if t.is_finite() && t >= 0.0 => config.temperature = t,
                _ => warn!(
                    "Ignoring {}={:?}, using {}",
                    ENV_TEMPERATURE, raw, config.temperature
                ),
            }
        }
        if let Some(dir) = lookup(ENV_RESPONSES_DIR).filter(|d| !d.trim().is_empty()) {
            config.responses_dir = PathBuf::from(dir);
        }

        config
    }
}

// ==================== Replay Client ====================

/// Serves recorded model responses from disk.
///
/// The response for a request lives at
/// `{root}/{source}.{stage}.json`, e.g. `responses/main.py.analysis.json`.
#[derive(Debug, Clone)]
pub struct ReplayClient {
    root: PathBuf,
}

impl ReplayClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn response_path(&self, request: &ModelRequest) -> PathBuf {
        self.root
            .join(format!("{}.{}.json", request.source, request.stage))
    }
}

impl ModelClient for ReplayClient {
    fn generate(&self, request: &ModelRequest) -> Result<String> {
        let path = self.response_path(request);
        debug!("Replaying {} response from {}", request.stage, path.display());

        fs::read_to_string(&path).map_err(|e| {
            Error::Model(format!(
                "no recorded {} response for {} at {}: {}",
                request.stage,
                request.source,
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn request(stage: Stage, source: &str) -> ModelRequest {
        ModelRequest {
            stage,
            source: source.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system: String::new(),
            user: String::new(),
            temperature: 0.0,
        }
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.model, "mistralai/devstral-2512:free");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.responses_dir, PathBuf::from("responses"));
    }

    #[test]
    fn test_config_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_MODEL, "local/model"),
            (ENV_TEMPERATURE, "0.3"),
            (ENV_RESPONSES_DIR, "/tmp/recorded"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.model, "local/model");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.responses_dir, PathBuf::from("/tmp/recorded"));
    }

    #[test]
    fn test_bad_temperature_keeps_default() {
        let config = ClientConfig::from_lookup(|k| {
            (k == ENV_TEMPERATURE).then(|| "warm".to_string())
        });
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);

        let config = ClientConfig::from_lookup(|k| (k == ENV_TEMPERATURE).then(|| "-1".to_string()));
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_replay_reads_recorded_response() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("billing")).unwrap();
        std::fs::write(dir.path().join("billing/main.py.analysis.json"), "{\"ok\": true}").unwrap();

        let client = ReplayClient::new(dir.path());
        let raw = client.generate(&request(Stage::Analysis, "billing/main.py")).unwrap();
        assert_eq!(raw, "{\"ok\": true}");
    }

    #[test]
    fn test_replay_missing_response_is_model_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = ReplayClient::new(dir.path());
        let err = client
            .generate(&request(Stage::Modernization, "main.py"))
            .unwrap_err();

        assert_eq!(err.kind(), "Model");
        assert!(err.to_string().contains("main.py.modernization.json"));
    }
}
