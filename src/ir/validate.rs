//! Schema Validator
//!
//! Deserializes a normalized payload into a `ProjectIR`. Field presence,
//! enum membership and shape are enforced by the serde model in one
//! pass; the remaining value constraints are checked afterwards. Either
//! the whole document is valid or no IR is produced.

use serde_json::error::Category;

use super::ProjectIR;
use crate::response::normalize;
use crate::utils::{Error, Result};

/// Validate a normalized JSON payload against the IR schema
pub fn validate(payload: &str) -> Result<ProjectIR> {
    validate_reporting(payload, payload)
}

/// Normalize raw model output, then validate it.
///
/// Diagnostics carry a snippet of `raw`, not of the normalized payload.
pub fn parse_project_ir(raw: &str) -> Result<ProjectIR> {
    let payload = normalize(raw)?;
    validate_reporting(&payload, raw)
}

fn validate_reporting(payload: &str, raw: &str) -> Result<ProjectIR> {
    let ir: ProjectIR = serde_json::from_str(payload).map_err(|e| match e.classify() {
        Category::Syntax | Category::Eof | Category::Io => Error::malformed(e.to_string(), raw),
        Category::Data => Error::schema(e.to_string(), raw),
    })?;

    check_constraints(&ir).map_err(|message| Error::schema(message, raw))?;
    Ok(ir)
}

/// Constraints the serde model cannot express
fn check_constraints(ir: &ProjectIR) -> std::result::Result<(), String> {
    if ir.modules.is_empty() {
        return Err("'modules' must contain at least one entry".to_string());
    }

    for (mi, module) in ir.modules.iter().enumerate() {
        for (fi, func) in module.functions.iter().enumerate() {
            if func.description.trim().is_empty() {
                return Err(format!(
                    "modules[{}].functions[{}] ('{}'): 'description' must not be empty",
                    mi, fi, func.name
                ));
            }
        }
    }

    Ok(())
}
