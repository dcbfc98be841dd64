//! Analysis report
//!
//! A single markdown rendering of everything the IR captured, function
//! by function. Used to inspect a model response before any rewrite.

use std::fmt::{self, Write};

use crate::ir::{Function, Module, Parameter, ProjectIR};
use crate::utils::title_case;

use super::sections::severity_marker;

/// Render the IR as a markdown analysis report
pub fn render_analysis(ir: &ProjectIR) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_analysis(&mut out, ir);
    out
}

fn write_analysis(out: &mut String, ir: &ProjectIR) -> fmt::Result {
    writeln!(out, "# {} Code Analysis\n", ir.language.to_uppercase())?;
    writeln!(out, "**Original File:** `{}`  ", ir.original_filename)?;
    writeln!(out, "**Suggested Modern Name:** `{}`\n", ir.suggested_filename)?;
    writeln!(out, "## Project Summary\n\n{}\n", ir.summary)?;

    writeln!(out, "## Architecture Overview\n")?;
    for module in &ir.modules {
        write_module(out, module)?;
    }

    if !ir.technical_debt.is_empty() {
        writeln!(out, "## ⚠️ Technical Debt Analysis")?;
        for (severity, items) in ir.debt_by_severity() {
            writeln!(
                out,
                "\n### {} {} Priority\n",
                severity_marker(severity),
                severity.as_str().to_uppercase()
            )?;
            for debt in items {
                writeln!(out, "**{}:** {}", title_case(debt.category.as_str()), debt.description)?;
                writeln!(out, "*Recommendation:* {}\n", debt.recommendation)?;
            }
        }
    }

    if !ir.modernization_priority.is_empty() {
        writeln!(out, "## 🚀 Modernization Roadmap\n")?;
        for (i, priority) in ir.modernization_priority.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, priority)?;
        }
        writeln!(out)?;
    }

    if !ir.dependencies.is_empty() {
        writeln!(out, "## 📦 External Dependencies\n")?;
        for dep in &ir.dependencies {
            writeln!(out, "- {}", dep)?;
        }
    }

    Ok(())
}

fn write_module(out: &mut String, module: &Module) -> fmt::Result {
    writeln!(out, "### {}: `{}`\n", title_case(module.kind.as_str()), module.name)?;
    writeln!(out, "{}\n", module.description)?;

    if !module.design_patterns.is_empty() {
        writeln!(out, "**Design Patterns:** {}\n", module.design_patterns.join(", "))?;
    }
    if !module.imports.is_empty() {
        writeln!(out, "**Imports:** {}\n", module.imports.join(", "))?;
    }
    if !module.attributes.is_empty() {
        writeln!(out, "**Attributes:**\n")?;
        for attr in &module.attributes {
            write_typed(out, attr)?;
        }
        writeln!(out)?;
    }

    if !module.functions.is_empty() {
        writeln!(out, "#### Methods ({} total)\n", module.functions.len())?;
        for func in &module.functions {
            write_function(out, func)?;
        }
    }

    writeln!(out, "---\n")
}

fn write_function(out: &mut String, func: &Function) -> fmt::Result {
    writeln!(out, "##### `{}`\n", func.name)?;
    writeln!(out, "{}\n", func.description)?;

    if !func.modifiers.is_empty() {
        writeln!(out, "**Modifiers:** {}\n", func.modifiers.join(", "))?;
    }
    if !func.inputs.is_empty() {
        writeln!(out, "**Parameters:**\n")?;
        for input in &func.inputs {
            write_typed(out, input)?;
        }
        writeln!(out)?;
    }
    if !func.outputs.is_empty() {
        writeln!(out, "**Returns:**\n")?;
        for output in &func.outputs {
            writeln!(out, "- `{}`: {}", output.ty, or_na(&output.description))?;
        }
        writeln!(out)?;
    }
    if let Some(logic) = &func.business_logic {
        writeln!(out, "**Business Logic:** {}\n", logic)?;
    }
    if !func.side_effects.is_empty() {
        writeln!(out, "**Side Effects:** {}\n", func.side_effects.join(", "))?;
    }
    if !func.decisions.is_empty() {
        writeln!(out, "**Decision Points:**\n")?;
        for decision in &func.decisions {
            writeln!(out, "- {}: {}", decision.condition, or_na(&decision.description))?;
        }
        writeln!(out)?;
    }
    if !func.exceptions.is_empty() {
        writeln!(out, "**Exceptions:** {}\n", func.exceptions.join(", "))?;
    }
    if !func.dependencies.is_empty() {
        writeln!(out, "**Dependencies:** {}\n", func.dependencies.join(", "))?;
    }
    Ok(())
}

fn write_typed(out: &mut String, param: &Parameter) -> fmt::Result {
    writeln!(out, "- `{} {}`: {}", param.ty, param.name, or_na(&param.description))
}

fn or_na(description: &Option<String>) -> &str {
    description.as_deref().unwrap_or("N/A")
}
