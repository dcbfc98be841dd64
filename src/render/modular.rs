//! Modular documents
//!
//! Focused slices of the master document. Every section body comes from
//! `sections`, so master and modular output never drift apart.

use crate::ir::{ProjectIR, Severity};

use super::sections;
use super::target::{target_version, TargetSyntax};
use super::{
    API_REFERENCE, ARCHITECTURE, MASTER_DOCUMENTATION, MIGRATION_GUIDE, TECHNICAL_DEBT,
    TESTING_GUIDE,
};

pub fn render_readme(ir: &ProjectIR, changes_summary: &str) -> String {
    let mut links = vec![
        format!("- [Architecture]({}) - System design and structure", ARCHITECTURE),
        format!("- [API Reference]({}) - Function documentation", API_REFERENCE),
        format!("- [Migration Guide]({}) - How to modernize", MIGRATION_GUIDE),
        format!("- [Testing Guide]({}) - Validation and tests", TESTING_GUIDE),
    ];
    if !ir.technical_debt.is_empty() {
        links.push(format!("- [Technical Debt]({}) - Issues and resolutions", TECHNICAL_DEBT));
    }

    format!(
        "# {suggested}\n\
         \n\
         {summary}\n\
         \n\
         ## Overview\n\
         \n\
         This is the modernized version of `{original}`.\n\
         \n\
         **Language:** {language}  \n\
         **Target Version:** {version}\n\
         \n\
         ## Changes Summary\n\
         \n\
         {changes}\n\
         \n\
         ## Quick Start\n\
         \n\
         See [{guide}]({guide}) for detailed setup instructions.\n\
         \n\
         ## Documentation\n\
         \n\
         {links}\n\
         \n\
         ## Status\n\
         \n\
         ✅ Modernization Complete  \n\
         📊 Technical Debt Resolved: {debt} items\n",
        suggested = ir.suggested_filename,
        summary = ir.summary,
        original = ir.original_filename,
        language = ir.language.to_uppercase(),
        version = target_version(&ir.language),
        changes = changes_summary,
        guide = MIGRATION_GUIDE,
        links = links.join("\n"),
        debt = ir.technical_debt.len(),
    )
}

pub fn render_architecture(ir: &ProjectIR) -> String {
    let patterns = ir.design_patterns();
    let patterns = if patterns.is_empty() {
        "Standard patterns applied".to_string()
    } else {
        patterns.join(", ")
    };

    let dependencies = if ir.dependencies.is_empty() {
        "No external dependencies".to_string()
    } else {
        ir.dependencies
            .iter()
            .map(|d| format!("- {}", d))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "# Architecture Documentation\n\n\
         ## System Overview\n\n{}\n\n\
         ## Module Structure\n\n{}\n\n\
         ## Design Patterns\n\n{}\n\n\
         ## Dependencies\n\n{}\n",
        ir.summary,
        sections::architecture(ir),
        patterns,
        dependencies,
    )
}

pub fn render_migration_guide(ir: &ProjectIR) -> String {
    format!(
        "# Migration Guide\n\n\
         ## Step-by-Step Modernization\n\n{}\n\n\
         ## Validation\n\n{}\n\n\
         ## Code Comparison\n\n\
         See complete before/after comparison in [{}]({}).\n",
        sections::execution_guide(ir),
        sections::validation_checklist(ir),
        MASTER_DOCUMENTATION,
        MASTER_DOCUMENTATION,
    )
}

pub fn render_technical_debt(ir: &ProjectIR) -> String {
    format!(
        "# Technical Debt Analysis\n\n{}\n\n\
         ## Summary\n\n\
         Total Items: {}  \n\
         Critical: {}  \n\
         High: {}  \n\
         Medium: {}  \n\
         Low: {}\n",
        sections::technical_debt(ir),
        ir.technical_debt.len(),
        ir.debt_count(Severity::Critical),
        ir.debt_count(Severity::High),
        ir.debt_count(Severity::Medium),
        ir.debt_count(Severity::Low),
    )
}

pub fn render_api_reference(ir: &ProjectIR) -> String {
    sections::api_listing(ir)
}

pub fn render_testing_guide(ir: &ProjectIR) -> String {
    let modules = ir
        .modules
        .iter()
        .map(|m| format!("- {} ({} functions)", m.name, m.functions.len()))
        .collect::<Vec<_>>()
        .join("\n");
    let example = TargetSyntax::from_language(&ir.language).strategy().test_example;

    format!(
        "# Testing Guide\n\n\
         ## Test Strategy\n\n{}\n\n\
         ## Unit Tests\n\n\
         Create tests for each function in the following modules:\n\n{}\n\n\
         ## Example Test Structure\n\
         ```{}\n{}\n```\n",
        sections::validation_checklist(ir),
        modules,
        ir.language,
        example,
    )
}
