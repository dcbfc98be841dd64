//! Section renderers shared by the master and modular documents
//!
//! Each function renders one self-contained markdown section body from
//! the IR. Lines are assembled and joined with `\n`.

use crate::ir::{DebtCategory, ModuleKind, ProjectIR, Severity};
use crate::utils::{take_chars, title_case, truncate_with_marker};

use super::target::{fill, TargetSyntax};

/// Characters of source code shown in the before/after listings
pub const CODE_PREVIEW_CHARS: usize = 2000;
pub const TRUNCATION_MARKER: &str = "...";

/// Maximum debt rows in the comparison table
const COMPARISON_ROWS: usize = 5;
/// Characters kept from description/recommendation in a comparison row
const COMPARISON_CELL_CHARS: usize = 50;

const GENERIC_BENEFIT: &str = "✨ Improved code quality";

/// Benefit annotation for a debt category tag
pub fn benefit(category: &str) -> &'static str {
    let found = DebtCategory::ALL.iter().find(|c| c.as_str() == category);
    match found {
        Some(DebtCategory::Performance) => "⚡ Faster execution, lower memory",
        Some(DebtCategory::Security) => "🔒 Prevents vulnerabilities",
        Some(DebtCategory::Maintainability) => "🧹 Easier to read and modify",
        Some(DebtCategory::Scalability) => "📈 Handles growth better",
        Some(DebtCategory::Compatibility) => "🔄 Works with modern tools",
        None => GENERIC_BENEFIT,
    }
}

pub fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🟢",
    }
}

/// First three debt categories, comma separated
pub fn legacy_patterns(ir: &ProjectIR) -> String {
    ir.leading_debt_categories(3).join(", ")
}

/// Paradigm shift narrative.
///
/// Heuristic kept for output compatibility: a function whose name
/// contains "main" marks the code as procedural. It is not a reliable
/// architectural signal.
pub fn paradigm_shift(ir: &ProjectIR) -> String {
    let has_procedural = ir
        .functions()
        .any(|f| f.name.to_lowercase().contains("main"));
    let has_classes = ir
        .modules
        .iter()
        .any(|m| m.kind == ModuleKind::Class);

    let mut lines = Vec::new();
    if has_procedural && !has_classes {
        lines.push("**From:** Procedural, script-based approach".to_string());
        lines.push("**To:** Modular, object-oriented architecture".to_string());
    } else if has_classes {
        lines.push("**From:** Monolithic class structure".to_string());
        lines.push("**To:** Service-oriented, modular design".to_string());
    }
    lines.push(format!("**Key Changes:** {}", legacy_patterns(ir)));
    lines.join("\n")
}

/// Per-module breakdown followed by naming conventions
pub fn architecture(ir: &ProjectIR) -> String {
    let mut lines = vec!["### Modularization Strategy\n".to_string()];

    for module in &ir.modules {
        lines.push(format!("#### Module: `{}`", module.name));
        lines.push(format!("**Type:** {}", title_case(module.kind.as_str())));
        lines.push(format!("**Purpose:** {}", module.description));
        lines.push(format!("**Functions:** {}", module.functions.len()));
        if !module.design_patterns.is_empty() {
            lines.push(format!("**Patterns:** {}", module.design_patterns.join(", ")));
        }
        lines.push(String::new());
    }

    lines.push("### Naming Conventions".to_string());
    let strategy = TargetSyntax::from_language(&ir.language).strategy();
    lines.extend(strategy.naming_conventions.iter().map(|l| l.to_string()));

    lines.join("\n")
}

pub fn folder_structure(ir: &ProjectIR) -> String {
    let strategy = TargetSyntax::from_language(&ir.language).strategy();
    fill(strategy.folder_template, &ir.suggested_filename, &ir.language)
}

/// Legacy vs modern comparison table
pub fn comparison_table(ir: &ProjectIR, original_code: &str) -> String {
    let mut lines = vec![
        "| Aspect | Legacy Pattern | Modern Pattern | Why? |".to_string(),
        "|--------|---------------|----------------|------|".to_string(),
    ];

    for debt in ir.technical_debt.iter().take(COMPARISON_ROWS) {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            title_case(debt.category.as_str()),
            take_chars(&debt.description, COMPARISON_CELL_CHARS),
            take_chars(&debt.recommendation, COMPARISON_CELL_CHARS),
            benefit(debt.category.as_str()),
        ));
    }

    let strategy = TargetSyntax::from_language(&ir.language).strategy();
    if let Some(heuristic) = &strategy.heuristic {
        if heuristic.matches(&ir.language, original_code) {
            lines.push(heuristic.row.to_string());
        }
    }

    lines.join("\n")
}

/// Fenced, truncated code listing
pub fn code_listing(language: &str, code: &str) -> String {
    [
        format!("```{}", language),
        truncate_with_marker(code, CODE_PREVIEW_CHARS, TRUNCATION_MARKER),
        "```\n".to_string(),
    ]
    .join("\n")
}

/// Debt items grouped by severity, critical first
pub fn technical_debt(ir: &ProjectIR) -> String {
    let mut lines = Vec::new();
    for (severity, items) in ir.debt_by_severity() {
        lines.push(format!(
            "### {} {} Priority\n",
            severity_marker(severity),
            severity.as_str().to_uppercase()
        ));
        for debt in items {
            lines.push(format!("#### {}", title_case(debt.category.as_str())));
            lines.push(format!("**Issue:** {}", debt.description));
            lines.push(format!("**Resolution:** {}\n", debt.recommendation));
        }
    }
    lines.join("\n")
}

pub fn execution_guide(ir: &ProjectIR) -> String {
    let strategy = TargetSyntax::from_language(&ir.language).strategy();
    fill(strategy.execution_guide, &ir.suggested_filename, &ir.language)
}

const CHECKLIST: [&str; 8] = [
    "- [ ] All functions produce identical outputs",
    "- [ ] No runtime errors or warnings",
    "- [ ] Unit tests pass (if applicable)",
    "- [ ] Performance benchmarks meet expectations",
    "- [ ] Code follows modern style guidelines",
    "- [ ] Dependencies are up-to-date",
    "- [ ] Documentation is complete",
    "- [ ] Security scan passes",
];

pub fn validation_checklist(ir: &ProjectIR) -> String {
    let mut lines: Vec<String> = CHECKLIST.iter().map(|l| l.to_string()).collect();
    if !ir.technical_debt.is_empty() {
        lines.push(format!(
            "- [ ] All {} technical debt items addressed",
            ir.technical_debt.len()
        ));
    }
    lines.join("\n")
}

/// Flat API listing: module, function, parameters and returns
pub fn api_listing(ir: &ProjectIR) -> String {
    let mut lines = vec!["# API Reference\n".to_string()];

    for module in &ir.modules {
        lines.push(format!("## {}\n", module.name));
        lines.push(format!("{}\n", module.description));

        for func in &module.functions {
            lines.push(format!("### `{}`\n", func.name));
            lines.push(format!("{}\n", func.description));

            if !func.inputs.is_empty() {
                lines.push("**Parameters:**".to_string());
                for input in &func.inputs {
                    lines.push(format!(
                        "- `{}` ({}): {}",
                        input.name,
                        input.ty,
                        input.description.as_deref().unwrap_or("N/A")
                    ));
                }
                lines.push(String::new());
            }

            if !func.outputs.is_empty() {
                lines.push("**Returns:**".to_string());
                for output in &func.outputs {
                    lines.push(format!(
                        "- {}: {}",
                        output.ty,
                        output.description.as_deref().unwrap_or("N/A")
                    ));
                }
                lines.push(String::new());
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::fixtures::*;
    use crate::ir::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_benefit_lookup() {
        assert_eq!(benefit("security"), "🔒 Prevents vulnerabilities");
        assert_eq!(benefit("style"), "✨ Improved code quality");
    }

    #[test]
    fn test_paradigm_procedural() {
        let mut ir = minimal_ir();
        ir.modules[0].functions[0].name = "MainLoop".to_string();
        ir.technical_debt = vec![debt(DebtCategory::Performance, Severity::Low, "slow")];
        assert_eq!(
            paradigm_shift(&ir),
            "**From:** Procedural, script-based approach\n\
             **To:** Modular, object-oriented architecture\n\
             **Key Changes:** performance"
        );
    }

    #[test]
    fn test_paradigm_classes_win() {
        let ir = sample_ir();
        assert_eq!(
            paradigm_shift(&ir),
            "**From:** Monolithic class structure\n\
             **To:** Service-oriented, modular design\n\
             **Key Changes:** security, maintainability"
        );
    }

    #[test]
    fn test_paradigm_neither() {
        let ir = minimal_ir();
        assert_eq!(paradigm_shift(&ir), "**Key Changes:** ");
    }

    #[test]
    fn test_key_changes_capped_at_three() {
        let mut ir = minimal_ir();
        ir.technical_debt = DebtCategory::ALL
            .iter()
            .map(|&c| debt(c, Severity::Medium, "x"))
            .collect();
        assert!(paradigm_shift(&ir).ends_with("performance, security, maintainability"));
    }

    #[test]
    fn test_comparison_table_caps_rows_and_cells() {
        let mut ir = minimal_ir();
        let long = "d".repeat(80);
        ir.technical_debt = (0..7)
            .map(|_| debt(DebtCategory::Scalability, Severity::High, &long))
            .collect();
        let table = comparison_table(&ir, "print('x')");
        let lines: Vec<&str> = table.lines().collect();
        // header + separator + 5 debt rows + python logging row
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[2],
            format!(
                "| Scalability | {} | {} | 📈 Handles growth better |",
                "d".repeat(50),
                take_chars(&format!("Fix {}", long), 50)
            )
        );
        assert!(lines[7].starts_with("| Logging |"));
    }

    #[test]
    fn test_heuristic_row_needs_needle() {
        let ir = minimal_ir();
        assert_eq!(comparison_table(&ir, "x = 1").lines().count(), 2);

        let mut java = minimal_ir();
        java.language = "java".to_string();
        assert!(comparison_table(&java, "Vector v = new Vector();").contains("| Collections |"));
    }

    #[test]
    fn test_typescript_gets_no_var_row() {
        let mut ts = minimal_ir();
        ts.language = "typescript".to_string();
        assert_eq!(comparison_table(&ts, "var total: number = 0;").lines().count(), 2);

        let mut js = minimal_ir();
        js.language = "javascript".to_string();
        assert!(comparison_table(&js, "var total = 0;").contains("| Variables | `var` keyword |"));
    }

    #[test]
    fn test_technical_debt_grouping() {
        let mut ir = minimal_ir();
        ir.technical_debt = vec![
            debt(DebtCategory::Performance, Severity::Low, "low-1"),
            debt(DebtCategory::Security, Severity::Critical, "crit-1"),
            debt(DebtCategory::Scalability, Severity::High, "high-1"),
            debt(DebtCategory::Compatibility, Severity::Critical, "crit-2"),
            debt(DebtCategory::Maintainability, Severity::Medium, "med-1"),
        ];
        let section = technical_debt(&ir);
        let issues: Vec<&str> = section
            .lines()
            .filter_map(|l| l.strip_prefix("**Issue:** "))
            .collect();
        assert_eq!(issues, vec!["crit-1", "crit-2", "high-1", "med-1", "low-1"]);
        assert!(section.starts_with("### 🔴 CRITICAL Priority\n"));
    }

    #[test]
    fn test_checklist_counts_debt() {
        assert_eq!(validation_checklist(&minimal_ir()).lines().count(), 8);
        let checklist = validation_checklist(&sample_ir());
        assert_eq!(checklist.lines().count(), 9);
        assert!(checklist.ends_with("- [ ] All 2 technical debt items addressed"));
    }

    #[test]
    fn test_api_listing() {
        let listing = api_listing(&sample_ir());
        assert!(listing.starts_with("# API Reference\n"));
        assert!(listing.contains("- `path` (str): CSV file path"));
        assert!(listing.contains("- list: N/A"));
        let main_pos = listing.find("### `main`").unwrap();
        let process_pos = listing.find("### `process_order`").unwrap();
        assert!(main_pos < process_pos);
    }

    #[test]
    fn test_architecture_generic_has_no_conventions() {
        let mut ir = minimal_ir();
        ir.language = "cobol".to_string();
        assert!(architecture(&ir).ends_with("### Naming Conventions"));
    }
}
