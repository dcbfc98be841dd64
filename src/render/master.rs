//! Master migration document
//!
//! One markdown document with nine numbered sections in fixed order.
//! Sections 6 (technical debt) and 9 (roadmap) are omitted when the IR
//! has nothing to put in them.

use crate::ir::ProjectIR;

use super::sections;
use super::target::target_version;

const RULE: &str = "\n---\n";

/// Render `MASTER_DOCUMENTATION.md`
pub fn render_master(
    ir: &ProjectIR,
    original_code: &str,
    modernized_code: &str,
    changes_summary: &str,
) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut push = |line: String| out.push(line);

    push("# Code Modernization Documentation".to_string());
    push(format!("## {} → {}\n", ir.original_filename, ir.suggested_filename));
    push("---\n".to_string());

    // 1. Metadata & Environment
    push("## 1. Metadata & Environment\n".to_string());
    push("### Source".to_string());
    push(format!("- **Language:** {}", ir.language.to_uppercase()));
    push(format!("- **Original File:** `{}`", ir.original_filename));
    push(format!("- **Legacy Patterns:** {}\n", sections::legacy_patterns(ir)));
    push("### Target".to_string());
    push(format!("- **Modern File:** `{}`", ir.suggested_filename));
    push(format!("- **Target Version:** {}", target_version(&ir.language)));
    push(format!("- **Modernization Focus:** {}\n", changes_summary));
    push("### Paradigm Shift".to_string());
    push(sections::paradigm_shift(ir));
    push(RULE.to_string());

    // 2. Architecture
    push("## 2. Modernized Code Architecture\n".to_string());
    push(sections::architecture(ir));
    push(RULE.to_string());

    // 3. Folder structure
    push("## 3. Proposed Folder Structure\n".to_string());
    push("```".to_string());
    push(sections::folder_structure(ir));
    push("```\n".to_string());
    push(RULE.to_string());

    // 4. Comparison
    push("## 4. Legacy vs Modern: Side-by-Side Comparison\n".to_string());
    push(sections::comparison_table(ir, original_code));
    push(RULE.to_string());

    // 5. Code listings
    push("## 5. Complete Code Transformation\n".to_string());
    push("### Legacy Code (Before)".to_string());
    push(sections::code_listing(&ir.language, original_code));
    push("### Modern Code (After)".to_string());
    push(sections::code_listing(&ir.language, modernized_code));
    push(RULE.to_string());

    // 6. Technical debt
    if !ir.technical_debt.is_empty() {
        push("## 6. Technical Debt Addressed\n".to_string());
        push(sections::technical_debt(ir));
        push(RULE.to_string());
    }

    // 7. Execution guide
    push("## 7. Execution Guide\n".to_string());
    push(sections::execution_guide(ir));
    push(RULE.to_string());

    // 8. Validation checklist
    push("## 8. Validation Checklist\n".to_string());
    push(sections::validation_checklist(ir));
    push(RULE.to_string());

    // 9. Roadmap
    if !ir.modernization_priority.is_empty() {
        push("## 9. Modernization Roadmap\n".to_string());
        for (i, priority) in ir.modernization_priority.iter().enumerate() {
            push(format!("{}. {}", i + 1, priority));
        }
        push(RULE.to_string());
    }

    push("\n## Summary\n".to_string());
    push(format!("**Total Modules:** {}", ir.modules.len()));
    push(format!("**Total Functions:** {}", ir.function_count()));
    push(format!("**Technical Debt Items:** {}", ir.technical_debt.len()));
    push("**Status:** ✅ Modernization Complete\n".to_string());

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::fixtures::*;
    use pretty_assertions::assert_eq;

    /// Text between `start` and the next occurrence of `end`
    fn between<'a>(doc: &'a str, start: &str, end: &str) -> &'a str {
        let from = doc.find(start).expect("start marker") + start.len();
        let to = doc[from..].find(end).expect("end marker") + from;
        &doc[from..to]
    }

    #[test]
    fn test_sections_in_order() {
        let doc = render_master(&sample_ir(), "print('legacy')", "logging.info('modern')", "Added logging");
        let headings = [
            "## 1. Metadata & Environment",
            "## 2. Modernized Code Architecture",
            "## 3. Proposed Folder Structure",
            "## 4. Legacy vs Modern: Side-by-Side Comparison",
            "## 5. Complete Code Transformation",
            "## 6. Technical Debt Addressed",
            "## 7. Execution Guide",
            "## 8. Validation Checklist",
            "## 9. Modernization Roadmap",
            "## Summary",
        ];
        let positions: Vec<usize> = headings.iter().map(|h| doc.find(h).expect(h)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_header_and_metadata() {
        let doc = render_master(&sample_ir(), "", "", "Added logging");
        assert!(doc.starts_with(
            "# Code Modernization Documentation\n## main.py → order_service.py\n\n---\n\n## 1. Metadata & Environment\n"
        ));
        assert!(doc.contains("- **Language:** PYTHON\n"));
        assert!(doc.contains("- **Legacy Patterns:** security, maintainability\n"));
        assert!(doc.contains("- **Target Version:** Python 3.11+\n"));
        assert!(doc.contains("- **Modernization Focus:** Added logging\n"));
    }

    #[test]
    fn test_summary_counts() {
        let doc = render_master(&sample_ir(), "", "", "");
        assert!(doc.ends_with(
            "## Summary\n\n**Total Modules:** 2\n**Total Functions:** 3\n**Technical Debt Items:** 2\n**Status:** ✅ Modernization Complete\n"
        ));
    }

    #[test]
    fn test_roadmap_numbered() {
        let doc = render_master(&sample_ir(), "", "", "");
        assert!(doc.contains("## 9. Modernization Roadmap\n\n1. Parameterize SQL queries\n2. Introduce logging\n"));
    }

    #[test]
    fn test_legacy_code_truncated() {
        let original: String = (0..2500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let doc = render_master(&minimal_ir(), &original, "short", "");
        let block = between(&doc, "### Legacy Code (Before)\n```python\n", "\n```");
        assert_eq!(block, format!("{}...", &original[..2000]));

        let modern = between(&doc, "### Modern Code (After)\n```python\n", "\n```");
        assert_eq!(modern, "short");
    }

    #[test]
    fn test_exactly_2000_chars_not_marked() {
        let original = "x".repeat(2000);
        let doc = render_master(&minimal_ir(), &original, "", "");
        let block = between(&doc, "### Legacy Code (Before)\n```python\n", "\n```");
        assert_eq!(block, original);
    }

    #[test]
    fn test_minimal_ir_omits_optional_sections() {
        let doc = render_master(&minimal_ir(), "def run(): pass", "def run() -> None: ...", "Typed");
        assert!(!doc.contains("## 6. Technical Debt Addressed"));
        assert!(!doc.contains("## 9. Modernization Roadmap"));
        assert!(doc.contains("## 7. Execution Guide"));
        assert!(doc.contains("**Total Functions:** 1"));
        assert!(doc.contains("**Technical Debt Items:** 0"));
    }

    #[test]
    fn test_folder_structure_fenced() {
        let doc = render_master(&sample_ir(), "", "", "");
        let folder = between(&doc, "## 3. Proposed Folder Structure\n\n```\n", "\n```");
        assert!(folder.starts_with("project/\n"));
        assert!(folder.contains("│   │   └── order_service.py"));
    }

    #[test]
    fn test_deterministic() {
        let ir = sample_ir();
        let a = render_master(&ir, "print(1)", "print(2)", "s");
        let b = render_master(&ir, "print(1)", "print(2)", "s");
        assert_eq!(a, b);
    }
}
