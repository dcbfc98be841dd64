//! Document Renderer
//!
//! Deterministic transformation from a validated IR plus the original
//! code, modernized code and change summary into named documents.
//! Output depends on nothing but those four inputs.

pub mod analysis;
pub mod master;
pub mod modular;
pub mod sections;
pub mod skeleton;
pub mod target;

use crate::ir::ProjectIR;

pub use analysis::render_analysis;
pub use master::render_master;
pub use skeleton::{generate_skeleton, generate_skeleton_for};
pub use target::TargetSyntax;

// ==================== Document Names ====================

pub const MASTER_DOCUMENTATION: &str = "MASTER_DOCUMENTATION.md";
pub const README: &str = "README.md";
pub const ARCHITECTURE: &str = "ARCHITECTURE.md";
pub const MIGRATION_GUIDE: &str = "MIGRATION_GUIDE.md";
pub const TECHNICAL_DEBT: &str = "TECHNICAL_DEBT.md";
pub const API_REFERENCE: &str = "API_REFERENCE.md";
pub const TESTING_GUIDE: &str = "TESTING_GUIDE.md";

/// One named text document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: &'static str,
    pub content: String,
}

/// Rendered documents in fixed order: master first, then modular docs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentBundle {
    documents: Vec<Document>,
}

impl DocumentBundle {
    fn push(&mut self, name: &'static str, content: String) {
        self.documents.push(Document { name, content });
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.documents.iter().map(|d| d.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }
}

#[cfg(test)]
impl DocumentBundle {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|d| d.name == name)
            .map(|d| d.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Render the master document and all modular documents
pub fn render_bundle(
    ir: &ProjectIR,
    original_code: &str,
    modernized_code: &str,
    changes_summary: &str,
) -> DocumentBundle {
    let mut bundle = DocumentBundle::default();

    bundle.push(
        MASTER_DOCUMENTATION,
        render_master(ir, original_code, modernized_code, changes_summary),
    );
    bundle.push(README, modular::render_readme(ir, changes_summary));
    bundle.push(ARCHITECTURE, modular::render_architecture(ir));
    bundle.push(MIGRATION_GUIDE, modular::render_migration_guide(ir));
    if !ir.technical_debt.is_empty() {
        bundle.push(TECHNICAL_DEBT, modular::render_technical_debt(ir));
    }
    bundle.push(API_REFERENCE, modular::render_api_reference(ir));
    bundle.push(TESTING_GUIDE, modular::render_testing_guide(ir));

    bundle
}
