//! Project IR: the structured description of one legacy source file
//!
//! The model's analysis response is validated into these types exactly
//! once; every renderer downstream only reads them.

pub mod validate;

#[cfg(test)]
pub mod fixtures;

use serde::{Deserialize, Serialize};

pub use validate::{parse_project_ir, validate};

// ==================== Core Types ====================

/// A named, typed value: function input/output or module attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Free-form type tag, as written by the model
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// One conditional branch documented for a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPoint {
    pub condition: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// A function or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<Parameter>,
    /// Visibility / async / static markers
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub decisions: Vec<DecisionPoint>,
    #[serde(default)]
    pub exceptions: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub business_logic: Option<String>,
}

/// Kind of a module-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Class,
    Module,
    Interface,
    AbstractClass,
}

/// A class, module, interface or abstract class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ModuleKind,

    pub description: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub attributes: Vec<Parameter>,
    #[serde(default)]
    pub design_patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    Performance,
    Security,
    Maintainability,
    Scalability,
    Compatibility,
}

/// Debt severity, ordered `Low < Medium < High < Critical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// One documented issue in the legacy code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalDebtItem {
    pub category: DebtCategory,
    pub description: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// Root aggregate of one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIR {
    pub language: String,
    pub original_filename: String,
    pub suggested_filename: String,
    pub summary: String,
    /// Never empty once validated
    pub modules: Vec<Module>,
    #[serde(default)]
    pub technical_debt: Vec<TechnicalDebtItem>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub modernization_priority: Vec<String>,
}

// ==================== Enum Names ====================

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Module => "module",
            Self::Interface => "interface",
            Self::AbstractClass => "abstract_class",
        }
    }
}

impl DebtCategory {
    pub const ALL: [DebtCategory; 5] = [
        Self::Performance,
        Self::Security,
        Self::Maintainability,
        Self::Scalability,
        Self::Compatibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Maintainability => "maintainability",
            Self::Scalability => "scalability",
            Self::Compatibility => "compatibility",
        }
    }
}

impl Severity {
    /// Rendering order: most severe first
    pub const DESCENDING: [Severity; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for DebtCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Queries ====================

impl ProjectIR {
    /// Total number of functions across all modules
    pub fn function_count(&self) -> usize {
        self.modules.iter().map(|m| m.functions.len()).sum()
    }

    /// All functions, module by module, in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.modules.iter().flat_map(|m| m.functions.iter())
    }

    /// Debt items grouped by severity, critical first.
    /// Empty groups are skipped; insertion order is kept within a group.
    pub fn debt_by_severity(&self) -> Vec<(Severity, Vec<&TechnicalDebtItem>)> {
        Severity::DESCENDING
            .iter()
            .filter_map(|&severity| {
                let items: Vec<_> = self
                    .technical_debt
                    .iter()
                    .filter(|d| d.severity == severity)
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some((severity, items))
                }
            })
            .collect()
    }

    pub fn debt_count(&self, severity: Severity) -> usize {
        self.technical_debt
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Categories of the first `n` debt items, in order
    pub fn leading_debt_categories(&self, n: usize) -> Vec<&'static str> {
        self.technical_debt
            .iter()
            .take(n)
            .map(|d| d.category.as_str())
            .collect()
    }

    /// Design patterns across modules, first occurrence wins
    pub fn design_patterns(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for pattern in self.modules.iter().flat_map(|m| m.design_patterns.iter()) {
            if !seen.contains(&pattern.as_str()) {
                seen.push(pattern);
            }
        }
        seen
    }
}
