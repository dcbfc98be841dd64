//! Shared IR fixtures for unit tests

use super::*;

pub fn param(name: &str, ty: &str, description: Option<&str>) -> Parameter {
    Parameter {
        name: name.to_string(),
        ty: ty.to_string(),
        description: description.map(str::to_string),
    }
}

pub fn func(name: &str, description: &str) -> Function {
    Function {
        name: name.to_string(),
        description: description.to_string(),
        inputs: vec![],
        outputs: vec![],
        modifiers: vec![],
        side_effects: vec![],
        decisions: vec![],
        exceptions: vec![],
        dependencies: vec![],
        business_logic: None,
    }
}

pub fn module(name: &str, kind: ModuleKind, functions: Vec<Function>) -> Module {
    Module {
        name: name.to_string(),
        kind,
        description: format!("{} description", name),
        imports: vec![],
        functions,
        attributes: vec![],
        design_patterns: vec![],
    }
}

pub fn debt(category: DebtCategory, severity: Severity, description: &str) -> TechnicalDebtItem {
    TechnicalDebtItem {
        category,
        description: description.to_string(),
        severity,
        recommendation: format!("Fix {}", description),
    }
}

/// One module, one bare function, nothing else
pub fn minimal_ir() -> ProjectIR {
    ProjectIR {
        language: "python".to_string(),
        original_filename: "script.py".to_string(),
        suggested_filename: "script_service.py".to_string(),
        summary: "A small script".to_string(),
        modules: vec![module(
            "script",
            ModuleKind::Module,
            vec![func("run", "Runs the script")],
        )],
        technical_debt: vec![],
        dependencies: vec![],
        modernization_priority: vec![],
    }
}

/// A procedural entry module plus a service class
pub fn sample_ir() -> ProjectIR {
    let mut main_fn = func("main", "Entry point");
    main_fn.side_effects = vec!["prints to stdout".to_string()];

    let mut load = func("load_orders", "Loads orders from disk");
    load.inputs = vec![param("path", "str", Some("CSV file path"))];
    load.outputs = vec![param("orders", "list", None)];
    load.exceptions = vec!["IOError".to_string()];

    let mut process = func("process_order", "Validates and stores an order");
    process.inputs = vec![param("order", "dict", Some("Raw order"))];
    process.outputs = vec![param("result", "bool", Some("True when stored"))];
    process.modifiers = vec!["public".to_string()];
    process.decisions = vec![DecisionPoint {
        condition: "order['total'] > 1000".to_string(),
        description: Some("Large orders need approval".to_string()),
    }];
    process.business_logic = Some("Orders above 1000 are flagged".to_string());
    process.dependencies = vec!["sqlite3".to_string()];

    let mut service = module("OrderService", ModuleKind::Class, vec![process]);
    service.attributes = vec![param("db_path", "str", Some("Database location"))];
    service.design_patterns = vec!["Singleton".to_string()];
    service.imports = vec!["sqlite3".to_string()];

    ProjectIR {
        language: "python".to_string(),
        original_filename: "main.py".to_string(),
        suggested_filename: "order_service.py".to_string(),
        summary: "Legacy order processing system".to_string(),
        modules: vec![module("main", ModuleKind::Module, vec![main_fn, load]), service],
        technical_debt: vec![
            debt(DebtCategory::Security, Severity::High, "SQL built by string concatenation"),
            debt(DebtCategory::Maintainability, Severity::Low, "Global mutable state"),
        ],
        dependencies: vec!["sqlite3".to_string()],
        modernization_priority: vec![
            "Parameterize SQL queries".to_string(),
            "Introduce logging".to_string(),
        ],
    }
}
