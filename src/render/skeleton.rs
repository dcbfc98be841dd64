//! Skeleton Generator
//!
//! Emits a stub source file in the target syntax: one declaration per
//! module, a field per attribute and a stub per function, with TODO
//! markers in place of bodies. No executable logic is generated.

use crate::ir::{Function, Module, ModuleKind, Parameter, ProjectIR};

use super::target::TargetSyntax;

/// Skeleton for the IR's own language
pub fn generate_skeleton(ir: &ProjectIR) -> String {
    generate_skeleton_for(ir, TargetSyntax::from_language(&ir.language))
}

/// Skeleton in an explicit target syntax
pub fn generate_skeleton_for(ir: &ProjectIR, syntax: TargetSyntax) -> String {
    SkeletonPrinter::new(ir, syntax).print()
}

/// Declaration form of a module kind; `None` means free functions
fn declaration(syntax: TargetSyntax, kind: ModuleKind) -> Option<&'static str> {
    match (syntax, kind) {
        (TargetSyntax::Python | TargetSyntax::JavaScript, ModuleKind::Module) => None,
        (TargetSyntax::Python, _) => Some("class"),
        (TargetSyntax::Java, ModuleKind::Class) => Some("public class"),
        (TargetSyntax::Java, ModuleKind::AbstractClass) => Some("public abstract class"),
        (TargetSyntax::Java, ModuleKind::Interface) => Some("public interface"),
        (TargetSyntax::Java, ModuleKind::Module) => Some("public final class"),
        (TargetSyntax::JavaScript, _) => Some("class"),
        (TargetSyntax::Generic, kind) => Some(kind.as_str()),
    }
}

/// Comments must stay on one line or they would leak into code
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Docstring text: one line, with quotes and backslashes escaped so a
/// `"""` in the description cannot close the literal
fn docstring(text: &str) -> String {
    one_line(text).replace('\\', "\\\\").replace('"', "\\\"")
}

struct SkeletonPrinter<'a> {
    ir: &'a ProjectIR,
    syntax: TargetSyntax,
    output: String,
    indent: usize,
}

impl<'a> SkeletonPrinter<'a> {
    fn new(ir: &'a ProjectIR, syntax: TargetSyntax) -> Self {
        Self {
            ir,
            syntax,
            output: String::new(),
            indent: 0,
        }
    }

    fn print(mut self) -> String {
        let ir = self.ir;
        for (i, module) in ir.modules.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            match self.syntax {
                TargetSyntax::Python => self.python_module(module),
                TargetSyntax::Java => self.java_module(module),
                TargetSyntax::JavaScript => self.javascript_module(module),
                TargetSyntax::Generic => self.generic_module(module),
            }
        }
        self.output
    }

    // ==================== Emit Helpers ====================

    fn indent_unit(&self) -> &'static str {
        match self.syntax {
            TargetSyntax::JavaScript => "  ",
            _ => "    ",
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str(self.indent_unit());
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn comment(&mut self, text: &str) {
        let leader = self.syntax.strategy().line_comment;
        self.line(&format!("{} {}", leader, one_line(text)));
    }

    /// `{leader} {prefix}` plus the description, if any
    fn trailing_comment(&self, description: &Option<String>) -> String {
        match description {
            Some(d) if !d.trim().is_empty() => {
                format!("  {} {}", self.syntax.strategy().line_comment, one_line(d))
            }
            _ => String::new(),
        }
    }

    fn body_stub(&mut self, func: &Function) {
        if let Some(logic) = &func.business_logic {
            self.comment(&format!("Logic: {}", logic));
        }
        self.comment("TODO: Implement");
    }

    fn brace_header(&mut self, module: &Module) {
        self.comment(&module.description);
        self.comment(&format!("Original: {}", self.ir.original_filename));
        self.comment(&format!("Suggested: {}", self.ir.suggested_filename));
    }

    // ==================== Python ====================

    fn python_module(&mut self, module: &Module) {
        self.line("\"\"\"");
        self.line(&docstring(&module.description));
        self.line(&format!("Original: {}", docstring(&self.ir.original_filename)));
        self.line(&format!("Suggested: {}", docstring(&self.ir.suggested_filename)));
        self.line("\"\"\"");
        self.blank();

        let Some(keyword) = declaration(self.syntax, module.kind) else {
            for attr in &module.attributes {
                let comment = self.trailing_comment(&attr.description);
                self.line(&format!("{}: {} = None{}", attr.name, attr.ty, comment));
            }
            if !module.attributes.is_empty() {
                self.blank();
            }
            for func in &module.functions {
                self.python_function(func, false);
            }
            return;
        };

        if module.kind == ModuleKind::Class {
            self.line(&format!("{} {}:", keyword, module.name));
        } else {
            self.line("from abc import ABC");
            self.blank();
            self.line(&format!("{} {}(ABC):", keyword, module.name));
        }

        self.indent += 1;
        self.line(&format!("\"\"\"{}\"\"\"", docstring(&module.description)));
        self.blank();

        if !module.attributes.is_empty() {
            self.line("def __init__(self):");
            self.indent += 1;
            for attr in &module.attributes {
                let comment = self.trailing_comment(&attr.description);
                self.line(&format!("self.{}: {} = None{}", attr.name, attr.ty, comment));
            }
            self.indent -= 1;
            self.blank();
        }

        for func in &module.functions {
            self.python_function(func, true);
        }
        self.indent -= 1;
    }

    fn python_function(&mut self, func: &Function, method: bool) {
        let mut params: Vec<&str> = Vec::new();
        if method {
            params.push("self");
        }
        params.extend(func.inputs.iter().map(|p| p.name.as_str()));

        self.line(&format!("def {}({}):", func.name, params.join(", ")));
        self.indent += 1;
        self.line(&format!("\"\"\"{}\"\"\"", docstring(&func.description)));
        self.body_stub(func);
        self.line("pass");
        self.indent -= 1;
        self.blank();
    }

    // ==================== Java ====================

    fn java_module(&mut self, module: &Module) {
        let keyword = declaration(self.syntax, module.kind).unwrap_or("public class");
        let interface = module.kind == ModuleKind::Interface;

        self.brace_header(module);
        self.line(&format!("{} {} {{", keyword, module.name));
        self.blank();
        self.indent += 1;

        for attr in &module.attributes {
            let visibility = if interface { "" } else { "private " };
            let comment = self.trailing_comment(&attr.description);
            self.line(&format!("{}{} {};{}", visibility, attr.ty, attr.name, comment));
        }
        if !module.attributes.is_empty() {
            self.blank();
        }

        for func in &module.functions {
            let return_type = func.outputs.first().map(|p| p.ty.as_str()).unwrap_or("void");
            let params = java_params(&func.inputs);
            self.comment(&func.description);

            if interface {
                self.body_stub(func);
                self.line(&format!("{} {}({});", return_type, func.name, params));
            } else {
                let modifiers = if func.modifiers.is_empty() {
                    "public".to_string()
                } else {
                    func.modifiers.join(" ")
                };
                self.line(&format!("{} {} {}({}) {{", modifiers, return_type, func.name, params));
                self.indent += 1;
                self.body_stub(func);
                if return_type != "void" {
                    self.line("return null;");
                }
                self.indent -= 1;
                self.line("}");
            }
            self.blank();
        }

        self.indent -= 1;
        self.line("}");
    }

    // ==================== JavaScript ====================

    fn javascript_module(&mut self, module: &Module) {
        self.brace_header(module);
        self.blank();

        let Some(keyword) = declaration(self.syntax, module.kind) else {
            for attr in &module.attributes {
                self.line(&format!("let {} = null;{}", attr.name, self.typed_comment(attr)));
            }
            if !module.attributes.is_empty() {
                self.blank();
            }
            for func in &module.functions {
                self.comment(&func.description);
                self.line(&format!("function {}({}) {{", func.name, js_params(&func.inputs)));
                self.indent += 1;
                self.body_stub(func);
                self.indent -= 1;
                self.line("}");
                self.blank();
            }
            return;
        };

        self.line(&format!("{} {} {{", keyword, module.name));
        self.indent += 1;

        if !module.attributes.is_empty() {
            self.line("constructor() {");
            self.indent += 1;
            for attr in &module.attributes {
                self.line(&format!("this.{} = null;{}", attr.name, self.typed_comment(attr)));
            }
            self.indent -= 1;
            self.line("}");
            self.blank();
        }

        for func in &module.functions {
            self.comment(&func.description);
            self.line(&format!("{}({}) {{", func.name, js_params(&func.inputs)));
            self.indent += 1;
            self.body_stub(func);
            self.indent -= 1;
            self.line("}");
            self.blank();
        }

        self.indent -= 1;
        self.line("}");
    }

    /// Untyped syntaxes keep the type tag in the trailing comment
    fn typed_comment(&self, attr: &Parameter) -> String {
        let leader = self.syntax.strategy().line_comment;
        match &attr.description {
            Some(d) if !d.trim().is_empty() => format!("  {} {}: {}", leader, attr.ty, one_line(d)),
            _ => format!("  {} {}", leader, attr.ty),
        }
    }

    // ==================== Generic ====================

    fn generic_module(&mut self, module: &Module) {
        let keyword = declaration(self.syntax, module.kind).unwrap_or("module");

        self.brace_header(module);
        self.line(&format!("{} {} {{", keyword, module.name));
        self.indent += 1;

        for attr in &module.attributes {
            let comment = self.trailing_comment(&attr.description);
            self.line(&format!("field {}: {}{}", attr.name, attr.ty, comment));
        }

        for func in &module.functions {
            let params = func
                .inputs
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty))
                .collect::<Vec<_>>()
                .join(", ");
            let ret = match func.outputs.first() {
                Some(out) => format!(" -> {}", out.ty),
                None => String::new(),
            };
            self.comment(&func.description);
            self.line(&format!("function {}({}){} {{", func.name, params, ret));
            self.indent += 1;
            self.body_stub(func);
            self.indent -= 1;
            self.line("}");
        }

        self.indent -= 1;
        self.line("}");
    }
}

fn java_params(inputs: &[Parameter]) -> String {
    inputs
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn js_params(inputs: &[Parameter]) -> String {
    inputs
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
