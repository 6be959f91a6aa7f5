//! Main compiler module.
//!
//! This module contains the Compiler structure that turns the IR sequence
//! into the text of a Rust program. It tracks which variables have been
//! declared, which of them are assigned more than once, and which `use`
//! declarations the generated code needs.

use std::collections::{HashMap, HashSet};

use crate::{
    errors::errors::Error,
    ir::ir::{IrNode, TypeKind},
};

use super::stmt::gen_statement;

/// Rust type used for variables whose type could not be inferred. It does
/// not exist, so the generated program fails to build at the declaration.
pub const UNKNOWN_TYPE: &str = "__unknown__";

/// Strict and reserved Rust keywords, written as raw identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Names a raw identifier cannot hold.
const UNRAWABLE: &[&str] = &["_", "self", "Self", "super", "crate"];

/// Prefix for Python names that cannot be Rust identifiers at all.
pub const MANGLE_PREFIX: &str = "_py_";

/// Rust identifier for a Python variable name.
///
/// Keywords become raw identifiers (`match` is `r#match`). Names that raw
/// identifiers reject are prefixed (`self` is `_py_self`).
pub fn rust_ident(name: &str) -> String {
    if UNRAWABLE.contains(&name) {
        format!("{}{}", MANGLE_PREFIX, name)
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Support crates the generated program needs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// `num_bigint::BigInt` for integer values
    pub big_int: bool,
    /// `num_traits::cast::ToPrimitive` for `to_f64`, `to_u32` and `to_usize`
    pub cast_to_float: bool,
    /// `num_integer::Integer` for floor division and modulo
    pub integer_ops: bool,
}

impl Features {
    /// `use` declarations for the raised flags, in a fixed order.
    pub fn use_lines(&self) -> Vec<&'static str> {
        let mut lines = vec![];

        if self.big_int {
            lines.push("use num_bigint::BigInt;");
        }
        if self.integer_ops {
            lines.push("use num_integer::Integer;");
        }
        if self.cast_to_float {
            lines.push("use num_traits::cast::ToPrimitive;");
        }

        lines
    }
}

/// State of one compilation.
#[derive(Debug)]
pub struct Compiler {
    /// Emitted statements, in program order, without indentation
    pub statements: Vec<String>,
    /// Declared variables and the kind they were declared with
    pub declared: HashMap<String, TypeKind>,
    /// Variables assigned more than once, declared `mut`
    pub reassigned: HashSet<String>,
    pub features: Features,
}

impl Compiler {
    pub fn new(ir: &[IrNode]) -> Self {
        Compiler {
            statements: vec![],
            declared: HashMap::new(),
            reassigned: find_reassigned(ir),
            features: Features::default(),
        }
    }

    /// Rust type for a declaration of the given kind.
    pub fn convert_type(&mut self, kind: TypeKind) -> &'static str {
        match kind {
            TypeKind::Integer => {
                self.features.big_int = true;
                "BigInt"
            }
            TypeKind::Float => "f64",
            TypeKind::String => "String",
            TypeKind::Unknown => UNKNOWN_TYPE,
        }
    }

    /// Kind a variable was declared with, `Unknown` if it never was.
    pub fn variable_kind(&self, name: &str) -> TypeKind {
        self.declared.get(name).copied().unwrap_or(TypeKind::Unknown)
    }

    pub fn push(&mut self, statement: String) {
        log::debug!("emitted `{}`", statement);
        self.statements.push(statement);
    }

    fn gen(&mut self, ir: &[IrNode]) -> Result<(), Error> {
        for node in ir {
            gen_statement(self, node)?;
        }

        Ok(())
    }

    /// The complete program: `use` lines, then `main` with every statement.
    pub fn assemble(&self) -> String {
        let mut output = String::new();

        let use_lines = self.features.use_lines();
        for line in use_lines.iter() {
            output.push_str(line);
            output.push('\n');
        }
        if !use_lines.is_empty() {
            output.push('\n');
        }

        output.push_str("fn main() {\n");
        for statement in self.statements.iter() {
            output.push_str("    ");
            output.push_str(statement);
            output.push('\n');
        }
        output.push_str("}\n");

        output
    }
}

fn find_reassigned(ir: &[IrNode]) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut reassigned = HashSet::new();

    for node in ir {
        if let IrNode::Assign(assign) = node {
            if !seen.insert(assign.target.name.clone()) {
                reassigned.insert(assign.target.name.clone());
            }
        }
    }

    reassigned
}

/// Emits Rust code for an IR sequence.
///
/// # Returns
///
/// The Compiler holding the emitted statements and raised feature flags,
/// or the first emission error.
pub fn compile(ir: &[IrNode]) -> Result<Compiler, Error> {
    let mut compiler = Compiler::new(ir);
    compiler.gen(ir)?;

    Ok(compiler)
}
