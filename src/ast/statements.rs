use std::slice::Iter;

use crate::Span;

use super::{expressions::Expr, operators::BinOperator};

/// The root of a parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Module {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// Statement nodes of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(ExpressionStmt),
    Assign(AssignStmt),
    AugAssign(AugAssignStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    FunctionDef(FunctionDefStmt),
    ClassDef(ClassDefStmt),
    Return(ReturnStmt),
    Import(ImportStmt),
    Pass(Span),
    Break(Span),
    Continue(Span),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expr(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::AugAssign(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::FunctionDef(stmt) => &stmt.span,
            Stmt::ClassDef(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Import(stmt) => &stmt.span,
            Stmt::Pass(span) | Stmt::Break(span) | Stmt::Continue(span) => span,
        }
    }

    /// Name of the node kind, used when reporting unsupported constructs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Expr(_) => "Expr",
            Stmt::Assign(_) => "Assign",
            Stmt::AugAssign(_) => "AugAssign",
            Stmt::If(_) => "If",
            Stmt::While(_) => "While",
            Stmt::For(_) => "For",
            Stmt::FunctionDef(_) => "FunctionDef",
            Stmt::ClassDef(_) => "ClassDef",
            Stmt::Return(_) => "Return",
            Stmt::Import(_) => "Import",
            Stmt::Pass(_) => "Pass",
            Stmt::Break(_) => "Break",
            Stmt::Continue(_) => "Continue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `a = b = value`: every target in source order, then the value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub targets: Vec<Expr>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AugAssignStmt {
    pub target: Expr,
    pub op: BinOperator,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub target: Expr,
    pub iter: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefStmt {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefStmt {
    pub name: String,
    pub bases: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub module: String,
    pub span: Span,
}
