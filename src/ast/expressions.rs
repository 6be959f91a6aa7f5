use crate::Span;

use super::operators::{BinOperator, BoolOperator, CompareOperator, UnaryOperator};

/// Literal values as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Decimal digits of an arbitrary-precision integer, optionally signed.
    Int(String),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
}

/// Expression nodes of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(ConstantExpr),
    Name(NameExpr),
    BinOp(BinOpExpr),
    UnaryOp(UnaryOpExpr),
    BoolOp(BoolOpExpr),
    Compare(CompareExpr),
    Call(CallExpr),
    Attribute(AttributeExpr),
    Subscript(SubscriptExpr),
    Tuple(TupleExpr),
    List(ListExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Constant(expr) => &expr.span,
            Expr::Name(expr) => &expr.span,
            Expr::BinOp(expr) => &expr.span,
            Expr::UnaryOp(expr) => &expr.span,
            Expr::BoolOp(expr) => &expr.span,
            Expr::Compare(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Attribute(expr) => &expr.span,
            Expr::Subscript(expr) => &expr.span,
            Expr::Tuple(expr) => &expr.span,
            Expr::List(expr) => &expr.span,
        }
    }

    /// Name of the node kind, used when reporting unsupported constructs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Constant(_) => "Constant",
            Expr::Name(_) => "Name",
            Expr::BinOp(_) => "BinOp",
            Expr::UnaryOp(_) => "UnaryOp",
            Expr::BoolOp(_) => "BoolOp",
            Expr::Compare(_) => "Compare",
            Expr::Call(_) => "Call",
            Expr::Attribute(_) => "Attribute",
            Expr::Subscript(_) => "Subscript",
            Expr::Tuple(_) => "Tuple",
            Expr::List(_) => "List",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpr {
    pub value: Literal,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameExpr {
    pub id: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOpExpr {
    pub left: Box<Expr>,
    pub op: BinOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOpExpr {
    pub op: UnaryOperator,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolOpExpr {
    pub op: BoolOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareExpr {
    pub left: Box<Expr>,
    pub op: CompareOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub func: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeExpr {
    pub value: Box<Expr>,
    pub attr: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub value: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleExpr {
    pub elts: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    pub elts: Vec<Expr>,
    pub span: Span,
}
