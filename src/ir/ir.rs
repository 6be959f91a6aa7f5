//! Typed intermediate representation.
//!
//! The IR is a closed set of node kinds produced by the IR builder. Every
//! node keeps the span of the syntax it came from so the emitter can report
//! errors at the right place.

use std::fmt::Display;

use crate::{
    ast::{expressions::Literal, operators::BinOperator},
    Span,
};

/// Statically inferred type of an IR value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Integer,
    Float,
    String,
    /// Undeclared variables, incompatible operands, call results.
    Unknown,
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Integer => write!(f, "Integer"),
            TypeKind::Float => write!(f, "Float"),
            TypeKind::String => write!(f, "String"),
            TypeKind::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IrNode {
    Constant(IrConstant),
    Variable(IrVariable),
    Assign(IrAssign),
    BinaryOp(IrBinaryOp),
    Call(IrCall),
}

impl IrNode {
    pub fn get_type(&self) -> TypeKind {
        match self {
            IrNode::Constant(constant) => constant.ty,
            IrNode::Variable(variable) => variable.ty,
            IrNode::Assign(assign) => assign.target.ty,
            IrNode::BinaryOp(binary) => binary.ty,
            IrNode::Call(_) => TypeKind::Unknown,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            IrNode::Constant(constant) => &constant.span,
            IrNode::Variable(variable) => &variable.span,
            IrNode::Assign(assign) => &assign.span,
            IrNode::BinaryOp(binary) => &binary.span,
            IrNode::Call(call) => &call.span,
        }
    }
}

/// A literal. Integers keep their decimal digits so no precision is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct IrConstant {
    pub value: Literal,
    pub ty: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrVariable {
    pub name: String,
    pub ty: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrAssign {
    pub target: IrVariable,
    pub value: Box<IrNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrBinaryOp {
    pub left: Box<IrNode>,
    pub op: BinOperator,
    pub right: Box<IrNode>,
    pub ty: TypeKind,
    pub span: Span,
}

/// A call to a named function. The callee is resolved by the emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct IrCall {
    pub func: String,
    pub args: Vec<IrNode>,
    pub span: Span,
}
