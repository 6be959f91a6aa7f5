use std::collections::HashMap;

use crate::{
    ast::{
        expressions::{BinOpExpr, CallExpr, ConstantExpr, Expr, Literal, UnaryOpExpr},
        operators::{BinOperator, UnaryOperator},
        statements::{AssignStmt, Module, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::ir::{IrAssign, IrBinaryOp, IrCall, IrConstant, IrNode, IrVariable, TypeKind};

/// Variable name to inferred type. There is a single scope; the last
/// assignment in program order wins.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, TypeKind>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    pub fn declare_variable(&mut self, variable_name: String, variable_type: TypeKind) {
        self.variable_lookup.insert(variable_name, variable_type);
    }

    pub fn get_variable(&self, variable_name: &str) -> TypeKind {
        self.variable_lookup
            .get(variable_name)
            .copied()
            .unwrap_or(TypeKind::Unknown)
    }
}

#[derive(Debug, Default)]
pub struct IrBuilder {
    pub environment: Environment,
}

impl IrBuilder {
    pub fn new() -> Self {
        IrBuilder {
            environment: Environment::new(),
        }
    }
}

/// Result type of a binary operation on `left` and `right`.
pub fn combine_types(left: TypeKind, right: TypeKind) -> TypeKind {
    match (left, right) {
        (left, right) if left == right => left,
        (TypeKind::Integer, TypeKind::Float) | (TypeKind::Float, TypeKind::Integer) => TypeKind::Float,
        _ => TypeKind::Unknown,
    }
}

/// Rejects String operands combined with any other type, except repetition
/// (`String * Integer` in either order).
pub fn check_compatibility(
    op: BinOperator,
    left: TypeKind,
    right: TypeKind,
    position: Position,
) -> Result<(), Error> {
    let has_string = left == TypeKind::String || right == TypeKind::String;

    if !has_string || left == right {
        return Ok(());
    }

    let repetition = op == BinOperator::Mult
        && matches!(
            (left, right),
            (TypeKind::String, TypeKind::Integer) | (TypeKind::Integer, TypeKind::String)
        );
    if repetition {
        return Ok(());
    }

    Err(Error::new(
        ErrorImpl::TypeError {
            operator: op.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        },
        position,
    ))
}

fn unsupported(construct: &str, reason: &str, position: Position) -> Error {
    Error::new(
        ErrorImpl::UnsupportedConstruct {
            construct: construct.to_string(),
            reason: reason.to_string(),
        },
        position,
    )
}

pub fn build_expr(builder: &mut IrBuilder, expr: &Expr) -> Result<IrNode, Error> {
    match expr {
        Expr::Constant(constant) => build_constant(constant),
        Expr::Name(name) => Ok(IrNode::Variable(IrVariable {
            name: name.id.clone(),
            ty: builder.environment.get_variable(&name.id),
            span: name.span.clone(),
        })),
        Expr::BinOp(binary) => build_binary_expr(builder, binary),
        Expr::UnaryOp(unary) => build_unary_expr(builder, unary),
        Expr::Call(call) => build_call_expr(builder, call),
        Expr::Compare(_) => Err(unsupported("Compare", "comparisons", expr.get_span().start.clone())),
        Expr::BoolOp(_) => Err(unsupported("BoolOp", "boolean operators", expr.get_span().start.clone())),
        Expr::Attribute(_) => Err(unsupported("Attribute", "attribute access", expr.get_span().start.clone())),
        Expr::Subscript(_) => Err(unsupported("Subscript", "subscripts", expr.get_span().start.clone())),
        Expr::Tuple(_) | Expr::List(_) => Err(unsupported(
            expr.kind_name(),
            "collections",
            expr.get_span().start.clone(),
        )),
    }
}

fn build_constant(constant: &ConstantExpr) -> Result<IrNode, Error> {
    let ty = match &constant.value {
        Literal::Int(_) => TypeKind::Integer,
        Literal::Float(_) => TypeKind::Float,
        Literal::Str(_) => TypeKind::String,
        Literal::Bool(_) | Literal::None => {
            return Err(unsupported(
                "Constant",
                "booleans and None have no translation",
                constant.span.start.clone(),
            ))
        }
    };

    Ok(IrNode::Constant(IrConstant {
        value: constant.value.clone(),
        ty,
        span: constant.span.clone(),
    }))
}

fn build_binary_expr(builder: &mut IrBuilder, binary: &BinOpExpr) -> Result<IrNode, Error> {
    let left = build_expr(builder, &binary.left)?;
    let right = build_expr(builder, &binary.right)?;

    let (left_type, right_type) = (left.get_type(), right.get_type());
    check_compatibility(binary.op, left_type, right_type, binary.span.start.clone())?;

    Ok(IrNode::BinaryOp(IrBinaryOp {
        left: Box::new(left),
        op: binary.op,
        right: Box::new(right),
        ty: combine_types(left_type, right_type),
        span: binary.span.clone(),
    }))
}

/// Only `-` applied to a numeric literal is accepted; it folds into the constant.
fn build_unary_expr(builder: &mut IrBuilder, unary: &UnaryOpExpr) -> Result<IrNode, Error> {
    let error = || unsupported("UnaryOp", "only negation of numeric literals", unary.span.start.clone());

    if unary.op != UnaryOperator::USub {
        return Err(error());
    }

    let operand = match build_expr(builder, &unary.operand)? {
        IrNode::Constant(constant) => constant,
        _ => return Err(error()),
    };

    let value = match operand.value {
        Literal::Int(digits) => match digits.strip_prefix('-') {
            Some(positive) => Literal::Int(positive.to_string()),
            None => Literal::Int(format!("-{}", digits)),
        },
        Literal::Float(value) => Literal::Float(-value),
        _ => return Err(error()),
    };

    Ok(IrNode::Constant(IrConstant {
        value,
        ty: operand.ty,
        span: unary.span.clone(),
    }))
}

fn build_call_expr(builder: &mut IrBuilder, call: &CallExpr) -> Result<IrNode, Error> {
    let func = match call.func.as_ref() {
        Expr::Name(name) => name.id.clone(),
        other => {
            return Err(unsupported(
                other.kind_name(),
                "only calls to named functions",
                other.get_span().start.clone(),
            ))
        }
    };

    let mut args = vec![];
    for arg in call.args.iter() {
        args.push(build_expr(builder, arg)?);
    }

    Ok(IrNode::Call(IrCall {
        func,
        args,
        span: call.span.clone(),
    }))
}

fn build_assign_stmt(builder: &mut IrBuilder, assign: &AssignStmt) -> Result<IrNode, Error> {
    if assign.targets.len() != 1 {
        return Err(unsupported(
            "Assign",
            "multiple assignment targets",
            assign.span.start.clone(),
        ));
    }

    let name = match &assign.targets[0] {
        Expr::Name(name) => name,
        Expr::Tuple(tuple) => return Err(unsupported("Tuple", "tuple unpacking", tuple.span.start.clone())),
        other => {
            return Err(unsupported(
                other.kind_name(),
                "only plain names can be assigned",
                other.get_span().start.clone(),
            ))
        }
    };

    let value = build_expr(builder, &assign.value)?;
    let ty = value.get_type();
    builder.environment.declare_variable(name.id.clone(), ty);

    Ok(IrNode::Assign(IrAssign {
        target: IrVariable {
            name: name.id.clone(),
            ty,
            span: name.span.clone(),
        },
        value: Box::new(value),
        span: assign.span.clone(),
    }))
}

pub fn build_stmt(builder: &mut IrBuilder, stmt: &Stmt) -> Result<IrNode, Error> {
    let reason = match stmt {
        Stmt::Assign(assign) => return build_assign_stmt(builder, assign),
        Stmt::Expr(expression) => return build_expr(builder, &expression.expression),
        Stmt::AugAssign(_) => "augmented assignment",
        Stmt::If(_) | Stmt::While(_) | Stmt::For(_) | Stmt::Break(_) | Stmt::Continue(_) => "control flow",
        Stmt::FunctionDef(_) | Stmt::Return(_) => "functions",
        Stmt::ClassDef(_) => "user-defined types",
        Stmt::Import(_) => "modules",
        Stmt::Pass(_) => "empty statements",
    };

    Err(unsupported(stmt.kind_name(), reason, stmt.get_span().start.clone()))
}

/// Lowers a whole module. The first error aborts the build.
///
/// # Arguments
///
/// * `module` - Syntax tree produced by the parser
///
/// # Returns
///
/// One IR node per statement, in program order.
pub fn build_ir(module: &Module) -> Result<Vec<IrNode>, Error> {
    let mut builder = IrBuilder::new();
    let mut nodes = vec![];

    for stmt in module.iter() {
        nodes.push(build_stmt(&mut builder, stmt)?);
    }

    log::debug!("built {} IR statements", nodes.len());
    Ok(nodes)
}
