use crate::{
    ast::{expressions::Literal, operators::BinOperator},
    errors::errors::{Error, ErrorImpl},
    ir::ir::{IrBinaryOp, IrConstant, IrNode, TypeKind},
};

use super::compiler::{rust_ident, Compiler};

/// Generates Rust code for a value, along with the kind of the emitted value.
///
/// The emitted kind can differ from the IR type: an Integer `/` Integer
/// emits a float, and variables take the kind they were declared with.
pub fn gen_expression(compiler: &mut Compiler, node: &IrNode) -> Result<(String, TypeKind), Error> {
    match node {
        IrNode::Constant(constant) => Ok(gen_constant(compiler, constant)),
        IrNode::Variable(variable) => {
            let kind = compiler.variable_kind(&variable.name);
            let ident = rust_ident(&variable.name);
            let text = match kind {
                // BigInt and String are moved by value, reads must not consume the variable
                TypeKind::Integer | TypeKind::String => format!("{}.clone()", ident),
                TypeKind::Float | TypeKind::Unknown => ident,
            };
            Ok((text, kind))
        }
        IrNode::BinaryOp(binary) => gen_binary(compiler, binary),
        IrNode::Call(call) => Err(Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: String::from("Call"),
                reason: format!("the result of `{}` cannot be used as a value", call.func),
            },
            node.get_span().start.clone(),
        )),
        IrNode::Assign(_) => Err(Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: String::from("Assign"),
                reason: String::from("assignments are not expressions"),
            },
            node.get_span().start.clone(),
        )),
    }
}

fn gen_constant(compiler: &mut Compiler, constant: &IrConstant) -> (String, TypeKind) {
    let text = match &constant.value {
        Literal::Int(digits) => {
            compiler.features.big_int = true;
            if digits.parse::<i32>().is_ok() {
                format!("BigInt::from({})", digits)
            } else if digits.parse::<i64>().is_ok() {
                format!("BigInt::from({}_i64)", digits)
            } else {
                format!("BigInt::parse_bytes(b\"{}\", 10).unwrap()", digits)
            }
        }
        Literal::Float(value) if value.is_infinite() => {
            if value.is_sign_negative() {
                String::from("f64::NEG_INFINITY")
            } else {
                String::from("f64::INFINITY")
            }
        }
        Literal::Float(value) => format!("{:?}_f64", value),
        Literal::Str(value) => format!("String::from({:?})", value),
        // Rejected by the IR builder
        Literal::Bool(value) => value.to_string(),
        Literal::None => String::from("()"),
    };

    (text, constant.ty)
}

/// Generates an operand; nested binary operations are parenthesized.
fn gen_operand(compiler: &mut Compiler, node: &IrNode) -> Result<(String, TypeKind), Error> {
    let (text, kind) = gen_expression(compiler, node)?;

    match node {
        IrNode::BinaryOp(_) => Ok((format!("({})", text), kind)),
        _ => Ok((text, kind)),
    }
}

/// Wraps `text` in parentheses unless it already is a single parenthesized group.
pub fn group(text: &str) -> String {
    if is_grouped(text) {
        text.to_string()
    } else {
        format!("({})", text)
    }
}

fn is_grouped(text: &str) -> bool {
    if !text.starts_with('(') || !text.ends_with(')') {
        return false;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && index != text.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}

fn to_f64(compiler: &mut Compiler, text: &str) -> String {
    compiler.features.cast_to_float = true;
    format!("{}.to_f64().unwrap()", group(text))
}

/// Converts an Integer operand to `f64`; other kinds pass through.
fn float_operand(compiler: &mut Compiler, text: &str, kind: TypeKind) -> String {
    match kind {
        TypeKind::Integer => to_f64(compiler, text),
        _ => text.to_string(),
    }
}

fn gen_binary(compiler: &mut Compiler, binary: &IrBinaryOp) -> Result<(String, TypeKind), Error> {
    let (left, left_kind) = gen_operand(compiler, &binary.left)?;
    let (right, right_kind) = gen_operand(compiler, &binary.right)?;

    let unsupported = || {
        Error::new(
            ErrorImpl::UnsupportedOperation {
                operator: binary.op.to_string(),
                left: left_kind.to_string(),
                right: right_kind.to_string(),
            },
            binary.span.start.clone(),
        )
    };

    let has_string = left_kind == TypeKind::String || right_kind == TypeKind::String;
    let has_float = left_kind == TypeKind::Float || right_kind == TypeKind::Float;
    let has_unknown = left_kind == TypeKind::Unknown || right_kind == TypeKind::Unknown;
    let symbol = binary.op.symbol();

    match binary.op {
        BinOperator::Add | BinOperator::Sub | BinOperator::Mult | BinOperator::Div => {
            if has_string {
                return gen_string_operation(compiler, binary.op, (left, left_kind), (right, right_kind))
                    .ok_or_else(unsupported);
            }
            if has_unknown {
                return Ok((format!("{} {} {}", left, symbol, right), TypeKind::Unknown));
            }

            match (left_kind, right_kind) {
                (TypeKind::Integer, TypeKind::Integer) if binary.op == BinOperator::Div => {
                    let left = to_f64(compiler, &left);
                    let right = to_f64(compiler, &right);
                    Ok((format!("{} / {}", left, right), TypeKind::Float))
                }
                (TypeKind::Integer, TypeKind::Integer) => {
                    Ok((format!("{} {} {}", left, symbol, right), TypeKind::Integer))
                }
                _ => {
                    let left = float_operand(compiler, &left, left_kind);
                    let right = float_operand(compiler, &right, right_kind);
                    Ok((format!("{} {} {}", left, symbol, right), TypeKind::Float))
                }
            }
        }
        BinOperator::LShift | BinOperator::RShift => {
            compiler.features.cast_to_float = true;

            if has_string || has_float {
                return Err(unsupported());
            }
            if has_unknown {
                return Ok((format!("{} {} {}", left, symbol, right), TypeKind::Unknown));
            }

            Ok((
                format!("{} {} {}.to_u32().unwrap()", left, symbol, group(&right)),
                TypeKind::Integer,
            ))
        }
        BinOperator::Pow => {
            compiler.features.cast_to_float = true;

            if has_string {
                return Err(unsupported());
            }
            if has_unknown {
                return Ok((format!("{}.pow({})", group(&left), right), TypeKind::Unknown));
            }

            if left_kind == TypeKind::Integer && right_kind == TypeKind::Integer {
                return Ok((
                    format!("{}.pow({}.to_u32().unwrap())", group(&left), group(&right)),
                    TypeKind::Integer,
                ));
            }

            let left = float_operand(compiler, &left, left_kind);
            let right = float_operand(compiler, &right, right_kind);
            Ok((format!("{}.powf({})", group(&left), right), TypeKind::Float))
        }
        BinOperator::BitOr | BinOperator::BitXor | BinOperator::BitAnd => {
            if has_string || has_float {
                return Err(unsupported());
            }
            if has_unknown {
                return Ok((format!("{} {} {}", left, symbol, right), TypeKind::Unknown));
            }

            Ok((
                format!("&{} {} &{}", group(&left), symbol, group(&right)),
                TypeKind::Integer,
            ))
        }
        BinOperator::FloorDiv | BinOperator::Mod => {
            if has_string {
                return Err(unsupported());
            }

            let floor_div = binary.op == BinOperator::FloorDiv;

            if has_float && !has_unknown {
                let left = float_operand(compiler, &left, left_kind);
                let right = float_operand(compiler, &right, right_kind);
                let text = if floor_div {
                    format!("({} / {}).floor()", group(&left), group(&right))
                } else {
                    // The result takes the sign of the divisor
                    format!(
                        "({} % {} + {}) % {}",
                        group(&left),
                        group(&right),
                        group(&right),
                        group(&right)
                    )
                };
                return Ok((text, TypeKind::Float));
            }

            let kind = if has_unknown { TypeKind::Unknown } else { TypeKind::Integer };
            if floor_div {
                compiler.features.integer_ops = true;
                Ok((format!("{}.div_floor(&{})", group(&left), group(&right)), kind))
            } else if has_unknown {
                Ok((format!("{} % {}", left, right), kind))
            } else {
                compiler.features.integer_ops = true;
                Ok((format!("{}.mod_floor(&{})", group(&left), group(&right)), kind))
            }
        }
        BinOperator::MatMult => Err(unsupported()),
    }
}

/// `String + String` and repetition by an Integer; `None` for anything else.
fn gen_string_operation(
    compiler: &mut Compiler,
    op: BinOperator,
    left: (String, TypeKind),
    right: (String, TypeKind),
) -> Option<(String, TypeKind)> {
    match (op, left.1, right.1) {
        (BinOperator::Add, TypeKind::String, TypeKind::String) => {
            Some((format!("{} + &{}", left.0, right.0), TypeKind::String))
        }
        (BinOperator::Mult, TypeKind::String, TypeKind::Integer) => {
            Some((repeat(compiler, &left.0, &right.0), TypeKind::String))
        }
        (BinOperator::Mult, TypeKind::Integer, TypeKind::String) => {
            Some((repeat(compiler, &right.0, &left.0), TypeKind::String))
        }
        _ => None,
    }
}

fn repeat(compiler: &mut Compiler, text: &str, count: &str) -> String {
    compiler.features.cast_to_float = true;
    // Negative counts repeat zero times
    format!("{}.repeat({}.to_usize().unwrap_or(0))", group(text), group(count))
}
