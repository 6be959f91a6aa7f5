//! Builtin functions of the source language.
//!
//! `print` is the only builtin. A call statement to anything else is
//! rejected with `UnsupportedCall`.

use crate::{
    errors::errors::{Error, ErrorImpl},
    ir::ir::{IrCall, IrNode, TypeKind},
};

use super::{
    compiler::{rust_ident, Compiler},
    expr::gen_expression,
};

pub const PRINT: &str = "print";

/// Generates the statements for a builtin call used as a statement.
pub fn gen_builtin_call(compiler: &mut Compiler, call: &IrCall) -> Result<Vec<String>, Error> {
    match call.func.as_str() {
        PRINT => gen_print(compiler, call),
        _ => Err(Error::new(
            ErrorImpl::UnsupportedCall {
                function: call.func.clone(),
            },
            call.span.start.clone(),
        )),
    }
}

fn gen_print(compiler: &mut Compiler, call: &IrCall) -> Result<Vec<String>, Error> {
    if call.args.len() != 1 {
        return Err(Error::new(
            ErrorImpl::ArityError {
                function: call.func.clone(),
                expected: 1,
                received: call.args.len(),
            },
            call.span.start.clone(),
        ));
    }

    // Formatting macros take their arguments by reference
    let (argument, kind) = match &call.args[0] {
        IrNode::Variable(variable) => (rust_ident(&variable.name), compiler.variable_kind(&variable.name)),
        other => gen_expression(compiler, other)?,
    };

    // `{:?}` keeps the fractional part of whole floats, `1.0` rather than `1`
    let format = match kind {
        TypeKind::Float => "{:?}",
        _ => "{}",
    };

    Ok(vec![
        format!("print!(\"{}\", {});", format, argument),
        String::from("println!();"),
    ])
}
