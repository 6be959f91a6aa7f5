use crate::{
    errors::errors::Error,
    ir::ir::{IrAssign, IrNode},
};

use super::{
    builtins::gen_builtin_call,
    compiler::{rust_ident, Compiler},
    expr::gen_expression,
};

pub fn gen_statement(compiler: &mut Compiler, statement: &IrNode) -> Result<(), Error> {
    match statement {
        IrNode::Assign(assign) => gen_assign(compiler, assign),
        IrNode::Call(call) => {
            for line in gen_builtin_call(compiler, call)? {
                compiler.push(line);
            }
            Ok(())
        }
        _ => {
            let (value, _) = gen_expression(compiler, statement)?;
            compiler.push(format!("{};", value));
            Ok(())
        }
    }
}

/// First assignment declares the variable; later ones only assign it.
fn gen_assign(compiler: &mut Compiler, assign: &IrAssign) -> Result<(), Error> {
    let name = &assign.target.name;
    let ident = rust_ident(name);
    let (value, kind) = gen_expression(compiler, &assign.value)?;

    if let Some(declared) = compiler.declared.get(name).copied() {
        if declared != kind {
            log::warn!(
                "`{}` was declared as {} but is reassigned a {} value",
                name,
                declared,
                kind
            );
        }
        compiler.push(format!("{} = {};", ident, value));
        return Ok(());
    }

    let mutability = if compiler.reassigned.contains(name) { "mut " } else { "" };
    let var_type = compiler.convert_type(kind);
    compiler.push(format!("let {}{}: {} = {};", mutability, ident, var_type, value));
    compiler.declared.insert(name.clone(), kind);

    Ok(())
}
