//! Unit tests for the code emitter.
//!
//! Each test runs the full front end and IR builder on a small program and
//! checks the emitted statements, the raised feature flags or the error.

use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    ir::builder::build_ir,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{
    compiler::{compile, rust_ident, Compiler, Features},
    expr::group,
};

fn compile_source(source: &str) -> Result<Compiler, Error> {
    let tokens = tokenize(source.to_string(), Some("test.py".to_string()))?;
    let module = parse(tokens, Rc::new("test.py".to_string()))?;
    let ir = build_ir(&module)?;
    compile(&ir)
}

fn statements(source: &str) -> Vec<String> {
    compile_source(source).unwrap().statements
}

fn emission_error(source: &str) -> ErrorImpl {
    match compile_source(source) {
        Ok(_) => panic!("expected `{}` to fail", source),
        Err(error) => error.get_impl().clone(),
    }
}

#[test]
fn test_scenario_integer_addition() {
    let compiler = compile_source("x = 10\ny = 3\nz = x + y\nprint(z)").unwrap();

    assert_eq!(
        compiler.statements,
        vec![
            "let x: BigInt = BigInt::from(10);",
            "let y: BigInt = BigInt::from(3);",
            "let z: BigInt = x.clone() + y.clone();",
            "print!(\"{}\", z);",
            "println!();",
        ]
    );
    assert_eq!(
        compiler.features,
        Features {
            big_int: true,
            cast_to_float: false,
            integer_ops: false,
        }
    );
}

#[test]
fn test_scenario_true_division() {
    let compiler = compile_source("x = 10\ny = 3\nz = x / y\nprint(z)").unwrap();

    assert_eq!(
        compiler.statements[2],
        "let z: f64 = (x.clone()).to_f64().unwrap() / (y.clone()).to_f64().unwrap();"
    );
    assert_eq!(compiler.statements[3], "print!(\"{:?}\", z);");
    assert!(compiler.features.cast_to_float);
    assert!(compiler.features.big_int);
}

#[test]
fn test_scenario_integer_power() {
    let compiler = compile_source("x = 10\ny = 3\nz = x ** y\nprint(z)").unwrap();

    assert_eq!(
        compiler.statements[2],
        "let z: BigInt = (x.clone()).pow((y.clone()).to_u32().unwrap());"
    );
    assert!(compiler.features.cast_to_float);
}

#[test]
fn test_scenario_float_bitwise() {
    assert_eq!(
        emission_error("z = 1.5 & 2"),
        ErrorImpl::UnsupportedOperation {
            operator: String::from("&"),
            left: String::from("Float"),
            right: String::from("Integer"),
        }
    );
    assert!(matches!(emission_error("z = 1.5 | 2.5"), ErrorImpl::UnsupportedOperation { .. }));
}

#[test]
fn test_division_always_declares_float() {
    let statements = statements("a = 1 / 2 + 1\nb = 10 / 4\nc = b + 1");

    assert_eq!(
        statements[0],
        "let a: f64 = ((BigInt::from(1)).to_f64().unwrap() / (BigInt::from(2)).to_f64().unwrap()) + (BigInt::from(1)).to_f64().unwrap();"
    );
    assert!(statements[1].starts_with("let b: f64 = "));
    assert_eq!(statements[2], "let c: f64 = b + (BigInt::from(1)).to_f64().unwrap();");
}

#[test]
fn test_reassignment_is_not_redeclared() {
    let statements = statements("x = 1\ny = 2\nx = 3\nprint(x)");

    assert_eq!(statements[0], "let mut x: BigInt = BigInt::from(1);");
    assert_eq!(statements[1], "let y: BigInt = BigInt::from(2);");
    assert_eq!(statements[2], "x = BigInt::from(3);");
    assert_eq!(statements.iter().filter(|line| line.starts_with("let mut x")).count(), 1);
    assert_eq!(statements.iter().filter(|line| line.starts_with("let x")).count(), 0);
}

#[test]
fn test_mixed_float_arithmetic() {
    let compiler = compile_source("a = 1.5 + 2\nb = 2 * 0.5\nc = 1.5 - 0.5").unwrap();

    assert_eq!(compiler.statements[0], "let a: f64 = 1.5_f64 + (BigInt::from(2)).to_f64().unwrap();");
    assert_eq!(compiler.statements[1], "let b: f64 = (BigInt::from(2)).to_f64().unwrap() * 0.5_f64;");
    assert_eq!(compiler.statements[2], "let c: f64 = 1.5_f64 - 0.5_f64;");
    assert!(compiler.features.cast_to_float);
}

#[test]
fn test_nested_operands_are_parenthesized() {
    let statements = statements("a = (1 + 2) * 3\nb = 1 - (2 - 3)");

    assert_eq!(statements[0], "let a: BigInt = (BigInt::from(1) + BigInt::from(2)) * BigInt::from(3);");
    assert_eq!(statements[1], "let b: BigInt = BigInt::from(1) - (BigInt::from(2) - BigInt::from(3));");
}

#[test]
fn test_integer_literals() {
    let statements = statements("a = 3000000000\nb = 123456789012345678901234567890\nc = -5");

    assert_eq!(statements[0], "let a: BigInt = BigInt::from(3000000000_i64);");
    assert_eq!(
        statements[1],
        "let b: BigInt = BigInt::parse_bytes(b\"123456789012345678901234567890\", 10).unwrap();"
    );
    assert_eq!(statements[2], "let c: BigInt = BigInt::from(-5);");
}

#[test]
fn test_float_literals() {
    let statements = statements("a = 1.0\nb = 1e300\nc = -0.25");

    assert_eq!(statements[0], "let a: f64 = 1.0_f64;");
    assert_eq!(statements[1], "let b: f64 = 1e300_f64;");
    assert_eq!(statements[2], "let c: f64 = -0.25_f64;");
}

#[test]
fn test_string_operations() {
    let compiler = compile_source("s = 'ab' + 'cd'\nt = 'ab' * 3\nu = 2 * s\nprint(u)").unwrap();

    assert_eq!(compiler.statements[0], "let s: String = String::from(\"ab\") + &String::from(\"cd\");");
    assert_eq!(
        compiler.statements[1],
        "let t: String = (String::from(\"ab\")).repeat((BigInt::from(3)).to_usize().unwrap_or(0));"
    );
    assert_eq!(
        compiler.statements[2],
        "let u: String = (s.clone()).repeat((BigInt::from(2)).to_usize().unwrap_or(0));"
    );
    assert_eq!(compiler.statements[3], "print!(\"{}\", u);");
    assert!(compiler.features.cast_to_float);
}

#[test]
fn test_string_escapes() {
    let statements = statements("s = 'say \"hi\"\\n'");

    assert_eq!(statements[0], "let s: String = String::from(\"say \\\"hi\\\"\\n\");");

    let escaped = self::statements(r"s = 'caf\u00e9 \101 \a'");
    assert_eq!(escaped[0], "let s: String = String::from(\"café A \\u{7}\");");
}

#[test]
fn test_unsupported_string_operations() {
    assert!(matches!(emission_error("s = 'a' - 'b'"), ErrorImpl::UnsupportedOperation { .. }));
    assert!(matches!(emission_error("s = 'a' ** 'b'"), ErrorImpl::UnsupportedOperation { .. }));
    assert!(matches!(emission_error("s = 'a' // 'b'"), ErrorImpl::UnsupportedOperation { .. }));
    assert!(matches!(emission_error("s = 'a' << 'b'"), ErrorImpl::UnsupportedOperation { .. }));
}

#[test]
fn test_string_type_errors() {
    assert!(matches!(emission_error("s = 's' * 1.5"), ErrorImpl::TypeError { .. }));
    assert!(matches!(emission_error("s = 1 + 's'"), ErrorImpl::TypeError { .. }));
}

#[test]
fn test_shifts() {
    let compiler = compile_source("a = 1 << 3\nb = a >> 1").unwrap();

    assert_eq!(compiler.statements[0], "let a: BigInt = BigInt::from(1) << (BigInt::from(3)).to_u32().unwrap();");
    assert_eq!(compiler.statements[1], "let b: BigInt = a.clone() >> (BigInt::from(1)).to_u32().unwrap();");
    assert!(compiler.features.cast_to_float);

    assert!(matches!(emission_error("a = 1.0 << 2"), ErrorImpl::UnsupportedOperation { .. }));
    assert!(matches!(emission_error("a = 1 >> 2.0"), ErrorImpl::UnsupportedOperation { .. }));
}

#[test]
fn test_float_power() {
    let statements = statements("a = 2 ** 0.5\nb = 1.5 ** 2\nc = 1.5 ** 0.5");

    assert_eq!(statements[0], "let a: f64 = ((BigInt::from(2)).to_f64().unwrap()).powf(0.5_f64);");
    assert_eq!(statements[1], "let b: f64 = (1.5_f64).powf((BigInt::from(2)).to_f64().unwrap());");
    assert_eq!(statements[2], "let c: f64 = (1.5_f64).powf(0.5_f64);");
}

#[test]
fn test_bitwise() {
    let compiler = compile_source("a = 6 & 3\nb = a | 8\nc = a ^ b").unwrap();

    assert_eq!(compiler.statements[0], "let a: BigInt = &(BigInt::from(6)) & &(BigInt::from(3));");
    assert_eq!(compiler.statements[1], "let b: BigInt = &(a.clone()) | &(BigInt::from(8));");
    assert_eq!(compiler.statements[2], "let c: BigInt = &(a.clone()) ^ &(b.clone());");
    assert!(!compiler.features.cast_to_float);
}

#[test]
fn test_floor_division_and_modulo() {
    let compiler = compile_source("a = 7 // 2\nb = -7 % 2").unwrap();

    assert_eq!(compiler.statements[0], "let a: BigInt = (BigInt::from(7)).div_floor(&(BigInt::from(2)));");
    assert_eq!(compiler.statements[1], "let b: BigInt = (BigInt::from(-7)).mod_floor(&(BigInt::from(2)));");
    assert!(compiler.features.integer_ops);
    assert!(!compiler.features.cast_to_float);
}

#[test]
fn test_float_floor_division_and_modulo() {
    let compiler = compile_source("a = 7.5 // 2\nb = 7.5 % 2.0").unwrap();

    assert_eq!(
        compiler.statements[0],
        "let a: f64 = ((7.5_f64) / ((BigInt::from(2)).to_f64().unwrap())).floor();"
    );
    assert_eq!(
        compiler.statements[1],
        "let b: f64 = ((7.5_f64) % (2.0_f64) + (2.0_f64)) % (2.0_f64);"
    );
    assert!(!compiler.features.integer_ops);
}

#[test]
fn test_matrix_multiplication_is_unsupported() {
    assert!(matches!(emission_error("a = 1 @ 2"), ErrorImpl::UnsupportedOperation { .. }));
}

#[test]
fn test_unknown_type_sentinel() {
    let statements = statements("y = missing + 1");

    assert_eq!(statements[0], "let y: __unknown__ = missing + BigInt::from(1);");
}

#[test]
fn test_bare_expression_statement() {
    let statements = statements("1 + 2");

    assert_eq!(statements, vec!["BigInt::from(1) + BigInt::from(2);"]);
}

#[test]
fn test_print_expressions() {
    let statements = statements("print(1.0)\nprint('hi')\nprint(1 + 2)");

    assert_eq!(statements[0], "print!(\"{:?}\", 1.0_f64);");
    assert_eq!(statements[2], "print!(\"{}\", String::from(\"hi\"));");
    assert_eq!(statements[4], "print!(\"{}\", BigInt::from(1) + BigInt::from(2));");
    assert_eq!(statements[5], "println!();");
}

#[test]
fn test_print_arity() {
    assert_eq!(
        emission_error("print(1, 2)"),
        ErrorImpl::ArityError {
            function: String::from("print"),
            expected: 1,
            received: 2,
        }
    );
    assert!(matches!(emission_error("print()"), ErrorImpl::ArityError { received: 0, .. }));
}

#[test]
fn test_unsupported_call() {
    assert_eq!(
        emission_error("len(1)"),
        ErrorImpl::UnsupportedCall {
            function: String::from("len"),
        }
    );
}

#[test]
fn test_call_used_as_value() {
    assert!(matches!(
        emission_error("x = print(1)"),
        ErrorImpl::UnsupportedConstruct { construct, .. } if construct == "Call"
    ));

    let error = compile_source("y = 1\nx = 2 + len(y)").unwrap_err();
    assert_eq!(error.get_error_name(), "UnsupportedConstruct");
    assert_eq!(error.get_position().0, 14);
}

#[test]
fn test_rust_ident() {
    assert_eq!(rust_ident("total"), "total");
    assert_eq!(rust_ident("match"), "r#match");
    assert_eq!(rust_ident("type"), "r#type");
    assert_eq!(rust_ident("fn"), "r#fn");
    assert_eq!(rust_ident("yield"), "r#yield");
    assert_eq!(rust_ident("_"), "_py__");
    assert_eq!(rust_ident("self"), "_py_self");
    assert_eq!(rust_ident("Self"), "_py_Self");
    assert_eq!(rust_ident("crate"), "_py_crate");
    assert_eq!(rust_ident("_private"), "_private");
}

#[test]
fn test_keyword_variable_names() {
    let compiler = compile_source("match = 1.5\nprint(match)\n_ = 1\nloop = _ + 2\nloop = loop * 2").unwrap();

    assert_eq!(
        compiler.statements,
        vec![
            "let r#match: f64 = 1.5_f64;",
            "print!(\"{:?}\", r#match);",
            "println!();",
            "let _py__: BigInt = BigInt::from(1);",
            "let mut r#loop: BigInt = _py__.clone() + BigInt::from(2);",
            "r#loop = r#loop.clone() * BigInt::from(2);",
        ]
    );
}

#[test]
fn test_assemble_header_order() {
    let program = compile_source("a = 7 // 2\nb = 1 / 2").unwrap().assemble();

    assert!(program.starts_with(
        "use num_bigint::BigInt;\nuse num_integer::Integer;\nuse num_traits::cast::ToPrimitive;\n\nfn main() {\n"
    ));
    assert!(program.ends_with("}\n"));
}

#[test]
fn test_assemble_program() {
    let program = compile_source("x = 10\ny = 3\nz = x + y\nprint(z)").unwrap().assemble();

    assert_eq!(
        program,
        "use num_bigint::BigInt;\n\
         \n\
         fn main() {\n    \
         let x: BigInt = BigInt::from(10);\n    \
         let y: BigInt = BigInt::from(3);\n    \
         let z: BigInt = x.clone() + y.clone();\n    \
         print!(\"{}\", z);\n    \
         println!();\n\
         }\n"
    );
}

#[test]
fn test_assemble_without_features() {
    let program = compile_source("s = 'x'\nprint(s)").unwrap().assemble();

    assert_eq!(
        program,
        "fn main() {\n    let s: String = String::from(\"x\");\n    print!(\"{}\", s);\n    println!();\n}\n"
    );
}

#[test]
fn test_use_lines() {
    let features = Features {
        big_int: true,
        cast_to_float: true,
        integer_ops: true,
    };

    assert_eq!(
        features.use_lines(),
        vec![
            "use num_bigint::BigInt;",
            "use num_integer::Integer;",
            "use num_traits::cast::ToPrimitive;",
        ]
    );
    assert!(Features::default().use_lines().is_empty());
}

#[test]
fn test_group() {
    assert_eq!(group("x"), "(x)");
    assert_eq!(group("(a + b)"), "(a + b)");
    assert_eq!(group("(a) + (b)"), "((a) + (b))");
    assert_eq!(group("(x).to_f64().unwrap()"), "((x).to_f64().unwrap())");
    assert_eq!(group("(String::from(\")\"))"), "(String::from(\")\"))");
}
