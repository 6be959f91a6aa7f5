//! Unit tests for the parser module.
//!
//! Covers assignments, operator precedence and associativity, calls,
//! compound statements with indented blocks, and syntax errors.

use std::rc::Rc;

use crate::{
    ast::{
        expressions::{Expr, Literal},
        operators::{BinOperator, BoolOperator, CompareOperator, UnaryOperator},
        statements::{Module, Stmt},
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Module, Error> {
    let tokens = tokenize(source.to_string(), Some("test.py".to_string()))?;
    parse(tokens, Rc::new("test.py".to_string()))
}

fn first_value(source: &str) -> Expr {
    let module = parse_source(source).unwrap();
    match &module.body[0] {
        Stmt::Assign(assign) => assign.value.clone(),
        Stmt::Expr(stmt) => stmt.expression.clone(),
        other => panic!("expected an assignment or expression, found {}", other.kind_name()),
    }
}

#[test]
fn test_parse_assignment() {
    let module = parse_source("x = 1 + 2").unwrap();

    assert_eq!(module.body.len(), 1);
    let Stmt::Assign(assign) = &module.body[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.targets.len(), 1);
    assert!(matches!(&assign.targets[0], Expr::Name(name) if name.id == "x"));
    assert!(matches!(&assign.value, Expr::BinOp(bin) if bin.op == BinOperator::Add));
}

#[test]
fn test_parse_literals() {
    assert!(matches!(first_value("x = 1.5"), Expr::Constant(c) if c.value == Literal::Float(1.5)));
    assert!(matches!(first_value("x = 'hi'"), Expr::Constant(c) if c.value == Literal::Str(String::from("hi"))));
    assert!(matches!(first_value("x = 10"), Expr::Constant(c) if c.value == Literal::Int(String::from("10"))));
    assert!(matches!(first_value("x = True"), Expr::Constant(c) if c.value == Literal::Bool(true)));
    assert!(matches!(first_value("x = None"), Expr::Constant(c) if c.value == Literal::None));
}

#[test]
fn test_parse_multiple_targets() {
    let module = parse_source("a = b = 1").unwrap();

    let Stmt::Assign(assign) = &module.body[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.targets.len(), 2);
    assert!(matches!(&assign.targets[1], Expr::Name(name) if name.id == "b"));
}

#[test]
fn test_parse_tuple_target() {
    let module = parse_source("a, b = 1, 2").unwrap();

    let Stmt::Assign(assign) = &module.body[0] else {
        panic!("expected an assignment");
    };
    assert!(matches!(&assign.targets[0], Expr::Tuple(tuple) if tuple.elts.len() == 2));
    assert!(matches!(&assign.value, Expr::Tuple(tuple) if tuple.elts.len() == 2));
}

#[test]
fn test_parse_precedence() {
    let Expr::BinOp(add) = first_value("1 + 2 * 3") else {
        panic!("expected a binary operation");
    };

    assert_eq!(add.op, BinOperator::Add);
    assert!(matches!(*add.right, Expr::BinOp(ref mult) if mult.op == BinOperator::Mult));
}

#[test]
fn test_parse_left_associativity() {
    let Expr::BinOp(sub) = first_value("10 - 4 - 3") else {
        panic!("expected a binary operation");
    };

    assert_eq!(sub.op, BinOperator::Sub);
    assert!(matches!(*sub.left, Expr::BinOp(ref inner) if inner.op == BinOperator::Sub));
    assert!(matches!(*sub.right, Expr::Constant(_)));
}

#[test]
fn test_parse_power_right_associativity() {
    let Expr::BinOp(pow) = first_value("2 ** 3 ** 2") else {
        panic!("expected a binary operation");
    };

    assert_eq!(pow.op, BinOperator::Pow);
    assert!(matches!(*pow.left, Expr::Constant(_)));
    assert!(matches!(*pow.right, Expr::BinOp(ref inner) if inner.op == BinOperator::Pow));
}

#[test]
fn test_parse_unary_minus_and_power() {
    let Expr::UnaryOp(neg) = first_value("-x ** 2") else {
        panic!("expected a unary operation");
    };

    assert_eq!(neg.op, UnaryOperator::USub);
    assert!(matches!(*neg.operand, Expr::BinOp(ref pow) if pow.op == BinOperator::Pow));

    let Expr::BinOp(pow) = first_value("2 ** -1") else {
        panic!("expected a binary operation");
    };
    assert!(matches!(*pow.right, Expr::UnaryOp(_)));
}

#[test]
fn test_parse_grouping() {
    let Expr::BinOp(mult) = first_value("(1 + 2) * 3") else {
        panic!("expected a binary operation");
    };

    assert_eq!(mult.op, BinOperator::Mult);
    assert!(matches!(*mult.left, Expr::BinOp(ref add) if add.op == BinOperator::Add));
}

#[test]
fn test_parse_shift_and_bitwise() {
    let Expr::BinOp(or) = first_value("a | b & c << 1") else {
        panic!("expected a binary operation");
    };

    assert_eq!(or.op, BinOperator::BitOr);
    let Expr::BinOp(ref and) = *or.right else {
        panic!("expected a binary operation");
    };
    assert_eq!(and.op, BinOperator::BitAnd);
    assert!(matches!(*and.right, Expr::BinOp(ref shift) if shift.op == BinOperator::LShift));
}

#[test]
fn test_parse_compare_and_bool() {
    let Expr::BoolOp(and) = first_value("a < b and not c") else {
        panic!("expected a boolean operation");
    };

    assert_eq!(and.op, BoolOperator::And);
    assert!(matches!(*and.left, Expr::Compare(ref cmp) if cmp.op == CompareOperator::Lt));
    assert!(matches!(*and.right, Expr::UnaryOp(ref not) if not.op == UnaryOperator::Not));
}

#[test]
fn test_parse_call() {
    let Expr::Call(call) = first_value("print(x, 1)") else {
        panic!("expected a call");
    };

    assert!(matches!(*call.func, Expr::Name(ref name) if name.id == "print"));
    assert_eq!(call.args.len(), 2);

    let Expr::Call(call) = first_value("print()") else {
        panic!("expected a call");
    };
    assert!(call.args.is_empty());
}

#[test]
fn test_parse_member_and_subscript() {
    let Expr::Subscript(subscript) = first_value("a.b[0]") else {
        panic!("expected a subscript");
    };

    assert!(matches!(*subscript.value, Expr::Attribute(ref attr) if attr.attr == "b"));
}

#[test]
fn test_parse_list() {
    assert!(matches!(first_value("[1, 2, 3,]"), Expr::List(list) if list.elts.len() == 3));
    assert!(matches!(first_value("()"), Expr::Tuple(tuple) if tuple.elts.is_empty()));
}

#[test]
fn test_parse_aug_assign() {
    let module = parse_source("x += 1\nx //= 2").unwrap();

    assert!(matches!(&module.body[0], Stmt::AugAssign(aug) if aug.op == BinOperator::Add));
    assert!(matches!(&module.body[1], Stmt::AugAssign(aug) if aug.op == BinOperator::FloorDiv));
}

#[test]
fn test_parse_semicolons() {
    let module = parse_source("x = 1; y = 2\nprint(x);").unwrap();

    assert_eq!(module.body.len(), 3);
}

#[test]
fn test_parse_if_elif_else() {
    let source = "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n    y = 4\n";
    let module = parse_source(source).unwrap();

    assert_eq!(module.body.len(), 1);
    let Stmt::If(if_stmt) = &module.body[0] else {
        panic!("expected an if statement");
    };
    assert_eq!(if_stmt.body.len(), 1);

    let Stmt::If(elif) = &if_stmt.orelse[0] else {
        panic!("expected a nested if for elif");
    };
    assert_eq!(elif.orelse.len(), 2);
}

#[test]
fn test_parse_inline_block() {
    let module = parse_source("if x: y = 1\nz = 2\n").unwrap();

    assert_eq!(module.body.len(), 2);
    assert!(matches!(&module.body[0], Stmt::If(if_stmt) if if_stmt.body.len() == 1));
}

#[test]
fn test_parse_loops() {
    let source = "for i in range(3):\n    print(i)\nwhile x:\n    break\n";
    let module = parse_source(source).unwrap();

    assert!(matches!(&module.body[0], Stmt::For(for_stmt) if for_stmt.body.len() == 1));
    assert!(matches!(&module.body[1], Stmt::While(while_stmt) if matches!(while_stmt.body[0], Stmt::Break(_))));
}

#[test]
fn test_parse_function_def() {
    let source = "def add(a: int, b=1) -> int:\n    return a + b\n";
    let module = parse_source(source).unwrap();

    let Stmt::FunctionDef(def) = &module.body[0] else {
        panic!("expected a function definition");
    };
    assert_eq!(def.name, "add");
    assert_eq!(def.params, vec![String::from("a"), String::from("b")]);
    assert!(matches!(&def.body[0], Stmt::Return(ret) if ret.value.is_some()));
}

#[test]
fn test_parse_class_def() {
    let module = parse_source("class A(B):\n    pass\n").unwrap();

    let Stmt::ClassDef(class) = &module.body[0] else {
        panic!("expected a class definition");
    };
    assert_eq!(class.name, "A");
    assert_eq!(class.bases.len(), 1);
    assert!(matches!(class.body[0], Stmt::Pass(_)));
}

#[test]
fn test_parse_import() {
    let module = parse_source("import os.path\nfrom math import sqrt as s\n").unwrap();

    assert!(matches!(&module.body[0], Stmt::Import(import) if import.module == "os.path"));
    assert!(matches!(&module.body[1], Stmt::Import(import) if import.module == "math"));
}

#[test]
fn test_parse_spans() {
    let module = parse_source("x = 1\ny = x + 20").unwrap();

    let span = module.body[1].get_span();
    assert_eq!(span.start.0, 6);
    assert_eq!(span.end.0, 16);
}

#[test]
fn test_parse_empty_module() {
    let module = parse_source("\n# nothing here\n").unwrap();

    assert!(module.body.is_empty());
}

#[test]
fn test_parse_unclosed_paren() {
    let error = parse_source("x = (1 + 2").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_invalid_target() {
    let error = parse_source("1 = x").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_parse_missing_statement_end() {
    let error = parse_source("x = 1 2").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_parse_missing_block() {
    let error = parse_source("if x:\ny = 1\n").unwrap_err();

    assert_eq!(error.get_error_name(), "IndentationError");
}

#[test]
fn test_parse_missing_operand() {
    let error = parse_source("x = 1 +").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}
