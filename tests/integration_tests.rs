//! Integration tests for end-to-end transpilation.
//!
//! These tests drive the public pipeline from Python source through
//! tokenization, parsing, IR building and Rust emission. The tests that
//! build and run the generated program need a cargo toolchain and network
//! access for the num crates, so they are ignored by default.

use std::{fs, path::Path};

use pythoc::{
    driver::{
        self,
        config::{Config, RunnerConfig},
        errors::DriverError,
        runner::{CancellationToken, RunOutput},
    },
    transpile,
};
use tempfile::tempdir;

fn transpile_ok(source: &str) -> String {
    match transpile(source, "test.py") {
        Ok(program) => program,
        Err(error) => panic!("transpilation failed: {}", pythoc::render_error(&error, source, "test.py")),
    }
}

#[test]
fn test_integer_addition() {
    let program = transpile_ok("x = 10\ny = 3\nz = x + y\nprint(z)");

    assert!(program.starts_with("use num_bigint::BigInt;\n\nfn main() {\n"));
    assert!(program.contains("let x: BigInt = BigInt::from(10);"));
    assert!(program.contains("let y: BigInt = BigInt::from(3);"));
    assert!(program.contains("let z: BigInt = x.clone() + y.clone();"));
    assert!(!program.contains("ToPrimitive"));
}

#[test]
fn test_true_division() {
    let program = transpile_ok("x = 10\ny = 3\nz = x / y");

    assert!(program.contains("use num_traits::cast::ToPrimitive;"));
    assert!(program.contains("let z: f64 = (x.clone()).to_f64().unwrap() / (y.clone()).to_f64().unwrap();"));
}

#[test]
fn test_integer_power() {
    let program = transpile_ok("x = 10\ny = 3\nz = x ** y");

    assert!(program.contains("let z: BigInt = (x.clone()).pow((y.clone()).to_u32().unwrap());"));
}

#[test]
fn test_bitwise_with_float_rejected() {
    let error = transpile("z = 1.5 & 2", "test.py").unwrap_err();

    assert_eq!(error.get_error_name(), "UnsupportedOperation");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_reassignment_declares_mut() {
    let program = transpile_ok("x = 1\nx = x + 1\nprint(x)");

    assert!(program.contains("let mut x: BigInt = BigInt::from(1);"));
    assert!(program.contains("x = x.clone() + BigInt::from(1);"));
}

#[test]
fn test_strings() {
    let program = transpile_ok("a = 'ab'\nb = a + \"cd\"\nprint(b)");

    assert!(program.contains("let a: String = String::from(\"ab\");"));
    assert!(program.contains("let b: String = a.clone() + &String::from(\"cd\");"));
    assert!(program.contains("print!(\"{}\", b);"));
}

#[test]
fn test_syntax_error_rendering() {
    let source = "x = 1\ny = (2 +\n";
    let error = transpile(source, "test.py").unwrap_err();

    assert!(error.is_syntax_error());
    let rendered = pythoc::render_error(&error, source, "test.py");
    assert!(rendered.starts_with(&format!("Error: {}", error.get_error_name())));
    assert!(rendered.contains("-> test.py\n"));
}

#[test]
fn test_unsupported_statement() {
    let error = transpile("x = 1\nwhile x:\n    x = x - 1\n", "test.py").unwrap_err();

    assert_eq!(error.get_error_name(), "UnsupportedConstruct");
    assert!(!error.is_syntax_error());
}

#[test]
fn test_emit_only_writes_project() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("prog.py");
    fs::write(&source, "x = 2\nprint(x ** 10)\n").unwrap();

    let mut config = Config::new(dir.path().join("prog"));
    config.runner.project_dir = dir.path().join("out");
    config.emit_only = true;

    assert!(driver::run(&config, &CancellationToken::new()).unwrap().is_none());
    assert!(dir.path().join("out/Cargo.toml").is_file());

    let program = fs::read_to_string(dir.path().join("out/src/main.rs")).unwrap();
    assert_eq!(program, transpile_ok("x = 2\nprint(x ** 10)\n"));
}

fn run_program(dir: &Path, source: &str) -> Result<RunOutput, DriverError> {
    let file = dir.join("main.py");
    fs::write(&file, source).unwrap();

    let mut config = Config::new(file);
    config.runner = RunnerConfig {
        project_dir: dir.join("out"),
        ..RunnerConfig::default()
    };

    driver::run(&config, &CancellationToken::new()).map(|output| output.unwrap())
}

#[test]
#[ignore = "needs cargo and the num crates"]
fn test_run_integer_addition() {
    let dir = tempdir().unwrap();
    let output = run_program(dir.path(), "x = 10\ny = 3\nz = x + y\nprint(z)\n").unwrap();

    assert_eq!(output.stdout, "13\n");
}

#[test]
#[ignore = "needs cargo and the num crates"]
fn test_run_true_division() {
    let dir = tempdir().unwrap();
    let output = run_program(dir.path(), "x = 10\ny = 3\nz = x / y\nprint(z)\n").unwrap();

    let value: f64 = output.stdout.trim().parse().unwrap();
    assert!((value - 10.0 / 3.0).abs() < 1e-12);
}

#[test]
#[ignore = "needs cargo and the num crates"]
fn test_run_integer_power() {
    let dir = tempdir().unwrap();
    let output = run_program(dir.path(), "x = 10\ny = 3\nz = x ** y\nprint(z)\n").unwrap();

    assert_eq!(output.stdout, "1000\n");
}

#[test]
#[ignore = "needs cargo and the num crates"]
fn test_run_big_integers() {
    let dir = tempdir().unwrap();
    let output = run_program(dir.path(), "x = 2 ** 100\nprint(x)\nprint(7 // -2)\nprint(-7 % 3)\n").unwrap();

    assert_eq!(output.stdout, "1267650600228229401496703205376\n-4\n2\n");
}
