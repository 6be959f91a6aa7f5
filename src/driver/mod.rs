//! Driver module: everything between the command line and the compiler.
//!
//! - `config`: resolved settings for one invocation
//! - `source`: locating and reading the input file
//! - `project`: writing the generated program into a cargo project
//! - `runner`: building and running it with timeouts and cancellation
//! - `errors`: the `DriverError` type

pub mod config;
pub mod errors;
pub mod project;
pub mod runner;
pub mod source;


use std::{path::PathBuf, rc::Rc, time::Instant};

use crate::{
    compiler::compiler::compile,
    errors::errors::Error,
    ir::builder::build_ir,
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
};

use self::{
    config::Config,
    errors::DriverError,
    project::write_project,
    runner::{CancellationToken, RunOutput},
    source::{read_source, resolve_source},
};

/// A source file and the Rust program generated from it.
#[derive(Debug, Clone)]
pub struct Transpiled {
    pub path: PathBuf,
    pub source: String,
    pub program: String,
}

/// Runs every compiler phase on `source`, logging the time each one takes.
pub fn compile_source(source: &str, file_name: &str, config: &Config) -> Result<String, Error> {
    let start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    log::info!("tokenized in {:?}", start.elapsed());

    if log::log_enabled!(log::Level::Debug) {
        for token in tokens.iter() {
            token.debug();
        }
    }

    let parse_start = Instant::now();
    let module = parse(tokens, Rc::new(file_name.to_string()))?;
    log::info!("parsed in {:?}", parse_start.elapsed());

    if config.dump_ast {
        println!("{:#?}", module);
    }

    let ir_start = Instant::now();
    let ir = build_ir(&module)?;
    log::info!("built IR in {:?}", ir_start.elapsed());

    if config.dump_ir {
        println!("{:#?}", ir);
    }

    let emit_start = Instant::now();
    let program = compile(&ir)?.assemble();
    log::info!("emitted in {:?}", emit_start.elapsed());
    log::info!("total time for code generation: {:?}", start.elapsed());

    Ok(program)
}

/// Resolves, reads and compiles the configured source file.
pub fn transpile_file(config: &Config) -> Result<Transpiled, DriverError> {
    let path = resolve_source(&config.source)?;
    let source = read_source(&path)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match compile_source(&source, &file_name, config) {
        Ok(program) => Ok(Transpiled { path, source, program }),
        Err(error) => {
            let rendered = render_error(&error, &source, &path.display().to_string());
            Err(DriverError::Compile { error, rendered })
        }
    }
}

/// Transpiles the source, writes the project, then builds and runs it.
///
/// Returns `None` when `emit_only` is set.
pub fn run(config: &Config, cancel: &CancellationToken) -> Result<Option<RunOutput>, DriverError> {
    let transpiled = transpile_file(config)?;
    write_project(&config.runner, &transpiled.program)?;

    if config.emit_only {
        return Ok(None);
    }

    let build_start = Instant::now();
    runner::build(&config.runner, cancel)?;
    log::info!("built in {:?}", build_start.elapsed());

    let run_start = Instant::now();
    let output = runner::execute(&config.runner, cancel)?;
    log::info!("ran in {:?}", run_start.elapsed());

    Ok(Some(output))
}
