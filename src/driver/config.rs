use std::{path::PathBuf, time::Duration};

pub const DEFAULT_PROJECT_DIR: &str = "pythoc-out";
pub const DEFAULT_BIN_NAME: &str = "pythoc_program";
pub const DEFAULT_CARGO: &str = "cargo";
pub const DEFAULT_BUILD_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the generated program lives and how it is built and run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Cargo project receiving `src/main.rs`
    pub project_dir: PathBuf,
    /// Package and binary name used when scaffolding the project
    pub bin_name: String,
    /// Cargo executable
    pub cargo: String,
    pub build_timeout: Duration,
    pub run_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            project_dir: PathBuf::from(DEFAULT_PROJECT_DIR),
            bin_name: String::from(DEFAULT_BIN_NAME),
            cargo: String::from(DEFAULT_CARGO),
            build_timeout: DEFAULT_BUILD_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source path as given; resolved by `driver::source`
    pub source: PathBuf,
    pub runner: RunnerConfig,
    /// Write `main.rs` without building or running it
    pub emit_only: bool,
    pub dump_ast: bool,
    pub dump_ir: bool,
}

impl Config {
    pub fn new(source: PathBuf) -> Self {
        Config {
            source,
            runner: RunnerConfig::default(),
            emit_only: false,
            dump_ast: false,
            dump_ir: false,
        }
    }
}
