//! Command line interface.

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::driver::{
    config::{
        Config, RunnerConfig, DEFAULT_BIN_NAME, DEFAULT_BUILD_TIMEOUT, DEFAULT_CARGO,
        DEFAULT_PROJECT_DIR, DEFAULT_RUN_TIMEOUT,
    },
    errors::DriverError,
};

/// Transpile a Python subset to Rust, then build and run the result.
#[derive(Parser, Debug)]
#[command(name = "pythoc", version, about)]
pub struct Cli {
    /// Python source file (`.py` may be omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Python source file, as an alternative to the positional argument
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "input")]
    pub file: Option<PathBuf>,

    /// Cargo project receiving the generated `src/main.rs`
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PROJECT_DIR)]
    pub project: PathBuf,

    /// Package name used when scaffolding the project. An existing
    /// manifest keeps its own package name.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_BIN_NAME)]
    pub bin: String,

    /// Cargo executable
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CARGO)]
    pub cargo: String,

    /// Seconds before `cargo build` is stopped
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_BUILD_TIMEOUT.as_secs())]
    pub build_timeout: u64,

    /// Seconds before the generated program is stopped
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_RUN_TIMEOUT.as_secs())]
    pub run_timeout: u64,

    /// Write the generated program without building or running it
    #[arg(long)]
    pub emit_only: bool,

    /// Print the syntax tree
    #[arg(long)]
    pub dump_ast: bool,

    /// Print the IR
    #[arg(long)]
    pub dump_ir: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    pub fn into_config(self) -> Result<Config, DriverError> {
        let source = self.input.or(self.file).ok_or(DriverError::NoInput)?;

        Ok(Config {
            source,
            runner: RunnerConfig {
                project_dir: self.project,
                bin_name: self.bin,
                cargo: self.cargo,
                build_timeout: Duration::from_secs(self.build_timeout),
                run_timeout: Duration::from_secs(self.run_timeout),
            },
            emit_only: self.emit_only,
            dump_ast: self.dump_ast,
            dump_ir: self.dump_ir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use clap::Parser;
    use log::LevelFilter;

    use super::Cli;
    use crate::driver::{config::RunnerConfig, errors::DriverError};

    #[test]
    fn test_defaults() {
        let config = Cli::try_parse_from(["pythoc", "prog.py"]).unwrap().into_config().unwrap();

        assert_eq!(config.source, PathBuf::from("prog.py"));
        assert_eq!(config.runner, RunnerConfig::default());
        assert!(!config.emit_only);
        assert!(!config.dump_ast);
        assert!(!config.dump_ir);
    }

    #[test]
    fn test_file_flag() {
        let config = Cli::try_parse_from(["pythoc", "-f", "prog"]).unwrap().into_config().unwrap();

        assert_eq!(config.source, PathBuf::from("prog"));
    }

    #[test]
    fn test_file_flag_conflicts_with_positional() {
        assert!(Cli::try_parse_from(["pythoc", "a.py", "--file", "b.py"]).is_err());
    }

    #[test]
    fn test_no_input() {
        let result = Cli::try_parse_from(["pythoc"]).unwrap().into_config();

        assert!(matches!(result, Err(DriverError::NoInput)));
    }

    #[test]
    fn test_runner_options() {
        let cli = Cli::try_parse_from([
            "pythoc",
            "prog.py",
            "--project",
            "out",
            "--bin",
            "demo",
            "--cargo",
            "/usr/bin/cargo",
            "--build-timeout",
            "5",
            "--run-timeout",
            "2",
            "--emit-only",
            "--dump-ir",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(config.runner.project_dir, PathBuf::from("out"));
        assert_eq!(config.runner.bin_name, "demo");
        assert_eq!(config.runner.cargo, "/usr/bin/cargo");
        assert_eq!(config.runner.build_timeout, Duration::from_secs(5));
        assert_eq!(config.runner.run_timeout, Duration::from_secs(2));
        assert!(config.emit_only);
        assert!(config.dump_ir);
        assert!(!config.dump_ast);
    }

    #[test]
    fn test_verbosity() {
        let level = |args: &[&str]| Cli::try_parse_from(args).unwrap().log_level();

        assert_eq!(level(&["pythoc", "a.py"]), LevelFilter::Warn);
        assert_eq!(level(&["pythoc", "a.py", "-v"]), LevelFilter::Info);
        assert_eq!(level(&["pythoc", "a.py", "-vv"]), LevelFilter::Debug);
        assert_eq!(level(&["pythoc", "a.py", "-vvv"]), LevelFilter::Debug);
    }
}
