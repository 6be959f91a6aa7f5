use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::errors::errors::Error;

/// Failures outside the compiler proper: files, processes and the toolchain.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("no input file given")]
    NoInput,
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    /// A compile error, with the caret diagram rendered against its source.
    #[error("{rendered}")]
    Compile {
        #[source]
        error: Error,
        rendered: String,
    },
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("build failed with {}\n{stderr}", describe_exit(.code))]
    BuildFailed { code: Option<i32>, stderr: String },
    #[error("program exited with {}\n{stderr}", describe_exit(.code))]
    RunFailed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    #[error("build timed out after {0:?}")]
    BuildTimeout(Duration),
    #[error("program timed out after {0:?}")]
    RunTimeout(Duration),
    #[error("cancelled")]
    Cancelled,
}

impl DriverError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        DriverError::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for the command line tool.
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::RunFailed { code: Some(code), .. } => *code,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => String::from("a signal"),
    }
}
