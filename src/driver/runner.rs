//! Builds and runs the generated program.
//!
//! Every step is a child process with piped output. The pipes are drained on
//! helper threads while the child is polled. A step ends when the child
//! exits, when its timeout elapses or when the cancellation token is set.

use std::{
    io::Read,
    process::{Child, Command, Stdio},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use super::{config::RunnerConfig, errors::DriverError, project};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Shared flag that stops a running step. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Build,
    Run,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Runs `command` to completion, capturing its output.
///
/// A non-zero exit is reported as `BuildFailed` or `RunFailed` depending on
/// `step`, carrying the captured stderr.
///
/// # Arguments
///
/// * `command` - Command to spawn; its stdio is replaced with pipes
/// * `step` - Whether this is the build or the run, for error reporting
/// * `timeout` - Wall-clock limit before the child is killed
/// * `cancel` - Token polled while the child runs
///
/// # Returns
///
/// The captured stdout, stderr and exit code of a successful run.
pub fn run_command(
    mut command: Command,
    step: Step,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<RunOutput, DriverError> {
    let program = command.get_program().to_string_lossy().into_owned();
    log::debug!("running {:?}", command);

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| DriverError::Spawn { program, source })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let started = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if cancel.is_cancelled() {
                    stop(&mut child);
                    return Err(DriverError::Cancelled);
                }
                if started.elapsed() > timeout {
                    stop(&mut child);
                    return Err(match step {
                        Step::Build => DriverError::BuildTimeout(timeout),
                        Step::Run => DriverError::RunTimeout(timeout),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(error) => {
                stop(&mut child);
                return Err(DriverError::io("failed to wait for child process", error));
            }
        }
    };

    let output = RunOutput {
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
        code: status.code(),
    };
    log::debug!("{:?} finished with {:?} in {:?}", step, output.code, started.elapsed());

    if !output.stderr.is_empty() {
        log::debug!("stderr:\n{}", output.stderr);
    }

    if status.success() {
        return Ok(output);
    }

    Err(match step {
        Step::Build => DriverError::BuildFailed {
            code: output.code,
            stderr: output.stderr,
        },
        Step::Run => DriverError::RunFailed {
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        },
    })
}

pub fn build_command(runner: &RunnerConfig) -> Command {
    let mut command = Command::new(&runner.cargo);
    command
        .arg("build")
        .arg("--quiet")
        .arg("--manifest-path")
        .arg(project::manifest_path(runner));
    command
}

pub fn build(runner: &RunnerConfig, cancel: &CancellationToken) -> Result<RunOutput, DriverError> {
    run_command(build_command(runner), Step::Build, runner.build_timeout, cancel)
}

pub fn execute(runner: &RunnerConfig, cancel: &CancellationToken) -> Result<RunOutput, DriverError> {
    let command = Command::new(project::binary_path(runner));
    run_command(command, Step::Run, runner.run_timeout, cancel)
}
