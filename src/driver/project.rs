use std::{
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;

use super::{config::RunnerConfig, errors::DriverError};

pub const MANIFEST: &str = "Cargo.toml";

/// Manifest for a scaffolded project. The empty `[workspace]` table detaches
/// it from any enclosing workspace.
pub fn manifest_template(bin_name: &str) -> String {
    format!(
        "[package]\n\
         name = \"{}\"\n\
         version = \"0.1.0\"\n\
         edition = \"2021\"\n\
         \n\
         [dependencies]\n\
         num-bigint = \"0.4\"\n\
         num-integer = \"0.1\"\n\
         num-traits = \"0.2\"\n\
         \n\
         [workspace]\n",
        bin_name
    )
}

pub fn manifest_path(runner: &RunnerConfig) -> PathBuf {
    runner.project_dir.join(MANIFEST)
}

pub fn main_path(runner: &RunnerConfig) -> PathBuf {
    runner.project_dir.join("src").join("main.rs")
}

lazy_static! {
    static ref PACKAGE_NAME: Regex = Regex::new(r#"^name\s*=\s*"([^"]+)""#).unwrap();
}

/// `name` of the `[package]` table in a manifest.
pub fn package_name(manifest: &str) -> Option<String> {
    let mut in_package = false;

    for line in manifest.lines().map(str::trim) {
        if line.starts_with('[') {
            in_package = line == "[package]";
            continue;
        }

        if in_package {
            if let Some(captures) = PACKAGE_NAME.captures(line) {
                return Some(captures[1].to_string());
            }
        }
    }

    None
}

/// Binary name: the package name of the project's manifest, or `bin_name`
/// when the manifest is missing or has no package name.
pub fn binary_name(runner: &RunnerConfig) -> String {
    fs::read_to_string(manifest_path(runner))
        .ok()
        .and_then(|manifest| package_name(&manifest))
        .unwrap_or_else(|| runner.bin_name.clone())
}

/// Debug binary produced by `cargo build`.
pub fn binary_path(runner: &RunnerConfig) -> PathBuf {
    runner
        .project_dir
        .join("target")
        .join("debug")
        .join(format!("{}{}", binary_name(runner), std::env::consts::EXE_SUFFIX))
}

fn write(path: &Path, contents: &str) -> Result<(), DriverError> {
    fs::write(path, contents).map_err(|error| DriverError::io(format!("failed to write {}", path.display()), error))
}

/// Writes the program to `src/main.rs`, scaffolding the manifest if the
/// project does not have one yet. Returns the path of `main.rs`.
pub fn write_project(runner: &RunnerConfig, program: &str) -> Result<PathBuf, DriverError> {
    let src_dir = runner.project_dir.join("src");
    fs::create_dir_all(&src_dir)
        .map_err(|error| DriverError::io(format!("failed to create {}", src_dir.display()), error))?;

    let manifest = manifest_path(runner);
    if !manifest.exists() {
        log::info!("scaffolding {}", manifest.display());
        write(&manifest, &manifest_template(&runner.bin_name))?;
    }

    let main = main_path(runner);
    write(&main, program)?;
    log::info!("wrote {}", main.display());

    Ok(main)
}
