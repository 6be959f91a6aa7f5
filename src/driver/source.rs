use std::{
    fs,
    path::{Path, PathBuf},
};

use super::errors::DriverError;

pub const SOURCE_EXTENSION: &str = ".py";

fn with_extension_appended(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(SOURCE_EXTENSION);
    PathBuf::from(name)
}

/// Paths tried for `path`, in order: as given, with `.py` appended, then
/// both again under `base`.
pub fn candidates(path: &Path, base: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![path.to_path_buf(), with_extension_appended(path)];

    if let Some(base) = base {
        let joined = base.join(path);
        let joined_with_extension = with_extension_appended(&joined);
        paths.push(joined);
        paths.push(joined_with_extension);
    }

    paths
}

/// Resolves a source path, falling back to the directory of `base`.
pub fn resolve_source_in(path: &Path, base: Option<&Path>) -> Result<PathBuf, DriverError> {
    for candidate in candidates(path, base) {
        if candidate.is_file() {
            log::debug!("resolved {} to {}", path.display(), candidate.display());
            return Ok(candidate);
        }
    }

    Err(DriverError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Resolves a source path against the working directory, then against the
/// directory holding the running executable.
pub fn resolve_source(path: &Path) -> Result<PathBuf, DriverError> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    resolve_source_in(path, exe_dir.as_deref())
}

pub fn read_source(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|error| DriverError::io(format!("failed to read {}", path.display()), error))
}
