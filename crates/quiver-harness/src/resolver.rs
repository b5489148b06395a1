use std::env;
use std::path::{Path, PathBuf};

use quiver_core::{Error, Result};

/// Resolves the tool binary to a concrete path.
///
/// An explicit `path` wins and is only checked for being an executable
/// file. Otherwise `name` is looked up: names containing a path separator
/// are checked directly, bare names against every entry of `PATH`.
///
/// # Errors
///
/// Returns [`Error::BinaryNotFound`] when no executable candidate exists,
/// and [`Error::Config`] when neither a path nor a name was given.
pub fn resolve_binary(path: Option<&Path>, name: &str) -> Result<PathBuf> {
    if let Some(path) = path {
        return if is_executable(path) {
            Ok(absolute(path))
        } else {
            Err(Error::BinaryNotFound(path.display().to_string()))
        };
    }

    if name.is_empty() {
        return Err(Error::Config("no binary name configured".to_owned()));
    }

    if name.contains(std::path::MAIN_SEPARATOR) {
        let candidate = Path::new(name);
        return if is_executable(candidate) {
            Ok(absolute(candidate))
        } else {
            Err(Error::BinaryNotFound(name.to_owned()))
        };
    }

    let path_var = env::var_os("PATH").unwrap_or_default();
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Ok(absolute(&candidate));
        }
    }

    Err(Error::BinaryNotFound(name.to_owned()))
}

/// Absolutizes without resolving symlinks: the caller gets back the PATH
/// entry as found, not what it links to. Falls back to the path as given.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt as _;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
