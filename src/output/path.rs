//! Output path handling shared by the JSON and SVG writers.

use crate::utils::error::OutputError;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Pick where an output file goes
///
/// **Public** - used by commands for `-o` / `-g`
///
/// * `None` - `file_name` in the working directory
/// * existing directory - `dir/file_name`
/// * anything else - warn and fall back to the working directory
pub fn resolve_output_path(dir: Option<&Path>, file_name: &str) -> PathBuf {
    match dir {
        None => PathBuf::from(file_name),
        Some(dir) if dir.is_dir() => dir.join(file_name),
        Some(dir) => {
            warn!(
                "Output directory {} does not exist, saving {} in the current directory",
                dir.display(),
                file_name
            );
            PathBuf::from(file_name)
        }
    }
}

/// Validate that an output path is writable
///
/// **Public** - used by every writer before touching the filesystem
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directory of `path` if it is missing
pub fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
