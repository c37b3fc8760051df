//! File system utilities for the snapshot registrar

use std::fs;
use std::io;
use std::path::Path;

use crate::utils::error::{Error, Result};

/// Ensures a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| with_path(e, "create directory", path))?;
    } else if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {:?}", path),
        )
        .into());
    }
    Ok(())
}

/// Reads a file to a string, naming the file on failure
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| with_path(e, "read file", path))
}

/// Writes a string to a file, creating parent directories if needed
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|e| with_path(e, "write file", path))
}

/// Creates the parent directory of `path` when it has one
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        | Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        | _ => Ok(()),
    }
}

fn with_path(err: io::Error, action: &str, path: &Path) -> Error {
    Error::IoError(io::Error::new(
        err.kind(),
        format!("Failed to {}: {}: {}", action, path.display(), err),
    ))
}
