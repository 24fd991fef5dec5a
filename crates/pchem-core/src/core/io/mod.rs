//! # Output Module
//!
//! Writers for the artifacts every workflow produces: CSV tables ([`table`]), XYZ
//! geometries ([`xyz`]), markdown discussions ([`markdown`]) and SVG charts ([`plot`]).
//! All writers create missing parent directories before writing.

pub mod markdown;
pub mod plot;
pub mod table;
pub mod xyz;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}", path = path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("Plotting error for '{path}': {message}", path = path.display())]
    Plot { path: PathBuf, message: String },
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
