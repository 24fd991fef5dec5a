use super::{OutputError, ensure_parent_dir};
use std::path::Path;
use tracing::info;

pub fn write_markdown(path: &Path, text: &str) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    std::fs::write(path, text).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Saved discussion to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_markdown_creates_nested_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("homework-2-2").join("discussion.md");
        write_markdown(&path, "# Title\nBody").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Title\nBody");
    }
}
