use std::path::PathBuf;

/// A fully merged workflow configuration and where its artifacts go.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig<T> {
    pub output_dir: PathBuf,
    pub workflow: T,
}
