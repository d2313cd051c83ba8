use std::path::PathBuf;

use optspec::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest JSON")]
    Json(#[from] serde_json::Error),

    #[error("unsupported manifest schemaVersion {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },

    #[error("invalid definition for option '{name}'")]
    Option {
        name: String,
        #[source]
        source: ConfigError,
    },

    #[error("invalid option set")]
    Parser(#[source] ConfigError),
}
