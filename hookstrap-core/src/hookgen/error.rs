//! Generation Error Types
//!
//! Error types for the hook module derivation step using `thiserror`.
//! Every variant is fatal to startup: the host application cannot safely run
//! without the derived module, so these errors propagate upward and are never
//! retried.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while deriving the hook module.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Filesystem access failure (cache check, module read, artifact write).
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source module's metadata could not be parsed.
    #[error("failed to parse module {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: goblin::error::Error,
    },

    /// The source module is not an object format the generator understands.
    #[error("unsupported module format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// An imported library could not be found in any dependency directory.
    #[error("unresolved dependency {name} (searched {searched:?})")]
    DependencyUnresolved {
        name: String,
        searched: Vec<PathBuf>,
    },

    /// The assembled hook module could not be serialized.
    #[error("failed to serialize hook module: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GenerationError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
