use std::io;
use std::path::PathBuf;

use stage_types::ContentHash;

/// Errors produced while finalizing a stage directory.
#[derive(Debug, thiserror::Error)]
pub enum FinalizeError {
    /// I/O error on a staged file (missing, unreadable, unwritable).
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The loader script does not match the template the rewrite expects.
    #[error("loader {path} hashes to {actual}, expected {expected}")]
    LoaderHashMismatch {
        path: PathBuf,
        expected: ContentHash,
        actual: ContentHash,
    },

    /// The HTML entry has no `attribute="....js"` assignment to patch.
    #[error("attribute {attribute} not found in {path}")]
    AttributeNotFound { attribute: String, path: PathBuf },

    /// The attribute name is too large to build a search pattern from.
    #[error("cannot build pattern for attribute: {0}")]
    AttributePattern(#[from] regex::Error),

    /// A staged path has no usable file name.
    #[error("invalid file name: {0}")]
    InvalidFileName(PathBuf),

    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl FinalizeError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the finalize crate.
pub type FinalizeResult<T> = std::result::Result<T, FinalizeError>;
