use std::io;
use std::path::PathBuf;

/// Errors produced while updating dictionaries.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// The remote source could not be fetched.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The fetched body is not valid UTF-8.
    #[error("{source_name} is not valid UTF-8")]
    Decode { source_name: String },

    /// A dictionary line is not `preimage<TAB>image[ image...]`.
    #[error("malformed line {line_no} in {source_name}: {line:?}")]
    MalformedLine {
        source_name: String,
        line_no: usize,
        line: String,
    },

    /// The source name is unknown to the data source.
    #[error("unknown dictionary source: {0}")]
    UnknownSource(String),

    /// I/O error while writing an output file.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl DictError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the dict crate.
pub type DictResult<T> = std::result::Result<T, DictError>;
