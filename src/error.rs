//! Error type shared by the mining pipeline and its I/O adapters.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, AprioriError>;

/// Errors that can occur while loading transactions, mining or writing rules.
#[derive(Debug, thiserror::Error)]
pub enum AprioriError {
    #[error("line {line}: malformed item token {token:?}")]
    Parse { line: usize, token: String },

    #[error("invalid {name}: {value:?}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O failure: {0}")]
    Stream(#[from] io::Error),

    #[error("division by zero while computing {context}")]
    DivisionByZero { context: &'static str },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{found} frequent items exceed the configured limit of {limit}")]
    CandidateLimit { found: usize, limit: usize },
}

impl AprioriError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AprioriError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for AprioriError {
    fn from(err: toml::de::Error) -> Self {
        AprioriError::Config(err.to_string())
    }
}
