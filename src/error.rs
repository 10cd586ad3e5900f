use std::path::PathBuf;

use thiserror::Error;

/// A pattern that is not a valid regular expression.
#[derive(Error, Debug)]
#[error("invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Failure to load a schema or a document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding failed; `path` is the JSON path of the offending node.
    #[error("{origin}: at JSON path {path} → {message}")]
    Decode {
        origin: String,
        path: String,
        message: String,
    },

    #[error("{origin}: JSON pointer {pointer} selects nothing")]
    Pointer { origin: String, pointer: String },

    #[error("invalid input pattern `{pattern}`: {message}")]
    Glob { pattern: String, message: String },

    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),
}
