//! Error types for inference, rendering and the file driver.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure to turn input bytes into a JSON object.
#[derive(Debug, Error)]
#[error("{}{message}", path_prefix(.path))]
pub struct DecodeError {
    /// JSON path where decoding stopped, when known.
    pub path: Option<String>,
    pub message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { path: None, message: message.into() }
    }

    pub fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: Some(path.into()), message: message.into() }
    }
}

fn path_prefix(path: &Option<String>) -> String {
    path.as_deref().map(|p| format!("at JSON path {p} → ")).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum Error {
    /// Required option absent and not derivable.
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Writing into the in-memory source buffer failed.
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Two declarations (or two fields of one declaration) resolve to the same identifier.
    #[error("name collision: `{name}` is declared more than once ({detail})")]
    NameCollision { name: String, detail: String },

    /// The assembled source is not valid Rust. Indicates a naming or rendering defect.
    #[error("generated source is not valid Rust: {source}")]
    Format {
        #[source]
        source: syn::Error,
        /// The unformatted text, kept for diagnostics.
        raw: String,
    },

    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { op, path: path.into(), source }
    }
}
