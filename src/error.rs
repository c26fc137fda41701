//! Error types for the blog library.
//!
//! The binary wraps these in `anyhow` for reporting; library callers get a
//! structured enum they can match on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// The YAML header of an article could not be read.
    #[error("Invalid front matter in {path:?}: {reason}")]
    FrontMatter { path: PathBuf, reason: String },

    #[error("Missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// Ids become URL path segments, so they must be a single safe segment.
    #[error("Invalid article id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Duplicate article id '{id}'")]
    DuplicateId { id: String },

    #[error("Duplicate tag '{tag}' in article '{id}'")]
    DuplicateTag { id: String, tag: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// A search pattern failed to compile.
    #[error("Invalid pattern: {source}")]
    Pattern {
        #[from]
        source: regex::Error,
    },
}

pub type BlogResult<T> = Result<T, BlogError>;

impl BlogError {
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
