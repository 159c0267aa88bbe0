//! Error types for bundle loading, server queries and transformations.

use std::path::PathBuf;
use thiserror::Error;

use crate::defaults::DefaultKind;

/// Errors raised while loading, transforming or saving a metadata bundle.
///
/// Every variant except `UnknownTranslatableProperty` aborts the running
/// operation before anything is written to disk.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("problem parsing JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("could not serialize metadata: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The document parsed, but its top level is not a map of type name to array.
    #[error("not a metadata bundle: {0}")]
    NotABundle(String),

    #[error("server not reachable at {url}: {reason}")]
    ServerUnreachable { url: String, reason: String },

    #[error("wrong username/password")]
    BadCredentials,

    #[error("server returned {status} for {url}")]
    ServerError { url: String, status: u16 },

    /// Zero or several objects named "default" for one type on the server.
    #[error("could not determine default {kind} on server ({found} matches)")]
    AmbiguousDefault { kind: DefaultKind, found: usize },

    #[error("unknown translatable property: {0}")]
    UnknownTranslatableProperty(String),

    #[error("bundle could not be parsed after replacing {old} with {new}: {source}")]
    ReparseFailure {
        old: String,
        new: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid identifier pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("refusing to overwrite input file {}", .0.display())]
    WouldOverwriteInput(PathBuf),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
