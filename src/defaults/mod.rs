//! Repointing default category identifiers to those of a target server.
//!
//! - `resolver`: finds the default identifiers in a bundle and diffs them
//!   against the server's
//! - `substitute`: rewrites every occurrence of an old identifier bundle-wide

pub mod resolver;
pub mod substitute;

pub use resolver::{
    diff_defaults, resolve_file_defaults, DefaultKind, DefaultsMap, Replacement, DEFAULT_OBJECT_NAME,
};
pub use substitute::substitute;
