//! Error types for the editing engine
//!
//! Every error aborts only the single in-flight operation; the document
//! root is never left partially mutated.

use thiserror::Error;

/// Errors surfaced by the editing engine
#[derive(Debug, Error)]
pub enum EditError {
    /// The loaded text was not valid JSON. The previously loaded document
    /// (if any) stays active.
    #[error("failed to parse JSON document: {0}")]
    Parse(String),

    /// An add-field or add-item would overwrite an existing key.
    #[error("key {0:?} already exists")]
    DuplicateKey(String),

    /// Serialization failed. Unreachable for values built through this
    /// engine's own coercion, since those are all representable JSON.
    #[error("failed to serialize document: {0}")]
    Serialize(String),

    /// A mutation path no longer resolves to a container. Paths are
    /// invalidated by any mutation and must be re-derived, never cached.
    #[error("path {0:?} does not resolve to a container")]
    BadPath(String),

    /// A dotted-path prefix was used with both numeric and non-numeric
    /// child segments during unflatten.
    #[error("path prefix {0:?} mixes array and object addressing")]
    MixedAddressing(String),

    /// An object key contains a `'.'` and cannot be told apart from a
    /// path separator when flattened.
    #[error("key {0:?} contains '.' and cannot be addressed as a dotted path")]
    DottedKey(String),

    /// Flatten/unflatten recursion exceeded the depth bound.
    #[error("nesting depth exceeds the maximum of {0}")]
    DepthExceeded(usize),
}

pub type Result<T> = std::result::Result<T, EditError>;
