//! # Error Types
//!
//! Every fallible operation in the crate returns [`Result<T>`], an alias for
//! `std::result::Result<T, CoreError>`. Failures are local and synchronous:
//! nothing is retried internally and a rejected call leaves state untouched.

use thiserror::Error;

/// Errors raised by mesh and scene operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A count, index or other argument is outside its valid domain.
    #[error("Invalid argument `{what}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        what: &'static str,
        /// Human readable explanation
        reason: String,
    },

    /// A buffer setter received the wrong number of elements.
    #[error("Length mismatch for {buffer} buffer: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Which buffer was being written
        buffer: &'static str,
        /// Length fixed at construction
        expected: usize,
        /// Length supplied by the caller
        actual: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Triangle number within the index buffer
        triangle: usize,
        /// The offending vertex index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// Memory for a buffer could not be obtained.
    #[error("Failed to allocate {buffer} buffer of {len} elements")]
    AllocationError {
        /// Which buffer was being allocated
        buffer: &'static str,
        /// Requested element count (saturated on overflow)
        len: usize,
    },

    /// Every picking colour has already been handed out.
    #[error("Pick colour space exhausted ({capacity} objects already registered)")]
    PickColorSpaceExhausted {
        /// Number of colours the encoding supports
        capacity: u32,
    },

    /// An object handle does not refer to an object in the scene.
    #[error("No object with id {0} in the scene")]
    UnknownObject(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Converts a signed count coming from a host binding into a `usize`.
///
/// Negative values are rejected with [`CoreError::InvalidArgument`].
pub fn checked_count(what: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| CoreError::InvalidArgument {
        what,
        reason: format!("count must be non-negative, got {value}"),
    })
}
