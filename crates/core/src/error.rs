//! Error types for collection operations
//!
//! This module defines all error types used by the collection layers.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Error Classes
//!
//! Every error falls into one of the classes reported by [`CollectionError::kind`]:
//!
//! - **Precondition**: duplicate key, out-of-range index, type mismatch,
//!   identity mismatch. The caller passed arguments the collection cannot
//!   accept; the collection is unchanged.
//! - **InvalidState**: modification detected during enumeration, or an
//!   event raiser used before being wired up.
//! - **NotSupported**: mutation attempted on a read-only view.
//! - **Configuration**: invalid configuration input.
//!
//! None of these are transient; retrying the same call fails the same way.
//!
//! The `Display` strings are part of the public contract and are matched by
//! callers and tests verbatim.

use crate::types::ObjectId;
use std::fmt;
use thiserror::Error;

/// Result type alias for collection operations
pub type CollectionResult<T> = std::result::Result<T, CollectionError>;

/// Message used when an insertion index is outside `0..=count`
pub const INSERT_INDEX_OUT_OF_RANGE: &str =
    "Index is out of range. Must be non-negative and less than or equal to the size of the collection.";

/// Message used when an access or replace index is outside `0..count`
pub const INDEX_OUT_OF_RANGE: &str =
    "Index is out of range. Must be non-negative and less than the size of the collection.";

/// Mutating operations rejected by a read-only collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadOnlyOperation {
    /// `clear`
    Clear,
    /// `insert`
    Insert,
    /// `remove` / `remove_by_id`
    Remove,
    /// `replace`
    Replace,
    /// `sort`
    Sort,
}

impl ReadOnlyOperation {
    /// Fixed message reported when the operation hits a read-only collection
    pub const fn message(&self) -> &'static str {
        match self {
            ReadOnlyOperation::Clear => "Cannot clear a read-only collection.",
            ReadOnlyOperation::Insert => "Cannot insert an item into a read-only collection.",
            ReadOnlyOperation::Remove => "Cannot remove an item from a read-only collection.",
            ReadOnlyOperation::Replace => "Cannot replace an item in a read-only collection.",
            ReadOnlyOperation::Sort => "Cannot sort a read-only collection.",
        }
    }
}

impl fmt::Display for ReadOnlyOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Classification of a [`CollectionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller passed an argument violating an operation's precondition
    Precondition,
    /// Operation is not valid in the current state
    InvalidState,
    /// Operation is not supported by this collection
    NotSupported,
    /// Invalid configuration input
    Configuration,
}

/// Error types for the collection layers
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Index outside the valid range for the operation
    #[error("{message} (Parameter '{parameter}', actual value was {actual}.)")]
    IndexOutOfRange {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Index that was passed
        actual: usize,
        /// Range description
        message: &'static str,
    },

    /// Inserted object's id is already present
    #[error("The collection already contains an object with ID '{id}'. (Parameter '{parameter}')")]
    DuplicateKey {
        /// Id that is already present
        id: ObjectId,
        /// Name of the offending parameter
        parameter: &'static str,
    },

    /// Replacement object's id is present at another position
    #[error(
        "The object with ID '{id}' is already part of this collection at another position and cannot be used as a replacement. (Parameter '{parameter}')"
    )]
    DuplicateReplacement {
        /// Id that is already present
        id: ObjectId,
        /// Name of the offending parameter
        parameter: &'static str,
    },

    /// Object's class does not satisfy the collection's required item type
    #[error(
        "Values of type '{actual}' cannot be added to this collection. Values must be of type '{required}' or derived from '{required}'. (Parameter '{parameter}')"
    )]
    TypeMismatch {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Class of the rejected object
        actual: String,
        /// Required item type
        required: String,
    },

    /// Object to remove shares its id with a different stored instance
    #[error(
        "The object to be removed has the same ID '{id}' as an object in this collection, but is a different object reference. (Parameter '{parameter}')"
    )]
    IdentityMismatch {
        /// Shared id
        id: ObjectId,
        /// Name of the offending parameter
        parameter: &'static str,
    },

    /// Collection changed while an enumeration was in progress
    #[error("Collection was modified during enumeration.")]
    ModifiedDuringEnumeration,

    /// Mutation attempted on a read-only collection
    #[error("{0}")]
    ReadOnly(ReadOnlyOperation),

    /// Indirect event raiser used before a target was set
    #[error("The event raiser has not been set. Set a target before modifying the collection.")]
    EventRaiserNotSet,

    /// Caller-supplied comparison failed during a sort
    #[error("Comparison failed: {0}")]
    ComparisonFailed(String),

    /// Invalid configuration
    #[error("Invalid collection configuration: {0}")]
    Config(String),
}

impl CollectionError {
    /// Create an error for a failing sort comparison
    pub fn comparison(message: impl Into<String>) -> Self {
        CollectionError::ComparisonFailed(message.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectionError::IndexOutOfRange { .. }
            | CollectionError::DuplicateKey { .. }
            | CollectionError::DuplicateReplacement { .. }
            | CollectionError::TypeMismatch { .. }
            | CollectionError::IdentityMismatch { .. } => ErrorKind::Precondition,
            CollectionError::ModifiedDuringEnumeration
            | CollectionError::EventRaiserNotSet
            | CollectionError::ComparisonFailed(_) => ErrorKind::InvalidState,
            CollectionError::ReadOnly(_) => ErrorKind::NotSupported,
            CollectionError::Config(_) => ErrorKind::Configuration,
        }
    }

    /// Name of the parameter a precondition error refers to
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            CollectionError::IndexOutOfRange { parameter, .. }
            | CollectionError::DuplicateKey { parameter, .. }
            | CollectionError::DuplicateReplacement { parameter, .. }
            | CollectionError::TypeMismatch { parameter, .. }
            | CollectionError::IdentityMismatch { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}
