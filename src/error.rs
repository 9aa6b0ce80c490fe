use thiserror::Error;

/// Errors reported by the collections in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A constructor argument is out of range.
    #[error("illegal {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    /// The collection was structurally modified after a cursor was created,
    /// by a path other than the cursor itself.
    #[error("concurrent modification: cursor expected generation {expected}, found {found}")]
    ConcurrentModification { expected: u64, found: u64 },

    /// The operation is not valid in the current state (e.g. removing twice
    /// through the same cursor position).
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The container does not support this mutation.
    #[error("unsupported operation: {operation}")]
    Unsupported { operation: &'static str },

    /// Two elements could not be ordered and no comparator resolves them.
    #[error("elements are not mutually comparable")]
    NotComparable,
}

pub type Result<T> = std::result::Result<T, CollectionError>;
