//! Error kinds reported by the containers.
//!
//! Fallible operations return [`anyhow::Result`], whose error wraps one of the
//! kinds below. Callers that need to branch on the failure can recover it with
//! [`anyhow::Error::downcast_ref`].
//!
//! ```
//! use dysuc::{DynamicRankBitset, Error};
//!
//! let bv = DynamicRankBitset::new(8);
//! let e = bv.get(8).unwrap_err();
//! assert!(matches!(
//!     e.downcast_ref::<Error>(),
//!     Some(Error::OutOfRange { index: 8, bound: 8 })
//! ));
//! ```
use thiserror::Error;

/// Failure kinds of the containers in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An index is outside `[0, bound)`.
    #[error("index must be less than {bound}, but got {index}.")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The exclusive upper bound.
        bound: usize,
    },

    /// Two bitsets combined by set algebra have different sizes.
    #[error("sizes of operands must match, but got {left} and {right}.")]
    SizeMismatch {
        /// Size of the receiver.
        left: usize,
        /// Size of the other operand.
        right: usize,
    },

    /// An insertion was attempted on a full sequence.
    #[error("capacity {capacity} is exhausted.")]
    CapacityExhausted {
        /// The fixed capacity of the sequence.
        capacity: usize,
    },

    /// A layer schema failed validation.
    #[error("invalid layer schema: {0}")]
    InvalidSchema(String),

    /// The element type cannot hold the value domain declared by a schema.
    #[error("element of {element_bits} bits cannot hold {value_bits}-bit values.")]
    ElementTooNarrow {
        /// Width of the value domain declared by the schema.
        value_bits: usize,
        /// Width of the element type.
        element_bits: usize,
    },
}

impl Error {
    /// Shorthand for [`Error::OutOfRange`] lifted into [`anyhow::Error`].
    pub(crate) fn out_of_range(index: usize, bound: usize) -> anyhow::Error {
        Self::OutOfRange { index, bound }.into()
    }
}
