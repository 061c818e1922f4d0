//! # `dysuc`: Dynamic succinct containers in Rust
//!
//! `dysuc` contains two updatable in-memory data structures intended as building
//! blocks of higher-level indexes such as posting lists, filters, and
//! order-statistics sets over integer keys.
//!
//! ## Data structures
//!
//! - [`DynamicRankBitset`]
//!   - Fixed-size bit array supporting single-bit updates, rank/select queries,
//!     and Boolean set algebra, all kept consistent by a Fenwick tree over word popcounts.
//! - [`TieredSequence`]
//!   - Fixed-capacity ordered sequence organized as nested rotated layers,
//!     supporting positional insert/remove in time bounded by its [`LayerSchema`]
//!     and binary-search operations when kept sorted.
//!
//! ## Errors
//!
//! Fallible operations return [`anyhow::Result`] wrapping an [`Error`].
//!
//! ## Limitation
//!
//! This library is designed to run on 64-bit machines.
#![deny(missing_docs)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("`target_pointer_width` must be 64");

pub mod bit_vectors;
pub mod broadword;
pub mod error;
pub mod sequences;
pub mod utils;

pub use bit_vectors::DynamicRankBitset;
pub use error::Error;
pub use sequences::{LayerSchema, TieredSequence};
