//! The prelude for sequences.
//!
//! The purpose of this module is to alleviate imports of many common traits for sequences.
//!
//! ```
//! # #![allow(unused_imports)]
//! use dysuc::sequences::prelude::*;
//! ```
pub use crate::sequences::{Access, NumVals};
