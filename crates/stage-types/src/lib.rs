//! Foundation types for the worker stage tooling.
//!
//! # Key Types
//!
//! - [`ContentHash`]: Short content digest used for cache-busting file names
//! - [`HashAlgorithm`]: Digest function a [`ContentHash`] is computed with

pub mod algorithm;
pub mod error;
pub mod hash;

pub use algorithm::HashAlgorithm;
pub use error::TypeError;
pub use hash::{ContentHash, HASH_SIZE};
