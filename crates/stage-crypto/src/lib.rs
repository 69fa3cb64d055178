//! Content hashing for the worker stage tooling.
//!
//! Provides short BLAKE2b/BLAKE3 content digests over bytes, readers, and
//! files, plus the `{stem}-{hash}{suffix}` naming rule used for
//! cache-busted assets.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod hasher;
pub mod naming;

pub use hasher::ContentHasher;
pub use naming::hashed_file_name;
