//! OpenCC dictionary updater.
//!
//! Fetches the simplified→traditional and traditional→simplified character
//! and phrase tables, keeps only the first candidate of every mapping, and
//! writes one flat `preimage\timage` file per direction.
//!
//! Fetching goes through the [`DictSource`] trait so the merge logic runs
//! without network access in tests.

pub mod config;
pub mod error;
pub mod merge;
pub mod source;

pub use config::{DictConfig, DictOutput};
pub use error::{DictError, DictResult};
pub use merge::{merge_line, DictMerger, DictReport, WrittenDict};
pub use source::{DictSource, HttpDictSource, StaticDictSource};
