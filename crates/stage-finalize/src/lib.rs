//! Asset finalizer for a staged web-worker build.
//!
//! After the upstream build drops `worker_bg.wasm`, `worker.js`,
//! `worker_loader.js` and `index.html` into the stage directory, the
//! [`AssetFinalizer`] embeds a content hash in each worker file name,
//! rewrites the loader to import the renamed files, and points the HTML
//! entry's `data-worker-uri` attribute at the renamed loader.
//!
//! The run is a single linear pipeline with one guarded checkpoint: the
//! loader's pre-rewrite content must match a known hash, otherwise the
//! loader template has drifted upstream and the rewrite would be wrong.

pub mod config;
pub mod error;
pub mod finalizer;
pub mod patch;

pub use config::FinalizeConfig;
pub use error::{FinalizeError, FinalizeResult};
pub use finalizer::{AssetFinalizer, FinalizeReport, RenamedAsset};
pub use patch::{loader_template, patch_worker_uri};
