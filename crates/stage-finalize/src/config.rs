use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stage_types::{ContentHash, HashAlgorithm};

use crate::error::{FinalizeError, FinalizeResult};

/// Hash of the loader emitted by the upstream build:
/// `import init from './worker.js';await init();` under BLAKE2b-64.
pub const DEFAULT_LOADER_HASH: ContentHash =
    ContentHash::from_bytes([0x6b, 0x0b, 0x56, 0xb4, 0xfa, 0x32, 0xf0, 0x63]);

/// Where the staged files live and what the finalizer expects of them.
///
/// Defaults match the production stage layout. Every field may be
/// overridden from a TOML file, so tests can point at a temp directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinalizeConfig {
    /// Stage directory produced by the upstream build.
    pub stage_dir: PathBuf,
    /// Compiled worker module.
    pub wasm: String,
    /// JavaScript bindings for the worker module.
    pub bindings: String,
    /// Loader script that imports and initializes the bindings.
    pub loader: String,
    /// HTML entry point.
    pub index: String,
    /// Attribute in the HTML entry holding the loader URI.
    pub uri_attribute: String,
    /// Hash the loader must have before it is rewritten.
    pub expected_loader_hash: ContentHash,
    /// Digest used for both the guard and the renamed files.
    pub algorithm: HashAlgorithm,
}

impl Default for FinalizeConfig {
    fn default() -> Self {
        Self {
            stage_dir: PathBuf::from("dist/.stage"),
            wasm: "worker_bg.wasm".into(),
            bindings: "worker.js".into(),
            loader: "worker_loader.js".into(),
            index: "index.html".into(),
            uri_attribute: "data-worker-uri".into(),
            expected_loader_hash: DEFAULT_LOADER_HASH,
            algorithm: HashAlgorithm::default(),
        }
    }
}

impl FinalizeConfig {
    /// Default layout rooted at a different stage directory.
    pub fn for_stage_dir(stage_dir: impl Into<PathBuf>) -> Self {
        Self {
            stage_dir: stage_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> FinalizeResult<Self> {
        toml::from_str(s).map_err(|e| FinalizeError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> FinalizeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FinalizeError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn wasm_path(&self) -> PathBuf {
        self.stage_dir.join(&self.wasm)
    }

    pub fn bindings_path(&self) -> PathBuf {
        self.stage_dir.join(&self.bindings)
    }

    pub fn loader_path(&self) -> PathBuf {
        self.stage_dir.join(&self.loader)
    }

    pub fn index_path(&self) -> PathBuf {
        self.stage_dir.join(&self.index)
    }
}
