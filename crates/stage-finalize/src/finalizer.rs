use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use stage_crypto::{hashed_file_name, ContentHasher};
use stage_types::ContentHash;
use tracing::{debug, info};

use crate::config::FinalizeConfig;
use crate::error::{FinalizeError, FinalizeResult};
use crate::patch::{loader_template, patch_worker_uri};

/// A staged file after it has been renamed to embed its content hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenamedAsset {
    /// New file name (no directory).
    pub file_name: String,
    /// Content hash embedded in the file name.
    pub hash: ContentHash,
}

/// Final names of the three renamed worker assets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FinalizeReport {
    pub wasm: RenamedAsset,
    pub bindings: RenamedAsset,
    pub loader: RenamedAsset,
    /// URI written into the HTML entry.
    pub worker_uri: String,
}

/// Finalizes a staged web-worker build in place.
///
/// Not idempotent: a successful run renames the fixed input files, so a
/// second run against the same directory fails with an I/O error.
pub struct AssetFinalizer {
    config: FinalizeConfig,
    hasher: ContentHasher,
}

impl AssetFinalizer {
    pub fn new(config: FinalizeConfig) -> Self {
        let hasher = ContentHasher::new(config.algorithm);
        Self { config, hasher }
    }

    /// Run the full pipeline.
    ///
    /// 1. Hash and rename the wasm module, then the bindings.
    /// 2. Check the loader against the expected hash. On mismatch nothing
    ///    else is touched.
    /// 3. Rewrite the loader to import the renamed files, then hash and
    ///    rename it.
    /// 4. Point the HTML entry's URI attribute at the renamed loader.
    pub fn run(&self) -> FinalizeResult<FinalizeReport> {
        info!(stage_dir = %self.config.stage_dir.display(), "finalizing worker assets");

        let wasm = self.hash_and_rename(&self.config.wasm_path())?;
        let bindings = self.hash_and_rename(&self.config.bindings_path())?;

        let loader_path = self.config.loader_path();
        self.verify_loader(&loader_path)?;
        let body = loader_template(&bindings.file_name, &wasm.file_name);
        fs::write(&loader_path, &body).map_err(|e| FinalizeError::io(&loader_path, e))?;
        debug!(path = %loader_path.display(), "loader rewritten");
        let loader = self.hash_and_rename(&loader_path)?;

        let worker_uri = self.patch_index(&loader.file_name)?;

        Ok(FinalizeReport {
            wasm,
            bindings,
            loader,
            worker_uri,
        })
    }

    /// Rename `path` to `{stem}-{hash}{suffix}` in the same directory.
    pub fn hash_and_rename(&self, path: &Path) -> FinalizeResult<RenamedAsset> {
        let hash = self
            .hasher
            .hash_file(path)
            .map_err(|e| FinalizeError::io(path, e))?;
        let file_name = hashed_file_name(path, &hash)
            .ok_or_else(|| FinalizeError::InvalidFileName(path.to_path_buf()))?;
        let target = sibling(path, &file_name);
        fs::rename(path, &target).map_err(|e| FinalizeError::io(path, e))?;
        info!(from = %path.display(), to = %target.display(), "renamed");
        Ok(RenamedAsset { file_name, hash })
    }

    /// Fail unless the loader still has the content the rewrite expects.
    pub fn verify_loader(&self, path: &Path) -> FinalizeResult<()> {
        let body = fs::read(path).map_err(|e| FinalizeError::io(path, e))?;
        let expected = self.config.expected_loader_hash;
        if !self.hasher.verify(&body, &expected) {
            return Err(FinalizeError::LoaderHashMismatch {
                path: path.to_path_buf(),
                expected,
                actual: self.hasher.hash(&body),
            });
        }
        Ok(())
    }

    fn patch_index(&self, loader_name: &str) -> FinalizeResult<String> {
        let path = self.config.index_path();
        let html = fs::read_to_string(&path).map_err(|e| FinalizeError::io(&path, e))?;
        let patched = patch_worker_uri(&html, &self.config.uri_attribute, loader_name)?
            .ok_or_else(|| FinalizeError::AttributeNotFound {
                attribute: self.config.uri_attribute.clone(),
                path: path.clone(),
            })?;
        fs::write(&path, patched).map_err(|e| FinalizeError::io(&path, e))?;
        let worker_uri = format!("./{loader_name}");
        info!(path = %path.display(), uri = %worker_uri, "patched entry");
        Ok(worker_uri)
    }
}

fn sibling(path: &Path, file_name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
