use std::path::Path;

use stage_types::ContentHash;

/// Cache-busted file name for `path`: `{stem}-{hash}{suffix}`.
///
/// Only the last extension is treated as the suffix, so `app.min.js`
/// becomes `app.min-<hash>.js`. A name without an extension gets the hash
/// appended with no suffix. Returns `None` when `path` has no file name
/// or the name is not valid UTF-8.
pub fn hashed_file_name(path: &Path, hash: &ContentHash) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    match path.extension() {
        Some(ext) => Some(format!("{stem}-{hash}.{}", ext.to_str()?)),
        None => Some(format!("{stem}-{hash}")),
    }
}
