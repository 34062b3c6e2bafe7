//! Persistence for merge trees.
//!
//! Linkage construction is the expensive step of a clustering run, so the
//! tree is written to disk once and re-cut as many times as the user wants
//! to try different cluster counts. The on-disk format is JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::linkage::MergeTree;

/// Default filename for a persisted tree inside a dataset directory.
pub const LINKAGE_FILE: &str = "linkage.json";

/// Load a merge tree from `path`.
///
/// The tree is validated after deserialization; a file that parses but
/// violates the merge invariants is reported as corrupt, not returned.
pub fn load_linkage(path: &Path) -> Result<MergeTree> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::LinkageNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(format!("{}: {e}", path.display())),
    })?;
    let tree: MergeTree =
        serde_json::from_str(&contents).map_err(|e| Error::CorruptLinkage(e.to_string()))?;
    tree.validate()?;
    tracing::debug!(
        path = %path.display(),
        n_leaves = tree.n_leaves(),
        "loaded linkage"
    );
    Ok(tree)
}

/// Persist a merge tree to `path`, overwriting any previous tree.
pub fn save_linkage(tree: &MergeTree, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string(tree).map_err(|e| Error::CorruptLinkage(e.to_string()))?;
    fs::write(path, json).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "saved linkage");
    Ok(())
}
