//! End-to-end workflows over a sample directory.
//!
//! Two entry points, matching the two halves of organizing a library:
//!
//! 1. [`cluster_and_save_order`] — the expensive pass. Build the merge
//!    tree from extracted features and lay the samples out as renamed
//!    copies in similarity order, with a manifest pointing back at the
//!    originals.
//! 2. [`organize`] — the cheap, repeatable pass. Re-cut a persisted tree
//!    into a chosen number of groups and copy the samples into one
//!    directory per group. Run it as many times as it takes to find a
//!    grouping worth keeping.

use std::path::{Path, PathBuf};

use crate::cluster::{cut_to_count, resolve, FlatClusters, ResolveOutcome};
use crate::config::{ClusterCriterion, OrganizeConfig};
use crate::error::{Error, Result};
use crate::linkage::{build_linkage, leaf_order, load_linkage, Linkage, MergeTree, LINKAGE_FILE};
use crate::materialize::{list_samples, materialize_clusters, save_ordered_copies};

/// Subdirectory of the dataset dir that receives cluster directories.
pub const CLUSTERS_SUBDIR: &str = "clusters";

/// What an organize run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeSummary {
    /// Cluster count actually achieved.
    pub n_clusters: usize,
    /// Files copied into cluster directories.
    pub n_files: usize,
    /// False when the target count was only approximated.
    pub exact: bool,
}

/// Cut the persisted tree in `data_dir` and copy samples into per-cluster
/// directories under `<data_dir>/clusters/`.
///
/// Reads the linkage from `<data_dir>/linkage.json`. An approximate
/// resolution is not an error — the summary reports it via `exact`, and
/// the caller decides whether the grouping is close enough.
pub fn organize(config: &OrganizeConfig) -> Result<OrganizeSummary> {
    let tree = load_linkage(&config.data_dir.join(LINKAGE_FILE))?;
    let files = list_samples(&config.data_dir, &config.extension)?;
    tracing::info!(
        n_files = files.len(),
        n_leaves = tree.n_leaves(),
        data_dir = %config.data_dir.display(),
        "organizing samples"
    );

    let (flat, exact) = cut_by_criterion(&tree, config.criterion)?;
    let order = leaf_order(&tree);
    let out_root = config.data_dir.join(CLUSTERS_SUBDIR);
    let summary =
        materialize_clusters(&files, &flat.labels, &order, config.addressing, &out_root)?;

    Ok(OrganizeSummary {
        n_clusters: summary.n_clusters,
        n_files: summary.n_files,
        exact,
    })
}

fn cut_by_criterion(
    tree: &MergeTree,
    criterion: ClusterCriterion,
) -> Result<(FlatClusters, bool)> {
    match criterion {
        ClusterCriterion::TargetCount {
            count,
            max_iterations,
        } => {
            let resolution = resolve(tree, count, max_iterations)?;
            let exact = resolution.outcome == ResolveOutcome::Exact;
            Ok((resolution.clusters, exact))
        }
        ClusterCriterion::MaxClust(k) => {
            let flat = cut_to_count(tree, k)?;
            if flat.n_clusters != k {
                return Err(Error::InvalidParameter {
                    name: "max_clust",
                    message: "tied merge distances prevent this exact cluster count",
                });
            }
            Ok((flat, true))
        }
    }
}

/// Cluster samples by their features and save similarity-ordered copies.
///
/// `features` holds one row per sample and `relative_paths` the matching
/// sample paths relative to `parent_dir`, in the same order. Builds the
/// merge tree, copies each sample into `outdir` renamed by its leaf
/// (similarity) rank, writes the originals manifest, and returns the tree
/// so the caller can persist it for later [`organize`] runs.
pub fn cluster_and_save_order(
    features: &[Vec<f64>],
    relative_paths: &[PathBuf],
    parent_dir: &Path,
    outdir: &Path,
    linkage: Linkage,
) -> Result<MergeTree> {
    if relative_paths.len() != features.len() {
        return Err(Error::MappingMismatch {
            expected: features.len(),
            found: relative_paths.len(),
        });
    }

    let tree = build_linkage(features, linkage)?;
    let order = leaf_order(&tree);
    let ordered: Vec<PathBuf> = order.iter().map(|&i| relative_paths[i].clone()).collect();
    save_ordered_copies(parent_dir, &ordered, outdir)?;
    Ok(tree)
}
