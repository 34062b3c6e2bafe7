//! Flat cluster extraction: cut the merge tree into a partition.

use crate::linkage::MergeTree;
use crate::error::{Error, Result};

/// A flat partition of the tree's leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatClusters {
    /// Cluster label per leaf, `1..=n_clusters`.
    pub labels: Vec<usize>,
    /// Number of distinct clusters; always `max(labels)`.
    pub n_clusters: usize,
}

/// Cut the tree at a distance threshold.
///
/// Merges with `distance <= threshold` survive the cut; everything merged
/// above it stays separate. The cluster count is a non-increasing step
/// function of the threshold: raising it lets more merges survive, so
/// fewer, larger clusters remain.
///
/// Labels are arbitrary — 1-based and dense, but not stable across
/// thresholds. Only the partition is meaningful.
pub fn cut_at_distance(tree: &MergeTree, threshold: f64) -> FlatClusters {
    let n = tree.n_leaves();

    // cluster_id_map[id] chains each cluster id to the id of the merge
    // that absorbed it; a self-reference marks a live cluster.
    let mut cluster_id_map: Vec<usize> = (0..(2 * n)).collect();

    for (i, step) in tree.steps().iter().enumerate() {
        // Distances are non-decreasing, so the first merge above the
        // threshold ends the cut.
        if step.distance > threshold {
            break;
        }

        let new_cluster_id = n + i;

        let mut id_a = step.left;
        while id_a < cluster_id_map.len() && cluster_id_map[id_a] != id_a {
            id_a = cluster_id_map[id_a];
        }

        let mut id_b = step.right;
        while id_b < cluster_id_map.len() && cluster_id_map[id_b] != id_b {
            id_b = cluster_id_map[id_b];
        }

        while cluster_id_map.len() <= new_cluster_id {
            cluster_id_map.push(cluster_id_map.len());
        }

        cluster_id_map[id_a] = new_cluster_id;
        cluster_id_map[id_b] = new_cluster_id;
        cluster_id_map[step.left] = new_cluster_id;
        cluster_id_map[step.right] = new_cluster_id;
    }

    // Resolve each leaf to its surviving cluster id.
    let mut resolved: Vec<usize> = (0..n).collect();
    for slot in resolved.iter_mut() {
        let mut cid = *slot;
        while cid < cluster_id_map.len() && cluster_id_map[cid] != cid {
            cid = cluster_id_map[cid];
        }
        *slot = cid;
    }

    // Renumber to dense 1-based labels.
    let mut unique = resolved.clone();
    unique.sort_unstable();
    unique.dedup();

    let labels: Vec<usize> = resolved
        .iter()
        .map(|&cid| unique.binary_search(&cid).unwrap_or(0) + 1)
        .collect();

    FlatClusters {
        n_clusters: unique.len(),
        labels,
    }
}

/// Cut the tree so that exactly `k` clusters remain, when the tree permits.
///
/// Undoes the last `k - 1` merges by cutting at the distance of the last
/// surviving merge. Tied merge distances at the cut point can make fewer
/// than `k` clusters survive; for trees with distinct distances the count
/// is exact.
pub fn cut_to_count(tree: &MergeTree, k: usize) -> Result<FlatClusters> {
    let n = tree.n_leaves();
    if k == 0 {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "cluster count must be at least 1",
        });
    }
    if k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }

    // Merges that must survive to leave k clusters.
    let n_merges = n - k;
    if n_merges == 0 {
        return Ok(FlatClusters {
            labels: (1..=n).collect(),
            n_clusters: n,
        });
    }

    // A tree built step-by-step may not have its full merge history yet.
    let step = tree.steps().get(n_merges - 1).ok_or_else(|| {
        Error::CorruptLinkage(format!(
            "{n} leaves require {n_merges} merges for {k} clusters, tree has {}",
            tree.n_merges()
        ))
    })?;
    Ok(cut_at_distance(tree, step.distance))
}
