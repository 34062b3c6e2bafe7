//! Cluster-count resolution: find a threshold that yields a target count.
//!
//! The cluster count is a step function of the cut threshold —
//! non-increasing, with flat regions between consecutive merge distances
//! and jumps wherever several merges share a distance. It is not
//! invertible, so "give me K clusters" becomes a bisection search over
//! the continuous threshold space:
//!
//! ```text
//! count
//!  10 ┤──┐
//!   9 ┤  └──┐
//!   7 ┤     └────────┐          (6 and 8 unreachable: tied distances)
//!   5 ┤              └──────┐
//!   1 ┤                     └──────
//!     └──────────────────────────── threshold
//! ```
//!
//! Bisection converges geometrically on a threshold but carries no
//! guarantee of hitting the discrete target exactly — the target may sit
//! in a gap, as 6 and 8 do above. Hence the iteration cap and the
//! best-effort [`ResolveOutcome::Approximate`] fallback. No claim is made
//! of returning the globally closest achievable count, only whatever the
//! final probe produced.

use crate::cluster::flat::{cut_at_distance, FlatClusters};
use crate::error::{Error, Result};
use crate::linkage::MergeTree;

/// Default bisection budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// A threshold producing exactly the target count was found.
    Exact,
    /// The budget ran out; the returned partition has `achieved` clusters.
    Approximate {
        /// Cluster count of the last probed cut.
        achieved: usize,
    },
}

/// Result of a cluster-count resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The partition from the final (or exactly matching) probe.
    pub clusters: FlatClusters,
    /// Whether the target count was hit exactly.
    pub outcome: ResolveOutcome,
}

impl Resolution {
    /// True when the target count was matched exactly.
    pub fn is_exact(&self) -> bool {
        self.outcome == ResolveOutcome::Exact
    }

    /// Cluster count of the returned partition.
    pub fn n_clusters(&self) -> usize {
        self.clusters.n_clusters
    }
}

/// Bisect over the threshold space for a cut with `target` clusters.
///
/// Probes at the midpoint of `[low, high]`, starting from the full
/// distance span of the tree. Too many clusters means the cut kept too
/// many merges apart, so the lower bound rises; too few means it merged
/// too much, so the upper bound drops. An exact match returns
/// immediately. When the budget runs out, the **last probed** partition
/// is returned with [`ResolveOutcome::Approximate`] — callers decide
/// whether to accept it.
pub fn resolve(tree: &MergeTree, target: usize, max_iterations: usize) -> Result<Resolution> {
    let n = tree.n_leaves();
    if target == 0 {
        return Err(Error::InvalidParameter {
            name: "target",
            message: "target cluster count must be at least 1",
        });
    }
    if target > n {
        return Err(Error::InvalidClusterCount {
            requested: target,
            n_items: n,
        });
    }
    if max_iterations == 0 {
        return Err(Error::InvalidParameter {
            name: "max_iterations",
            message: "bisection needs at least one iteration",
        });
    }

    let mut low = 0.0f64;
    let mut high = tree.max_distance();
    let mut mid = (high - low) / 2.0;
    let mut iteration = 0;

    loop {
        debug_assert!(low <= mid && mid <= high);

        let flat = cut_at_distance(tree, mid);
        let n_clusters = flat.n_clusters;
        tracing::debug!(iteration, low, mid, high, n_clusters, target, "bisection probe");

        if n_clusters > target {
            // Too many clusters survived: the cut needs to sit higher.
            low = mid;
            mid = (high + low) / 2.0;
        } else if n_clusters < target {
            // Cut merged too much: lower the ceiling.
            high = mid;
            mid = (high + low) / 2.0;
        } else {
            tracing::info!(target, iteration, "exact cluster-count match found");
            return Ok(Resolution {
                clusters: flat,
                outcome: ResolveOutcome::Exact,
            });
        }

        iteration += 1;
        if iteration == max_iterations {
            tracing::warn!(
                target,
                achieved = n_clusters,
                "no exact match found; returning closest approximation"
            );
            return Ok(Resolution {
                clusters: flat,
                outcome: ResolveOutcome::Approximate {
                    achieved: n_clusters,
                },
            });
        }
    }
}
