//! Merge tree: the linkage structure produced by agglomerative clustering.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single merge operation in the tree.
///
/// Cluster identifiers follow the SciPy/kodama convention: leaves are
/// `0..n`, and the cluster created by merge `i` gets the synthetic id
/// `n + i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeStep {
    /// First cluster being merged.
    pub left: usize,
    /// Second cluster being merged.
    pub right: usize,
    /// Dissimilarity at which the merge occurred.
    pub distance: f64,
    /// Size of the resulting cluster.
    pub size: usize,
}

/// The full merge history of a hierarchical clustering run.
///
/// An ordered sequence of `n - 1` merges for `n` leaves, with merge
/// distances non-negative and non-decreasing. The monotone distance
/// column is what makes threshold cuts and bisection over thresholds
/// well defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeTree {
    steps: Vec<MergeStep>,
    n_leaves: usize,
}

impl MergeTree {
    /// Create an empty tree for `n_leaves` samples.
    pub fn new(n_leaves: usize) -> Self {
        Self {
            steps: Vec::with_capacity(n_leaves.saturating_sub(1)),
            n_leaves,
        }
    }

    /// Build a tree from a complete merge sequence, validating it.
    pub fn from_steps(n_leaves: usize, steps: Vec<MergeStep>) -> Result<Self> {
        let tree = Self { steps, n_leaves };
        tree.validate()?;
        Ok(tree)
    }

    /// Record a merge operation.
    pub fn add_merge(&mut self, left: usize, right: usize, distance: f64, size: usize) {
        self.steps.push(MergeStep {
            left,
            right,
            distance,
            size,
        });
    }

    /// Check the merge-tree invariants.
    ///
    /// A tree loaded from storage must pass this before use; a corrupt
    /// tree would silently produce wrong partitions otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.n_leaves < 2 {
            return Err(Error::CorruptLinkage(format!(
                "tree needs at least 2 leaves, has {}",
                self.n_leaves
            )));
        }
        if self.steps.len() != self.n_leaves - 1 {
            return Err(Error::CorruptLinkage(format!(
                "{} leaves require {} merges, found {}",
                self.n_leaves,
                self.n_leaves - 1,
                self.steps.len()
            )));
        }
        let mut prev = 0.0f64;
        for (i, step) in self.steps.iter().enumerate() {
            let max_id = self.n_leaves + i;
            if step.left >= max_id || step.right >= max_id {
                return Err(Error::CorruptLinkage(format!(
                    "merge {i} references cluster id {} (max valid is {})",
                    step.left.max(step.right),
                    max_id - 1
                )));
            }
            if step.left == step.right {
                return Err(Error::CorruptLinkage(format!(
                    "merge {i} merges cluster {} with itself",
                    step.left
                )));
            }
            if !step.distance.is_finite() || step.distance < 0.0 {
                return Err(Error::CorruptLinkage(format!(
                    "merge {i} has invalid distance {}",
                    step.distance
                )));
            }
            if step.distance < prev {
                return Err(Error::CorruptLinkage(format!(
                    "merge distances not monotone: step {i} has {} after {}",
                    step.distance, prev
                )));
            }
            prev = step.distance;
        }
        Ok(())
    }

    /// Number of original samples.
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.steps.len()
    }

    /// The merge steps, in merge order.
    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    /// The id of the root cluster (the result of the final merge).
    pub fn root(&self) -> usize {
        self.n_leaves + self.steps.len() - 1
    }

    /// The largest merge distance in the tree.
    ///
    /// Distances are non-decreasing, so this is the final step's distance.
    /// Cutting above it collapses everything into one cluster; cutting
    /// below the first step's distance separates all singletons.
    pub fn max_distance(&self) -> f64 {
        self.steps.last().map(|s| s.distance).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_creation() {
        let tree = MergeTree::new(5);
        assert_eq!(tree.n_leaves(), 5);
        assert_eq!(tree.n_merges(), 0);
    }

    #[test]
    fn test_tree_merge_and_root() {
        let mut tree = MergeTree::new(4);
        tree.add_merge(0, 1, 0.5, 2);
        tree.add_merge(2, 3, 0.7, 2);
        tree.add_merge(4, 5, 1.0, 4);

        assert_eq!(tree.n_merges(), 3);
        assert_eq!(tree.root(), 6);
        assert_eq!(tree.max_distance(), 1.0);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_step_count() {
        let mut tree = MergeTree::new(4);
        tree.add_merge(0, 1, 0.5, 2);
        assert!(matches!(
            tree.validate(),
            Err(Error::CorruptLinkage(_))
        ));
    }

    #[test]
    fn test_validate_rejects_decreasing_distances() {
        let steps = vec![
            MergeStep { left: 0, right: 1, distance: 1.0, size: 2 },
            MergeStep { left: 2, right: 3, distance: 0.5, size: 2 },
            MergeStep { left: 4, right: 5, distance: 2.0, size: 4 },
        ];
        assert!(MergeTree::from_steps(4, steps).is_err());
    }

    #[test]
    fn test_validate_rejects_forward_reference() {
        let steps = vec![
            MergeStep { left: 0, right: 5, distance: 0.5, size: 2 },
            MergeStep { left: 1, right: 2, distance: 0.7, size: 2 },
            MergeStep { left: 4, right: 3, distance: 1.0, size: 4 },
        ];
        assert!(MergeTree::from_steps(4, steps).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut tree = MergeTree::new(3);
        tree.add_merge(0, 1, 0.3, 2);
        tree.add_merge(3, 2, 0.9, 3);

        let json = serde_json::to_string(&tree).unwrap();
        let back: MergeTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
