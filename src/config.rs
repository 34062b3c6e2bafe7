//! Configuration for the end-to-end organize workflow.

use std::path::PathBuf;

use crate::cluster::DEFAULT_MAX_ITERATIONS;
use crate::materialize::AddressingMode;

/// How to decide the number of clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterCriterion {
    /// Bisect over thresholds toward `count` clusters, accepting the
    /// closest approximation if the budget runs out.
    TargetCount {
        /// Desired cluster count.
        count: usize,
        /// Bisection budget.
        max_iterations: usize,
    },
    /// Cut directly for this many clusters, no search. Fails rather than
    /// approximates when the tree's tied distances refuse.
    MaxClust(usize),
}

/// Parameters for [`crate::workflow::organize`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizeConfig {
    /// Dataset directory: holds the sample files, the persisted linkage,
    /// and receives the `clusters/` output tree.
    pub data_dir: PathBuf,
    /// Sample file extension to match (case-insensitive).
    pub extension: String,
    /// Cluster-count criterion.
    pub criterion: ClusterCriterion,
    /// Leaf-index ↔ file correspondence strategy.
    pub addressing: AddressingMode,
}

impl OrganizeConfig {
    /// Config targeting `count` clusters with the default budget, "wav"
    /// samples, and index-correction addressing.
    pub fn new(data_dir: impl Into<PathBuf>, count: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            extension: "wav".to_string(),
            criterion: ClusterCriterion::TargetCount {
                count,
                max_iterations: DEFAULT_MAX_ITERATIONS,
            },
            addressing: AddressingMode::IndexCorrection,
        }
    }

    /// Set the sample file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the cluster-count criterion.
    pub fn with_criterion(mut self, criterion: ClusterCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Set the addressing mode.
    pub fn with_addressing(mut self, addressing: AddressingMode) -> Self {
        self.addressing = addressing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = OrganizeConfig::new("/tmp/kit", 8);
        assert_eq!(config.extension, "wav");
        assert_eq!(config.addressing, AddressingMode::IndexCorrection);
        assert_eq!(
            config.criterion,
            ClusterCriterion::TargetCount {
                count: 8,
                max_iterations: DEFAULT_MAX_ITERATIONS
            }
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = OrganizeConfig::new("/tmp/kit", 8)
            .with_extension("aif")
            .with_criterion(ClusterCriterion::MaxClust(4))
            .with_addressing(AddressingMode::LeafOrderDirect);
        assert_eq!(config.extension, "aif");
        assert_eq!(config.criterion, ClusterCriterion::MaxClust(4));
        assert_eq!(config.addressing, AddressingMode::LeafOrderDirect);
    }
}
