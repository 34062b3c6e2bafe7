//! # kitsort
//!
//! Organizes collections of short audio samples (drum hits) by acoustic
//! similarity. Feature extraction happens upstream; this crate takes the
//! numeric features (or an already-persisted merge tree), builds and cuts
//! a hierarchical similarity tree, and materializes the result as copied
//! files for human browsing.
//!
//! The pipeline:
//!
//! ```text
//! feature matrix → merge tree → flat clusters → cluster directories
//!      (build)      (persist)    (cut/resolve)     (materialize)
//! ```
//!
//! The algorithmic heart is [`resolve`]: a caller asks for K clusters,
//! but K is only reachable through a continuous distance threshold whose
//! induced cluster count is a discrete step function. `resolve` bisects
//! the threshold space and reports, via [`ResolveOutcome`], whether the
//! target was hit exactly or only approximated within its budget.
//!
//! ## Quick start
//!
//! ```no_run
//! use kitsort::{organize, OrganizeConfig};
//!
//! // `samples/` holds wav files plus a persisted `linkage.json`.
//! let summary = organize(&OrganizeConfig::new("samples", 12))?;
//! println!(
//!     "{} files into {} clusters (exact: {})",
//!     summary.n_files, summary.n_clusters, summary.exact
//! );
//! # Ok::<(), kitsort::Error>(())
//! ```

pub mod cluster;
pub mod config;
/// Error types used across `kitsort`.
pub mod error;
pub mod linkage;
pub mod materialize;
pub mod workflow;

pub use cluster::{
    cut_at_distance, cut_to_count, resolve, FlatClusters, Resolution, ResolveOutcome,
    DEFAULT_MAX_ITERATIONS,
};
pub use config::{ClusterCriterion, OrganizeConfig};
pub use error::{Error, Result};
pub use linkage::{
    build_linkage, invert_permutation, leaf_order, load_linkage, save_linkage, Linkage,
    MergeStep, MergeTree, LINKAGE_FILE,
};
pub use materialize::{
    list_samples, materialize_clusters, save_ordered_copies, AddressingMode,
    MaterializeSummary, MANIFEST_FILE,
};
pub use workflow::{cluster_and_save_order, organize, OrganizeSummary, CLUSTERS_SUBDIR};
