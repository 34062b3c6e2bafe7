//! Linkage structures: the merge tree and everything derived from it.
//!
//! Agglomerative clustering records its full merge history as an ordered
//! sequence of merges with non-decreasing distances. That one structure
//! answers every question the rest of the crate asks:
//!
//! ```text
//! Question                               │ Derived from
//! ───────────────────────────────────────┼──────────────────────────
//! Which samples group at threshold t?    │ cut (see [`crate::cluster`])
//! Which sample is most like which?       │ [`leaf_order`]
//! Can we re-cut without re-clustering?   │ [`load_linkage`] / [`save_linkage`]
//! ```
//!
//! - [`MergeTree`]: the linkage structure itself, with invariant checks
//! - [`build_linkage`]: construct a tree from a feature matrix (kodama)
//! - [`leaf_order`]: left-to-right dendrogram order of the leaves
//! - [`load_linkage`] / [`save_linkage`]: JSON persistence

mod build;
mod leaves;
mod store;
mod tree;

pub use build::{build_linkage, Linkage};
pub use leaves::{invert_permutation, leaf_order};
pub use store::{load_linkage, save_linkage, LINKAGE_FILE};
pub use tree::{MergeStep, MergeTree};
