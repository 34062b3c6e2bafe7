//! Flat clusters from a merge tree.
//!
//! Two cut criteria, mirroring the two ways callers think about grouping:
//!
//! | Criterion | Entry point | When to use |
//! |-----------|-------------|-------------|
//! | Distance threshold | [`cut_at_distance`] | You know how dissimilar is "too dissimilar" |
//! | Direct count | [`cut_to_count`] | You want exactly K groups and the tree permits it |
//! | Target count, best effort | [`resolve`] | You want K groups even when no threshold yields K exactly |
//!
//! [`resolve`] is the interesting one: it bisects the continuous threshold
//! space against the discrete count function and reports, via
//! [`ResolveOutcome`], whether the target was hit or only approximated.

mod flat;
mod resolve;

pub use flat::{cut_at_distance, cut_to_count, FlatClusters};
pub use resolve::{resolve, Resolution, ResolveOutcome, DEFAULT_MAX_ITERATIONS};
