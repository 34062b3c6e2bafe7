//! Dendrogram leaf order.
//!
//! The merge tree implies a left-to-right ordering of leaves: the order
//! they would appear along the axis of a dendrogram drawing. Samples that
//! merged early sit next to each other, so the leaf order is a similarity
//! ranking of the whole collection.

use crate::error::{Error, Result};
use crate::linkage::MergeTree;

/// Left-to-right leaf order of the tree's dendrogram.
///
/// Depth-first traversal from the root, descending into each merge's
/// left cluster before its right one. Returns a permutation of
/// `0..n_leaves`: `order[p]` is the leaf at dendrogram position `p`.
pub fn leaf_order(tree: &MergeTree) -> Vec<usize> {
    let n = tree.n_leaves();
    let mut order = Vec::with_capacity(n);
    if tree.n_merges() == 0 {
        order.extend(0..n);
        return order;
    }

    // Explicit stack; trees from large sample libraries can be deep
    // enough to overflow a recursive traversal.
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        if id < n {
            order.push(id);
        } else {
            let step = tree.steps()[id - n];
            // Right is pushed first so left pops first.
            stack.push(step.right);
            stack.push(step.left);
        }
    }
    order
}

/// Invert a permutation of `0..n`.
///
/// For a leaf order this gives each leaf's dendrogram position:
/// `inverse[order[p]] == p`. Fails if the input is not a bijection on
/// `0..n` — a tree whose traversal repeats or skips a leaf is corrupt,
/// and using it would assign files to the wrong clusters.
pub fn invert_permutation(perm: &[usize]) -> Result<Vec<usize>> {
    let n = perm.len();
    let mut inverse = vec![usize::MAX; n];
    for (pos, &i) in perm.iter().enumerate() {
        if i >= n {
            return Err(Error::CorruptLinkage(format!(
                "leaf order contains index {i}, valid range is 0..{n}"
            )));
        }
        if inverse[i] != usize::MAX {
            return Err(Error::CorruptLinkage(format!(
                "leaf order repeats index {i}"
            )));
        }
        inverse[i] = pos;
    }
    Ok(inverse)
}
