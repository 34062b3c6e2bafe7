//! Agglomerative linkage construction.
//!
//! Builds the merge tree from a feature matrix: one row per sample, each
//! row the flattened short-term feature descriptors extracted upstream.
//! Ward linkage is the workflow default; it minimizes the increase in
//! within-cluster variance at each merge and produces compact,
//! similar-sized groups, which matches how people browse drum libraries.

use kodama::{linkage as kodama_linkage, Method as KodamaMethod};

use crate::error::{Error, Result};
use crate::linkage::MergeTree;

/// Linkage method for agglomerative clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// Average linkage: mean distance between clusters.
    Average,
    /// Ward's method: minimize within-cluster variance.
    Ward,
}

/// Build a merge tree from sample feature vectors.
///
/// Computes the condensed Euclidean dissimilarity matrix (upper triangle,
/// row-major, N-choose-2 entries) and runs agglomerative clustering over
/// it with kodama. The resulting dendrogram uses SciPy-style cluster ids:
/// leaves `0..n`, merge `i` creating id `n + i`.
pub fn build_linkage(data: &[Vec<f64>], linkage: Linkage) -> Result<MergeTree> {
    if data.len() < 2 {
        return Err(Error::EmptyInput);
    }

    let n = data.len();
    let d = data[0].len();
    if let Some(row) = data.iter().find(|row| row.len() != d) {
        return Err(Error::DimensionMismatch {
            expected: d,
            found: row.len(),
        });
    }

    let mut condensed = Vec::with_capacity((n * (n - 1)) / 2);
    for row in 0..(n - 1) {
        for col in (row + 1)..n {
            condensed.push(euclidean_distance(&data[row], &data[col]));
        }
    }

    let method = match linkage {
        Linkage::Single => KodamaMethod::Single,
        Linkage::Complete => KodamaMethod::Complete,
        Linkage::Average => KodamaMethod::Average,
        Linkage::Ward => KodamaMethod::Ward,
    };

    let dend = kodama_linkage(&mut condensed, n, method);

    let mut tree = MergeTree::new(n);
    for step in dend.steps() {
        tree.add_merge(step.cluster1, step.cluster2, step.dissimilarity, step.size);
    }
    tree.validate()?;
    Ok(tree)
}

#[inline]
fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let dx = x - y;
            dx * dx
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::cut_to_count;

    #[test]
    fn test_build_separates_obvious_groups() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 10.1],
        ];

        let tree = build_linkage(&data, Linkage::Ward).unwrap();
        assert_eq!(tree.n_leaves(), 4);
        assert_eq!(tree.n_merges(), 3);

        let flat = cut_to_count(&tree, 2).unwrap();
        assert_eq!(flat.labels[0], flat.labels[1]);
        assert_eq!(flat.labels[2], flat.labels[3]);
        assert_ne!(flat.labels[0], flat.labels[2]);
    }

    #[test]
    fn test_build_rejects_single_sample() {
        assert_eq!(
            build_linkage(&[vec![1.0]], Linkage::Ward),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    fn test_build_rejects_ragged_rows() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert_eq!(
            build_linkage(&data, Linkage::Average),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }
}
