//! Materializing cluster results as files on disk.
//!
//! The membership vector indexes leaves by the tree's internal sample
//! order; the files on disk are listed in sorted order. Those two orders
//! coincide only when the listing was produced the same way the tree was
//! fed, so mapping labels back to files needs an explicit correspondence
//! strategy — [`AddressingMode`]:
//!
//! | Mode | File listing is in | Correspondence |
//! |------|--------------------|----------------|
//! | [`IndexCorrection`] | dendrogram leaf order (a prior run's renamed output) | invert the leaf order, map tree index → listing position |
//! | [`LeafOrderDirect`] | dendrogram leaf order | permute labels by leaf order, zip positionally |
//!
//! Files are always **copied**, never moved or linked: originals stay
//! untouched, and an aborted run leaves whatever was already copied.
//!
//! [`IndexCorrection`]: AddressingMode::IndexCorrection
//! [`LeafOrderDirect`]: AddressingMode::LeafOrderDirect

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::linkage::invert_permutation;

/// Manifest filename written next to similarity-ordered copies.
pub const MANIFEST_FILE: &str = "original_filenames.txt";

/// How to recover the leaf-index ↔ file correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Invert the leaf order and route each tree index through the
    /// inverse into the sorted listing. Corrects for the reindexing the
    /// tree construction performs internally.
    IndexCorrection,
    /// Reorder the membership vector by the leaf order and zip it
    /// positionally against the sorted listing.
    LeafOrderDirect,
}

/// What a materialization run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeSummary {
    /// Number of cluster directories populated.
    pub n_clusters: usize,
    /// Number of files copied; always equals the input file count.
    pub n_files: usize,
}

/// Sorted listing of sample files with the given extension.
///
/// Extension matching is case-insensitive ("WAV" exports are common in
/// older sample libraries).
pub fn list_samples(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(dir).map_err(|e| Error::Io(format!("{}: {e}", dir.display())))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::Io(format!("{}: {e}", dir.display())))?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy each sample into a directory named for its cluster.
///
/// `files` is the sorted listing, `labels` the 1-based membership vector
/// indexed by tree leaf, `leaf_order` the tree's dendrogram permutation.
/// Directories are named `cluster_NNNN` under `out_root`, created if
/// absent and appended into otherwise.
///
/// Fails with [`Error::MappingMismatch`] before copying anything if the
/// listing cardinality does not equal the leaf count — misfiling samples
/// silently is worse than failing.
pub fn materialize_clusters(
    files: &[PathBuf],
    labels: &[usize],
    leaf_order: &[usize],
    mode: AddressingMode,
    out_root: &Path,
) -> Result<MaterializeSummary> {
    let n = labels.len();
    if files.len() != n {
        return Err(Error::MappingMismatch {
            expected: n,
            found: files.len(),
        });
    }
    if leaf_order.len() != n {
        return Err(Error::MappingMismatch {
            expected: n,
            found: leaf_order.len(),
        });
    }

    // Rejects non-bijective leaf orders for both modes; LeafOrderDirect
    // indexes the label vector with them directly.
    let inverse = invert_permutation(leaf_order)?;

    // (label, source file) per sample, under the chosen correspondence.
    let assignments: Vec<(usize, &PathBuf)> = match mode {
        AddressingMode::IndexCorrection => labels
            .iter()
            .zip(inverse.iter())
            .map(|(&label, &pos)| (label, &files[pos]))
            .collect(),
        AddressingMode::LeafOrderDirect => leaf_order
            .iter()
            .zip(files.iter())
            .map(|(&leaf, file)| (labels[leaf], file))
            .collect(),
    };

    let mut n_files = 0;
    let mut populated = BTreeSet::new();
    for (label, source) in assignments {
        let cluster_dir = out_root.join(cluster_dir_name(label));
        fs::create_dir_all(&cluster_dir)
            .map_err(|e| Error::Io(format!("{}: {e}", cluster_dir.display())))?;
        let file_name = source.file_name().ok_or_else(|| {
            Error::Io(format!("{}: not a file path", source.display()))
        })?;
        let dest = cluster_dir.join(file_name);
        fs::copy(source, &dest)
            .map_err(|e| Error::Io(format!("{} -> {}: {e}", source.display(), dest.display())))?;
        n_files += 1;
        populated.insert(label);
    }

    tracing::info!(
        n_files,
        n_clusters = populated.len(),
        out_root = %out_root.display(),
        "materialized clusters"
    );
    Ok(MaterializeSummary {
        n_clusters: populated.len(),
        n_files,
    })
}

/// Copy samples renamed by similarity rank, with a lookup manifest.
///
/// `relative_paths` lists samples relative to `parent_dir`, already in
/// the desired (leaf) order. Each is copied to `outdir` as `NNNNN.<ext>`
/// where the numeric prefix is its rank, and the original full paths are
/// written to [`MANIFEST_FILE`] one per line in the same order — the
/// reference table for recovering instrument names from an organized
/// library layout.
pub fn save_ordered_copies(
    parent_dir: &Path,
    relative_paths: &[PathBuf],
    outdir: &Path,
) -> Result<()> {
    fs::create_dir_all(outdir).map_err(|e| Error::Io(format!("{}: {e}", outdir.display())))?;

    let manifest_path = outdir.join(MANIFEST_FILE);
    let mut manifest = fs::File::create(&manifest_path)
        .map_err(|e| Error::Io(format!("{}: {e}", manifest_path.display())))?;
    for rel in relative_paths {
        writeln!(manifest, "{}", parent_dir.join(rel).display())
            .map_err(|e| Error::Io(format!("{}: {e}", manifest_path.display())))?;
    }

    for (rank, rel) in relative_paths.iter().enumerate() {
        let source = parent_dir.join(rel);
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("wav")
            .to_string();
        let dest = outdir.join(format!("{rank:05}.{ext}"));
        fs::copy(&source, &dest)
            .map_err(|e| Error::Io(format!("{} -> {}: {e}", source.display(), dest.display())))?;
    }

    tracing::info!(
        n_files = relative_paths.len(),
        outdir = %outdir.display(),
        "saved similarity-ordered copies"
    );
    Ok(())
}

fn cluster_dir_name(label: usize) -> String {
    format!("cluster_{label:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_samples(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for name in names {
            let path = dir.join(name);
            fs::write(&path, name.as_bytes()).unwrap();
            paths.push(path);
        }
        paths.sort();
        paths
    }

    fn count_files(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_list_samples_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        touch_samples(tmp.path(), &["b.wav", "a.wav", "c.WAV", "notes.txt"]);

        let listed = list_samples(tmp.path(), "wav").unwrap();
        let names: Vec<_> = listed
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.wav", "b.wav", "c.WAV"]);
    }

    #[test]
    fn test_materialize_identity_leaf_order() {
        let tmp = tempfile::tempdir().unwrap();
        let files = touch_samples(tmp.path(), &["a.wav", "b.wav", "c.wav", "d.wav", "e.wav"]);
        let out = tmp.path().join("clusters");

        let labels = vec![1, 1, 2, 2, 3];
        let order = vec![0, 1, 2, 3, 4];
        let summary = materialize_clusters(
            &files,
            &labels,
            &order,
            AddressingMode::IndexCorrection,
            &out,
        )
        .unwrap();

        assert_eq!(summary.n_clusters, 3);
        assert_eq!(summary.n_files, 5);
        assert_eq!(count_files(&out.join("cluster_0001")), 2);
        assert_eq!(count_files(&out.join("cluster_0002")), 2);
        assert_eq!(count_files(&out.join("cluster_0003")), 1);
    }

    #[test]
    fn test_materialize_total_count_preserved() {
        let tmp = tempfile::tempdir().unwrap();
        let files = touch_samples(tmp.path(), &["a.wav", "b.wav", "c.wav", "d.wav"]);
        let out = tmp.path().join("clusters");

        let labels = vec![2, 1, 2, 1];
        let order = vec![3, 1, 0, 2];
        let summary =
            materialize_clusters(&files, &labels, &order, AddressingMode::LeafOrderDirect, &out)
                .unwrap();

        assert_eq!(summary.n_files, 4);
        let total: usize = fs::read_dir(&out)
            .unwrap()
            .map(|d| count_files(&d.unwrap().path()))
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_materialize_modes_agree_on_partition_sizes() {
        let tmp = tempfile::tempdir().unwrap();
        let files = touch_samples(tmp.path(), &["a.wav", "b.wav", "c.wav", "d.wav", "e.wav"]);
        let labels = vec![1, 2, 1, 2, 2];
        let order = vec![2, 0, 4, 1, 3];

        let out_a = tmp.path().join("by_index");
        let out_b = tmp.path().join("by_leaf");
        materialize_clusters(&files, &labels, &order, AddressingMode::IndexCorrection, &out_a)
            .unwrap();
        materialize_clusters(&files, &labels, &order, AddressingMode::LeafOrderDirect, &out_b)
            .unwrap();

        for cluster in ["cluster_0001", "cluster_0002"] {
            assert_eq!(
                count_files(&out_a.join(cluster)),
                count_files(&out_b.join(cluster)),
                "{cluster}"
            );
        }
    }

    #[test]
    fn test_materialize_counts_populated_dirs_not_max_label() {
        let tmp = tempfile::tempdir().unwrap();
        let files = touch_samples(tmp.path(), &["a.wav", "b.wav", "c.wav"]);
        let out = tmp.path().join("clusters");

        // Non-dense labels: two distinct clusters, largest label 5.
        let summary = materialize_clusters(
            &files,
            &[2, 5, 2],
            &[0, 1, 2],
            AddressingMode::IndexCorrection,
            &out,
        )
        .unwrap();

        assert_eq!(summary.n_clusters, 2);
        assert_eq!(summary.n_files, 3);
        assert!(out.join("cluster_0002").exists());
        assert!(out.join("cluster_0005").exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn test_materialize_rejects_cardinality_mismatch() {
        let tmp = tempfile::tempdir().unwrap();
        let files = touch_samples(tmp.path(), &["a.wav", "b.wav"]);
        let out = tmp.path().join("clusters");

        let err = materialize_clusters(
            &files,
            &[1, 1, 2],
            &[0, 1, 2],
            AddressingMode::IndexCorrection,
            &out,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::MappingMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_materialize_appends_into_existing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("clusters");
        fs::create_dir_all(out.join("cluster_0001")).unwrap();
        fs::write(out.join("cluster_0001").join("old.wav"), b"old").unwrap();

        let files = touch_samples(tmp.path(), &["a.wav"]);
        materialize_clusters(&files, &[1], &[0], AddressingMode::IndexCorrection, &out)
            .unwrap();

        assert_eq!(count_files(&out.join("cluster_0001")), 2);
    }

    #[test]
    fn test_save_ordered_copies_writes_manifest_and_ranks() {
        let tmp = tempfile::tempdir().unwrap();
        let parent = tmp.path().join("library");
        fs::create_dir_all(parent.join("kicks")).unwrap();
        fs::write(parent.join("kicks/kd01.wav"), b"k1").unwrap();
        fs::write(parent.join("kicks/kd02.wav"), b"k2").unwrap();

        let outdir = tmp.path().join("ordered");
        let rels = vec![PathBuf::from("kicks/kd02.wav"), PathBuf::from("kicks/kd01.wav")];
        save_ordered_copies(&parent, &rels, &outdir).unwrap();

        assert!(outdir.join("00000.wav").exists());
        assert!(outdir.join("00001.wav").exists());
        assert_eq!(fs::read(outdir.join("00000.wav")).unwrap(), b"k2");

        let manifest = fs::read_to_string(outdir.join(MANIFEST_FILE)).unwrap();
        let lines: Vec<_> = manifest.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("kd02.wav"));
        assert!(lines[1].ends_with("kd01.wav"));
    }
}
