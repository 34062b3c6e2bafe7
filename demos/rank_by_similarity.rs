use std::path::PathBuf;

use kitsort::{cluster_and_save_order, save_linkage, Linkage, LINKAGE_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Minimal end-to-end: feature matrix -> ward merge tree ->
    // similarity-ordered renamed copies + persisted linkage.
    //
    // Real runs get their feature rows from an upstream extractor (one
    // flattened short-term descriptor vector per sample). Here we fake a
    // tiny library of nine "samples" in three obvious timbre groups so
    // the demo is self-contained.

    let parent = PathBuf::from("demo_library");
    std::fs::create_dir_all(&parent)?;

    let mut names = Vec::new();
    let mut features = Vec::new();
    for (center, prefix) in [(0.0f64, "kick"), (40.0, "snare"), (90.0, "hat")] {
        for i in 0..3 {
            let name = PathBuf::from(format!("{prefix}{i:02}.wav"));
            std::fs::write(parent.join(&name), b"fake wav payload")?;
            features.push(vec![center + i as f64 * 0.3, center - i as f64 * 0.2]);
            names.push(name);
        }
    }

    let outdir = PathBuf::from("demo_library_ordered");
    let tree = cluster_and_save_order(&features, &names, &parent, &outdir, Linkage::Ward)?;
    save_linkage(&tree, &outdir.join(LINKAGE_FILE))?;

    println!(
        "wrote {} similarity-ordered copies to {} and persisted the tree",
        names.len(),
        outdir.display()
    );
    println!("next: organize_samples {} <target_clusters>", outdir.display());

    Ok(())
}
