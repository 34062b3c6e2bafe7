use kitsort::{organize, ClusterCriterion, OrganizeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-cut a persisted merge tree into a chosen number of groups and
    // copy the samples into per-cluster directories.
    //
    // Usage: organize_samples <data_dir> <target_clusters> [max_clust]
    //
    // <data_dir> must hold the sample wavs plus a `linkage.json` from a
    // previous clustering pass (see the rank_by_similarity demo).

    let mut args = std::env::args().skip(1);
    let data_dir = args.next().ok_or("usage: organize_samples <data_dir> <target> [max_clust]")?;
    let target: usize = args
        .next()
        .ok_or("usage: organize_samples <data_dir> <target> [max_clust]")?
        .parse()?;
    let direct = args.next().as_deref() == Some("max_clust");

    let mut config = OrganizeConfig::new(&data_dir, target);
    if direct {
        // Direct cut: fails instead of approximating when tied merge
        // distances make the exact count unreachable.
        config = config.with_criterion(ClusterCriterion::MaxClust(target));
    }

    let summary = organize(&config)?;
    println!(
        "copied {} files into {} cluster directories under {}/clusters",
        summary.n_files, summary.n_clusters, data_dir
    );
    if !summary.exact {
        println!(
            "note: target {} was not reachable; got {} clusters",
            target, summary.n_clusters
        );
    }

    Ok(())
}
