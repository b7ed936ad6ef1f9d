#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

use std::path::PathBuf;

use abd_hac::{cophenetic_correlation, metric::Euclidean, DiskIO, HacConfig, HierarchicalClustering, Registry};
use clap::Parser;

mod utils;

/// Hierarchical clustering of synthetic blobs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The linkage to cluster with.
    #[arg(short('l'), long, default_value = "average")]
    linkage: String,

    /// The cutoff strategy: `hill-climb`, `naive` or `cophenetic`.
    #[arg(short('c'), long, default_value = "hill-climb")]
    cutoff: String,

    /// The internal evaluator for the cutoff strategy.
    #[arg(short('e'), long, default_value = "silhouette")]
    evaluator: Option<String>,

    /// The number of blobs.
    #[arg(short('k'), long, default_value_t = 8)]
    num_blobs: usize,

    /// The number of points per blob.
    #[arg(short('n'), long, default_value_t = 50)]
    blob_size: usize,

    /// The dimensionality of the points.
    #[arg(short('d'), long, default_value_t = 2)]
    dimensionality: usize,

    /// The seed for the random number generator.
    #[arg(short('s'), long, default_value_t = 42)]
    seed: u64,

    /// Path to the output directory.
    #[arg(short('o'), long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let log_name = format!("hac-{}-{}", args.linkage, args.cutoff);
    let (_guard, log_path) = utils::configure_logger(&log_name)?;
    println!("Log file: {log_path:?}");

    ftlog::info!("{args:?}");

    let out_dir = if let Some(out_dir) = args.out_dir {
        out_dir
    } else {
        ftlog::info!("No output directory specified. Using default.");
        PathBuf::from(".").join("hac_results")
    };
    if !out_dir.exists() {
        std::fs::create_dir(&out_dir).map_err(|e| e.to_string())?;
    }
    let out_dir = out_dir.canonicalize().map_err(|e| e.to_string())?;
    ftlog::info!("Output directory: {out_dir:?}");

    let (data, truth) = utils::gen_blobs(args.num_blobs, args.blob_size, args.dimensionality, args.seed);
    ftlog::info!("Generated {} points in {} blobs.", data.len(), args.num_blobs);

    let registry = Registry::with_defaults();
    let config = HacConfig {
        linkage: args.linkage.clone(),
        keep_proximity: true,
        ..HacConfig::default()
    };
    let hac = HierarchicalClustering::new(config).map_err(|e| e.to_string())?;

    let start = std::time::Instant::now();
    let mut result = hac.hierarchy(&data, &Euclidean).map_err(|e| e.to_string())?;
    ftlog::info!("Built the tree in {:.3} seconds.", start.elapsed().as_secs_f64());

    if let Some(proximity) = result.proximity() {
        let cpcc = cophenetic_correlation(result.tree(), proximity).map_err(|e| e.to_string())?;
        ftlog::info!("Cophenetic correlation: {cpcc:.4}");
        println!("Cophenetic correlation: {cpcc:.4}");
    }

    let strategy = registry
        .cutoff(&args.cutoff, args.evaluator.as_deref())
        .map_err(|e| e.to_string())?;
    let cutoff = strategy.find_cutoff(&mut result).map_err(|e| e.to_string())?;
    let clustering = result.clustering().ok_or("No clustering after the cutoff search")?;

    let mut sizes = clustering.sizes();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    let agreement = utils::rand_index(clustering.labels(), &truth);
    ftlog::info!("Cutoff {cutoff:.4} gives {} clusters of sizes {sizes:?}.", clustering.len());
    ftlog::info!("Rand index against the blobs: {agreement:.4}");
    println!("Cutoff {cutoff:.4}: {} clusters, Rand index {agreement:.4}", clustering.len());

    let tree_path = out_dir.join(format!("{log_name}.tree"));
    result.tree().write_to(&tree_path).map_err(|e| e.to_string())?;
    ftlog::info!("Wrote the tree to {tree_path:?}");

    Ok(())
}
