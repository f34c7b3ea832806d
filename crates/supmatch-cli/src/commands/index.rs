//! Index command - build the leading-word index for a supplier catalog.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use supmatch_core::catalog::CatalogIndex;

use super::config::load_config;

/// Arguments for the index command.
#[derive(Args)]
pub struct IndexArgs {
    /// Supplier catalog to index
    #[arg(short, long, default_value = "suppliernames.txt")]
    supplier: PathBuf,

    /// Print build statistics as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: IndexArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    config.validate()?;

    if !args.supplier.exists() {
        anyhow::bail!("Supplier catalog not found: {}", args.supplier.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Indexing {}...", args.supplier.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let supplier = args.supplier.clone();
    let index_config = config.index.clone();
    let stats = tokio::task::spawn_blocking(move || {
        CatalogIndex::build_files(&supplier, &index_config)
    })
    .await?;
    pb.finish_and_clear();
    let stats = stats?;

    if args.json {
        println!("{}", serde_json::to_string(&stats)?);
        return Ok(());
    }

    println!(
        "{} Indexed {} suppliers into {} groups in {:?}",
        style("✓").green(),
        stats.entries,
        stats.groups,
        start.elapsed()
    );
    println!(
        "   flattened catalog: {} ({} bytes)",
        config.index.flattened_path(&args.supplier).display(),
        stats.bytes
    );
    println!(
        "   offset map:        {}",
        config.index.offsets_path(&args.supplier).display()
    );

    Ok(())
}
