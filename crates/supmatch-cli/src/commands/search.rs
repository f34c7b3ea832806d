//! Search command - find the catalog supplier named on an invoice.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use supmatch_core::matcher::MatcherKind;
use supmatch_core::search::{SearchMode, SearchOutcome, SearchReport, SupplierSearch};

use super::config::load_config;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Invoice token dump
    #[arg(short, long, default_value = "invoice.txt")]
    invoice: PathBuf,

    /// Supplier catalog (index artifacts are looked up next to it)
    #[arg(short, long, default_value = "suppliernames.txt")]
    supplier: PathBuf,

    /// Number of concurrent workers (exhaustive mode)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Search mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Matcher used by exhaustive mode
    #[arg(long, value_enum)]
    matcher: Option<MatcherArg>,

    /// Buffer size between the catalog reader and the workers
    #[arg(long)]
    channel_capacity: Option<usize>,

    /// Read only the first catalog line per index hit (selective mode)
    #[arg(long)]
    single_line: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Stream the whole catalog through a worker pool
    Exhaustive,
    /// Use the prebuilt index to fetch only relevant suppliers
    Selective,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Exhaustive => SearchMode::Exhaustive,
            ModeArg::Selective => SearchMode::Selective,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum MatcherArg {
    /// Linear subsequence scan
    Linear,
    /// Position-index subsequence lookup
    Positional,
    /// Consecutive words on the same or next line
    Adjacency,
}

impl From<MatcherArg> for MatcherKind {
    fn from(matcher: MatcherArg) -> Self {
        match matcher {
            MatcherArg::Linear => MatcherKind::Linear,
            MatcherArg::Positional => MatcherKind::Positional,
            MatcherArg::Adjacency => MatcherKind::Adjacency,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: SearchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    // Command-line flags take precedence over the config file
    if let Some(workers) = args.workers {
        config.search.workers = workers;
    }
    if let Some(mode) = args.mode {
        config.search.mode = mode.into();
    }
    if let Some(matcher) = args.matcher {
        config.search.matcher = matcher.into();
    }
    if let Some(capacity) = args.channel_capacity {
        config.search.channel_capacity = capacity;
    }
    if args.single_line {
        config.index.read_full_group = false;
    }

    let search = SupplierSearch::new(config)?;

    if !args.invoice.exists() {
        anyhow::bail!("Invoice file not found: {}", args.invoice.display());
    }
    if search.config().search.mode == SearchMode::Selective {
        let offsets = search.config().index.offsets_path(&args.supplier);
        if !offsets.exists() {
            anyhow::bail!(
                "Catalog index not found at {}.\n\n\
                 Run 'supmatch index -s {}' to build it.",
                offsets.display(),
                args.supplier.display()
            );
        }
    } else if !args.supplier.exists() {
        anyhow::bail!("Supplier catalog not found: {}", args.supplier.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Searching ({} mode)...", search.config().search.mode));
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = search.run(&args.invoice, &args.supplier).await;
    pb.finish_and_clear();
    let report = report?;

    debug!(
        "Tested {} candidates in {}ms",
        report.candidates, report.processing_time_ms
    );

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_report(report: &SearchReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &SearchReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "status",
        "supplier_id",
        "supplier_name",
        "mode",
        "pages",
        "words",
        "candidates",
        "processing_time_ms",
    ])?;

    let (status, id, name) = match &report.outcome {
        SearchOutcome::Found(supplier) => ("found", supplier.id.as_str(), supplier.name.as_str()),
        SearchOutcome::NotFound => ("not_found", "", ""),
    };

    wtr.write_record([
        status,
        id,
        name,
        &report.mode.to_string(),
        &report.pages.to_string(),
        &report.words.to_string(),
        &report.candidates.to_string(),
        &report.processing_time_ms.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &SearchReport) -> String {
    let mut output = String::new();

    match &report.outcome {
        SearchOutcome::Found(supplier) => {
            output.push_str(&format!("supplier name found: {}\n", supplier));
        }
        SearchOutcome::NotFound => {
            output.push_str("supplier name not found\n");
        }
    }

    output.push_str(&format!(
        "\nMode: {}\nPages: {}\nWords: {}\nCandidates tested: {}\nTime: {}ms",
        report.mode, report.pages, report.words, report.candidates, report.processing_time_ms
    ));

    output
}
