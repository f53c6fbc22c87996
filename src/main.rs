use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use seller_report::{
    analysis::{LeadSummary, MetricsBundle},
    config::ReportConfig,
    io::{self, CsvFormat, DatasetReader},
    models::Dataset,
    report::render_report,
    visualization::{print_lead_summary, print_metrics_tables, print_preview_table},
};

#[derive(Parser)]
#[command(
    name = "seller-report",
    about = "Vacant Land Seller Report - lead list statistics, charts, and a PDF report",
    version,
    author
)]
struct Cli {
    /// TOML configuration file (column names, output paths, thresholds)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview a lead list and show quick summary metrics
    Summary {
        /// Path to the input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of preview rows (defaults to the configured value)
        #[arg(short, long)]
        rows: Option<usize>,
    },

    /// Compute the metrics bundle and print it as JSON
    Metrics {
        /// Path to the input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Generate the PDF report
    Report {
        /// Path to the input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for chart images
        #[arg(long)]
        chart_dir: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    match path {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ReportConfig::default()),
    }
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ext != "csv" {
        anyhow::bail!("Unsupported file format: .{ext}. Use a .csv lead list export");
    }
    CsvFormat
        .read(path)
        .with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { input, rows } => {
            let dataset = load_dataset(&input)?;
            println!(
                "\n{}",
                format!("Lead List: {}", input.display()).bold().cyan()
            );

            print_preview_table(&dataset, rows.unwrap_or(config.report.preview_rows));
            print_lead_summary(&LeadSummary::compute(&dataset, &config));
            println!();
        }

        Commands::Metrics { input, pretty } => {
            let dataset = load_dataset(&input)?;
            let bundle = MetricsBundle::compute(&dataset, &config)?;
            println!("{}", io::metrics_to_json(&bundle, pretty)?);
        }

        Commands::Report {
            input,
            output,
            chart_dir,
        } => {
            let config = config.with_paths(output, chart_dir);
            let dataset = load_dataset(&input)?;

            let bundle = MetricsBundle::compute(&dataset, &config)?;
            print_metrics_tables(&bundle);

            let path = render_report(&dataset, &bundle, &config)?;
            println!(
                "\n{} Report saved to {}",
                "Success:".green().bold(),
                path.display()
            );
        }
    }

    Ok(())
}
