use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod event;
mod log;
mod logging;
mod model;
mod report;

pub type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// `[LOG Monitor][WARN] ...` lines on stderr as findings occur.
    Text,
    /// One JSON report (findings, processes, summary) on stdout.
    Json,
}

#[derive(Parser)]
#[command(name = "log-monitor")]
#[command(about = "Flag processes whose START/END log entries are too far apart", long_about = None)]
struct Cli {
    /// Log file with `HH:MM:SS,description,START|END,pid` lines.
    file: PathBuf,

    /// Warn when a process runs longer than this many minutes.
    #[arg(long, value_name = "MINUTES", default_value_t = 5)]
    warn_after: u32,

    /// Error when a process runs longer than this many minutes.
    #[arg(long, value_name = "MINUTES", default_value_t = 10)]
    error_after: u32,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Debug diagnostics (skipped rows, every computed duration).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let thresholds = model::Thresholds::new(cli.warn_after, cli.error_after)?;

    // 1) Locate + read + split.
    let (full_path, rows) = log::parse_log_file(&cli.file)?;
    tracing::debug!(
        path = %full_path.display(),
        rows = rows.len(),
        warn_after_min = thresholds.warn_after_min(),
        error_after_min = thresholds.error_after_min(),
        "read log file"
    );

    // 2) Aggregate + report.
    let summary = match cli.format {
        OutputFormat::Text => {
            let mut reporter = report::ConsoleReporter::stderr();
            let aggregator = model::aggregate(&rows, thresholds, &mut reporter)?;
            aggregator.summary()
        }
        OutputFormat::Json => {
            let mut reporter = report::CollectingReporter::default();
            let aggregator = model::aggregate(&rows, thresholds, &mut reporter)?;
            let data = model::build_report_data(&aggregator, reporter.findings);
            print!("{}", report::render_json_report(&data)?);
            data.summary
        }
    };

    tracing::info!(
        rows = summary.rows,
        skipped = summary.skipped_rows,
        completed = summary.completed,
        open = summary.open,
        orphaned = summary.orphaned,
        warnings = summary.warnings,
        errors = summary.errors,
        "processed {}",
        full_path.display()
    );

    Ok(())
}
