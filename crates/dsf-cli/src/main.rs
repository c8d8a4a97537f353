//! dsf-report CLI - builds the DNA structure workbook from a zip of shape files

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dsf_core::{DuplicatePolicy, ParseFailurePolicy};
use dsf_report::{generate_report, ReportArtifact, ReportOptions, DEFAULT_FILE_NAME};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dsf-report")]
#[command(
    author,
    version,
    about = "Combine DNA shape measurement files into a two-sheet XLSX report"
)]
struct Cli {
    /// Zip archive of whitespace-delimited measurement files
    #[arg(short, long)]
    archive: PathBuf,

    /// Sequence file: a marker line with the identifier, then the sequence
    #[arg(short, long)]
    sequences: PathBuf,

    /// Output workbook (default: dna_structure_report.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Entry extension to include, without the dot; repeatable (default: txt)
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Abort on the first entry that cannot be parsed instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Fail when two entries map to the same table name
    #[arg(long)]
    reject_duplicates: bool,

    /// Decimal places kept in values and means
    #[arg(short, long, default_value_t = 5)]
    decimals: u32,

    /// Widest a column may be auto-sized to, in characters
    #[arg(long, value_name = "W", default_value_t = dsf_report::DEFAULT_MAX_COLUMN_WIDTH)]
    max_width: f64,

    /// Marker that starts a sequence identifier line
    #[arg(long, default_value_t = dsf_core::DEFAULT_MARKER)]
    marker: char,

    /// Log every parsed entry
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn report_options(&self) -> ReportOptions {
        let mut options = ReportOptions {
            marker: self.marker,
            max_column_width: Some(self.max_width),
            ..ReportOptions::default()
        };
        if !self.extensions.is_empty() {
            options.batch.extensions = self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();
        }
        if self.strict {
            options.batch.parse_failure = ParseFailurePolicy::Abort;
        }
        if self.reject_duplicates {
            options.batch.duplicates = DuplicatePolicy::Reject;
        }
        options.batch.decimals = self.decimals;
        options
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
    }
}

/// Warnings reach the user through the summary, so quiet runs only log errors
fn init_logging(verbose: bool) {
    let default = if verbose { "dsf=debug" } else { "dsf=error" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn read_input(path: &Path, what: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {what} '{}'", path.display()))
}

fn run(cli: &Cli) -> Result<ReportArtifact> {
    let archive = read_input(&cli.archive, "archive")?;
    let sequences = read_input(&cli.sequences, "sequence file")?;
    let sequences = String::from_utf8(sequences).with_context(|| {
        format!(
            "Sequence file '{}' is not valid UTF-8",
            cli.sequences.display()
        )
    })?;
    debug!(
        archive_bytes = archive.len(),
        sequence_bytes = sequences.len(),
        "inputs loaded"
    );

    let artifact = generate_report(&archive, &sequences, &cli.report_options())
        .with_context(|| format!("Failed to build a report from '{}'", cli.archive.display()))?;

    let output = cli.output_path();
    std::fs::write(&output, &artifact.bytes)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    Ok(artifact)
}

fn print_summary(artifact: &ReportArtifact, output: &Path) {
    let summary = &artifact.summary;
    eprintln!(
        "Wrote {} table(s) x {} row(s) to '{}'",
        summary.table_names.len(),
        summary.row_count,
        output.display()
    );
    for warning in &summary.warnings {
        eprintln!("warning: {warning}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(artifact) => {
            print_summary(&artifact, &cli.output_path());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
