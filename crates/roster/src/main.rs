use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::config::DEFAULT_CONFIG_FILE;
use roster_core::{run_file, CanonicalRecord, PipelineOutput, RosterConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize trick-or-treat trail registrations into a participant table", long_about = None)]
struct Cli {
    /// TOML config file (roster.toml is used when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Registration export to read
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Participant table to write
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Number of retained rows to preview
    #[arg(long)]
    preview: Option<usize>,
    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
    /// Print the run summary as JSON after the preview
    #[arg(long)]
    summary_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);
    dotenvy::dotenv().ok();

    let config = build_config(&cli, |key| std::env::var(key).ok())?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        "starting roster run"
    );

    println!("Reading CSV file...");
    let output = run_file(&config.input, &config.output).with_context(|| {
        format!(
            "failed to build participant table from {}",
            config.input.display()
        )
    })?;

    for line in report_lines(&output, &config) {
        println!("{line}");
    }
    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&output.summary)?);
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Flags beat environment, environment beats the config file.
fn build_config<F>(cli: &Cli, env_lookup: F) -> Result<RosterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match &cli.config {
        Some(path) => RosterConfig::load(path)?,
        None => RosterConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    let mut config = config
        .with_env_lookup(env_lookup)
        .context("invalid ROSTER_* environment")?;

    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(preview) = cli.preview {
        config.preview = preview;
    }
    Ok(config)
}

fn report_lines(output: &PipelineOutput, config: &RosterConfig) -> Vec<String> {
    let summary = &output.summary;
    let mut lines = vec![
        format!("Parsed {} rows from source CSV", summary.rows_parsed),
        format!("Filtered to {} valid participants", summary.rows_retained),
        format!(
            "Wrote {} rows -> {}",
            summary.rows_retained,
            config.output.display()
        ),
    ];
    let shown = config.preview.min(output.records.len());
    if shown > 0 {
        lines.push(String::new());
        lines.push(format!("Sample of first {shown} entries:"));
        lines.extend(preview_lines(&output.records, shown));
    }
    lines
}

fn preview_lines(records: &[CanonicalRecord], count: usize) -> Vec<String> {
    records
        .iter()
        .take(count)
        .enumerate()
        .map(|(idx, record)| format!("{}. {} - {}", idx + 1, record.theme, record.address))
        .collect()
}
