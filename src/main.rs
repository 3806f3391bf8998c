//! Batch runner: read an email export, run the triage pipeline, write the
//! scored records and optional run summary.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;

use jobtrail::config::PipelineConfig;
use jobtrail::error::JobtrailError;
use jobtrail::resolve::entity;
use jobtrail::{io, run_batch};

#[derive(Parser)]
#[command(name = "jobtrail", about = "Triage a job-application email export")]
struct Cli {
    /// Input CSV of ingested email records.
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV of scored pipeline records.
    #[arg(short, long)]
    output: PathBuf,

    /// Optional JSON file for the batch summary metrics.
    #[arg(short, long)]
    summary: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for recency calculations.
    /// Defaults to today.
    #[arg(long)]
    as_of: Option<String>,

    /// Optional JSON config overriding pipeline defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable the organization-entity fallback regardless of config.
    #[arg(long)]
    no_entity_fallback: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig, JobtrailError> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|_| JobtrailError::ConfigNotReadable(path.clone()))?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn reference_date(as_of: Option<&str>) -> Result<NaiveDateTime, JobtrailError> {
    match as_of {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| JobtrailError::InvalidReferenceDate(raw.to_string())),
        None => Ok(Local::now().naive_local()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref()).context("loading pipeline config")?;
    if cli.no_entity_fallback {
        config.entity_fallback = false;
    }

    let reference = reference_date(cli.as_of.as_deref())?;
    log::info!("reference date: {}", reference.date());

    let records = io::read_records(&cli.input).context("reading input batch")?;
    log::info!("loaded {} records from {}", records.len(), cli.input.display());

    let recognizer = entity::load_recognizer(config.entity_fallback, config.body_prefix_chars);
    let output = run_batch(records, &config, recognizer.as_ref(), reference);

    io::write_records(&cli.output, &output.records).context("writing scored records")?;
    if let Some(summary_path) = &cli.summary {
        io::write_json(summary_path, &output.metrics).context("writing batch summary")?;
        log::info!("wrote summary to {}", summary_path.display());
    }

    let metrics = &output.metrics;
    log::info!(
        "{} records: {} active, {} ghosted, {} high-priority, {} companies",
        metrics.summary.total_records,
        metrics.summary.active_opportunities,
        metrics.summary.ghosted_opportunities,
        metrics.summary.high_priority_items,
        metrics.summary.companies_engaged
    );
    Ok(())
}
