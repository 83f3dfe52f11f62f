use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;

use topterms_core::ReportMeta;

mod convert;

#[derive(Debug, Parser)]
#[command(name = "topterms-cli")]
#[command(about = "Convert an Amazon Top Search Terms report to NDJSON for bulk loading")]
struct Cli {
    /// Path to the downloaded report JSON file
    input: Option<PathBuf>,

    /// Output path; defaults to the input path with `.json` replaced by
    /// `.bigquery.ndjson`
    #[arg(long)]
    output: Option<PathBuf>,

    /// Report document ID stamped onto every output row
    #[arg(long, default_value = "1520525020276")]
    report_id: String,

    /// Marketplace ID stamped onto every output row
    #[arg(long, default_value = "ATVPDKIKX0DER")]
    marketplace: String,

    /// First day covered by the report week (YYYY-MM-DD)
    #[arg(long, default_value = "2025-04-06")]
    week_start: NaiveDate,

    /// Last day covered by the report week (YYYY-MM-DD)
    #[arg(long, default_value = "2025-04-12")]
    week_end: NaiveDate,
}

fn main() -> anyhow::Result<()> {
    let config = topterms_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    let input = cli
        .input
        .context("usage: topterms-cli <report.json> [--output PATH]")?;
    let meta = ReportMeta {
        report_id: cli.report_id,
        marketplace_id: cli.marketplace,
        week_start_date: cli.week_start,
        week_end_date: cli.week_end,
    };

    convert::run_convert(&config, &input, cli.output.as_deref(), meta)
}
