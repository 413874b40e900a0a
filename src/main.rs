use anyhow::Context;
use clap::Parser;
use compute::Crossings;
use read::read_crossings;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use write::write_report;

mod compute;
mod data;
mod index;
mod read;
mod write;

/// Monthly border crossing totals with their running averages.
#[derive(Parser)]
#[command(name = "border_crossing", version)]
struct Cli {
    /// Border crossing entries (CSV with a header line)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the report
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr, the report file is the only output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut crossings = Crossings::new();
    let input = std::fs::File::open(&cli.input)
        .with_context(|| format!("cannot open {}", cli.input.display()))?;
    read_crossings(input, &mut crossings)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;

    let rows = crossings.report();
    let output = std::fs::File::create(&cli.output)
        .with_context(|| format!("cannot create {}", cli.output.display()))?;
    write_report(output, &rows)
        .with_context(|| format!("cannot write {}", cli.output.display()))?;

    info!(
        records = crossings.len(),
        rows = rows.len(),
        output = %cli.output.display(),
        "Report written"
    );
    Ok(())
}
