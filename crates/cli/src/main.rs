//! `branchstock [INPUT.json]`
//!
//! Reads a JSON array of stock records (file argument, or stdin), computes
//! transfer suggestions and prints the report as JSON on stdout. Allocation
//! parameters come from `BRANCHSTOCK_*` environment variables.

mod config;
mod report;

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;

use branchstock_inventory::StockRecord;

use crate::report::Report;

fn main() -> anyhow::Result<()> {
    branchstock_observability::init();

    let config = config::from_env().context("invalid allocation parameters")?;
    let input = std::env::args().nth(1);
    let records = read_records(input.as_deref())?;
    tracing::info!(
        records = records.len(),
        source = input.as_deref().unwrap_or("stdin"),
        "loaded stock records"
    );

    let report = Report::build(records, config).context("allocation failed")?;

    serde_json::to_writer_pretty(io::stdout().lock(), &report).context("failed to write report")?;
    println!();
    Ok(())
}

fn read_records(path: Option<&str>) -> anyhow::Result<Vec<StockRecord>> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse stock records from {path}"))
        }
        None => serde_json::from_reader(io::stdin().lock())
            .context("failed to parse stock records from stdin"),
    }
}
