use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use branchstock_allocation::{
    AllocationConfig, BranchSummary, FlagCounts, Transfer, TransferSuggestion, allocate, summarize,
    transfers,
};
use branchstock_core::DomainResult;
use branchstock_inventory::{StockRecord, StockRow, aggregate};

/// Everything one run produces, ready to be serialized for a renderer.
#[derive(Debug, Serialize)]
pub struct Report {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config: AllocationConfig,
    pub counts: FlagCounts,
    pub suggestions: Vec<TransferSuggestion>,
    pub transfers: Vec<Transfer>,
    pub branches: Vec<BranchSummary>,
}

impl Report {
    pub fn build(records: Vec<StockRecord>, config: AllocationConfig) -> DomainResult<Self> {
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!("report", %run_id);
        let _guard = span.enter();

        let rows: Vec<StockRow> = records.into_iter().map(StockRow::from).collect();
        let stocks = aggregate(&rows)?;
        let suggestions = allocate(&stocks, &config)?;
        let branches = summarize(&stocks, &suggestions, &config)?;

        Ok(Self {
            run_id,
            generated_at: Utc::now(),
            config,
            counts: FlagCounts::tally(&suggestions),
            transfers: transfers(&suggestions),
            suggestions,
            branches,
        })
    }
}
