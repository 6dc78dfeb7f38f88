//! Stock redistribution across branches.
//!
//! Given aggregated per-item, per-branch stock and an [`AllocationConfig`],
//! classifies every branch and proposes transfers from surplus branches to
//! deficit branches, or flags residual overstock / purchase needs.
//!
//! Pure and deterministic: no IO, no shared state between items.

pub mod allocator;
pub mod config;
pub mod position;
pub mod report;
pub mod suggestion;

pub use allocator::allocate;
pub use config::AllocationConfig;
pub use position::{BranchPosition, BranchStatus};
pub use report::{BranchSummary, FlagCounts, Transfer, summarize, transfers};
pub use suggestion::{SuggestionFlag, TransferSuggestion};
