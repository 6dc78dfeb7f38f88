
use branchstock_core::BranchName;

use crate::config::AllocationConfig;

/// Where a branch stands against the required quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStatus {
    Deficit,
    Balanced,
    Surplus,
}

/// One branch's stock position for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPosition {
    pub branch_name: BranchName,
    pub quantity: i64,
    pub required_qty: i64,
    pub surplus: i64,
    pub deficit: i64,
    /// Units that fit on the shelf (`min(quantity, display_target)`).
    pub display_qty: i64,
    /// Units held behind the shelf.
    pub backstock: i64,
}

impl BranchPosition {
    /// Expects a validated config and a non-negative quantity.
    pub fn new(branch_name: BranchName, quantity: i64, config: &AllocationConfig) -> Self {
        let required_qty = config.required_qty();
        let display_qty = quantity.min(config.display_target);

        Self {
            branch_name,
            quantity,
            required_qty,
            surplus: (quantity - required_qty).max(0),
            deficit: (required_qty - quantity).max(0),
            display_qty,
            backstock: quantity - display_qty,
        }
    }

    pub fn status(&self) -> BranchStatus {
        if self.surplus > 0 {
            BranchStatus::Surplus
        } else if self.deficit > 0 {
            BranchStatus::Deficit
        } else {
            BranchStatus::Balanced
        }
    }
}
