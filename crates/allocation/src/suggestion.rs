use serde::{Serialize, Serializer};

use branchstock_core::{BranchName, ItemKey};

pub const OVERSTOCK_TEXT: &str = "Overstock — keep or transfer";
pub const NEED_STOCK_TEXT: &str = "Need stock — consider PO";
pub const BALANCED_TEXT: &str = "Balanced";

/// Human-readable action for one (item, branch) row.
///
/// Report renderers match on the exact text, so `Display` is the wire format
/// and serialization goes through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionFlag {
    /// Donor side of a pairing: `Transfer to <branch> xN`.
    TransferTo { branch: BranchName, quantity: i64 },
    /// Receiver side of a pairing: `Receive from <branch> xN`.
    ReceiveFrom { branch: BranchName, quantity: i64 },
    /// Residual surplus nobody could take.
    Overstock,
    /// Residual deficit nobody could cover.
    NeedStock,
    Balanced,
}

impl SuggestionFlag {
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            SuggestionFlag::TransferTo { .. } | SuggestionFlag::ReceiveFrom { .. }
        )
    }
}

impl core::fmt::Display for SuggestionFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SuggestionFlag::TransferTo { branch, quantity } => {
                write!(f, "Transfer to {branch} x{quantity}")
            }
            SuggestionFlag::ReceiveFrom { branch, quantity } => {
                write!(f, "Receive from {branch} x{quantity}")
            }
            SuggestionFlag::Overstock => f.write_str(OVERSTOCK_TEXT),
            SuggestionFlag::NeedStock => f.write_str(NEED_STOCK_TEXT),
            SuggestionFlag::Balanced => f.write_str(BALANCED_TEXT),
        }
    }
}

impl Serialize for SuggestionFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One output row of an allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferSuggestion {
    pub item_key: ItemKey,
    pub display_name: String,
    /// Branch this row is reported against.
    pub branch_name: BranchName,
    pub from_branch: Option<BranchName>,
    pub to_branch: Option<BranchName>,
    /// Moved units for transfer rows, residual units for Overstock/NeedStock,
    /// absent for Balanced.
    pub quantity: Option<i64>,
    pub flag: SuggestionFlag,
}
