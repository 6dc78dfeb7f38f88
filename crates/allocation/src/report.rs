//! Report-shaped views over allocation output.
//!
//! These are data structures for a renderer to consume (one line per pairing,
//! one line per branch); formatting and export live outside the domain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use branchstock_core::{BranchName, DomainResult, ItemKey};
use branchstock_inventory::ItemBranchStock;

use crate::allocator::validate_stocks;
use crate::config::AllocationConfig;
use crate::position::{BranchPosition, BranchStatus};
use crate::suggestion::{
    BALANCED_TEXT, NEED_STOCK_TEXT, OVERSTOCK_TEXT, SuggestionFlag, TransferSuggestion,
};

/// Number of suggestion rows per flag category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCounts {
    pub transfer_to: usize,
    pub receive_from: usize,
    pub overstock: usize,
    pub need_stock: usize,
    pub balanced: usize,
}

impl FlagCounts {
    pub fn tally(suggestions: &[TransferSuggestion]) -> Self {
        suggestions.iter().fold(Self::default(), |mut counts, s| {
            match s.flag {
                SuggestionFlag::TransferTo { .. } => counts.transfer_to += 1,
                SuggestionFlag::ReceiveFrom { .. } => counts.receive_from += 1,
                SuggestionFlag::Overstock => counts.overstock += 1,
                SuggestionFlag::NeedStock => counts.need_stock += 1,
                SuggestionFlag::Balanced => counts.balanced += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.transfer_to + self.receive_from + self.overstock + self.need_stock + self.balanced
    }
}

/// One proposed movement between two branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub item_key: ItemKey,
    pub from_branch: BranchName,
    pub to_branch: BranchName,
    pub quantity: i64,
}

/// Extract the pairing list (one entry per `Transfer to` row), in row order.
pub fn transfers(suggestions: &[TransferSuggestion]) -> Vec<Transfer> {
    suggestions
        .iter()
        .filter_map(|s| match &s.flag {
            SuggestionFlag::TransferTo { branch, quantity } => Some(Transfer {
                item_key: s.item_key.clone(),
                from_branch: s.branch_name.clone(),
                to_branch: branch.clone(),
                quantity: *quantity,
            }),
            _ => None,
        })
        .collect()
}

/// Per-branch line combining stock position and suggested actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSummary {
    pub item_key: ItemKey,
    pub display_name: String,
    pub barcodes: Vec<String>,
    pub price: Option<f64>,
    pub brand: Option<String>,
    pub branch_name: BranchName,
    pub quantity: i64,
    pub display_qty: i64,
    pub backstock: i64,
    pub need: i64,
    pub surplus: i64,
    /// Transfer/receive actions joined with `"; "`, or the terminal flag.
    pub flag: String,
    /// Units moved in or out of this branch.
    pub transfer_qty: i64,
    /// Counterpart branches, in matching order.
    pub partners: Vec<BranchName>,
}

/// Build one summary per stock entry, in input order.
///
/// `suggestions` should come from `allocate` over the same `stocks` and
/// `config`; a branch without rows falls back to its status flag.
pub fn summarize(
    stocks: &[ItemBranchStock],
    suggestions: &[TransferSuggestion],
    config: &AllocationConfig,
) -> DomainResult<Vec<BranchSummary>> {
    config.validate()?;
    validate_stocks(stocks)?;

    let mut by_branch: HashMap<(&ItemKey, &BranchName), Vec<&TransferSuggestion>> = HashMap::new();
    for s in suggestions {
        by_branch
            .entry((&s.item_key, &s.branch_name))
            .or_default()
            .push(s);
    }

    let summaries = stocks
        .iter()
        .map(|stock| {
            let position = BranchPosition::new(stock.branch_name.clone(), stock.quantity, config);
            let rows = by_branch
                .get(&(&stock.item_key, &stock.branch_name))
                .map(Vec::as_slice)
                .unwrap_or_default();

            let actions: Vec<&TransferSuggestion> =
                rows.iter().copied().filter(|r| r.flag.is_transfer()).collect();
            let flag = if !actions.is_empty() {
                actions
                    .iter()
                    .map(|r| r.flag.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            } else if let Some(first) = rows.first() {
                first.flag.to_string()
            } else {
                status_text(position.status()).to_string()
            };

            let transfer_qty = actions.iter().filter_map(|r| r.quantity).sum::<i64>();
            let partners = actions
                .iter()
                .filter_map(|r| match &r.flag {
                    SuggestionFlag::TransferTo { branch, .. }
                    | SuggestionFlag::ReceiveFrom { branch, .. } => Some(branch.clone()),
                    _ => None,
                })
                .collect();

            BranchSummary {
                item_key: stock.item_key.clone(),
                display_name: stock.display_name.clone(),
                barcodes: stock.barcodes.clone(),
                price: stock.price,
                brand: stock.brand.clone(),
                branch_name: stock.branch_name.clone(),
                quantity: stock.quantity,
                display_qty: position.display_qty,
                backstock: position.backstock,
                need: position.deficit,
                surplus: position.surplus,
                flag,
                transfer_qty,
                partners,
            }
        })
        .collect();

    Ok(summaries)
}

fn status_text(status: BranchStatus) -> &'static str {
    match status {
        BranchStatus::Surplus => OVERSTOCK_TEXT,
        BranchStatus::Deficit => NEED_STOCK_TEXT,
        BranchStatus::Balanced => BALANCED_TEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate;
    use branchstock_core::DomainError;

    fn widget_stocks() -> Vec<ItemBranchStock> {
        vec![
            ItemBranchStock::new("widget", "Widget", "A", 20),
            ItemBranchStock::new("widget", "Widget", "B", 3),
            ItemBranchStock::new("widget", "Widget", "C", 10),
        ]
    }

    #[test]
    fn tally_counts_each_category() {
        let config = AllocationConfig::new(8, 2, 2);
        let rows = allocate(&widget_stocks(), &config).unwrap();
        let counts = FlagCounts::tally(&rows);
        assert_eq!(
            counts,
            FlagCounts {
                transfer_to: 1,
                receive_from: 1,
                overstock: 1,
                need_stock: 0,
                balanced: 1,
            }
        );
        assert_eq!(counts.total(), rows.len());
    }

    #[test]
    fn transfers_lists_one_entry_per_pairing() {
        let config = AllocationConfig::new(8, 2, 2);
        let rows = allocate(&widget_stocks(), &config).unwrap();
        assert_eq!(
            transfers(&rows),
            vec![Transfer {
                item_key: ItemKey::new("widget"),
                from_branch: BranchName::new("A"),
                to_branch: BranchName::new("B"),
                quantity: 7,
            }]
        );
    }

    #[test]
    fn summary_combines_position_and_actions() {
        let config = AllocationConfig::new(8, 2, 2);
        let stocks = widget_stocks();
        let rows = allocate(&stocks, &config).unwrap();
        let summaries = summarize(&stocks, &rows, &config).unwrap();

        assert_eq!(summaries.len(), 3);

        let a = &summaries[0];
        assert_eq!(a.branch_name.as_str(), "A");
        assert_eq!((a.display_qty, a.backstock, a.need, a.surplus), (8, 12, 0, 10));
        assert_eq!(a.flag, "Transfer to B x7");
        assert_eq!(a.transfer_qty, 7);
        assert_eq!(a.partners, vec![BranchName::new("B")]);

        let b = &summaries[1];
        assert_eq!(b.flag, "Receive from A x7");
        assert_eq!(b.need, 7);
        assert_eq!(b.partners, vec![BranchName::new("A")]);

        let c = &summaries[2];
        assert_eq!(c.flag, "Balanced");
        assert_eq!(c.transfer_qty, 0);
        assert!(c.partners.is_empty());
    }

    #[test]
    fn summary_joins_multiple_actions() {
        let config = AllocationConfig::new(5, 0, 1);
        let stocks = vec![
            ItemBranchStock::new("item", "Item", "Hub", 15),
            ItemBranchStock::new("item", "Item", "East", 0),
            ItemBranchStock::new("item", "Item", "West", 0),
        ];
        let rows = allocate(&stocks, &config).unwrap();
        let summaries = summarize(&stocks, &rows, &config).unwrap();

        assert_eq!(summaries[0].flag, "Transfer to East x5; Transfer to West x5");
        assert_eq!(summaries[0].transfer_qty, 10);
        assert_eq!(
            summaries[0].partners,
            vec![BranchName::new("East"), BranchName::new("West")]
        );
    }

    #[test]
    fn summary_without_rows_falls_back_to_status() {
        let config = AllocationConfig::new(5, 0, 1);
        let stocks = vec![ItemBranchStock::new("item", "Item", "Solo", 0)];
        let summaries = summarize(&stocks, &[], &config).unwrap();
        assert_eq!(summaries[0].flag, "Need stock — consider PO");
    }

    #[test]
    fn summarize_rejects_negative_quantity() {
        let config = AllocationConfig::default();
        let stocks = vec![
            ItemBranchStock::new("item", "Item", "A", 4),
            ItemBranchStock::new("item", "Item", "B", i64::MIN),
        ];
        let err = summarize(&stocks, &[], &config).unwrap_err();
        match err {
            DomainError::InvalidInput { index, .. } => assert_eq!(index, 1),
            _ => panic!("Expected InvalidInput error for negative quantity"),
        }
    }

    #[test]
    fn summarize_rejects_duplicate_item_branch_entries() {
        let stocks = vec![
            ItemBranchStock::new("item", "Item", "A", 4),
            ItemBranchStock::new("item", "Item", "A", 1),
        ];
        let err = summarize(&stocks, &[], &AllocationConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn summarize_rejects_invalid_config() {
        let err = summarize(&[], &[], &AllocationConfig::new(0, 0, 0)).unwrap_err();
        assert!(err.is_invalid_config());
    }
}
