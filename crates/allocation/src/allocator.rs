//! Greedy per-item stock redistribution.
//!
//! Model, per item:
//! - Classify every branch against `display_target + safety_backstock`.
//! - Pair the largest remaining surplus with the largest remaining deficit,
//!   ties broken by branch name, moving `min(capacity, need)` units.
//! - Only donors and receivers with at least `min_transfer_qty` left take
//!   part, so no pairing ever moves fewer units than the floor.
//! - Whatever is left over is reported as Overstock / Need stock.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use branchstock_core::{BranchName, DomainError, DomainResult, ItemKey};
use branchstock_inventory::ItemBranchStock;

use crate::config::AllocationConfig;
use crate::position::{BranchPosition, BranchStatus};
use crate::report::FlagCounts;
use crate::suggestion::{SuggestionFlag, TransferSuggestion};

/// All stock entries of one item, in input order.
#[derive(Debug)]
struct ItemGroup<'a> {
    item_key: &'a ItemKey,
    display_name: &'a str,
    stocks: Vec<&'a ItemBranchStock>,
}

/// Remaining capacity (donor) or need (receiver) of a branch during pairing.
#[derive(Debug)]
struct Slot<'a> {
    branch: &'a BranchName,
    remaining: i64,
}

/// Compute transfer suggestions for every item in `stocks`.
///
/// Items are processed in first-seen order; rows within an item are pairing
/// rows in matching order, then Overstock, Need stock and Balanced rows.
#[tracing::instrument(skip_all, fields(stocks = stocks.len()))]
pub fn allocate(
    stocks: &[ItemBranchStock],
    config: &AllocationConfig,
) -> DomainResult<Vec<TransferSuggestion>> {
    config.validate()?;
    let items = group_by_item(stocks)?;

    let mut suggestions = Vec::with_capacity(stocks.len());
    for item in &items {
        suggestions.extend(allocate_item(item, config));
    }

    let counts = FlagCounts::tally(&suggestions);
    tracing::info!(
        items = items.len(),
        required_qty = config.required_qty(),
        min_transfer_qty = config.min_transfer_qty,
        transfers = counts.transfer_to,
        overstock = counts.overstock,
        need_stock = counts.need_stock,
        balanced = counts.balanced,
        "allocation complete"
    );

    Ok(suggestions)
}

/// Reject entries `allocate` and `summarize` cannot reason about: negative
/// quantities and repeated (item, branch) pairs.
pub(crate) fn validate_stocks(stocks: &[ItemBranchStock]) -> DomainResult<()> {
    let mut seen: HashSet<(&ItemKey, &BranchName)> = HashSet::new();

    for (index, stock) in stocks.iter().enumerate() {
        if stock.quantity < 0 {
            return Err(DomainError::invalid_input(
                index,
                format!(
                    "quantity cannot be negative (item `{}`, branch `{}`, got {})",
                    stock.item_key, stock.branch_name, stock.quantity
                ),
            ));
        }
        if !seen.insert((&stock.item_key, &stock.branch_name)) {
            return Err(DomainError::invalid_input(
                index,
                format!(
                    "duplicate stock entry for item `{}` at branch `{}`",
                    stock.item_key, stock.branch_name
                ),
            ));
        }
    }

    Ok(())
}

fn group_by_item(stocks: &[ItemBranchStock]) -> DomainResult<Vec<ItemGroup<'_>>> {
    validate_stocks(stocks)?;

    let mut groups: Vec<ItemGroup<'_>> = Vec::new();
    let mut by_key: HashMap<&ItemKey, usize> = HashMap::new();

    for stock in stocks {
        let pos = *by_key.entry(&stock.item_key).or_insert_with(|| {
            groups.push(ItemGroup {
                item_key: &stock.item_key,
                display_name: &stock.display_name,
                stocks: Vec::new(),
            });
            groups.len() - 1
        });
        groups[pos].stocks.push(stock);
    }

    Ok(groups)
}

fn allocate_item(item: &ItemGroup<'_>, config: &AllocationConfig) -> Vec<TransferSuggestion> {
    let min = config.min_transfer_qty;
    let positions: Vec<BranchPosition> = item
        .stocks
        .iter()
        .map(|s| BranchPosition::new(s.branch_name.clone(), s.quantity, config))
        .collect();

    let mut donors: Vec<Slot<'_>> = positions
        .iter()
        .filter(|p| p.surplus > 0)
        .map(|p| Slot {
            branch: &p.branch_name,
            remaining: p.surplus,
        })
        .collect();
    let mut receivers: Vec<Slot<'_>> = positions
        .iter()
        .filter(|p| p.deficit > 0)
        .map(|p| Slot {
            branch: &p.branch_name,
            remaining: p.deficit,
        })
        .collect();
    donors.sort_by(priority);
    receivers.sort_by(priority);

    let mut rows = Vec::new();

    // Each pass drains at least one slot, so this runs at most
    // donors + receivers times.
    while let (Some(d), Some(r)) = (next_eligible(&donors, min), next_eligible(&receivers, min)) {
        let quantity = donors[d].remaining.min(receivers[r].remaining);
        donors[d].remaining -= quantity;
        receivers[r].remaining -= quantity;

        let (donor, receiver) = (donors[d].branch, receivers[r].branch);
        tracing::trace!(item = %item.item_key, from = %donor, to = %receiver, quantity, "paired branches");
        rows.extend(item.pairing(donor, receiver, quantity));
    }

    for donor in donors.iter().filter(|s| s.remaining > 0) {
        rows.push(item.terminal(donor.branch, Some(donor.remaining), SuggestionFlag::Overstock));
    }
    for receiver in receivers.iter().filter(|s| s.remaining > 0) {
        rows.push(item.terminal(receiver.branch, Some(receiver.remaining), SuggestionFlag::NeedStock));
    }
    for position in positions.iter().filter(|p| p.status() == BranchStatus::Balanced) {
        rows.push(item.terminal(&position.branch_name, None, SuggestionFlag::Balanced));
    }

    tracing::debug!(
        item = %item.item_key,
        branches = positions.len(),
        rows = rows.len(),
        "allocated item"
    );

    rows
}

/// Largest remaining amount first, then ascending branch name.
fn priority(a: &Slot<'_>, b: &Slot<'_>) -> Ordering {
    b.remaining
        .cmp(&a.remaining)
        .then_with(|| a.branch.cmp(b.branch))
}

fn next_eligible(slots: &[Slot<'_>], min: i64) -> Option<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.remaining >= min)
        .min_by(|(_, a), (_, b)| priority(a, b))
        .map(|(i, _)| i)
}

impl ItemGroup<'_> {
    fn pairing(
        &self,
        donor: &BranchName,
        receiver: &BranchName,
        quantity: i64,
    ) -> [TransferSuggestion; 2] {
        let row = |branch: &BranchName, flag: SuggestionFlag| TransferSuggestion {
            item_key: self.item_key.clone(),
            display_name: self.display_name.to_string(),
            branch_name: branch.clone(),
            from_branch: Some(donor.clone()),
            to_branch: Some(receiver.clone()),
            quantity: Some(quantity),
            flag,
        };

        [
            row(
                donor,
                SuggestionFlag::TransferTo {
                    branch: receiver.clone(),
                    quantity,
                },
            ),
            row(
                receiver,
                SuggestionFlag::ReceiveFrom {
                    branch: donor.clone(),
                    quantity,
                },
            ),
        ]
    }

    fn terminal(
        &self,
        branch: &BranchName,
        quantity: Option<i64>,
        flag: SuggestionFlag,
    ) -> TransferSuggestion {
        TransferSuggestion {
            item_key: self.item_key.clone(),
            display_name: self.display_name.to_string(),
            branch_name: branch.clone(),
            from_branch: None,
            to_branch: None,
            quantity,
            flag,
        }
    }
}
