use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use branchstock_core::{BranchName, DomainError, DomainResult, ItemKey};

use crate::row::StockRow;

/// Stock of one item at one branch, summed over every contributing row.
///
/// `display_name`, `price` and `brand` are item-level: identical on every
/// entry sharing an `item_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBranchStock {
    pub item_key: ItemKey,
    pub display_name: String,
    pub branch_name: BranchName,
    pub quantity: i64,
    pub price: Option<f64>,
    pub brand: Option<String>,
    /// Sorted, de-duplicated barcodes of the contributing rows.
    pub barcodes: Vec<String>,
}

impl ItemBranchStock {
    pub fn new(
        item_key: impl Into<ItemKey>,
        display_name: impl Into<String>,
        branch_name: impl Into<BranchName>,
        quantity: i64,
    ) -> Self {
        Self {
            item_key: item_key.into(),
            display_name: display_name.into(),
            branch_name: branch_name.into(),
            quantity,
            price: None,
            brand: None,
            barcodes: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct ItemMetadata {
    display_name: String,
    price: Option<f64>,
    brand: Option<String>,
}

/// Group rows by (item, branch), summing quantities.
///
/// Output order is the first-seen order of each (item, branch) pair. The first
/// row of an item supplies its display name; price and brand come from the
/// first row of the item that carries one.
pub fn aggregate(rows: &[StockRow]) -> DomainResult<Vec<ItemBranchStock>> {
    let mut metadata: HashMap<ItemKey, ItemMetadata> = HashMap::new();
    let mut positions: HashMap<(ItemKey, BranchName), usize> = HashMap::new();
    let mut stocks: Vec<ItemBranchStock> = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        validate_row(index, row).inspect_err(|e| tracing::warn!(error = %e, "rejected stock row"))?;

        let meta = metadata
            .entry(row.item_key.clone())
            .or_insert_with(|| ItemMetadata {
                display_name: row.display_name.clone(),
                price: None,
                brand: None,
            });
        if meta.price.is_none() {
            meta.price = row.price;
        }
        if meta.brand.is_none() {
            meta.brand = row.brand.clone();
        }

        let group = (row.item_key.clone(), row.branch_name.clone());
        match positions.get(&group) {
            Some(&pos) => {
                let stock = &mut stocks[pos];
                stock.quantity = stock.quantity.checked_add(row.quantity).ok_or_else(|| {
                    DomainError::invalid_input(
                        index,
                        format!(
                            "quantity overflow summing item `{}` at branch `{}`",
                            row.item_key, row.branch_name
                        ),
                    )
                })?;
                stock.barcodes.extend(row.barcodes.iter().cloned());
            }
            None => {
                positions.insert(group, stocks.len());
                let mut stock = ItemBranchStock::new(
                    row.item_key.clone(),
                    row.display_name.clone(),
                    row.branch_name.clone(),
                    row.quantity,
                );
                stock.barcodes = row.barcodes.clone();
                stocks.push(stock);
            }
        }
    }

    for stock in &mut stocks {
        if let Some(meta) = metadata.get(&stock.item_key) {
            stock.display_name.clone_from(&meta.display_name);
            stock.price = meta.price;
            stock.brand.clone_from(&meta.brand);
        }
        stock.barcodes.sort();
        stock.barcodes.dedup();
    }

    tracing::debug!(
        rows = rows.len(),
        items = metadata.len(),
        stocks = stocks.len(),
        "aggregated stock rows"
    );

    Ok(stocks)
}

fn validate_row(index: usize, row: &StockRow) -> DomainResult<()> {
    if row.item_key.is_empty() {
        return Err(DomainError::invalid_input(index, "item key cannot be empty"));
    }
    if row.branch_name.is_empty() {
        return Err(DomainError::invalid_input(index, "branch name cannot be empty"));
    }
    if row.quantity < 0 {
        return Err(DomainError::invalid_input(
            index,
            format!("quantity cannot be negative (got {})", row.quantity),
        ));
    }
    if let Some(price) = row.price {
        if !(price.is_finite() && price >= 0.0) {
            return Err(DomainError::invalid_input(
                index,
                format!("price must be a finite non-negative number (got {price})"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sums_quantities_per_item_and_branch() {
        let rows = vec![
            StockRow::new("1", "Widget", "A", 3),
            StockRow::new("1", "Widget", "B", 1),
            StockRow::new("1", "Widget", "A", 4),
            StockRow::new("2", "Gadget", "A", 0),
        ];

        let stocks = aggregate(&rows).unwrap();
        let summary: Vec<(&str, &str, i64)> = stocks
            .iter()
            .map(|s| (s.item_key.as_str(), s.branch_name.as_str(), s.quantity))
            .collect();
        assert_eq!(summary, vec![("1", "A", 7), ("1", "B", 1), ("2", "A", 0)]);
    }

    #[test]
    fn display_name_comes_from_first_row_of_the_item() {
        let rows = vec![
            StockRow::new("1", "Widget", "A", 1),
            StockRow::new("1", "widget (old label)", "B", 1),
        ];

        let stocks = aggregate(&rows).unwrap();
        assert!(stocks.iter().all(|s| s.display_name == "Widget"));
    }

    #[test]
    fn price_and_brand_come_from_first_row_carrying_them() {
        let rows = vec![
            StockRow::new("1", "Widget", "A", 1),
            StockRow::new("1", "Widget", "B", 1).with_price(4.25),
            StockRow::new("1", "Widget", "C", 1)
                .with_price(9.0)
                .with_brand("Acme"),
        ];

        let stocks = aggregate(&rows).unwrap();
        for stock in &stocks {
            assert_eq!(stock.price, Some(4.25));
            assert_eq!(stock.brand.as_deref(), Some("Acme"));
        }
    }

    #[test]
    fn barcodes_are_merged_sorted_and_deduplicated() {
        let rows = vec![
            StockRow::new("1", "Widget", "A", 1).with_barcodes(["002", "001"]),
            StockRow::new("1", "Widget", "A", 1).with_barcodes(["001"]),
        ];

        let stocks = aggregate(&rows).unwrap();
        assert_eq!(stocks[0].barcodes, vec!["001", "002"]);
    }

    #[test]
    fn rejects_negative_quantity_with_row_index() {
        let rows = vec![
            StockRow::new("1", "Widget", "A", 1),
            StockRow::new("1", "Widget", "B", -1),
        ];

        let err = aggregate(&rows).unwrap_err();
        match err {
            DomainError::InvalidInput { index, .. } => assert_eq!(index, 1),
            _ => panic!("Expected InvalidInput error for negative quantity"),
        }
    }

    #[test]
    fn rejects_missing_keys() {
        let err = aggregate(&[StockRow::new("  ", "Widget", "A", 1)]).unwrap_err();
        assert!(err.is_invalid_input());

        let err = aggregate(&[StockRow::new("1", "Widget", "", 1)]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn rejects_negative_price() {
        let err = aggregate(&[StockRow::new("1", "Widget", "A", 1).with_price(-0.5)]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn rejects_quantity_overflow() {
        let rows = vec![
            StockRow::new("1", "Widget", "A", i64::MAX),
            StockRow::new("1", "Widget", "A", 1),
        ];
        let err = aggregate(&rows).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn empty_input_yields_no_stocks() {
        assert!(aggregate(&[]).unwrap().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: aggregation preserves the total quantity of every item
        /// and never emits two entries for the same (item, branch).
        #[test]
        fn preserves_totals_and_uniqueness(
            rows in prop::collection::vec((0u8..4, 0u8..4, 0i64..1_000), 0..40)
        ) {
            let rows: Vec<StockRow> = rows
                .into_iter()
                .map(|(item, branch, qty)| {
                    StockRow::new(format!("item-{item}"), format!("Item {item}"), format!("B{branch}"), qty)
                })
                .collect();

            let stocks = aggregate(&rows).unwrap();

            let mut seen = std::collections::HashSet::new();
            for stock in &stocks {
                prop_assert!(seen.insert((stock.item_key.clone(), stock.branch_name.clone())));
            }

            let input_total: i64 = rows.iter().map(|r| r.quantity).sum();
            let output_total: i64 = stocks.iter().map(|s| s.quantity).sum();
            prop_assert_eq!(input_total, output_total);
        }
    }
}
