use serde::{Deserialize, Serialize};

use branchstock_core::{BranchName, ItemKey};

use crate::key::{derive_item_key, split_barcodes};

/// One line of a combined stock sheet, typed but not yet keyed.
///
/// Field names match the sheet's column headers so a parsed table
/// deserializes directly into this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub name_en: String,
    pub branch_name: String,
    #[serde(default)]
    pub barcodes: Option<String>,
    pub available_quantity: i64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Keyed stock row: input to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub item_key: ItemKey,
    pub display_name: String,
    pub branch_name: BranchName,
    pub quantity: i64,
    pub price: Option<f64>,
    pub brand: Option<String>,
    /// Raw barcodes as listed on the source line.
    pub barcodes: Vec<String>,
}

impl StockRow {
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

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_barcodes<I, S>(mut self, barcodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.barcodes = barcodes.into_iter().map(Into::into).collect();
        self
    }
}

impl From<StockRecord> for StockRow {
    fn from(record: StockRecord) -> Self {
        let barcodes = record
            .barcodes
            .as_deref()
            .map(split_barcodes)
            .unwrap_or_default();
        let item_key = derive_item_key(&record.name_en, &barcodes);
        let brand = record
            .brand
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        Self {
            item_key,
            display_name: record.name_en.trim().to_string(),
            branch_name: BranchName::new(&record.branch_name),
            quantity: record.available_quantity,
            price: record.sale_price,
            brand,
            barcodes,
        }
    }
}
