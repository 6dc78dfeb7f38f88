//! Inventory ingestion and aggregation.
//!
//! Turns typed sheet records into keyed rows and groups them into one stock
//! entry per (item, branch). Pure domain logic: no IO, no file formats.

pub mod aggregator;
pub mod key;
pub mod row;

pub use aggregator::{ItemBranchStock, aggregate};
pub use key::{derive_item_key, normalize_barcode, normalize_name, split_barcodes};
pub use row::{StockRecord, StockRow};
