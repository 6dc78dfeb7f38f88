//! Item-key derivation from raw barcode and name columns.
//!
//! Source sheets list zero or more barcodes per line, separated by any of
//! `, ; | / \`. The first barcode that normalizes to something non-blank is
//! the item's primary barcode and becomes its key. Lines without a usable
//! barcode fall back to a key built from the normalized product name.
//!
//! Key shapes never overlap: numeric barcodes are bare digits, text barcodes
//! carry [`TEXT_BARCODE_KEY_PREFIX`] and names carry [`NAME_KEY_PREFIX`].

use branchstock_core::ItemKey;

/// Prefix marking keys derived from a product name rather than a barcode.
pub const NAME_KEY_PREFIX: &str = "name:";

/// Prefix marking keys derived from a barcode that is not purely numeric.
pub const TEXT_BARCODE_KEY_PREFIX: &str = "bc:";

const SEPARATORS: [char; 5] = [',', ';', '|', '/', '\\'];

/// Split a raw barcode cell into its trimmed, non-empty parts (listed order).
pub fn split_barcodes(raw: &str) -> Vec<String> {
    raw.split(|c: char| SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canonical form of one barcode.
///
/// Digits only, leading zeros stripped, so `0012-345` and `12345` collide.
/// Barcodes without any significant digit keep their text, lower-cased.
pub fn normalize_barcode(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        Some(trimmed.to_lowercase())
    } else {
        Some(significant.to_string())
    }
}

/// Trim, collapse whitespace runs, lower-case.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Derive the item key for a source line.
///
/// Returns an empty key when neither a barcode nor a name is usable; the
/// aggregator rejects such rows.
pub fn derive_item_key(name: &str, barcodes: &[String]) -> ItemKey {
    if let Some(primary) = barcodes.iter().find_map(|b| normalize_barcode(b)) {
        if primary.bytes().all(|b| b.is_ascii_digit()) {
            return ItemKey::new(primary);
        }
        return ItemKey::new(format!("{TEXT_BARCODE_KEY_PREFIX}{primary}"));
    }

    let name = normalize_name(name);
    if name.is_empty() {
        ItemKey::new("")
    } else {
        ItemKey::new(format!("{NAME_KEY_PREFIX}{name}"))
    }
}
