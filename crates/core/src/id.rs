//! Strongly-typed identifiers used across the domain.

use serde::{Deserialize, Serialize};

/// Canonical identity of an item, shared by every branch that stocks it.
///
/// Derivation from raw barcodes/names lives with ingestion; this type only
/// guarantees the value carries no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

/// Name of a branch (store/location) holding stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            /// Wrap a raw value, trimming surrounding whitespace.
            ///
            /// Blank values are representable on purpose: validation happens
            /// where the value is consumed so the error can point at a row.
            pub fn new(value: impl AsRef<str>) -> Self {
                Self(value.as_ref().trim().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

impl_string_newtype!(ItemKey);
impl_string_newtype!(BranchName);
