//! Domain error model.

use thiserror::Error;

/// Result type used across the stock domain.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Both variants are detected eagerly, before any item is processed. Callers
/// (CLI, UI, report layers) decide how to present them; the domain never
/// clamps or silently repairs a bad value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A row or aggregated stock entry was malformed (missing key, negative
    /// quantity, duplicate branch, ...). `index` is the zero-based position of
    /// the offending entry in the caller's input sequence.
    #[error("invalid input at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    /// An allocation parameter was out of range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl DomainError {
    pub fn invalid_input(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index,
            reason: reason.into(),
        }
    }

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_names_the_offending_index() {
        let err = DomainError::invalid_input(3, "quantity cannot be negative (got -2)");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "invalid input at index 3: quantity cannot be negative (got -2)"
        );
    }

    #[test]
    fn invalid_config_names_the_field() {
        let err = DomainError::invalid_config("min_transfer_qty", "must be >= 1 (got 0)");
        assert!(err.is_invalid_config());
        assert_eq!(
            err.to_string(),
            "invalid config `min_transfer_qty`: must be >= 1 (got 0)"
        );
    }
}
