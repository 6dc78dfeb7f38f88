use serde::{Deserialize, Serialize};

use branchstock_core::{DomainError, DomainResult};

/// Policy parameters for one allocation run.
///
/// Signed on purpose: out-of-range values coming from a form or the
/// environment must be reported, not wrapped or clamped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Desired on-shelf quantity per branch.
    pub display_target: i64,
    /// Buffer held in reserve above the display target.
    pub safety_backstock: i64,
    /// Smallest quantity worth moving between branches.
    pub min_transfer_qty: i64,
}

impl AllocationConfig {
    pub const DEFAULT_DISPLAY_TARGET: i64 = 1;
    pub const DEFAULT_SAFETY_BACKSTOCK: i64 = 2;
    pub const DEFAULT_MIN_TRANSFER_QTY: i64 = 1;

    pub fn new(display_target: i64, safety_backstock: i64, min_transfer_qty: i64) -> Self {
        Self {
            display_target,
            safety_backstock,
            min_transfer_qty,
        }
    }

    pub fn with_display_target(mut self, display_target: i64) -> Self {
        self.display_target = display_target;
        self
    }

    pub fn with_safety_backstock(mut self, safety_backstock: i64) -> Self {
        self.safety_backstock = safety_backstock;
        self
    }

    pub fn with_min_transfer_qty(mut self, min_transfer_qty: i64) -> Self {
        self.min_transfer_qty = min_transfer_qty;
        self
    }

    /// Check every parameter; the first out-of-range one is reported.
    pub fn validate(&self) -> DomainResult<()> {
        if self.display_target < 0 {
            return Err(DomainError::invalid_config(
                "display_target",
                format!("must be >= 0 (got {})", self.display_target),
            ));
        }
        if self.safety_backstock < 0 {
            return Err(DomainError::invalid_config(
                "safety_backstock",
                format!("must be >= 0 (got {})", self.safety_backstock),
            ));
        }
        if self.min_transfer_qty < 1 {
            return Err(DomainError::invalid_config(
                "min_transfer_qty",
                format!("must be >= 1 (got {})", self.min_transfer_qty),
            ));
        }
        if self.display_target.checked_add(self.safety_backstock).is_none() {
            return Err(DomainError::invalid_config(
                "safety_backstock",
                "display_target + safety_backstock overflows",
            ));
        }
        Ok(())
    }

    /// Threshold separating deficit from surplus.
    ///
    /// Saturates on overflow; `validate` rejects such configs before use.
    pub fn required_qty(&self) -> i64 {
        self.display_target.saturating_add(self.safety_backstock)
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DISPLAY_TARGET,
            Self::DEFAULT_SAFETY_BACKSTOCK,
            Self::DEFAULT_MIN_TRANSFER_QTY,
        )
    }
}
