//! Allocation parameters read from the environment.

use branchstock_allocation::AllocationConfig;
use branchstock_core::{DomainError, DomainResult};

pub const DISPLAY_TARGET_ENV: &str = "BRANCHSTOCK_DISPLAY_TARGET";
pub const SAFETY_BACKSTOCK_ENV: &str = "BRANCHSTOCK_SAFETY_BACKSTOCK";
pub const MIN_TRANSFER_QTY_ENV: &str = "BRANCHSTOCK_MIN_TRANSFER_QTY";

pub fn from_env() -> DomainResult<AllocationConfig> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Resolve every parameter through `lookup`; unset ones take their default.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<AllocationConfig> {
    let defaults = AllocationConfig::default();
    let config = AllocationConfig::new(
        read(&lookup, DISPLAY_TARGET_ENV, "display_target", defaults.display_target)?,
        read(&lookup, SAFETY_BACKSTOCK_ENV, "safety_backstock", defaults.safety_backstock)?,
        read(&lookup, MIN_TRANSFER_QTY_ENV, "min_transfer_qty", defaults.min_transfer_qty)?,
    );
    config.validate()?;
    Ok(config)
}

fn read(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    field: &'static str,
    default: i64,
) -> DomainResult<i64> {
    let Some(raw) = lookup(var) else {
        tracing::debug!(var, default, "not set; using default");
        return Ok(default);
    };

    raw.trim().parse::<i64>().map_err(|e| {
        DomainError::invalid_config(field, format!("{var}={raw:?} is not an integer: {e}"))
    })
}
