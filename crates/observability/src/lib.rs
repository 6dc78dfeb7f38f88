//! Tracing/logging setup shared by branchstock binaries.

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    match tracing::LogFormat::from_env() {
        Ok(format) => tracing::init(format),
        Err(value) => {
            tracing::init(tracing::LogFormat::default());
            ::tracing::warn!(
                %value,
                "{} not recognized; using json",
                tracing::LOG_FORMAT_ENV
            );
        }
    }
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
