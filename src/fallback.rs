//! Side channel for records that could not be written.

use crate::error::LogError;

/// `tracing` target of the notices emitted when a record could not be
/// written.
///
/// [`FacadeLayer`](crate::layer::FacadeLayer) reports this target as
/// disabled, so with the bridge installed the notices land on stderr.
pub const FALLBACK_TARGET: &str = "json_log_facade::fallback";

/// Best-effort notice for a failed write.
///
/// Goes through `tracing` when some subscriber wants [`FALLBACK_TARGET`],
/// otherwise straight to stderr.
pub(crate) fn report(err: &LogError) {
    if tracing::enabled!(target: FALLBACK_TARGET, tracing::Level::ERROR) {
        tracing::error!(target: FALLBACK_TARGET, error = %err, "failed to log");
    } else {
        eprintln!("failed to log, {}", err);
    }
}
