//! Error types for the launchpad

use thiserror::Error;

/// Errors raised while processing a launch, from parsing through
/// confirmation. Per-event variants are terminal for that event and never
/// abort the surrounding batch; `Config` aborts the whole invocation.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited: wallet {wallet} already launched within {window_hours}h")]
    RateLimited { wallet: String, window_hours: u64 },

    #[error("Duplicate symbol: {0} already launched")]
    DuplicateSymbol(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Confirmation error: {0}")]
    Confirmation(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LaunchError {
    /// Whether the event should be counted as skipped (rejected before
    /// orchestration) rather than failed.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LaunchError::Validation(_)
                | LaunchError::RateLimited { .. }
                | LaunchError::DuplicateSymbol(_)
        )
    }
}

/// Errors from a single salt-search strategy. Both variants degrade to the
/// next strategy in the engine; neither is fatal to the overall launch.
#[derive(Error, Debug)]
pub enum SaltError {
    #[error("Salt search unavailable: {0}")]
    Unavailable(String),

    #[error("Salt search timed out after {0}s")]
    Timeout(u64),
}

impl From<std::io::Error> for SaltError {
    fn from(err: std::io::Error) -> Self {
        SaltError::Unavailable(err.to_string())
    }
}
