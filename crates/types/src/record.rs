//! Persisted launch lifecycle records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a launch. Transitions are owned by the orchestrator:
/// Pending -> Processing -> Launched | Failed. Failed is terminal per event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LaunchStatus {
    Pending,
    Processing,
    Launched,
    Failed,
}

/// One record per source event id. The event id, not the wallet, is the
/// identity key; wallet rate limiting is enforced separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRecord {
    pub event_id: String,
    pub event_url: String,
    pub author_handle: String,
    pub author_id: String,
    pub name: String,
    pub symbol: String,
    /// Lower-cased hex wallet address, for case-insensitive comparison.
    pub wallet: String,
    pub token_address: Option<String>,
    pub tx_hash: Option<String>,
    pub status: LaunchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub launched_at: Option<DateTime<Utc>>,
}

/// Outcome counts for one scan cycle. `processed` counts events accepted
/// into orchestration, so processed == launched + failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub mentions_found: usize,
    pub processed: usize,
    pub launched: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}
