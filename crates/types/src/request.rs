//! Validated launch intent parsed from a source event or API payload

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Field length limits shared by the post parser and the HTTP API.
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A validated launch request. Immutable once parsed; produced exactly once
/// per accepted source event. `symbol` is always upper-cased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub name: String,
    pub symbol: String,
    /// Owner wallet: vesting beneficiary and funds recipient.
    pub wallet: Address,
    pub description: String,
    /// Direct image URI (`ipfs://` or a direct http(s) image link).
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<String>,
}
