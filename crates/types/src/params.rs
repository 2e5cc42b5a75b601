//! On-chain launch payload and prepared-launch envelope

use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// Token metadata blob stored alongside the deployed token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub description: String,
    pub website: String,
    pub image: String,
}

/// The full on-chain launch payload. Field order and widths match the
/// launcher contract's `launch` tuple; do not reorder.
///
/// Immutable after assembly except for `salt`, which is replaced exactly
/// once by the random fallback when mining fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchParams {
    pub name: String,
    pub symbol: String,
    pub token_metadata: TokenMetadata,
    pub vesting_beneficiary: Address,
    /// Vesting start, unix seconds.
    pub vesting_start: u64,
    /// ABI-encoded auction parameters (see `launchpad_core::auction`).
    pub auction_params: Bytes,
    pub salt: B256,
    /// Block at which LBP migration can begin (`current + 500`).
    pub migration_block: u64,
    /// Block at which the operator can sweep (`current + 1000`).
    pub sweep_block: u64,
    /// Auction settlement currency (zero address = native).
    pub currency: Address,
    /// Block at which airdrop claims open (`current + duration + 50`).
    pub airdrop_unlock_block: u64,
}

/// Result of launch preparation: the payload plus provenance the caller
/// needs before trusting the salt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedLaunch {
    pub launch_params: LaunchParams,
    pub chain_id: u64,
    pub launcher_address: Address,
    /// True when the salt was mined to satisfy the hook-flag predicate.
    /// A fallback salt must never be assumed to satisfy it.
    pub salt_mined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
