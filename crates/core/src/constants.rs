//! Protocol constants
//!
//! The rate budget, fixed-point scale, and block offsets are wire-level
//! policy shared with the on-chain auction and migrator contracts.

use alloy::primitives::{address, Address, U256};

/// Total auction rate budget in milli-bips. Every schedule must satisfy
/// `sum(rate_i * span_i) == RATE_TOTAL` exactly.
pub const RATE_TOTAL: u64 = 10_000_000;

/// FixedPoint96 scale (2^96).
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// Default auction duration: one week at ~12 s blocks.
pub const AUCTION_DURATION_BLOCKS_ONE_WEEK: u64 = 50_400;

/// Claim opens this many blocks after the auction ends.
pub const CLAIM_DELAY_BLOCKS: u64 = 10;

/// Policy offsets from the current block at assembly time.
pub const MIGRATION_OFFSET_BLOCKS: u64 = 500;
pub const SWEEP_OFFSET_BLOCKS: u64 = 1_000;
pub const AIRDROP_UNLOCK_PADDING_BLOCKS: u64 = 50;

/// Low-address-bit mask covering every hook-permission flag.
pub const ALL_HOOK_FLAGS: Address = address!("0000000000000000000000000000000000003fff");

/// Flags a launched strategy address must encode.
pub const DEFAULT_HOOK_FLAGS: Address = address!("0000000000000000000000000000000000002000");

/// Native currency sentinel (raise in ETH).
pub const NATIVE_CURRENCY: Address = Address::ZERO;

/// Fixed token parameters.
pub const TOKEN_DECIMALS: u8 = 18;

/// Vesting duration: 5 years in seconds.
pub const VESTING_DURATION_SECONDS: u64 = 5 * 365 * 24 * 60 * 60;

/// Strategy timeouts. Each bounds one external call independently.
pub const REMOTE_MINE_TIMEOUT_SECS: u64 = 120;
pub const INIT_HASH_TIMEOUT_SECS: u64 = 30;
pub const MINER_TIMEOUT_SECS: u64 = 90;

/// 1 billion tokens at 18 decimals.
pub fn total_supply() -> U256 {
    U256::from(1_000_000_000u64) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

/// Default floor price: 33 ETH starting market cap over 1B supply,
/// `(33 * Q96) / 1e9`.
pub fn default_floor_price() -> U256 {
    (U256::from(33u64) * Q96) / U256::from(1_000_000_000u64)
}

/// Default tick spacing in Q96.
pub fn default_tick_spacing() -> U256 {
    U256::from(100u64) * Q96
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q96_is_two_pow_96() {
        assert_eq!(Q96, U256::from(2u64).pow(U256::from(96u64)));
    }

    #[test]
    fn rate_total_fits_u24() {
        assert!(RATE_TOTAL < (1 << 24));
    }
}
