//! Address predicate evaluator
//!
//! Deterministic CREATE2 address derivation for launched strategies. The
//! launcher contract wraps the user salt twice before deployment:
//!
//! ```text
//! inner = keccak256(abi.encode(launcher, salt))
//! outer = keccak256(abi.encode(liquidityLauncher, inner))
//! addr  = CREATE2(factory, outer, initCodeHash)
//! ```
//!
//! The low 14 bits of `addr` encode hook permissions; a salt is acceptable
//! iff those bits match the required flags exactly. Everything here is pure
//! and uses exact-width byte arithmetic only.

use alloy::primitives::{keccak256, Address, B256};

use crate::constants::ALL_HOOK_FLAGS;

/// Fixed deployment context for salt evaluation.
#[derive(Debug, Clone, Copy)]
pub struct DeployContext {
    /// CREATE2 deployer of the strategy.
    pub factory: Address,
    /// msg.sender of the launch call; first salt wrap.
    pub launcher: Address,
    /// Liquidity launcher; second salt wrap.
    pub liquidity_launcher: Address,
    /// keccak256 of the strategy init code (depends on token name/symbol).
    pub init_code_hash: B256,
    /// Flags the deployed address's low bits must equal.
    pub required_flags: Address,
}

/// `keccak256(abi.encode(sender, salt))`: 32-byte left-padded address
/// followed by the 32-byte salt.
pub fn wrap_salt(sender: Address, salt: B256) -> B256 {
    let mut encoded = [0u8; 64];
    encoded[12..32].copy_from_slice(sender.as_slice());
    encoded[32..].copy_from_slice(salt.as_slice());
    keccak256(encoded)
}

/// Derive the strategy address a given user salt would deploy to.
pub fn derive_strategy_address(ctx: &DeployContext, salt: B256) -> Address {
    let inner = wrap_salt(ctx.launcher, salt);
    let outer = wrap_salt(ctx.liquidity_launcher, inner);
    ctx.factory.create2(outer, ctx.init_code_hash)
}

/// Whether `salt` deploys to an address carrying exactly the required
/// hook-permission flags.
pub fn satisfies_flags(ctx: &DeployContext, salt: B256) -> bool {
    derive_strategy_address(ctx, salt) & ALL_HOOK_FLAGS == ctx.required_flags
}
