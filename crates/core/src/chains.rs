//! Per-chain deployment address book

use alloy::primitives::{address, Address};

use crate::constants::NATIVE_CURRENCY;

/// Deployed contract addresses for one chain. The liquidity launcher is
/// deterministically deployed at the same address across chains; the
/// strategy factory is not.
#[derive(Debug, Clone, Copy)]
pub struct ChainProfile {
    pub chain_id: u64,
    pub liquidity_launcher: Address,
    pub strategy_factory: Address,
    pub weth: Address,
    pub native_currency: Address,
}

pub const MAINNET: ChainProfile = ChainProfile {
    chain_id: 1,
    liquidity_launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
    strategy_factory: address!("65aF3B62EE79763c704f04238080fBADD005B332"),
    weth: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
    native_currency: NATIVE_CURRENCY,
};

pub const SEPOLIA: ChainProfile = ChainProfile {
    chain_id: 11_155_111,
    liquidity_launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
    strategy_factory: address!("89Dd5691e53Ea95d19ED2AbdEdCf4cBbE50da1ff"),
    weth: address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
    native_currency: NATIVE_CURRENCY,
};

pub const BASE_SEPOLIA: ChainProfile = ChainProfile {
    chain_id: 84_532,
    liquidity_launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
    strategy_factory: address!("a3A236647c80BCD69CAD561ACf863c29981b6fbC"),
    weth: address!("4200000000000000000000000000000000000006"),
    native_currency: NATIVE_CURRENCY,
};

impl ChainProfile {
    /// Look up a known chain by id.
    pub fn for_chain_id(chain_id: u64) -> Option<ChainProfile> {
        match chain_id {
            1 => Some(MAINNET),
            11_155_111 => Some(SEPOLIA),
            84_532 => Some(BASE_SEPOLIA),
            _ => None,
        }
    }

    /// Default public RPC endpoint for the chain, overridable via config.
    pub fn default_rpc_url(&self) -> &'static str {
        match self.chain_id {
            1 => "https://eth.llamarpc.com",
            84_532 => "https://sepolia.base.org",
            _ => "https://rpc.sepolia.org",
        }
    }
}
