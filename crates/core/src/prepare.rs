//! Launch-parameter assembly

use alloy::primitives::{Address, U256};
use tracing::warn;

use launchpad_types::{LaunchParams, LaunchRequest, LaunchResult, TokenMetadata};

use crate::auction::{encode_auction_params, AuctionOptions};
use crate::constants::{
    AIRDROP_UNLOCK_PADDING_BLOCKS, MIGRATION_OFFSET_BLOCKS, SWEEP_OFFSET_BLOCKS,
};
use crate::salt::MinedSalt;

/// Chain observations needed at assembly time.
#[derive(Debug, Clone, Copy)]
pub struct ChainState {
    pub current_block: u64,
    /// Unix seconds; becomes the vesting start.
    pub timestamp: u64,
}

#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Launcher contract: tokens recipient and salt-wrap sender.
    pub launcher: Address,
    pub currency: Address,
    pub duration_blocks: u64,
    pub floor_price: Option<U256>,
    pub tick_spacing: Option<U256>,
    /// Website recorded in metadata when the request has none.
    pub default_website: String,
}

/// Assemble the full on-chain payload for one accepted request.
///
/// Block numbers derive from policy offsets: migration at `current + 500`,
/// sweep at `current + 1000`, airdrop unlock at `current + duration + 50`.
/// The relative ordering of these against the auction end is checked and
/// logged, not asserted; the offsets are wire policy.
pub fn assemble_launch_params(
    request: &LaunchRequest,
    state: &ChainState,
    mined: &MinedSalt,
    opts: &AssembleOptions,
) -> LaunchResult<LaunchParams> {
    let auction_params = encode_auction_params(&AuctionOptions {
        currency: opts.currency,
        tokens_recipient: opts.launcher,
        funds_recipient: request.wallet,
        start_block: state.current_block,
        duration_blocks: opts.duration_blocks,
        floor_price: opts.floor_price,
        tick_spacing: opts.tick_spacing,
    })?;

    let auction_end = state.current_block + opts.duration_blocks;
    let migration_block = state.current_block + MIGRATION_OFFSET_BLOCKS;
    let sweep_block = state.current_block + SWEEP_OFFSET_BLOCKS;
    let airdrop_unlock_block = auction_end + AIRDROP_UNLOCK_PADDING_BLOCKS;

    if !(auction_end < airdrop_unlock_block
        && airdrop_unlock_block < migration_block
        && migration_block < sweep_block)
    {
        warn!(
            auction_end,
            airdrop_unlock_block,
            migration_block,
            sweep_block,
            "derived block numbers are not strictly ordered"
        );
    }

    let website = request
        .website
        .clone()
        .unwrap_or_else(|| opts.default_website.clone());

    Ok(LaunchParams {
        name: request.name.clone(),
        symbol: request.symbol.clone(),
        token_metadata: TokenMetadata {
            description: request.description.clone(),
            website,
            image: request.image.clone(),
        },
        vesting_beneficiary: request.wallet,
        vesting_start: state.timestamp,
        auction_params,
        salt: mined.salt,
        migration_block,
        sweep_block,
        currency: opts.currency,
        airdrop_unlock_block,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    use crate::constants::{AUCTION_DURATION_BLOCKS_ONE_WEEK, NATIVE_CURRENCY};
    use crate::salt::random_salt;

    fn test_request() -> LaunchRequest {
        LaunchRequest {
            name: "Molty Coin".into(),
            symbol: "MOLTY".into(),
            wallet: address!("742d35cc6634c0532925a3b844bc9e7595f2bd12"),
            description: "test".into(),
            image: "https://iili.io/x.jpg".into(),
            website: None,
            social: None,
        }
    }

    fn test_options() -> AssembleOptions {
        AssembleOptions {
            launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
            currency: NATIVE_CURRENCY,
            duration_blocks: AUCTION_DURATION_BLOCKS_ONE_WEEK,
            floor_price: None,
            tick_spacing: None,
            default_website: "https://launchpad.example".into(),
        }
    }

    #[test]
    fn derived_blocks_use_policy_offsets() {
        let state = ChainState {
            current_block: 8_000_000,
            timestamp: 1_700_000_000,
        };
        let mined = MinedSalt {
            salt: random_salt(),
            mined: true,
            note: None,
        };
        let params =
            assemble_launch_params(&test_request(), &state, &mined, &test_options()).unwrap();

        assert_eq!(params.migration_block, 8_000_500);
        assert_eq!(params.sweep_block, 8_001_000);
        assert_eq!(
            params.airdrop_unlock_block,
            8_000_000 + AUCTION_DURATION_BLOCKS_ONE_WEEK + 50
        );
        assert_eq!(params.vesting_start, 1_700_000_000);
        assert_eq!(params.vesting_beneficiary, test_request().wallet);
    }

    #[test]
    fn metadata_falls_back_to_default_website() {
        let state = ChainState {
            current_block: 100,
            timestamp: 1,
        };
        let mined = MinedSalt {
            salt: random_salt(),
            mined: false,
            note: Some("fallback".into()),
        };
        let params =
            assemble_launch_params(&test_request(), &state, &mined, &test_options()).unwrap();
        assert_eq!(params.token_metadata.website, "https://launchpad.example");

        let mut with_site = test_request();
        with_site.website = Some("https://molty.xyz".into());
        let params =
            assemble_launch_params(&with_site, &state, &mined, &test_options()).unwrap();
        assert_eq!(params.token_metadata.website, "https://molty.xyz");
    }
}
