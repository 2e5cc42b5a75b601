//! Auction schedule construction and parameter encoding
//!
//! The schedule front-loads half the rate budget into the first third of the
//! auction. Budget accounting is exact: the integer-division remainder is
//! absorbed by splitting the tail segment, never dropped, so
//! `sum(rate * span) == RATE_TOTAL` holds for every duration >= 2.
//!
//! The encoded parameter tuple is a wire contract with the on-chain auction
//! consumer. Field order and widths must not change.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolValue;

use launchpad_types::{LaunchError, LaunchResult};

use crate::constants::{default_floor_price, default_tick_spacing, CLAIM_DELAY_BLOCKS, RATE_TOTAL};

/// One auction step: `rate` milli-bips released per block over `span`
/// blocks. Packed as (uint24, uint40) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionStep {
    pub rate: u32,
    pub span: u64,
}

/// Ordered step sequence covering the whole auction duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionSchedule {
    pub duration_blocks: u64,
    pub steps: Vec<AuctionStep>,
}

const MAX_RATE: u64 = (1 << 24) - 1;
const MAX_SPAN: u64 = (1 << 40) - 1;

impl AuctionSchedule {
    /// Check both schedule invariants.
    pub fn validate(&self) -> LaunchResult<()> {
        let span_sum: u64 = self.steps.iter().map(|s| s.span).sum();
        if span_sum != self.duration_blocks {
            return Err(LaunchError::Validation(format!(
                "schedule spans sum to {} blocks, expected {}",
                span_sum, self.duration_blocks
            )));
        }
        let rate_sum: u64 = self.steps.iter().map(|s| s.rate as u64 * s.span).sum();
        if rate_sum != RATE_TOTAL {
            return Err(LaunchError::Validation(format!(
                "schedule rate budget sums to {}, expected {}",
                rate_sum, RATE_TOTAL
            )));
        }
        Ok(())
    }

    /// Pack each step as big-endian (uint24 rate, uint40 span), concatenated
    /// in step order.
    pub fn encode_steps(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.steps.len() * 8);
        for step in &self.steps {
            out.extend_from_slice(&step.rate.to_be_bytes()[1..4]);
            out.extend_from_slice(&step.span.to_be_bytes()[3..8]);
        }
        Bytes::from(out)
    }
}

/// Build the default front-loaded schedule for a duration in blocks.
///
/// The first segment is `max(1, duration / 3)` blocks at
/// `(RATE_TOTAL / 2) / s1` per block. The remaining budget spreads over the
/// tail segment; when it does not divide evenly, the first `remainder`
/// blocks of the tail run one unit hotter, as an extra step.
pub fn build_auction_schedule(duration_blocks: u64) -> LaunchResult<AuctionSchedule> {
    if duration_blocks < 2 {
        return Err(LaunchError::Validation(format!(
            "auction duration must be at least 2 blocks, got {duration_blocks}"
        )));
    }
    if duration_blocks > MAX_SPAN {
        return Err(LaunchError::Validation(format!(
            "auction duration {duration_blocks} exceeds uint40 span"
        )));
    }

    let s1 = (duration_blocks / 3).max(1);
    let s2 = duration_blocks - s1;

    let rate1 = (RATE_TOTAL / 2) / s1;
    let remaining = RATE_TOTAL - rate1 * s1;
    let rate2 = remaining / s2;
    let extra = remaining - rate2 * s2;

    debug_assert!(rate1 <= MAX_RATE && rate2 + 1 <= MAX_RATE);

    let mut steps = vec![AuctionStep {
        rate: rate1 as u32,
        span: s1,
    }];
    if extra > 0 {
        steps.push(AuctionStep {
            rate: (rate2 + 1) as u32,
            span: extra,
        });
    }
    if s2 - extra > 0 {
        steps.push(AuctionStep {
            rate: rate2 as u32,
            span: s2 - extra,
        });
    }

    let schedule = AuctionSchedule {
        duration_blocks,
        steps,
    };
    schedule.validate()?;
    Ok(schedule)
}

/// Inputs for auction-parameter encoding.
#[derive(Debug, Clone)]
pub struct AuctionOptions {
    pub currency: Address,
    /// Unsold tokens return here (the launcher).
    pub tokens_recipient: Address,
    /// Raised currency goes here (the owner wallet).
    pub funds_recipient: Address,
    pub start_block: u64,
    pub duration_blocks: u64,
    pub floor_price: Option<U256>,
    pub tick_spacing: Option<U256>,
}

/// Decoded parameter tuple, used to verify round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAuctionParams {
    pub currency: Address,
    pub tokens_recipient: Address,
    pub funds_recipient: Address,
    pub start_block: u64,
    pub end_block: u64,
    pub claim_block: u64,
    pub tick_spacing: U256,
    pub validation_hook: Address,
    pub floor_price: U256,
    pub required_currency_raised: u128,
    pub auction_steps_data: Bytes,
}

type AuctionTuple = (
    Address,
    Address,
    Address,
    u64,
    u64,
    u64,
    U256,
    Address,
    U256,
    u128,
    Bytes,
);

/// ABI-encode the full auction parameter tuple in wire order: currency,
/// tokensRecipient, fundsRecipient, startBlock, endBlock, claimBlock,
/// tickSpacing, validationHook, floorPrice, requiredCurrencyRaised,
/// auctionStepsData.
pub fn encode_auction_params(opts: &AuctionOptions) -> LaunchResult<Bytes> {
    let schedule = build_auction_schedule(opts.duration_blocks)?;
    let end_block = opts.start_block + opts.duration_blocks;
    let claim_block = end_block + CLAIM_DELAY_BLOCKS;

    let tuple: AuctionTuple = (
        opts.currency,
        opts.tokens_recipient,
        opts.funds_recipient,
        opts.start_block,
        end_block,
        claim_block,
        opts.tick_spacing.unwrap_or_else(default_tick_spacing),
        Address::ZERO,
        opts.floor_price.unwrap_or_else(default_floor_price),
        0u128,
        schedule.encode_steps(),
    );
    Ok(Bytes::from(tuple.abi_encode_params()))
}

/// Decode an encoded parameter tuple back into named fields.
pub fn decode_auction_params(data: &[u8]) -> LaunchResult<DecodedAuctionParams> {
    let (
        currency,
        tokens_recipient,
        funds_recipient,
        start_block,
        end_block,
        claim_block,
        tick_spacing,
        validation_hook,
        floor_price,
        required_currency_raised,
        auction_steps_data,
    ) = AuctionTuple::abi_decode_params(data, true)
        .map_err(|e| LaunchError::Validation(format!("auction params decode failed: {e}")))?;

    Ok(DecodedAuctionParams {
        currency,
        tokens_recipient,
        funds_recipient,
        start_block,
        end_block,
        claim_block,
        tick_spacing,
        validation_hook,
        floor_price,
        required_currency_raised,
        auction_steps_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    use crate::constants::NATIVE_CURRENCY;

    #[test]
    fn schedule_invariants_hold_for_all_small_durations() {
        for d in 2..=600u64 {
            let schedule = build_auction_schedule(d).unwrap();
            let span_sum: u64 = schedule.steps.iter().map(|s| s.span).sum();
            let rate_sum: u64 = schedule.steps.iter().map(|s| s.rate as u64 * s.span).sum();
            assert_eq!(span_sum, d, "span sum for duration {d}");
            assert_eq!(rate_sum, RATE_TOTAL, "rate budget for duration {d}");
        }
    }

    #[test]
    fn schedule_invariants_hold_for_week_and_large_durations() {
        for d in [50_400u64, 123_457, 1_000_000, 7_777_777] {
            let schedule = build_auction_schedule(d).unwrap();
            let span_sum: u64 = schedule.steps.iter().map(|s| s.span).sum();
            let rate_sum: u64 = schedule.steps.iter().map(|s| s.rate as u64 * s.span).sum();
            assert_eq!(span_sum, d);
            assert_eq!(rate_sum, RATE_TOTAL);
        }
    }

    #[test]
    fn minimum_duration_splits_evenly() {
        let schedule = build_auction_schedule(2).unwrap();
        assert_eq!(
            schedule.steps,
            vec![
                AuctionStep { rate: 5_000_000, span: 1 },
                AuctionStep { rate: 5_000_000, span: 1 },
            ]
        );
    }

    #[test]
    fn rejects_sub_minimum_duration() {
        assert!(build_auction_schedule(0).is_err());
        assert!(build_auction_schedule(1).is_err());
    }

    #[test]
    fn steps_pack_to_eight_bytes_each() {
        let schedule = build_auction_schedule(50_400).unwrap();
        let packed = schedule.encode_steps();
        assert_eq!(packed.len(), schedule.steps.len() * 8);

        // First step: rate in bytes 0..3, span in bytes 3..8, big-endian.
        let rate = u32::from_be_bytes([0, packed[0], packed[1], packed[2]]);
        let span = u64::from_be_bytes([0, 0, 0, packed[3], packed[4], packed[5], packed[6], packed[7]]);
        assert_eq!(rate, schedule.steps[0].rate);
        assert_eq!(span, schedule.steps[0].span);
    }

    #[test]
    fn encode_decode_round_trip() {
        let opts = AuctionOptions {
            currency: NATIVE_CURRENCY,
            tokens_recipient: address!("00000008412db3394C91A5CbD01635c6d140637C"),
            funds_recipient: address!("742d35cc6634c0532925a3b844bc9e7595f2bd12"),
            start_block: 8_000_000,
            duration_blocks: 50_400,
            floor_price: None,
            tick_spacing: None,
        };
        let encoded = encode_auction_params(&opts).unwrap();
        let decoded = decode_auction_params(&encoded).unwrap();

        assert_eq!(decoded.currency, opts.currency);
        assert_eq!(decoded.tokens_recipient, opts.tokens_recipient);
        assert_eq!(decoded.funds_recipient, opts.funds_recipient);
        assert_eq!(decoded.start_block, 8_000_000);
        assert_eq!(decoded.end_block, 8_050_400);
        assert_eq!(decoded.claim_block, 8_050_400 + CLAIM_DELAY_BLOCKS);
        assert_eq!(decoded.tick_spacing, default_tick_spacing());
        assert_eq!(decoded.validation_hook, Address::ZERO);
        assert_eq!(decoded.floor_price, default_floor_price());
        assert_eq!(decoded.required_currency_raised, 0);
        assert_eq!(
            decoded.auction_steps_data,
            build_auction_schedule(50_400).unwrap().encode_steps()
        );
    }
}
