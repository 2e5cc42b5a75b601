//! On-chain launch execution
//!
//! Submits the launch transaction and drives it to confirmation. Behind a
//! trait so the orchestrator can run against a stub in tests.

use std::time::{Duration, Instant};

use alloy::eips::eip2718::Encodable2718;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::{SolCall, SolEvent, SolValue};
use async_trait::async_trait;
use tracing::{info, warn};

use launchpad_types::{LaunchError, LaunchParams, LaunchResult};

use crate::chain::{ChainClient, HttpProvider};

alloy::sol! {
    struct TokenLaunchCall {
        string name;
        string symbol;
        bytes tokenMetadata;
        address vestingBeneficiary;
        uint64 vestingStart;
        bytes auctionParams;
        bytes32 salt;
        uint64 migrationBlock;
        uint64 sweepBlock;
        address currency;
        uint64 airdropUnlockBlock;
    }

    event TokenLaunched(address indexed token, address indexed beneficiary, string symbol);

    function launch(TokenLaunchCall params) external;
}

/// Handle for a submitted launch transaction.
#[derive(Debug, Clone, Copy)]
pub struct TxHandle {
    pub tx_hash: B256,
}

/// Confirmed launch outcome.
#[derive(Debug, Clone, Copy)]
pub struct Confirmation {
    pub token_address: Address,
    pub tx_hash: B256,
}

#[async_trait]
pub trait LaunchExecutor: Send + Sync {
    /// Fail fast on missing credentials before any event is consumed.
    fn ready(&self) -> LaunchResult<()> {
        Ok(())
    }

    async fn submit(&self, params: &LaunchParams) -> LaunchResult<TxHandle>;

    async fn await_confirmation(&self, handle: &TxHandle) -> LaunchResult<Confirmation>;
}

/// Executor over an alloy provider and a local signer.
pub struct EvmExecutor {
    chain: ChainClient,
    signer: Option<PrivateKeySigner>,
    launcher: Address,
    chain_id: u64,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl EvmExecutor {
    pub fn new(
        chain: ChainClient,
        submitter_key: Option<&str>,
        launcher: Address,
        chain_id: u64,
    ) -> LaunchResult<Self> {
        let signer = match submitter_key {
            Some(key) => Some(
                key.parse::<PrivateKeySigner>()
                    .map_err(|e| LaunchError::Config(format!("invalid submitter key: {e}")))?,
            ),
            None => None,
        };
        Ok(Self {
            chain,
            signer,
            launcher,
            chain_id,
            confirm_timeout: Duration::from_secs(600),
            poll_interval: Duration::from_secs(4),
        })
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    fn provider(&self) -> &HttpProvider {
        self.chain.provider()
    }

    fn signer(&self) -> LaunchResult<&PrivateKeySigner> {
        self.signer
            .as_ref()
            .ok_or_else(|| LaunchError::Config("submitter key not configured".into()))
    }

    fn build_calldata(params: &LaunchParams) -> Vec<u8> {
        let metadata = (
            params.token_metadata.description.clone(),
            params.token_metadata.website.clone(),
            params.token_metadata.image.clone(),
        )
            .abi_encode();

        launchCall {
            params: TokenLaunchCall {
                name: params.name.clone(),
                symbol: params.symbol.clone(),
                tokenMetadata: Bytes::from(metadata),
                vestingBeneficiary: params.vesting_beneficiary,
                vestingStart: params.vesting_start,
                auctionParams: params.auction_params.clone(),
                salt: params.salt,
                migrationBlock: params.migration_block,
                sweepBlock: params.sweep_block,
                currency: params.currency,
                airdropUnlockBlock: params.airdrop_unlock_block,
            },
        }
        .abi_encode()
    }
}

#[async_trait]
impl LaunchExecutor for EvmExecutor {
    fn ready(&self) -> LaunchResult<()> {
        self.signer().map(|_| ())
    }

    async fn submit(&self, params: &LaunchParams) -> LaunchResult<TxHandle> {
        let signer = self.signer()?;
        let provider = self.provider();

        let nonce = provider
            .get_transaction_count(signer.address())
            .await
            .map_err(|e| LaunchError::Submission(format!("nonce fetch failed: {e}")))?;
        let tip = provider
            .get_max_priority_fee_per_gas()
            .await
            .map_err(|e| LaunchError::Submission(format!("tip estimation failed: {e}")))?;
        let gas_price = provider
            .get_gas_price()
            .await
            .map_err(|e| LaunchError::Submission(format!("gas price fetch failed: {e}")))?;
        let max_fee = gas_price.saturating_mul(2).saturating_add(tip);

        let mut tx = TransactionRequest::default()
            .with_to(self.launcher)
            .with_input(Self::build_calldata(params))
            .with_chain_id(self.chain_id)
            .with_nonce(nonce)
            .with_max_priority_fee_per_gas(tip)
            .with_max_fee_per_gas(max_fee);
        tx.from = Some(signer.address());

        let gas = provider
            .estimate_gas(&tx)
            .await
            .map_err(|e| LaunchError::Submission(format!("gas estimation failed: {e}")))?;
        let tx = tx.with_gas_limit(gas);

        let wallet = EthereumWallet::from(signer.clone());
        let signed = tx
            .build(&wallet)
            .await
            .map_err(|e| LaunchError::Submission(format!("signing failed: {e}")))?;
        let tx_hash = *signed.tx_hash();

        provider
            .send_raw_transaction(&signed.encoded_2718())
            .await
            .map_err(|e| LaunchError::Submission(format!("broadcast failed: {e}")))?;

        info!(%tx_hash, symbol = %params.symbol, "launch transaction submitted");
        Ok(TxHandle { tx_hash })
    }

    async fn await_confirmation(&self, handle: &TxHandle) -> LaunchResult<Confirmation> {
        let deadline = Instant::now() + self.confirm_timeout;
        loop {
            match self.provider().get_transaction_receipt(handle.tx_hash).await {
                Ok(Some(receipt)) => {
                    if !receipt.status() {
                        return Err(LaunchError::Confirmation(format!(
                            "transaction {} reverted",
                            handle.tx_hash
                        )));
                    }
                    let mut token_address = Address::ZERO;
                    for log in receipt.inner.logs() {
                        if let Ok(decoded) = TokenLaunched::decode_log(&log.inner, true) {
                            token_address = decoded.data.token;
                            break;
                        }
                    }
                    if token_address == Address::ZERO {
                        warn!(tx_hash = %handle.tx_hash, "no TokenLaunched event in receipt");
                    }
                    return Ok(Confirmation {
                        token_address,
                        tx_hash: handle.tx_hash,
                    });
                }
                Ok(None) => {}
                // Transient RPC errors are tolerated while the deadline runs.
                Err(e) => warn!(tx_hash = %handle.tx_hash, "receipt poll failed: {e}"),
            }

            if Instant::now() >= deadline {
                return Err(LaunchError::Confirmation(format!(
                    "confirmation timed out after {}s for {}",
                    self.confirm_timeout.as_secs(),
                    handle.tx_hash
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use launchpad_types::TokenMetadata;

    fn sample_params() -> LaunchParams {
        LaunchParams {
            name: "Molty Coin".into(),
            symbol: "MOLTY".into(),
            token_metadata: TokenMetadata {
                description: "test".into(),
                website: "https://molty.xyz".into(),
                image: "https://iili.io/x.jpg".into(),
            },
            vesting_beneficiary: address!("742d35cc6634c0532925a3b844bc9e7595f2bd12"),
            vesting_start: 1_700_000_000,
            auction_params: Bytes::from(vec![0u8; 64]),
            salt: B256::repeat_byte(0x11),
            migration_block: 8_000_500,
            sweep_block: 8_001_000,
            currency: Address::ZERO,
            airdrop_unlock_block: 8_050_450,
        }
    }

    #[test]
    fn calldata_starts_with_launch_selector() {
        let calldata = EvmExecutor::build_calldata(&sample_params());
        assert_eq!(&calldata[..4], launchCall::SELECTOR);
        assert!(calldata.len() > 4);
    }

    #[test]
    fn calldata_round_trips_through_abi() {
        let params = sample_params();
        let calldata = EvmExecutor::build_calldata(&params);
        let decoded = launchCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(decoded.params.name, params.name);
        assert_eq!(decoded.params.symbol, params.symbol);
        assert_eq!(decoded.params.salt, params.salt);
        assert_eq!(decoded.params.vestingBeneficiary, params.vesting_beneficiary);
        assert_eq!(decoded.params.migrationBlock, params.migration_block);
        assert_eq!(decoded.params.sweepBlock, params.sweep_block);
        assert_eq!(decoded.params.airdropUnlockBlock, params.airdrop_unlock_block);
    }
}
