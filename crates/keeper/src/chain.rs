//! Chain read access
//!
//! Thin provider wrapper behind a trait so orchestration can run against a
//! fake chain in tests. Every call is bounded by its own timeout.

use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::transports::http::Http;
use async_trait::async_trait;
use reqwest::Client;

use launchpad_types::{LaunchError, LaunchResult};

pub type HttpProvider = RootProvider<Http<Client>>;

const READ_TIMEOUT_SECS: u64 = 25;

#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn current_block(&self) -> LaunchResult<u64>;

    /// Pending transaction count of an address.
    async fn transaction_count(&self, address: Address) -> LaunchResult<u64>;
}

#[derive(Clone)]
pub struct ChainClient {
    provider: HttpProvider,
    timeout: Duration,
}

impl ChainClient {
    pub fn new(rpc_url: &str) -> LaunchResult<Self> {
        let url = rpc_url
            .parse()
            .map_err(|e| LaunchError::Config(format!("invalid RPC URL {rpc_url}: {e}")))?;
        Ok(Self {
            provider: ProviderBuilder::new().on_http(url),
            timeout: Duration::from_secs(READ_TIMEOUT_SECS),
        })
    }

    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }
}

#[async_trait]
impl ChainReader for ChainClient {
    async fn current_block(&self) -> LaunchResult<u64> {
        tokio::time::timeout(self.timeout, self.provider.get_block_number())
            .await
            .map_err(|_| LaunchError::Rpc("get_block_number timed out".into()))?
            .map_err(|e| LaunchError::Rpc(format!("get_block_number failed: {e}")))
    }

    async fn transaction_count(&self, address: Address) -> LaunchResult<u64> {
        tokio::time::timeout(self.timeout, self.provider.get_transaction_count(address))
            .await
            .map_err(|_| LaunchError::Rpc("get_transaction_count timed out".into()))?
            .map_err(|e| LaunchError::Rpc(format!("get_transaction_count failed: {e}")))
    }
}
