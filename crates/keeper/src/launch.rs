//! Launch preparation service
//!
//! Assembles the on-chain payload for one request: chain state, salt search,
//! auction encoding. Used by both the orchestrator and the prepare-launch
//! endpoint.

use std::sync::Arc;

use alloy::primitives::Address;
use chrono::Utc;
use tracing::warn;

use launchpad_core::prepare::{assemble_launch_params, AssembleOptions, ChainState};
use launchpad_core::salt::{
    random_salt, MineContext, MinedSalt, RemoteMiner, SaltSearchEngine, SubprocessMiner,
};
use launchpad_types::{LaunchRequest, LaunchResult, PreparedLaunch};

use crate::chain::ChainReader;
use crate::config::KeeperConfig;

const DEFAULT_INIT_HASH_TARGET: &str = "script/GetInitCodeHash.s.sol:GetInitCodeHash";

/// Per-request overrides from the HTTP payload.
#[derive(Debug, Clone, Default)]
pub struct PrepareOverrides {
    pub duration_blocks: Option<u64>,
    pub currency: Option<Address>,
}

pub struct LaunchService {
    chain: Arc<dyn ChainReader>,
    engine: SaltSearchEngine,
    config: KeeperConfig,
}

/// Build the strategy stack from config: remote delegation when an endpoint
/// is configured, otherwise the local subprocess pair when available.
pub fn build_engine(config: &KeeperConfig) -> SaltSearchEngine {
    let mut engine = SaltSearchEngine::new();
    if let Some(url) = &config.mining.remote_url {
        engine.push(Box::new(RemoteMiner::new(
            url.clone(),
            config.mining.api_key.clone(),
        )));
    } else if let (Some(dir), Some(path)) =
        (&config.mining.contracts_dir, &config.mining.miner_path)
    {
        let target = config
            .mining
            .init_hash_target
            .clone()
            .unwrap_or_else(|| DEFAULT_INIT_HASH_TARGET.to_string());
        engine.push(Box::new(SubprocessMiner::new(dir, path, target)));
    }
    engine
}

impl LaunchService {
    pub fn new(
        chain: Arc<dyn ChainReader>,
        engine: SaltSearchEngine,
        config: KeeperConfig,
    ) -> Self {
        Self {
            chain,
            engine,
            config,
        }
    }

    pub fn launcher_address(&self) -> Address {
        self.config.chain.launcher
    }

    pub fn chain_id(&self) -> u64 {
        self.config.chain.chain_id
    }

    /// Prepare the full launch payload for a validated request.
    pub async fn prepare(
        &self,
        request: &LaunchRequest,
        overrides: &PrepareOverrides,
    ) -> LaunchResult<PreparedLaunch> {
        let current_block = self.chain.current_block().await?;
        let duration_blocks = overrides
            .duration_blocks
            .unwrap_or(self.config.auction.duration_blocks);
        let currency = overrides.currency.unwrap_or_else(|| self.config.currency());

        let mined = self.mine_salt(request, currency, current_block).await;

        let state = ChainState {
            current_block,
            timestamp: Utc::now().timestamp() as u64,
        };
        let opts = AssembleOptions {
            launcher: self.config.chain.launcher,
            currency,
            duration_blocks,
            floor_price: self.config.floor_price()?,
            tick_spacing: None,
            default_website: self.config.auction.default_website.clone(),
        };
        let launch_params = assemble_launch_params(request, &state, &mined, &opts)?;

        Ok(PreparedLaunch {
            launch_params,
            chain_id: self.config.chain.chain_id,
            launcher_address: self.config.chain.launcher,
            salt_mined: mined.mined,
            note: mined.note,
        })
    }

    async fn mine_salt(
        &self,
        request: &LaunchRequest,
        currency: Address,
        current_block: u64,
    ) -> MinedSalt {
        let Some(splitter_factory) = self.config.chain.splitter_factory else {
            let note =
                "chain.splitter_factory not set; salt mining disabled, using random salt";
            warn!("{note}");
            return MinedSalt {
                salt: random_salt(),
                mined: false,
                note: Some(note.to_string()),
            };
        };

        // The remote service resolves the nonce itself when we cannot.
        let splitter_nonce = if self.engine.is_empty() {
            None
        } else {
            self.chain.transaction_count(splitter_factory).await.ok()
        };

        let ctx = MineContext {
            owner: request.wallet,
            launcher: self.config.chain.launcher,
            splitter_factory,
            strategy_factory: self.config.strategy_factory(),
            liquidity_launcher: self.config.liquidity_launcher(),
            chain_id: self.config.chain.chain_id,
            token_name: request.name.clone(),
            token_symbol: request.symbol.clone(),
            currency: Some(currency),
            current_block: Some(current_block),
            splitter_nonce,
            rpc_url: self.config.rpc_url(),
            hook_flags: self.config.hook_flags(),
        };
        self.engine.search(&ctx).await
    }
}
