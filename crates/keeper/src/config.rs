//! Keeper configuration loaded from a TOML file
//!
//! Secrets (mention bearer token, miner API key, scan secret, submitter key)
//! can also come from the environment so the TOML file stays committable.

use std::fs;
use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use launchpad_core::chains::ChainProfile;
use launchpad_core::constants::{AUCTION_DURATION_BLOCKS_ONE_WEEK, DEFAULT_HOOK_FLAGS};
use launchpad_types::{LaunchError, LaunchResult};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct KeeperConfig {
    pub chain: ChainConfig,
    pub mentions: MentionConfig,
    pub mining: MiningConfig,
    pub auction: AuctionConfig,
    pub server: ServerConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainConfig {
    pub chain_id: u64,

    /// RPC endpoint; defaults to the chain profile's public endpoint.
    pub rpc_url: Option<String>,

    /// Launcher contract the keeper submits to.
    pub launcher: Address,

    /// Deployer whose pending nonce feeds the init-code-hash helper.
    pub splitter_factory: Option<Address>,

    /// Overrides for the chain profile's address book.
    pub liquidity_launcher: Option<Address>,
    pub strategy_factory: Option<Address>,
    pub currency: Option<Address>,

    /// Transaction submitter key; env `SUBMITTER_PRIVATE_KEY` overrides.
    pub submitter_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MentionConfig {
    /// Whether the interval scan loop runs.
    pub enabled: bool,

    /// Mention API base URL.
    pub api_base: String,

    /// Bearer token; env `MENTION_BEARER_TOKEN` overrides.
    pub bearer_token: Option<String>,

    /// Bot handle mentions are addressed to.
    pub handle: String,

    /// Trigger keyword a post must contain.
    pub trigger: String,

    pub poll_interval_secs: u64,

    /// Max mentions fetched per poll.
    pub batch_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MiningConfig {
    /// Remote mining service base URL. When set, remote delegation is the
    /// first strategy.
    pub remote_url: Option<String>,

    /// Remote miner API key; env `SALT_MINER_API_KEY` overrides.
    pub api_key: Option<String>,

    /// Contracts checkout for the init-code-hash helper.
    pub contracts_dir: Option<PathBuf>,

    /// Brute-force miner binary path.
    pub miner_path: Option<PathBuf>,

    /// forge script target computing the init code hash.
    pub init_hash_target: Option<String>,

    /// Required hook flags; defaults to the protocol mask.
    pub hook_flags: Option<Address>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuctionConfig {
    pub duration_blocks: u64,

    /// Decimal floor price override (Q96 units).
    pub floor_price: Option<String>,

    /// Website recorded in token metadata when the request has none.
    pub default_website: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_address: String,

    /// Shared secret for the scan-trigger endpoint; env `SCAN_SECRET`
    /// overrides. Unset means the endpoint is open.
    pub scan_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Rolling rate-limit window per wallet.
    pub rate_limit_hours: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 84_532,
            rpc_url: None,
            launcher: Address::ZERO,
            splitter_factory: None,
            liquidity_launcher: None,
            strategy_factory: None,
            currency: None,
            submitter_key: None,
        }
    }
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: "https://api.twitter.com".to_string(),
            bearer_token: None,
            handle: "launchpad_bot".to_string(),
            trigger: "!launchcoin".to_string(),
            poll_interval_secs: 300,
            batch_limit: 100,
        }
    }
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            duration_blocks: AUCTION_DURATION_BLOCKS_ONE_WEEK,
            floor_price: None,
            default_website: "https://launchpad.xyz".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3040".to_string(),
            scan_secret: None,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { rate_limit_hours: 24 }
    }
}

impl KeeperConfig {
    /// Load configuration from a TOML file and apply env overrides.
    pub fn load(path: &str) -> LaunchResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LaunchError::Config(format!("failed to read config file {path}: {e}")))?;
        let mut config: KeeperConfig = toml::from_str(&content)
            .map_err(|e| LaunchError::Config(format!("failed to parse config file {path}: {e}")))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Env vars win over file values for secrets.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("MENTION_BEARER_TOKEN") {
            self.mentions.bearer_token = Some(token);
        }
        if let Ok(key) = std::env::var("SALT_MINER_API_KEY") {
            self.mining.api_key = Some(key);
        }
        if let Ok(secret) = std::env::var("SCAN_SECRET") {
            self.server.scan_secret = Some(secret);
        }
        if let Ok(key) = std::env::var("SUBMITTER_PRIVATE_KEY") {
            self.chain.submitter_key = Some(key);
        }
    }

    pub fn validate(&self) -> LaunchResult<()> {
        if self.chain.launcher == Address::ZERO {
            return Err(LaunchError::Config("chain.launcher is required".into()));
        }
        if ChainProfile::for_chain_id(self.chain.chain_id).is_none()
            && (self.chain.liquidity_launcher.is_none() || self.chain.strategy_factory.is_none())
        {
            return Err(LaunchError::Config(format!(
                "unknown chain id {}: set chain.liquidity_launcher and chain.strategy_factory explicitly",
                self.chain.chain_id
            )));
        }
        if self.auction.duration_blocks < 2 {
            return Err(LaunchError::Config(
                "auction.duration_blocks must be at least 2".into(),
            ));
        }
        self.floor_price()?;
        if self.limits.rate_limit_hours == 0 {
            return Err(LaunchError::Config("limits.rate_limit_hours must be > 0".into()));
        }
        if self.mentions.batch_limit == 0 || self.mentions.batch_limit > 100 {
            return Err(LaunchError::Config(
                "mentions.batch_limit must be between 1 and 100".into(),
            ));
        }
        if self.mentions.enabled && self.mentions.bearer_token.is_none() {
            return Err(LaunchError::Config(
                "mentions.enabled requires a bearer token (mentions.bearer_token or MENTION_BEARER_TOKEN)"
                    .into(),
            ));
        }
        Ok(())
    }

    pub fn profile(&self) -> Option<ChainProfile> {
        ChainProfile::for_chain_id(self.chain.chain_id)
    }

    pub fn rpc_url(&self) -> String {
        self.chain
            .rpc_url
            .clone()
            .or_else(|| self.profile().map(|p| p.default_rpc_url().to_string()))
            .unwrap_or_else(|| "http://localhost:8545".to_string())
    }

    pub fn liquidity_launcher(&self) -> Address {
        self.chain
            .liquidity_launcher
            .or_else(|| self.profile().map(|p| p.liquidity_launcher))
            .unwrap_or(Address::ZERO)
    }

    pub fn strategy_factory(&self) -> Address {
        self.chain
            .strategy_factory
            .or_else(|| self.profile().map(|p| p.strategy_factory))
            .unwrap_or(Address::ZERO)
    }

    pub fn currency(&self) -> Address {
        self.chain
            .currency
            .or_else(|| self.profile().map(|p| p.native_currency))
            .unwrap_or(Address::ZERO)
    }

    pub fn hook_flags(&self) -> Address {
        self.mining.hook_flags.unwrap_or(DEFAULT_HOOK_FLAGS)
    }

    pub fn floor_price(&self) -> LaunchResult<Option<U256>> {
        match &self.auction.floor_price {
            None => Ok(None),
            Some(raw) => raw
                .parse::<U256>()
                .map(Some)
                .map_err(|e| LaunchError::Config(format!("invalid auction.floor_price: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn valid_config() -> KeeperConfig {
        KeeperConfig {
            chain: ChainConfig {
                launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
                ..ChainConfig::default()
            },
            ..KeeperConfig::default()
        }
    }

    #[test]
    fn default_config_needs_launcher() {
        assert!(KeeperConfig::default().validate().is_err());
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn unknown_chain_requires_explicit_addresses() {
        let mut config = valid_config();
        config.chain.chain_id = 424_242;
        assert!(config.validate().is_err());

        config.chain.liquidity_launcher =
            Some(address!("1111111111111111111111111111111111111111"));
        config.chain.strategy_factory =
            Some(address!("2222222222222222222222222222222222222222"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scan_loop_requires_bearer_token() {
        let mut config = valid_config();
        config.mentions.enabled = true;
        assert!(config.validate().is_err());
        config.mentions.bearer_token = Some("token".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn floor_price_parses_decimal() {
        let mut config = valid_config();
        config.auction.floor_price = Some("2614087343949358172809269".into());
        assert!(config.floor_price().unwrap().is_some());
        config.auction.floor_price = Some("not a number".into());
        assert!(config.floor_price().is_err());
    }

    #[test]
    fn profile_defaults_resolve() {
        let config = valid_config();
        assert_ne!(config.liquidity_launcher(), Address::ZERO);
        assert_ne!(config.strategy_factory(), Address::ZERO);
        assert!(config.rpc_url().starts_with("https://"));
    }

    #[test]
    fn toml_round_trip() {
        let config = valid_config();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: KeeperConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.chain.launcher, config.chain.launcher);
        assert_eq!(parsed.mentions.trigger, "!launchcoin");
        assert_eq!(parsed.limits.rate_limit_hours, 24);
    }
}
