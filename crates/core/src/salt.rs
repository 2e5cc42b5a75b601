//! Salt search engine
//!
//! Brute-force CREATE2 mining is CPU-bound and does not belong in a
//! request-serving process, so it is modeled as a pluggable capability:
//! ordered strategies behind the [`SaltSource`] trait, composed by
//! [`SaltSearchEngine`]. A strategy either fully succeeds or falls through
//! to the next; when every strategy is unavailable the engine degrades to a
//! random salt and flags it `mined = false` so callers never assume the
//! hook-flag guarantee holds.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use alloy::primitives::{Address, B256};
use async_trait::async_trait;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, warn};

use launchpad_types::SaltError;

use crate::constants::{INIT_HASH_TIMEOUT_SECS, MINER_TIMEOUT_SECS, REMOTE_MINE_TIMEOUT_SECS};

/// Everything a strategy needs to mine a salt for one token.
#[derive(Debug, Clone)]
pub struct MineContext {
    /// Owner wallet (vesting beneficiary / funds recipient).
    pub owner: Address,
    /// Launcher contract; msg.sender in the salt derivation.
    pub launcher: Address,
    /// Deployer whose pending nonce feeds the init-code-hash helper.
    pub splitter_factory: Address,
    /// CREATE2 deployer of the strategy.
    pub strategy_factory: Address,
    pub liquidity_launcher: Address,
    pub chain_id: u64,
    /// Token identity; both affect the init code hash.
    pub token_name: String,
    pub token_symbol: String,
    pub currency: Option<Address>,
    pub current_block: Option<u64>,
    pub splitter_nonce: Option<u64>,
    pub rpc_url: String,
    /// Flags the mined address must encode.
    pub hook_flags: Address,
}

/// Engine output. `mined == false` means the salt is random and the address
/// predicate will generally not hold.
#[derive(Debug, Clone)]
pub struct MinedSalt {
    pub salt: B256,
    pub mined: bool,
    pub note: Option<String>,
}

/// One salt-search strategy.
#[async_trait]
pub trait SaltSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, ctx: &MineContext) -> Result<B256, SaltError>;
}

/// Ordered strategy composition with a built-in random fallback.
#[derive(Default)]
pub struct SaltSearchEngine {
    sources: Vec<Box<dyn SaltSource>>,
}

impl SaltSearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy; earlier pushes have higher priority.
    pub fn push(&mut self, source: Box<dyn SaltSource>) {
        self.sources.push(source);
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Try each strategy in order; degrade to a random salt when all fail.
    pub async fn search(&self, ctx: &MineContext) -> MinedSalt {
        let mut last_failure: Option<String> = None;
        for source in &self.sources {
            match source.search(ctx).await {
                Ok(salt) => {
                    info!(source = source.name(), %salt, "salt mined");
                    return MinedSalt {
                        salt,
                        mined: true,
                        note: None,
                    };
                }
                Err(e) => {
                    warn!(source = source.name(), "salt source failed: {e}");
                    last_failure = Some(format!("{}: {e}", source.name()));
                }
            }
        }

        let note = match last_failure {
            Some(failure) => format!("salt mining unavailable ({failure}); using random salt"),
            None => "no salt source configured; using random salt".to_string(),
        };
        warn!("{note}");
        MinedSalt {
            salt: random_salt(),
            mined: false,
            note: Some(note),
        }
    }
}

/// 32 cryptographically random bytes.
pub fn random_salt() -> B256 {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    B256::from(bytes)
}

// ---------------------------------------------------------------------------
// Remote delegation
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MineRequestBody<'a> {
    agent_address: Address,
    launcher_address: Address,
    factory_address: Address,
    chain_id: u64,
    token_name: &'a str,
    token_symbol: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nonce: Option<u64>,
}

#[derive(Deserialize)]
struct MineResponseBody {
    salt: Option<String>,
}

/// Delegates the search to a remote mining service over one bounded POST.
pub struct RemoteMiner {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout: Duration,
}

impl RemoteMiner {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(REMOTE_MINE_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SaltSource for RemoteMiner {
    fn name(&self) -> &'static str {
        "remote-miner"
    }

    async fn search(&self, ctx: &MineContext) -> Result<B256, SaltError> {
        let url = format!("{}/mine", self.base_url.trim_end_matches('/'));
        let body = MineRequestBody {
            agent_address: ctx.owner,
            launcher_address: ctx.launcher,
            factory_address: ctx.splitter_factory,
            chain_id: ctx.chain_id,
            token_name: &ctx.token_name,
            token_symbol: &ctx.token_symbol,
            currency: ctx.currency,
            current_block: ctx.current_block,
            nonce: ctx.splitter_nonce,
        };

        let mut request = self.client.post(&url).json(&body).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        debug!(%url, "requesting remote salt mine");
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SaltError::Timeout(self.timeout.as_secs())
            } else {
                SaltError::Unavailable(format!("remote miner request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SaltError::Unavailable(format!(
                "remote miner returned {status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        let parsed: MineResponseBody = response
            .json()
            .await
            .map_err(|e| SaltError::Unavailable(format!("malformed miner response: {e}")))?;

        parsed
            .salt
            .as_deref()
            .and_then(|s| s.parse::<B256>().ok())
            .ok_or_else(|| SaltError::Unavailable("miner response carried no valid salt".into()))
    }
}

// ---------------------------------------------------------------------------
// Local subprocess delegation
// ---------------------------------------------------------------------------

/// Runs the init-code-hash helper then the brute-force miner binary, each
/// under its own timeout. Communication is process env + stdout text.
pub struct SubprocessMiner {
    contracts_dir: PathBuf,
    miner_path: PathBuf,
    /// forge target, e.g. `script/GetInitCodeHash.s.sol:GetInitCodeHash`.
    init_hash_target: String,
    init_hash_timeout: Duration,
    miner_timeout: Duration,
}

const INIT_HASH_MARKER: &str = "INIT_CODE_HASH=";

impl SubprocessMiner {
    pub fn new(
        contracts_dir: impl Into<PathBuf>,
        miner_path: impl Into<PathBuf>,
        init_hash_target: impl Into<String>,
    ) -> Self {
        Self {
            contracts_dir: contracts_dir.into(),
            miner_path: miner_path.into(),
            init_hash_target: init_hash_target.into(),
            init_hash_timeout: Duration::from_secs(INIT_HASH_TIMEOUT_SECS),
            miner_timeout: Duration::from_secs(MINER_TIMEOUT_SECS),
        }
    }

    pub fn with_timeouts(mut self, init_hash: Duration, miner: Duration) -> Self {
        self.init_hash_timeout = init_hash;
        self.miner_timeout = miner;
        self
    }

    fn helper_env(&self, ctx: &MineContext) -> Vec<(String, String)> {
        let mut env = vec![
            // Dummy key: the helper only simulates, it never signs anything real.
            (
                "PRIVATE_KEY".into(),
                std::env::var("PRIVATE_KEY").unwrap_or_else(|_| {
                    "0x0000000000000000000000000000000000000000000000000000000000000001".into()
                }),
            ),
            ("AGENT_ADDRESS".into(), ctx.owner.to_string()),
            ("LAUNCHER_ADDRESS".into(), ctx.launcher.to_string()),
            ("SPLITTER_FACTORY".into(), ctx.splitter_factory.to_string()),
            ("TOKEN_NAME".into(), ctx.token_name.clone()),
            ("TOKEN_SYMBOL".into(), ctx.token_symbol.clone()),
            ("RPC_URL".into(), ctx.rpc_url.clone()),
        ];
        if let Some(block) = ctx.current_block {
            env.push(("CURRENT_BLOCK".into(), block.to_string()));
        }
        if let Some(nonce) = ctx.splitter_nonce {
            env.push(("SPLITTER_FACTORY_NONCE".into(), nonce.to_string()));
        }
        if let Some(currency) = ctx.currency {
            env.push(("CURRENCY".into(), currency.to_string()));
        }
        env
    }

    async fn run(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, SaltError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&self.contracts_dir)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| SaltError::Unavailable(format!("failed to spawn {program}: {e}")))?;

        // Dropping the future on timeout kills the child via kill_on_drop.
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| SaltError::Timeout(timeout.as_secs()))?
            .map_err(|e| SaltError::Unavailable(format!("{program} failed: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let detail = if stderr.trim().is_empty() { &stdout } else { &stderr };
            return Err(SaltError::Unavailable(format!(
                "{program} exited {:?}: {}",
                output.status.code(),
                detail.chars().take(300).collect::<String>()
            )));
        }

        Ok(stdout)
    }
}

/// Extract the init code hash from helper output containing
/// `...INIT_CODE_HASH=0x<64 hex>...`.
pub fn parse_init_code_hash(output: &str) -> Option<B256> {
    let idx = output.find(INIT_HASH_MARKER)?;
    let rest = &output[idx + INIT_HASH_MARKER.len()..];
    rest.get(..66)?.parse::<B256>().ok()
}

/// Parse the miner's quiet-mode output: a single 0x-prefixed 32-byte line.
pub fn parse_salt_output(output: &str) -> Option<B256> {
    output.trim().lines().last()?.trim().parse::<B256>().ok()
}

#[async_trait]
impl SaltSource for SubprocessMiner {
    fn name(&self) -> &'static str {
        "subprocess-miner"
    }

    async fn search(&self, ctx: &MineContext) -> Result<B256, SaltError> {
        let env = self.helper_env(ctx);

        let forge_args: Vec<String> = vec![
            "script".into(),
            self.init_hash_target.clone(),
            "--rpc-url".into(),
            ctx.rpc_url.clone(),
            "-vvv".into(),
        ];
        let helper_out = self
            .run("forge", &forge_args, &env, self.init_hash_timeout)
            .await?;
        let init_code_hash = parse_init_code_hash(&helper_out).ok_or_else(|| {
            SaltError::Unavailable("could not parse init code hash from helper output".into())
        })?;
        debug!(%init_code_hash, "derived strategy init code hash");

        let miner_args: Vec<String> = vec![
            init_code_hash.to_string(),
            ctx.hook_flags.to_string(),
            "-m".into(),
            ctx.launcher.to_string(),
            "-s".into(),
            ctx.strategy_factory.to_string(),
            "-l".into(),
            ctx.liquidity_launcher.to_string(),
            "-q".into(),
        ];
        let miner_path = self.miner_path.to_string_lossy().into_owned();
        let miner_out = self
            .run(&miner_path, &miner_args, &env, self.miner_timeout)
            .await?;

        parse_salt_output(&miner_out).ok_or_else(|| {
            SaltError::Unavailable(format!(
                "could not parse salt from miner output: {}",
                miner_out.chars().take(100).collect::<String>()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    use crate::constants::DEFAULT_HOOK_FLAGS;

    fn test_context() -> MineContext {
        MineContext {
            owner: address!("742d35cc6634c0532925a3b844bc9e7595f2bd12"),
            launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
            splitter_factory: address!("1111111111111111111111111111111111111111"),
            strategy_factory: address!("89Dd5691e53Ea95d19ED2AbdEdCf4cBbE50da1ff"),
            liquidity_launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
            chain_id: 11_155_111,
            token_name: "Molty Coin".into(),
            token_symbol: "MOLTY".into(),
            currency: None,
            current_block: Some(8_000_000),
            splitter_nonce: Some(7),
            rpc_url: "http://localhost:8545".into(),
            hook_flags: DEFAULT_HOOK_FLAGS,
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl SaltSource for AlwaysFails {
        fn name(&self) -> &'static str {
            "always-fails"
        }

        async fn search(&self, _ctx: &MineContext) -> Result<B256, SaltError> {
            Err(SaltError::Unavailable("nope".into()))
        }
    }

    struct FixedSalt(B256);

    #[async_trait]
    impl SaltSource for FixedSalt {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn search(&self, _ctx: &MineContext) -> Result<B256, SaltError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn empty_engine_falls_back_to_random() {
        let engine = SaltSearchEngine::new();
        let result = engine.search(&test_context()).await;
        assert!(!result.mined);
        assert_ne!(result.salt, B256::ZERO);
        assert!(result.note.is_some());
    }

    #[tokio::test]
    async fn failing_sources_degrade_to_fallback() {
        let mut engine = SaltSearchEngine::new();
        engine.push(Box::new(AlwaysFails));
        engine.push(Box::new(AlwaysFails));
        let result = engine.search(&test_context()).await;
        assert!(!result.mined);
        assert!(result.note.unwrap().contains("always-fails"));
    }

    #[tokio::test]
    async fn first_successful_source_wins() {
        let salt = B256::repeat_byte(0x42);
        let mut engine = SaltSearchEngine::new();
        engine.push(Box::new(AlwaysFails));
        engine.push(Box::new(FixedSalt(salt)));
        let result = engine.search(&test_context()).await;
        assert!(result.mined);
        assert_eq!(result.salt, salt);
        assert!(result.note.is_none());
    }

    #[test]
    fn random_salts_differ() {
        assert_ne!(random_salt(), random_salt());
    }

    #[test]
    fn init_hash_parses_from_noisy_helper_output() {
        let out = format!(
            "== Logs ==\n  computing...\nCHAIN_INIT_CODE_HASH={}\nDone.\n",
            B256::repeat_byte(0xab)
        );
        assert_eq!(parse_init_code_hash(&out), Some(B256::repeat_byte(0xab)));
    }

    #[test]
    fn init_hash_missing_marker_is_none() {
        assert_eq!(parse_init_code_hash("no hash here"), None);
    }

    #[test]
    fn salt_parses_from_quiet_miner_output() {
        let salt = B256::repeat_byte(0x77);
        assert_eq!(parse_salt_output(&format!("{salt}\n")), Some(salt));
        assert_eq!(parse_salt_output("garbage"), None);
    }
}
