//! Standalone salt-mining service
//!
//! Runs where forge and CPU headroom are available. `POST /mine` derives
//! the strategy init code hash via the forge helper, then grinds a salt
//! in-process and returns it. Optional X-API-Key auth.

use std::path::PathBuf;
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::{Address, B256};
use alloy::providers::{Provider, ProviderBuilder};
use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::process::Command;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use launchpad_core::chains::ChainProfile;
use launchpad_core::constants::{DEFAULT_HOOK_FLAGS, INIT_HASH_TIMEOUT_SECS};
use launchpad_core::create2::DeployContext;
use launchpad_core::salt::parse_init_code_hash;
use launchpad_miner::mine_salt_parallel;

#[derive(Parser)]
#[command(name = "salt-miner-server")]
#[command(about = "HTTP service mining CREATE2 salts for strategy deployments")]
struct Cli {
    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0:3040")]
    bind: String,

    /// Contracts checkout containing the init-code-hash helper script
    #[arg(long, default_value = "contracts")]
    contracts_dir: PathBuf,

    /// forge script target computing the init code hash
    #[arg(long, default_value = "script/GetInitCodeHash.s.sol:GetInitCodeHash")]
    init_hash_target: String,

    /// Worker threads per mine request
    #[arg(short = 'n', long, default_value_t = 8)]
    threads: usize,
}

#[derive(Clone)]
struct ServerState {
    contracts_dir: PathBuf,
    init_hash_target: String,
    threads: usize,
    /// From SALT_MINER_API_KEY; unset means open access.
    api_key: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

fn error_body(status: StatusCode, message: impl AsRef<str>) -> ApiError {
    (status, Json(json!({ "error": message.as_ref() })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MineBody {
    agent_address: String,
    launcher_address: String,
    /// Deployer whose pending nonce feeds the init code hash.
    factory_address: String,
    chain_id: Option<u64>,
    token_name: Option<String>,
    token_symbol: Option<String>,
    currency: Option<String>,
    current_block: Option<u64>,
    nonce: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = ServerState {
        contracts_dir: cli.contracts_dir.clone(),
        init_hash_target: cli.init_hash_target,
        threads: cli.threads,
        api_key: std::env::var("SALT_MINER_API_KEY").ok(),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/mine", post(mine_handler))
        .with_state(state);

    let listener = TcpListener::bind(&cli.bind).await?;
    info!("salt miner server listening on {}", cli.bind);
    info!("contracts dir: {:?}", cli.contracts_dir);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true, "service": "salt-miner-server" }))
}

fn parse_body_address(raw: &str, what: &str) -> Result<Address, ApiError> {
    let trimmed = raw.trim();
    if trimmed.starts_with("0x") && trimmed.len() == 42 {
        if let Ok(address) = Address::from_str(trimmed) {
            return Ok(address);
        }
    }
    Err(error_body(
        StatusCode::BAD_REQUEST,
        format!("invalid {what}"),
    ))
}

async fn mine_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<MineBody>,
) -> Result<Json<Value>, ApiError> {
    if let Some(expected) = &state.api_key {
        let presented = headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if presented != expected {
            return Err(error_body(
                StatusCode::UNAUTHORIZED,
                "invalid or missing API key",
            ));
        }
    }

    let agent = parse_body_address(&body.agent_address, "agentAddress")?;
    let launcher = parse_body_address(&body.launcher_address, "launcherAddress")?;
    let splitter_factory = parse_body_address(&body.factory_address, "factoryAddress")?;

    let chain_id = body.chain_id.unwrap_or(11_155_111);
    let Some(profile) = ChainProfile::for_chain_id(chain_id).filter(|p| p.chain_id != 1) else {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "only Base Sepolia (84532) or Ethereum Sepolia (11155111) is supported",
        ));
    };
    let rpc_url =
        std::env::var("RPC_URL").unwrap_or_else(|_| profile.default_rpc_url().to_string());

    // Resolve chain state the caller did not supply.
    let (current_block, splitter_nonce) =
        resolve_chain_state(&rpc_url, splitter_factory, body.current_block, body.nonce)
            .await
            .map_err(|e| error_body(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let init_code_hash = compute_init_code_hash(
        &state,
        &body,
        agent,
        launcher,
        splitter_factory,
        current_block,
        splitter_nonce,
        &rpc_url,
    )
    .await
    .map_err(|e| {
        error!("init code hash helper failed: {e}");
        error_body(StatusCode::INTERNAL_SERVER_ERROR, e)
    })?;

    let ctx = DeployContext {
        factory: profile.strategy_factory,
        launcher,
        liquidity_launcher: profile.liquidity_launcher,
        init_code_hash,
        required_flags: DEFAULT_HOOK_FLAGS,
    };
    let threads = state.threads;
    let outcome = tokio::task::spawn_blocking(move || mine_salt_parallel(ctx, threads))
        .await
        .map_err(|e| error_body(StatusCode::INTERNAL_SERVER_ERROR, format!("mining task failed: {e}")))?;

    info!(
        salt = %outcome.salt,
        attempts = outcome.attempts,
        "salt mined"
    );
    Ok(Json(json!({
        "salt": outcome.salt.to_string(),
        "currentBlock": current_block,
        "nonce": splitter_nonce,
    })))
}

async fn resolve_chain_state(
    rpc_url: &str,
    splitter_factory: Address,
    current_block: Option<u64>,
    nonce: Option<u64>,
) -> Result<(u64, u64), String> {
    if let (Some(block), Some(nonce)) = (current_block, nonce) {
        return Ok((block, nonce));
    }
    let url = rpc_url
        .parse()
        .map_err(|e| format!("invalid RPC URL {rpc_url}: {e}"))?;
    let provider = ProviderBuilder::new().on_http(url);

    let block = match current_block {
        Some(block) => block,
        None => provider
            .get_block_number()
            .await
            .map_err(|e| format!("get_block_number failed: {e}"))?,
    };
    let nonce = match nonce {
        Some(nonce) => nonce,
        None => provider
            .get_transaction_count(splitter_factory)
            .await
            .map_err(|e| format!("get_transaction_count failed: {e}"))?,
    };
    Ok((block, nonce))
}

#[allow(clippy::too_many_arguments)]
async fn compute_init_code_hash(
    state: &ServerState,
    body: &MineBody,
    agent: Address,
    launcher: Address,
    splitter_factory: Address,
    current_block: u64,
    splitter_nonce: u64,
    rpc_url: &str,
) -> Result<B256, String> {
    let mut cmd = Command::new("forge");
    cmd.arg("script")
        .arg(&state.init_hash_target)
        .arg("--rpc-url")
        .arg(rpc_url)
        .arg("-vvv")
        .current_dir(&state.contracts_dir)
        .env(
            "PRIVATE_KEY",
            std::env::var("PRIVATE_KEY").unwrap_or_else(|_| {
                "0x0000000000000000000000000000000000000000000000000000000000000001".into()
            }),
        )
        .env("AGENT_ADDRESS", agent.to_string())
        .env("LAUNCHER_ADDRESS", launcher.to_string())
        .env("SPLITTER_FACTORY", splitter_factory.to_string())
        .env("SPLITTER_FACTORY_NONCE", splitter_nonce.to_string())
        .env("CURRENT_BLOCK", current_block.to_string())
        .env("TOKEN_NAME", body.token_name.as_deref().unwrap_or("Agent Token"))
        .env("TOKEN_SYMBOL", body.token_symbol.as_deref().unwrap_or("AGNT"))
        .env("RPC_URL", rpc_url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(currency) = &body.currency {
        cmd.env("CURRENCY", currency);
    }

    let child = cmd.spawn().map_err(|e| format!("failed to spawn forge: {e}"))?;
    let output = tokio::time::timeout(
        Duration::from_secs(INIT_HASH_TIMEOUT_SECS),
        child.wait_with_output(),
    )
    .await
    .map_err(|_| format!("forge timed out after {INIT_HASH_TIMEOUT_SECS}s"))?
    .map_err(|e| format!("forge failed: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "forge exited {:?}: {}",
            output.status.code(),
            stderr.chars().take(300).collect::<String>()
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_init_code_hash(&stdout)
        .ok_or_else(|| "could not parse init code hash from forge output".to_string())
}
