//! address-miner CLI
//!
//! Finds a CREATE2 salt whose deployed strategy address encodes the
//! required hook-permission flags. Quiet mode prints exactly one line (the
//! salt) to stdout and exits 0; the keeper's subprocess strategy consumes
//! that contract.

use std::process;
use std::str::FromStr;

use alloy::primitives::{Address, B256};
use clap::Parser;

use launchpad_core::create2::{derive_strategy_address, DeployContext};
use launchpad_miner::mine_salt_parallel;

#[derive(Parser)]
#[command(name = "address-miner")]
#[command(about = "CREATE2 salt miner for hook-flagged strategy deployments")]
struct Cli {
    /// keccak256 of the strategy init code
    init_code_hash: String,

    /// Required hook flags as a 20-byte hex mask value
    hook_flags: String,

    /// Launcher contract (msg.sender of the launch call)
    #[arg(short = 'm', long, value_name = "LAUNCHER_ADDRESS")]
    launcher: String,

    /// CREATE2 strategy factory
    #[arg(short = 's', long, value_name = "STRATEGY_FACTORY_ADDRESS")]
    factory: String,

    /// Liquidity launcher
    #[arg(short = 'l', long, value_name = "LIQUIDITY_LAUNCHER_ADDRESS")]
    liquidity_launcher: String,

    /// Number of worker threads
    #[arg(short = 'n', long, default_value_t = 8)]
    threads: usize,

    /// Print only the salt
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn parse_address(raw: &str, what: &str) -> Address {
    match Address::from_str(raw) {
        Ok(address) if address != Address::ZERO => address,
        _ => {
            eprintln!("Error: invalid {what} address: {raw}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let init_code_hash = match B256::from_str(&cli.init_code_hash) {
        Ok(hash) if hash != B256::ZERO => hash,
        _ => {
            eprintln!("Error: invalid init code hash: {}", cli.init_code_hash);
            process::exit(1);
        }
    };
    let required_flags = parse_address(&cli.hook_flags, "hook flag mask");
    let launcher = parse_address(&cli.launcher, "launcher");
    let factory = parse_address(&cli.factory, "strategy factory");
    let liquidity_launcher = parse_address(&cli.liquidity_launcher, "liquidity launcher");

    let ctx = DeployContext {
        factory,
        launcher,
        liquidity_launcher,
        init_code_hash,
        required_flags,
    };

    if !cli.quiet {
        println!("Run properties:");
        println!(" * Init code hash: {init_code_hash}");
        println!(" * Required flags: {required_flags}");
        println!(" * Launcher: {launcher}");
        println!(" * Strategy factory: {factory}");
        println!(" * Liquidity launcher: {liquidity_launcher}");
        println!(" * Threads: {}", cli.threads);
        println!("\nMining...");
    }

    let outcome = mine_salt_parallel(ctx, cli.threads);

    if cli.quiet {
        println!("{}", outcome.salt);
    } else {
        let address = derive_strategy_address(&ctx, outcome.salt);
        println!("\nSalt found after {} attempts!", outcome.attempts);
        println!(" * Salt: {}", outcome.salt);
        println!(" * Deployment address: {}", address.to_checksum(None));
    }
}
