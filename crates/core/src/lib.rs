/// Core engine for the LBP launchpad
///
/// Pure domain logic plus the salt-search strategies: CREATE2 address
/// predicate, auction schedule construction and ABI encoding, and
/// launch-parameter assembly. Everything here is deterministic given its
/// inputs except the salt engine's network/subprocess strategies.

pub mod auction;
pub mod chains;
pub mod constants;
pub mod create2;
pub mod prepare;
pub mod salt;

pub use auction::{build_auction_schedule, encode_auction_params, AuctionOptions, AuctionSchedule, AuctionStep};
pub use chains::ChainProfile;
pub use create2::{derive_strategy_address, satisfies_flags, wrap_salt, DeployContext};
pub use prepare::{assemble_launch_params, AssembleOptions, ChainState};
pub use salt::{MineContext, MinedSalt, RemoteMiner, SaltSearchEngine, SaltSource, SubprocessMiner};
