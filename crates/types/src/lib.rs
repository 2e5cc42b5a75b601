/// Shared types for the LBP launchpad
///
/// This crate provides the data model and error taxonomy used across the
/// keeper, the core engine, and the miner binaries.

pub mod errors;
pub mod mention;
pub mod params;
pub mod record;
pub mod request;

// Re-export all public types
pub use errors::*;
pub use mention::*;
pub use params::*;
pub use record::*;
pub use request::*;

/// Result type alias using the shared error type
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;
