//! Ballot Types - Core type definitions for the ballot engine.
//!
//! This crate provides the value types shared by the engine and the CLI:
//! - Addresses (20-byte voter identities, hex or Bech32m encoded)
//! - Proposal names (32-byte fixed-width labels)

pub mod address;
pub mod name;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use name::ProposalName;
pub use error::TypesError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, ProposalName, TypesError};
}
