//! Ballot Core - Vote delegation and tally engine.
//!
//! This crate provides:
//! - Chairperson-controlled voting rights
//! - Direct voting with weighted ballots
//! - Transitive delegation with cycle detection and eager weight transfer
//! - Deterministic plurality winner selection
//! - A lock-guarded shared handle and JSON ledger persistence

pub mod access;
pub mod ballot;
pub mod delegation;
pub mod error;
pub mod registry;
pub mod shared;
pub mod store;
pub mod tally;
pub mod voter;
pub mod winner;

pub use access::AccessController;
pub use ballot::{Ballot, GRANTED_WEIGHT};
pub use delegation::{DelegationPlan, DelegationResolver, WeightTransfer};
pub use error::{BallotError, StoreError};
pub use registry::VoterRegistry;
pub use shared::SharedBallot;
pub use store::{BallotSnapshot, BallotStore};
pub use tally::ProposalTally;
pub use voter::{Proposal, Voter, VoterStatus};
pub use winner::{winner_name, winning_proposal};
