//! Thread-safe ballot handle.

use std::sync::Arc;
use parking_lot::RwLock;
use ballot_types::{Address, ProposalName};
use tracing::warn;
use crate::ballot::Ballot;
use crate::error::BallotError;
use crate::voter::{Proposal, Voter};

/// Shared ledger. Each mutation holds the write lock for the whole
/// operation; queries share the read lock and never see a half-applied
/// change.
#[derive(Debug, Clone)]
pub struct SharedBallot {
    inner: Arc<RwLock<Ballot>>,
}

impl SharedBallot {
    pub fn new(ballot: Ballot) -> Self {
        Self { inner: Arc::new(RwLock::new(ballot)) }
    }

    pub fn grant_rights(&self, caller: Address, target: Address) -> Result<(), BallotError> {
        let result = self.inner.write().grant_rights(caller, target);
        if let Err(e) = &result {
            warn!(%caller, %target, error = %e, "Rights grant rejected");
        }
        result
    }

    pub fn vote(&self, caller: Address, index: usize) -> Result<(), BallotError> {
        let result = self.inner.write().vote(caller, index);
        if let Err(e) = &result {
            warn!(%caller, index, error = %e, "Vote rejected");
        }
        result
    }

    pub fn delegate(&self, caller: Address, target: Address) -> Result<(), BallotError> {
        let result = self.inner.write().delegate(caller, target);
        if let Err(e) = &result {
            warn!(%caller, %target, error = %e, "Delegation rejected");
        }
        result
    }

    pub fn winning_proposal(&self) -> usize {
        self.inner.read().winning_proposal()
    }

    pub fn winner_name(&self) -> ProposalName {
        self.inner.read().winner_name()
    }

    pub fn chairperson(&self) -> Address {
        self.inner.read().chairperson()
    }

    pub fn voter(&self, address: &Address) -> Voter {
        self.inner.read().voter(address)
    }

    pub fn proposal(&self, index: usize) -> Option<Proposal> {
        self.inner.read().proposal(index).cloned()
    }

    /// Run a read-only closure against a consistent view of the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&Ballot) -> R) -> R {
        f(&self.inner.read())
    }

    /// Clone the current ledger.
    pub fn snapshot(&self) -> Ballot {
        self.inner.read().clone()
    }
}

impl From<Ballot> for SharedBallot {
    fn from(ballot: Ballot) -> Self {
        Self::new(ballot)
    }
}
