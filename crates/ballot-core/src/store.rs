//! JSON file persistence for a ballot ledger.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use ballot_types::Address;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::ballot::Ballot;
use crate::error::StoreError;
use crate::registry::VoterRegistry;
use crate::tally::ProposalTally;
use crate::voter::{Proposal, Voter};

/// On-disk form of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSnapshot {
    pub chairperson: Address,
    pub proposals: Vec<Proposal>,
    pub voters: BTreeMap<Address, Voter>,
    pub total_granted: u64,
}

impl BallotSnapshot {
    pub fn capture(ballot: &Ballot) -> Self {
        Self {
            chairperson: ballot.chairperson(),
            proposals: ballot.proposals().to_vec(),
            voters: ballot.voters().map(|(a, v)| (*a, v.clone())).collect(),
            total_granted: ballot.total_weight_granted(),
        }
    }

    /// Rebuild a ledger, rejecting snapshots no sequence of operations
    /// could have produced.
    pub fn restore(self) -> Result<Ballot, StoreError> {
        let count = self.proposals.len();

        let chair = self
            .voters
            .get(&self.chairperson)
            .ok_or_else(|| StoreError::Corrupt("chairperson has no voter record".to_string()))?;
        if chair.weight == 0 {
            return Err(StoreError::Corrupt("chairperson has no weight".to_string()));
        }

        for (address, voter) in &self.voters {
            if voter.vote.is_some() && voter.delegate.is_some() {
                return Err(StoreError::Corrupt(format!("{} both voted and delegated", address)));
            }
            if (voter.vote.is_some() || voter.delegate.is_some()) != voter.voted {
                return Err(StoreError::Corrupt(format!("{} has inconsistent vote flags", address)));
            }
            if let Some(index) = voter.vote {
                if index >= count {
                    return Err(StoreError::Corrupt(format!(
                        "{} voted for missing proposal {}",
                        address, index
                    )));
                }
            }
            if let Some(delegate) = &voter.delegate {
                let holds_weight = self.voters.get(delegate).is_some_and(|d| d.weight > 0);
                if !holds_weight {
                    return Err(StoreError::Corrupt(format!(
                        "{} delegated to {} which has no voting right",
                        address, delegate
                    )));
                }
            }
        }

        let tally = ProposalTally::from_proposals(self.proposals)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let registry: VoterRegistry = self.voters.into_iter().collect();
        let ballot = Ballot::from_parts(self.chairperson, registry, tally, self.total_granted);

        if !ballot.is_weight_conserved() {
            return Err(StoreError::Corrupt(format!(
                "weight not conserved: tallied {} + pending {} != granted {}",
                ballot.tallied_weight(),
                ballot.pending_weight(),
                ballot.total_weight_granted()
            )));
        }

        Ok(ballot)
    }
}

/// A ledger file on disk.
#[derive(Debug, Clone)]
pub struct BallotStore {
    path: PathBuf,
}

impl BallotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate the ledger.
    pub fn load(&self) -> Result<Ballot, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }

        let json = fs::read_to_string(&self.path)?;
        let snapshot: BallotSnapshot = serde_json::from_str(&json)?;
        let ballot = snapshot.restore()?;

        info!(path = %self.path.display(), voters = ballot.voters().count(), "Ledger loaded");
        Ok(ballot)
    }

    /// Write the ledger, replacing any previous file in one rename.
    pub fn save(&self, ballot: &Ballot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&BallotSnapshot::capture(ballot))?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), "Ledger saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ballot.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
