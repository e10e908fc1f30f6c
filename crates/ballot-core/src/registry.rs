//! Voter registry: identity -> voting state.

use std::collections::BTreeMap;
use ballot_types::Address;
use crate::voter::Voter;

/// Storage for voter records. Untouched identities read as a zero voter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoterRegistry {
    voters: BTreeMap<Address, Voter>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a voter; never-seen identities return `Voter::default()`.
    pub fn get(&self, address: &Address) -> Voter {
        self.voters.get(address).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, address: Address, voter: Voter) {
        self.voters.insert(address, voter);
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.voters.contains_key(address)
    }

    /// All stored voters in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Voter)> {
        self.voters.iter()
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }
}

impl FromIterator<(Address, Voter)> for VoterRegistry {
    fn from_iter<I: IntoIterator<Item = (Address, Voter)>>(iter: I) -> Self {
        Self { voters: iter.into_iter().collect() }
    }
}
