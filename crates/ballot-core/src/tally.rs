//! Proposal tally.

use ballot_types::ProposalName;
use crate::error::BallotError;
use crate::voter::Proposal;

/// Fixed, ordered proposal list with weighted vote counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalTally {
    proposals: Vec<Proposal>,
}

impl ProposalTally {
    /// Create a tally with every count at zero.
    pub fn new(names: Vec<ProposalName>) -> Result<Self, BallotError> {
        if names.is_empty() {
            return Err(BallotError::NoProposals);
        }
        Ok(Self {
            proposals: names.into_iter().map(Proposal::new).collect(),
        })
    }

    /// Rebuild from stored proposals, counts included.
    pub fn from_proposals(proposals: Vec<Proposal>) -> Result<Self, BallotError> {
        if proposals.is_empty() {
            return Err(BallotError::NoProposals);
        }
        Ok(Self { proposals })
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Proposal> {
        self.proposals.get(index)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn check_index(&self, index: usize) -> Result<(), BallotError> {
        if index >= self.proposals.len() {
            return Err(BallotError::IndexOutOfRange {
                index,
                count: self.proposals.len(),
            });
        }
        Ok(())
    }

    /// Add `weight` votes to a proposal. On error the count is untouched.
    pub fn credit(&mut self, index: usize, weight: u64) -> Result<u64, BallotError> {
        self.check_index(index)?;
        let proposal = &mut self.proposals[index];
        proposal.vote_count = proposal
            .vote_count
            .checked_add(weight)
            .ok_or(BallotError::WeightOverflow)?;
        Ok(proposal.vote_count)
    }

    /// Sum of all vote counts.
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }
}
