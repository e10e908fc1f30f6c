//! Ledger records: voters and proposals.

use ballot_types::{Address, ProposalName};
use serde::{Deserialize, Serialize};

/// Voting state of one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Number of votes this ballot is worth (0 = no right to vote)
    pub weight: u64,
    /// Whether the voter has voted or delegated
    pub voted: bool,
    /// Proposal chosen by a direct vote
    pub vote: Option<usize>,
    /// Endpoint the voter delegated to
    pub delegate: Option<Address>,
}

impl Voter {
    pub fn status(&self) -> VoterStatus {
        match (self.voted, self.delegate) {
            (true, Some(_)) => VoterStatus::Delegated,
            (true, None) => VoterStatus::Voted,
            (false, _) if self.weight > 0 => VoterStatus::Registered,
            (false, _) => VoterStatus::Unregistered,
        }
    }

    /// Registered and still holding an undecided ballot.
    pub fn is_pending(&self) -> bool {
        self.status() == VoterStatus::Registered
    }
}

/// Lifecycle position of a voter.
///
/// `Unregistered -> Registered -> Voted | Delegated`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoterStatus {
    Unregistered,
    Registered,
    Voted,
    Delegated,
}

impl std::fmt::Display for VoterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoterStatus::Unregistered => write!(f, "unregistered"),
            VoterStatus::Registered => write!(f, "registered"),
            VoterStatus::Voted => write!(f, "voted"),
            VoterStatus::Delegated => write!(f, "delegated"),
        }
    }
}

/// A proposal and its accumulated weighted votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub name: ProposalName,
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(name: ProposalName) -> Self {
        Self { name, vote_count: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voter_status() {
        let mut voter = Voter::default();
        assert_eq!(voter.status(), VoterStatus::Unregistered);

        voter.weight = 1;
        assert_eq!(voter.status(), VoterStatus::Registered);
        assert!(voter.is_pending());

        let mut voted = voter.clone();
        voted.voted = true;
        voted.vote = Some(0);
        assert_eq!(voted.status(), VoterStatus::Voted);

        let mut delegated = voter;
        delegated.voted = true;
        delegated.delegate = Some(Address::from_bytes([1u8; 20]));
        assert_eq!(delegated.status(), VoterStatus::Delegated);
        assert!(!delegated.is_pending());
    }

    #[test]
    fn test_new_proposal_has_no_votes() {
        let proposal = Proposal::new(ProposalName::new("Proposal 1").unwrap());
        assert_eq!(proposal.vote_count, 0);
    }
}
