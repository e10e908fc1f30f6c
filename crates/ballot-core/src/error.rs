use ballot_types::Address;
use thiserror::Error;

/// Errors returned by ballot operations.
///
/// Every operation validates all of its preconditions before touching the
/// ledger, so receiving one of these means nothing changed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BallotError {
    #[error("Only chairperson can give right to vote (caller {caller})")]
    AccessDenied { caller: Address },

    #[error("Voter {0} already has the right to vote")]
    AlreadyHasRights(Address),

    #[error("Voter {0} already voted")]
    AlreadyVoted(Address),

    #[error("Voter {0} has no right to vote")]
    NoVotingRight(Address),

    #[error("Self-delegation is disallowed")]
    SelfDelegation,

    #[error("Found loop in delegation at {0}")]
    DelegationCycle(Address),

    #[error("Proposal index {index} out of range ({count} proposals)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("A ballot needs at least one proposal")]
    NoProposals,

    #[error("Vote weight overflow")]
    WeightOverflow,
}

/// Errors from loading or saving a ledger file.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Ledger not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt ledger: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BallotError::IndexOutOfRange { index: 5, count: 3 };
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_access_denied_names_caller() {
        let caller = Address::from_bytes([9u8; 20]);
        let err = BallotError::AccessDenied { caller };
        assert!(err.to_string().contains(&caller.to_string()));
    }
}
