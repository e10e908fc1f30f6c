//! Access rules: who may grant rights, who may vote or delegate.

use ballot_types::Address;
use crate::error::BallotError;
use crate::registry::VoterRegistry;
use crate::voter::Voter;

/// Checks caller permissions against the registry. Never mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessController {
    chairperson: Address,
}

impl AccessController {
    pub fn new(chairperson: Address) -> Self {
        Self { chairperson }
    }

    pub fn chairperson(&self) -> Address {
        self.chairperson
    }

    /// Validate a rights grant and return the target's current record.
    ///
    /// # Errors
    /// - `AccessDenied` if `caller` is not the chairperson
    /// - `AlreadyVoted` if `target` has voted or delegated
    /// - `AlreadyHasRights` if `target` already has weight
    pub fn check_grant(
        &self,
        registry: &VoterRegistry,
        caller: Address,
        target: Address,
    ) -> Result<Voter, BallotError> {
        if caller != self.chairperson {
            return Err(BallotError::AccessDenied { caller });
        }

        let voter = registry.get(&target);
        if voter.voted {
            return Err(BallotError::AlreadyVoted(target));
        }
        if voter.weight != 0 {
            return Err(BallotError::AlreadyHasRights(target));
        }

        Ok(voter)
    }

    /// Validate that `caller` may vote or delegate and return its record.
    ///
    /// # Errors
    /// - `NoVotingRight` if `caller` has zero weight
    /// - `AlreadyVoted` if `caller` has voted or delegated
    pub fn check_eligible(
        &self,
        registry: &VoterRegistry,
        caller: Address,
    ) -> Result<Voter, BallotError> {
        let voter = registry.get(&caller);
        if voter.weight == 0 {
            return Err(BallotError::NoVotingRight(caller));
        }
        if voter.voted {
            return Err(BallotError::AlreadyVoted(caller));
        }
        Ok(voter)
    }
}
