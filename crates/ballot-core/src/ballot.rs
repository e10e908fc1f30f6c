//! The ballot ledger and its operations.
//!
//! `Ballot` owns every voter record and the proposal tally for one run.
//! Mutations take `&mut self`; wrap the ledger in
//! [`SharedBallot`](crate::shared::SharedBallot) for concurrent callers.

use ballot_types::{Address, ProposalName};
use tracing::debug;
use crate::access::AccessController;
use crate::delegation::{DelegationResolver, WeightTransfer};
use crate::error::BallotError;
use crate::registry::VoterRegistry;
use crate::tally::ProposalTally;
use crate::voter::{Proposal, Voter, VoterStatus};
use crate::winner;

/// Weight the chairperson starts with and every grant hands out.
pub const GRANTED_WEIGHT: u64 = 1;

/// Voter and proposal state for one ballot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    access: AccessController,
    resolver: DelegationResolver,
    registry: VoterRegistry,
    tally: ProposalTally,
    total_granted: u64,
}

impl Ballot {
    /// Create a ballot with the given proposals. The chairperson is seeded
    /// with the right to vote.
    pub fn new(names: Vec<ProposalName>, chairperson: Address) -> Result<Self, BallotError> {
        let tally = ProposalTally::new(names)?;
        let mut registry = VoterRegistry::new();
        registry.set(chairperson, Voter { weight: GRANTED_WEIGHT, ..Voter::default() });

        debug!(%chairperson, proposals = tally.len(), "Ballot created");

        Ok(Self {
            access: AccessController::new(chairperson),
            resolver: DelegationResolver::new(),
            registry,
            tally,
            total_granted: GRANTED_WEIGHT,
        })
    }

    /// Reassemble a ballot from stored parts without re-validating them.
    pub(crate) fn from_parts(
        chairperson: Address,
        registry: VoterRegistry,
        tally: ProposalTally,
        total_granted: u64,
    ) -> Self {
        Self {
            access: AccessController::new(chairperson),
            resolver: DelegationResolver::new(),
            registry,
            tally,
            total_granted,
        }
    }

    /// Give `target` the right to vote. Only the chairperson may call this.
    pub fn grant_rights(&mut self, caller: Address, target: Address) -> Result<(), BallotError> {
        let mut voter = self.access.check_grant(&self.registry, caller, target)?;
        let total_granted = self
            .total_granted
            .checked_add(GRANTED_WEIGHT)
            .ok_or(BallotError::WeightOverflow)?;

        voter.weight = GRANTED_WEIGHT;
        self.registry.set(target, voter);
        self.total_granted = total_granted;

        debug!(%target, "Granted right to vote");
        Ok(())
    }

    /// Cast the caller's full weight for proposal `index`.
    pub fn vote(&mut self, caller: Address, index: usize) -> Result<(), BallotError> {
        let mut voter = self.access.check_eligible(&self.registry, caller)?;

        // The tally is the only fallible write, so it goes first.
        let vote_count = self.tally.credit(index, voter.weight)?;

        voter.voted = true;
        voter.vote = Some(index);
        let weight = voter.weight;
        self.registry.set(caller, voter);

        debug!(%caller, index, weight, vote_count, "Vote cast");
        Ok(())
    }

    /// Delegate the caller's vote to `target`, following `target`'s own
    /// delegations to the end of the chain.
    pub fn delegate(&mut self, caller: Address, target: Address) -> Result<(), BallotError> {
        let mut delegator = self.access.check_eligible(&self.registry, caller)?;
        let plan = self.resolver.plan(&self.registry, caller, target)?;

        match plan.transfer {
            WeightTransfer::Tally { proposal } => {
                self.tally.credit(proposal, delegator.weight)?;
            }
            WeightTransfer::Endpoint => {
                let mut endpoint = self.registry.get(&plan.endpoint);
                endpoint.weight = endpoint
                    .weight
                    .checked_add(delegator.weight)
                    .ok_or(BallotError::WeightOverflow)?;
                self.registry.set(plan.endpoint, endpoint);
            }
        }

        delegator.voted = true;
        delegator.delegate = Some(plan.endpoint);
        let weight = delegator.weight;
        self.registry.set(caller, delegator);

        debug!(%caller, %target, endpoint = %plan.endpoint, weight, "Vote delegated");
        Ok(())
    }

    /// Index of the current plurality leader (lowest index on ties).
    pub fn winning_proposal(&self) -> usize {
        winner::winning_proposal(self.tally.proposals())
    }

    /// Name of the current plurality leader.
    pub fn winner_name(&self) -> ProposalName {
        self.tally.proposals()[self.winning_proposal()].name
    }

    pub fn chairperson(&self) -> Address {
        self.access.chairperson()
    }

    /// Snapshot of a voter (zero record for unknown identities).
    pub fn voter(&self, address: &Address) -> Voter {
        self.registry.get(address)
    }

    pub fn status(&self, address: &Address) -> VoterStatus {
        self.registry.get(address).status()
    }

    /// Whether `address` currently passes the vote/delegate eligibility check.
    pub fn can_vote(&self, address: &Address) -> bool {
        self.access.check_eligible(&self.registry, *address).is_ok()
    }

    /// Identities that delegated directly to `address`.
    pub fn delegators(&self, address: &Address) -> Vec<Address> {
        self.resolver.delegators(&self.registry, address)
    }

    pub fn proposal(&self, index: usize) -> Option<&Proposal> {
        self.tally.get(index)
    }

    pub fn proposals(&self) -> &[Proposal] {
        self.tally.proposals()
    }

    pub fn voters(&self) -> impl Iterator<Item = (&Address, &Voter)> {
        self.registry.iter()
    }

    /// Total weight ever handed out by construction and grants.
    pub fn total_weight_granted(&self) -> u64 {
        self.total_granted
    }

    /// Weight already counted in the tally.
    pub fn tallied_weight(&self) -> u64 {
        self.tally.total_votes()
    }

    /// Weight held by registered voters who have neither voted nor delegated.
    pub fn pending_weight(&self) -> u64 {
        self.registry
            .iter()
            .filter(|(_, voter)| voter.is_pending())
            .map(|(_, voter)| voter.weight)
            .sum()
    }

    /// Tallied plus pending weight equals everything granted.
    pub fn is_weight_conserved(&self) -> bool {
        self.tallied_weight()
            .checked_add(self.pending_weight())
            .is_some_and(|sum| sum == self.total_granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address(n: u8) -> Address {
        let mut addr = [0u8; 20];
        addr[19] = n;
        Address::from_bytes(addr)
    }

    fn setup() -> (Ballot, Address) {
        let chair = test_address(100);
        let names = ["Proposal 1", "Proposal 2", "Proposal 3"]
            .iter()
            .map(|n| ProposalName::new(n).unwrap())
            .collect();
        (Ballot::new(names, chair).unwrap(), chair)
    }

    #[test]
    fn test_construction() {
        let (ballot, chair) = setup();
        assert_eq!(ballot.chairperson(), chair);
        assert_eq!(ballot.voter(&chair).weight, 1);
        assert_eq!(ballot.proposals().len(), 3);
        assert!(ballot.proposals().iter().all(|p| p.vote_count == 0));
        assert_eq!(ballot.total_weight_granted(), 1);
    }

    #[test]
    fn test_empty_proposals_rejected() {
        assert_eq!(
            Ballot::new(Vec::new(), test_address(1)),
            Err(BallotError::NoProposals)
        );
    }

    #[test]
    fn test_grant_and_vote() {
        let (mut ballot, chair) = setup();
        let alice = test_address(1);

        ballot.grant_rights(chair, alice).unwrap();
        assert_eq!(ballot.status(&alice), VoterStatus::Registered);
        assert!(ballot.can_vote(&alice));

        ballot.vote(alice, 2).unwrap();
        let voter = ballot.voter(&alice);
        assert!(voter.voted);
        assert_eq!(voter.vote, Some(2));
        assert!(!ballot.can_vote(&alice));
        assert_eq!(ballot.proposal(2).unwrap().vote_count, 1);
    }

    #[test]
    fn test_out_of_range_vote_is_atomic() {
        let (mut ballot, chair) = setup();
        let alice = test_address(1);
        ballot.grant_rights(chair, alice).unwrap();

        let before = ballot.clone();
        assert_eq!(
            ballot.vote(alice, 3),
            Err(BallotError::IndexOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(ballot, before);
    }

    #[test]
    fn test_delegate_to_voted_endpoint_credits_tally() {
        let (mut ballot, chair) = setup();
        let alice = test_address(1);
        let bob = test_address(2);
        ballot.grant_rights(chair, alice).unwrap();
        ballot.grant_rights(chair, bob).unwrap();

        ballot.vote(alice, 1).unwrap();
        ballot.delegate(bob, alice).unwrap();

        assert_eq!(ballot.proposal(1).unwrap().vote_count, 2);
        assert_eq!(ballot.voter(&alice).weight, 1);
        assert_eq!(ballot.voter(&bob).delegate, Some(alice));
        assert_eq!(ballot.status(&bob), VoterStatus::Delegated);
    }

    #[test]
    fn test_delegate_through_chain() {
        let (mut ballot, chair) = setup();
        let alice = test_address(1);
        let bob = test_address(2);
        ballot.grant_rights(chair, alice).unwrap();
        ballot.grant_rights(chair, bob).unwrap();

        // Bob -> Alice, then chairperson -> Bob resolves to Alice
        ballot.delegate(bob, alice).unwrap();
        ballot.delegate(chair, bob).unwrap();

        assert_eq!(ballot.voter(&chair).delegate, Some(alice));
        assert_eq!(ballot.voter(&alice).weight, 3);
        assert_eq!(ballot.delegators(&alice), vec![bob, chair]);
        assert!(ballot.is_weight_conserved());
    }

    #[test]
    fn test_delegation_cycle_rejected() {
        let (mut ballot, chair) = setup();
        let alice = test_address(1);
        ballot.grant_rights(chair, alice).unwrap();
        ballot.delegate(alice, chair).unwrap();

        let before = ballot.clone();
        assert_eq!(
            ballot.delegate(chair, alice),
            Err(BallotError::DelegationCycle(chair))
        );
        assert_eq!(ballot, before);
    }

    #[test]
    fn test_delegate_to_unregistered_rejected() {
        let (mut ballot, chair) = setup();
        let stranger = test_address(7);

        let before = ballot.clone();
        assert_eq!(
            ballot.delegate(chair, stranger),
            Err(BallotError::NoVotingRight(stranger))
        );
        assert_eq!(ballot, before);
    }

    #[test]
    fn test_weight_accounting() {
        let (mut ballot, chair) = setup();
        let alice = test_address(1);
        let bob = test_address(2);
        ballot.grant_rights(chair, alice).unwrap();
        ballot.grant_rights(chair, bob).unwrap();
        assert_eq!(ballot.pending_weight(), 3);
        assert_eq!(ballot.tallied_weight(), 0);

        ballot.delegate(bob, alice).unwrap();
        assert_eq!(ballot.pending_weight(), 3);

        ballot.vote(alice, 0).unwrap();
        assert_eq!(ballot.pending_weight(), 1);
        assert_eq!(ballot.tallied_weight(), 2);
        assert!(ballot.is_weight_conserved());
    }
}
