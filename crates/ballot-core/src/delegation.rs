//! Delegation chain resolution.
//!
//! A delegation is resolved eagerly: the delegator's weight goes to the
//! final endpoint of the chain at delegation time, either into the
//! endpoint's own weight or straight into the tally when the endpoint has
//! already voted.

use std::collections::HashSet;
use ballot_types::Address;
use crate::error::BallotError;
use crate::registry::VoterRegistry;

/// Where a delegator's weight ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTransfer {
    /// Endpoint already voted: credit its chosen proposal
    Tally { proposal: usize },
    /// Endpoint has not voted yet: add to its weight
    Endpoint,
}

/// Outcome of resolving a delegation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegationPlan {
    pub endpoint: Address,
    pub transfer: WeightTransfer,
}

/// Follows delegation chains over a registry. Never mutates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelegationResolver;

impl DelegationResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `target` to the end of its delegation chain.
    ///
    /// The visited set starts with `caller`, so a chain that leads back to
    /// the caller is reported as a cycle.
    ///
    /// # Errors
    /// - `SelfDelegation` if `target == caller`
    /// - `DelegationCycle` if the chain revisits an identity
    pub fn resolve_endpoint(
        &self,
        registry: &VoterRegistry,
        caller: Address,
        target: Address,
    ) -> Result<Address, BallotError> {
        if target == caller {
            return Err(BallotError::SelfDelegation);
        }

        let mut visited = HashSet::new();
        visited.insert(caller);

        let mut current = target;
        loop {
            if !visited.insert(current) {
                return Err(BallotError::DelegationCycle(current));
            }
            match registry.get(&current).delegate {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
    }

    /// Resolve the endpoint and decide where the caller's weight goes.
    ///
    /// # Errors
    /// Everything from [`resolve_endpoint`](Self::resolve_endpoint), plus
    /// `NoVotingRight` when the endpoint was never granted rights.
    pub fn plan(
        &self,
        registry: &VoterRegistry,
        caller: Address,
        target: Address,
    ) -> Result<DelegationPlan, BallotError> {
        let endpoint = self.resolve_endpoint(registry, caller, target)?;
        let voter = registry.get(&endpoint);

        if voter.weight == 0 {
            return Err(BallotError::NoVotingRight(endpoint));
        }

        let transfer = match (voter.voted, voter.vote) {
            (true, Some(proposal)) => WeightTransfer::Tally { proposal },
            _ => WeightTransfer::Endpoint,
        };

        Ok(DelegationPlan { endpoint, transfer })
    }

    /// Direct delegators of `endpoint`.
    pub fn delegators(&self, registry: &VoterRegistry, endpoint: &Address) -> Vec<Address> {
        registry
            .iter()
            .filter(|(_, voter)| voter.delegate.as_ref() == Some(endpoint))
            .map(|(address, _)| *address)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voter::Voter;

    fn test_address(n: u8) -> Address {
        let mut addr = [0u8; 20];
        addr[19] = n;
        Address::from_bytes(addr)
    }

    fn registered() -> Voter {
        Voter { weight: 1, ..Voter::default() }
    }

    fn delegated_to(to: Address) -> Voter {
        Voter { weight: 1, voted: true, vote: None, delegate: Some(to) }
    }

    #[test]
    fn test_self_delegation_fails() {
        let registry = VoterRegistry::new();
        let alice = test_address(1);

        let result = DelegationResolver::new().resolve_endpoint(&registry, alice, alice);
        assert_eq!(result, Err(BallotError::SelfDelegation));
    }

    #[test]
    fn test_resolve_direct_target() {
        let mut registry = VoterRegistry::new();
        let alice = test_address(1);
        let bob = test_address(2);
        registry.set(bob, registered());

        let endpoint = DelegationResolver::new().resolve_endpoint(&registry, alice, bob);
        assert_eq!(endpoint, Ok(bob));
    }

    #[test]
    fn test_resolve_follows_chain() {
        let mut registry = VoterRegistry::new();
        let alice = test_address(1);
        let bob = test_address(2);
        let charlie = test_address(3);
        let dave = test_address(4);

        // Chain: Bob -> Charlie -> Dave
        registry.set(bob, delegated_to(charlie));
        registry.set(charlie, delegated_to(dave));
        registry.set(dave, registered());

        let endpoint = DelegationResolver::new().resolve_endpoint(&registry, alice, bob);
        assert_eq!(endpoint, Ok(dave));
    }

    #[test]
    fn test_cycle_back_to_caller() {
        let mut registry = VoterRegistry::new();
        let alice = test_address(1);
        let bob = test_address(2);

        // Bob already delegated to Alice; Alice -> Bob would loop
        registry.set(alice, registered());
        registry.set(bob, delegated_to(alice));

        let result = DelegationResolver::new().resolve_endpoint(&registry, alice, bob);
        assert_eq!(result, Err(BallotError::DelegationCycle(alice)));
    }

    #[test]
    fn test_cycle_not_involving_caller() {
        let mut registry = VoterRegistry::new();
        let alice = test_address(1);
        let bob = test_address(2);
        let charlie = test_address(3);

        // A corrupt loop Bob <-> Charlie must still terminate
        registry.set(bob, delegated_to(charlie));
        registry.set(charlie, delegated_to(bob));

        let result = DelegationResolver::new().resolve_endpoint(&registry, alice, bob);
        assert_eq!(result, Err(BallotError::DelegationCycle(bob)));
    }

    #[test]
    fn test_plan_rejects_endpoint_without_rights() {
        let registry = VoterRegistry::new();
        let alice = test_address(1);
        let bob = test_address(2);

        let result = DelegationResolver::new().plan(&registry, alice, bob);
        assert_eq!(result, Err(BallotError::NoVotingRight(bob)));
    }

    #[test]
    fn test_plan_transfer_kind() {
        let mut registry = VoterRegistry::new();
        let alice = test_address(1);
        let bob = test_address(2);
        let resolver = DelegationResolver::new();

        registry.set(bob, registered());
        let plan = resolver.plan(&registry, alice, bob).unwrap();
        assert_eq!(plan.transfer, WeightTransfer::Endpoint);

        registry.set(bob, Voter { weight: 1, voted: true, vote: Some(2), delegate: None });
        let plan = resolver.plan(&registry, alice, bob).unwrap();
        assert_eq!(plan, DelegationPlan { endpoint: bob, transfer: WeightTransfer::Tally { proposal: 2 } });
    }

    #[test]
    fn test_delegators() {
        let mut registry = VoterRegistry::new();
        let alice = test_address(1);
        let bob = test_address(2);
        let charlie = test_address(3);

        registry.set(bob, registered());
        registry.set(alice, delegated_to(bob));
        registry.set(charlie, delegated_to(bob));

        let delegators = DelegationResolver::new().delegators(&registry, &bob);
        assert_eq!(delegators, vec![alice, charlie]);
    }
}
