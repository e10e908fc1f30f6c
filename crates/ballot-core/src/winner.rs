//! Plurality winner selection.

use ballot_types::ProposalName;
use crate::voter::Proposal;

/// Index of the proposal with the most votes.
///
/// Scans left to right and only replaces the leader on a strictly greater
/// count, so ties go to the lowest index and an all-zero tally yields 0.
pub fn winning_proposal(proposals: &[Proposal]) -> usize {
    let mut winning_count = 0;
    let mut winner = 0;
    for (index, proposal) in proposals.iter().enumerate() {
        if proposal.vote_count > winning_count {
            winning_count = proposal.vote_count;
            winner = index;
        }
    }
    winner
}

/// Name of the winning proposal, `None` only for an empty list.
pub fn winner_name(proposals: &[Proposal]) -> Option<ProposalName> {
    proposals.get(winning_proposal(proposals)).map(|p| p.name)
}
