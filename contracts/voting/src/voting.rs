use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Vec};

use crate::{
    errors::VotingError,
    storage,
    types::{BallotRecord, Proposal, TallyOutcome, WorkflowStatus},
};

/// Announcement published when a final tally misses the participation
/// quorum. Kept verbatim from the original deployment.
const QUORUM_MISSED_MSG: &str =
    "Le vote n'a pas été comptabilisé car le seuil de participation n'a pas été atteint.";

#[contract]
pub struct VotingContract;

#[contractimpl]
impl VotingContract {
    // ── Initialization ───────────────────────────────────────────────────────

    /// Set up the election with its controlling owner. Can only be called
    /// once. The owner is whitelisted implicitly at genesis.
    ///
    /// `count_owner_in_quorum` fixes the participation denominator: when
    /// false, the owner is excluded from both sides of the quorum ratio.
    pub fn initialize(
        env: Env,
        owner: Address,
        count_owner_in_quorum: bool,
    ) -> Result<(), VotingError> {
        if storage::has_owner(&env) {
            return Err(VotingError::AlreadyInitialized);
        }
        owner.require_auth();

        storage::set_owner(&env, &owner);
        storage::set_status(&env, WorkflowStatus::RegisteringVoters);
        storage::set_paused(&env, false);
        storage::set_quorum_counts_owner(&env, count_owner_in_quorum);
        storage::add_to_whitelist(&env, &owner);

        env.events().publish((symbol_short!("init"),), (owner,));

        Ok(())
    }

    // ── Identity registry ────────────────────────────────────────────────────

    /// Add a voter to the whitelist. Owner-only, and legal only while voters
    /// are being registered; membership is insertion-only after that.
    /// Re-authorizing an already-whitelisted address is a silent no-op.
    pub fn authorize(env: Env, voter: Address) -> Result<(), VotingError> {
        Self::require_owner(&env)?;
        Self::require_status(&env, WorkflowStatus::RegisteringVoters)?;

        if storage::add_to_whitelist(&env, &voter) {
            env.events().publish((symbol_short!("auth"),), (voter,));
        }

        Ok(())
    }

    /// Hand the election over to a new owner. The incoming owner is
    /// whitelisted if absent, so the owner is always an authorized voter.
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), VotingError> {
        let previous = Self::require_owner(&env)?;

        storage::set_owner(&env, &new_owner);
        storage::add_to_whitelist(&env, &new_owner);

        env.events().publish(
            (symbol_short!("own_xfer"),),
            (previous, new_owner),
        );

        Ok(())
    }

    /// Give up ownership entirely. Every owner-only operation fails from
    /// then on; the election can no longer be steered.
    pub fn renounce_ownership(env: Env) -> Result<(), VotingError> {
        let previous = Self::require_owner(&env)?;

        storage::clear_owner(&env);

        env.events().publish((symbol_short!("own_rnc"),), (previous,));

        Ok(())
    }

    // ── Workflow transitions ─────────────────────────────────────────────────
    // Each transition requires exactly the preceding status. Calling one
    // again while already in its target status fails with PhaseViolation;
    // there are no re-entrant no-ops.

    pub fn start_proposals_registration(env: Env) -> Result<(), VotingError> {
        Self::advance(
            &env,
            WorkflowStatus::RegisteringVoters,
            WorkflowStatus::ProposalsRegistrationStarted,
        )
    }

    pub fn end_proposals_registration(env: Env) -> Result<(), VotingError> {
        Self::advance(
            &env,
            WorkflowStatus::ProposalsRegistrationStarted,
            WorkflowStatus::ProposalsRegistrationEnded,
        )
    }

    pub fn start_voting_session(env: Env) -> Result<(), VotingError> {
        Self::advance(
            &env,
            WorkflowStatus::ProposalsRegistrationEnded,
            WorkflowStatus::VotingSessionStarted,
        )
    }

    pub fn end_voting_session(env: Env) -> Result<(), VotingError> {
        Self::advance(
            &env,
            WorkflowStatus::VotingSessionStarted,
            WorkflowStatus::VotingSessionEnded,
        )
    }

    /// Emergency pause switch. Owner-only, legal in any status, but only
    /// material while the voting session is open: `cast_vote` refuses
    /// ballots while paused.
    pub fn toggle_voting_pause(env: Env) -> Result<(), VotingError> {
        let owner = Self::require_owner(&env)?;

        let paused = !storage::is_paused(&env);
        storage::set_paused(&env, paused);

        if paused {
            env.events().publish((symbol_short!("vote_halt"),), (owner,));
        } else {
            env.events().publish((symbol_short!("vote_go"),), (owner,));
        }

        Ok(())
    }

    // ── Proposals ────────────────────────────────────────────────────────────

    /// Register a proposal. The proposer must be whitelisted, the proposal
    /// session open, and the description non-empty. Returns the new id
    /// (insertion order, zero-based).
    pub fn submit_proposal(
        env: Env,
        proposer: Address,
        description: String,
    ) -> Result<u32, VotingError> {
        proposer.require_auth();
        if !storage::is_whitelisted(&env, &proposer) {
            return Err(VotingError::Unauthorized);
        }
        Self::require_status(&env, WorkflowStatus::ProposalsRegistrationStarted)?;
        if description.len() == 0 {
            return Err(VotingError::InvalidArgument);
        }

        let proposal_id = storage::get_proposal_count(&env);
        storage::save_proposal(
            &env,
            proposal_id,
            &Proposal {
                description,
                vote_count: 0,
            },
        );
        storage::set_proposal_count(&env, proposal_id + 1);

        env.events().publish(
            (symbol_short!("prop_reg"), proposal_id),
            (proposer,),
        );

        Ok(proposal_id)
    }

    /// Retrieve a single proposal by id.
    pub fn get_proposal(env: Env, proposal_id: u32) -> Result<Proposal, VotingError> {
        storage::get_proposal(&env, proposal_id).ok_or(VotingError::IndexOutOfRange)
    }

    /// All proposals in insertion order, with their current vote counts.
    pub fn get_proposals(env: Env) -> Vec<Proposal> {
        let mut proposals = Vec::new(&env);
        for proposal_id in 0..storage::get_proposal_count(&env) {
            if let Some(proposal) = storage::get_proposal(&env, proposal_id) {
                proposals.push_back(proposal);
            }
        }
        proposals
    }

    pub fn get_proposal_count(env: Env) -> u32 {
        storage::get_proposal_count(&env)
    }

    // ── Ballots ──────────────────────────────────────────────────────────────

    /// Cast the voter's single ballot for a proposal. The vote-count bump,
    /// ballot record, and participation counter commit together or not at
    /// all; any failed check reverts the whole call.
    pub fn cast_vote(env: Env, voter: Address, proposal_id: u32) -> Result<(), VotingError> {
        voter.require_auth();
        if !storage::is_whitelisted(&env, &voter) {
            return Err(VotingError::Unauthorized);
        }
        Self::require_status(&env, WorkflowStatus::VotingSessionStarted)?;
        if storage::is_paused(&env) {
            return Err(VotingError::Unauthorized);
        }
        if storage::get_ballot(&env, &voter).map_or(false, |b| b.has_voted) {
            return Err(VotingError::AlreadyVoted);
        }
        let mut proposal =
            storage::get_proposal(&env, proposal_id).ok_or(VotingError::IndexOutOfRange)?;

        proposal.vote_count += 1;
        storage::save_proposal(&env, proposal_id, &proposal);
        storage::save_ballot(
            &env,
            &voter,
            &BallotRecord {
                has_voted: true,
                voted_proposal_id: Some(proposal_id),
            },
        );
        storage::increment_ballots_cast(&env);

        env.events().publish((symbol_short!("voted"),), (voter, proposal_id));

        Ok(())
    }

    /// A voter's ballot record; a default (unvoted) record if none exists.
    pub fn get_ballot(env: Env, voter: Address) -> BallotRecord {
        storage::get_ballot(&env, &voter).unwrap_or(BallotRecord {
            has_voted: false,
            voted_proposal_id: None,
        })
    }

    // ── Tally ────────────────────────────────────────────────────────────────

    /// Pick the winner out of a supplied proposal list: the entry with the
    /// most votes, lowest id on ties. Pure; usable in any status. Owner-only
    /// on-chain.
    pub fn compute_winner(
        env: Env,
        proposals: Vec<Proposal>,
    ) -> Result<(String, u32), VotingError> {
        Self::require_owner(&env)?;

        let mut best: Option<Proposal> = None;
        for proposal in proposals.iter() {
            let better = match &best {
                None => true,
                // Strict inequality keeps the earliest entry on ties
                Some(b) => proposal.vote_count > b.vote_count,
            };
            if better {
                best = Some(proposal);
            }
        }

        let winner = best.ok_or(VotingError::EmptyInput)?;
        Ok((winner.description, winner.vote_count))
    }

    /// Quorum-gated final tally. Requires the voting session to be closed.
    ///
    /// Participation must be a strict majority of the eligible voters:
    /// `2 * ballots > eligible`, in integer arithmetic. Exactly half is a
    /// miss, intentionally. On a miss the announcement event fires, the
    /// status stays put, and no winner is stored. On success the winner is
    /// stored and the status advances to VotesTallied.
    pub fn tally_final(env: Env) -> Result<TallyOutcome, VotingError> {
        let owner = Self::require_owner(&env)?;
        Self::require_status(&env, WorkflowStatus::VotingSessionEnded)?;

        let mut eligible = storage::get_voter_count(&env);
        let mut ballots = storage::get_ballots_cast(&env);
        if !storage::quorum_counts_owner(&env) {
            // The owner leaves both sides of the ratio
            eligible = eligible.saturating_sub(1);
            if storage::get_ballot(&env, &owner).map_or(false, |b| b.has_voted) {
                ballots = ballots.saturating_sub(1);
            }
        }

        if 2 * u64::from(ballots) <= u64::from(eligible) {
            storage::set_quorum_announced(&env, true);
            env.events().publish(
                (symbol_short!("announce"),),
                (String::from_str(&env, QUORUM_MISSED_MSG),),
            );

            return Ok(TallyOutcome {
                quorum_met: false,
                winning_proposal_id: None,
                ballots_cast: ballots,
                eligible_voters: eligible,
            });
        }

        let winner_id = Self::leading_proposal(&env).ok_or(VotingError::EmptyInput)?;
        storage::set_winning_proposal(&env, winner_id);
        storage::set_status(&env, WorkflowStatus::VotesTallied);

        env.events().publish(
            (symbol_short!("phase"),),
            (WorkflowStatus::VotingSessionEnded, WorkflowStatus::VotesTallied),
        );

        Ok(TallyOutcome {
            quorum_met: true,
            winning_proposal_id: Some(winner_id),
            ballots_cast: ballots,
            eligible_voters: eligible,
        })
    }

    // ── Read surface ─────────────────────────────────────────────────────────

    pub fn get_status(env: Env) -> WorkflowStatus {
        storage::get_status(&env)
    }

    pub fn is_voting_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// `None` once ownership has been renounced.
    pub fn get_owner(env: Env) -> Option<Address> {
        storage::get_owner(&env)
    }

    pub fn is_whitelisted(env: Env, voter: Address) -> bool {
        storage::is_whitelisted(&env, &voter)
    }

    pub fn get_voter_count(env: Env) -> u32 {
        storage::get_voter_count(&env)
    }

    pub fn get_ballots_cast(env: Env) -> u32 {
        storage::get_ballots_cast(&env)
    }

    /// `None` until a final tally has been accepted.
    pub fn get_winning_proposal(env: Env) -> Option<u32> {
        storage::get_winning_proposal(&env)
    }

    /// Whether a quorum-failure announcement has been emitted.
    pub fn has_quorum_announcement(env: Env) -> bool {
        storage::quorum_announced(&env)
    }

    pub fn is_proposal_session_active(env: Env) -> bool {
        storage::get_status(&env) == WorkflowStatus::ProposalsRegistrationStarted
    }

    pub fn is_voting_session_active(env: Env) -> bool {
        storage::get_status(&env) == WorkflowStatus::VotingSessionStarted
            && !storage::is_paused(&env)
    }

    // ── Private helpers ──────────────────────────────────────────────────────

    fn require_owner(env: &Env) -> Result<Address, VotingError> {
        let owner = storage::get_owner(env).ok_or(VotingError::NotInitialized)?;
        owner.require_auth();
        Ok(owner)
    }

    fn require_status(env: &Env, expected: WorkflowStatus) -> Result<(), VotingError> {
        if storage::get_status(env) != expected {
            return Err(VotingError::PhaseViolation);
        }
        Ok(())
    }

    fn advance(env: &Env, from: WorkflowStatus, to: WorkflowStatus) -> Result<(), VotingError> {
        Self::require_owner(env)?;
        Self::require_status(env, from)?;

        storage::set_status(env, to);

        env.events().publish((symbol_short!("phase"),), (from, to));

        Ok(())
    }

    /// Highest vote count among stored proposals, lowest id on ties.
    fn leading_proposal(env: &Env) -> Option<u32> {
        let mut best: Option<(u32, u32)> = None; // (id, votes)
        for proposal_id in 0..storage::get_proposal_count(env) {
            if let Some(proposal) = storage::get_proposal(env, proposal_id) {
                let better = match best {
                    None => true,
                    Some((_, votes)) => proposal.vote_count > votes,
                };
                if better {
                    best = Some((proposal_id, proposal.vote_count));
                }
            }
        }
        best.map(|(proposal_id, _)| proposal_id)
    }
}
