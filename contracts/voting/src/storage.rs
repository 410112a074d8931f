use soroban_sdk::{Address, Env};

use crate::types::{BallotRecord, DataKey, Proposal, WorkflowStatus};

// ── Ledger TTL ───────────────────────────────────────────────────────────────
// Election state must outlive the whole workflow, including a long gap before
// the final tally. At ~5s per ledger: 1 year ≈ 6,307,200 ledgers.
const STATE_TTL_LEDGERS: u32 = 6_307_200;

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, STATE_TTL_LEDGERS, STATE_TTL_LEDGERS);
}

// ── Owner ────────────────────────────────────────────────────────────────────

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().persistent().set(&DataKey::Owner, owner);
    bump(env, &DataKey::Owner);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Owner)
}

pub fn has_owner(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Owner)
}

/// Renouncing removes the key entirely; `None` is the null-owner sentinel.
pub fn clear_owner(env: &Env) {
    env.storage().persistent().remove(&DataKey::Owner);
}

// ── Workflow status ──────────────────────────────────────────────────────────

pub fn get_status(env: &Env) -> WorkflowStatus {
    env.storage()
        .persistent()
        .get(&DataKey::Status)
        .unwrap_or(WorkflowStatus::RegisteringVoters)
}

pub fn set_status(env: &Env, status: WorkflowStatus) {
    env.storage().persistent().set(&DataKey::Status, &status);
    bump(env, &DataKey::Status);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().persistent().set(&DataKey::Paused, &paused);
    bump(env, &DataKey::Paused);
}

// ── Quorum configuration ─────────────────────────────────────────────────────

pub fn quorum_counts_owner(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::QuorumCountsOwner)
        .unwrap_or(true)
}

pub fn set_quorum_counts_owner(env: &Env, counts: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::QuorumCountsOwner, &counts);
    bump(env, &DataKey::QuorumCountsOwner);
}

// ── Whitelist ────────────────────────────────────────────────────────────────

/// Insert an address into the whitelist. Returns false when it was already
/// present; membership is never revoked and the count never decreases.
pub fn add_to_whitelist(env: &Env, voter: &Address) -> bool {
    if is_whitelisted(env, voter) {
        return false;
    }
    let key = DataKey::Whitelisted(voter.clone());
    env.storage().persistent().set(&key, &true);
    bump(env, &key);

    let count = get_voter_count(env) + 1;
    env.storage().persistent().set(&DataKey::VoterCount, &count);
    bump(env, &DataKey::VoterCount);
    true
}

pub fn is_whitelisted(env: &Env, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .get::<DataKey, bool>(&DataKey::Whitelisted(voter.clone()))
        .unwrap_or(false)
}

pub fn get_voter_count(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::VoterCount)
        .unwrap_or(0u32)
}

// ── Ballots ──────────────────────────────────────────────────────────────────

pub fn save_ballot(env: &Env, voter: &Address, ballot: &BallotRecord) {
    let key = DataKey::Ballot(voter.clone());
    env.storage().persistent().set(&key, ballot);
    bump(env, &key);
}

pub fn get_ballot(env: &Env, voter: &Address) -> Option<BallotRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Ballot(voter.clone()))
}

pub fn get_ballots_cast(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::BallotsCast)
        .unwrap_or(0u32)
}

pub fn increment_ballots_cast(env: &Env) -> u32 {
    let count = get_ballots_cast(env) + 1;
    env.storage().persistent().set(&DataKey::BallotsCast, &count);
    bump(env, &DataKey::BallotsCast);
    count
}

// ── Proposals ────────────────────────────────────────────────────────────────

pub fn get_proposal_count(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ProposalCount)
        .unwrap_or(0u32)
}

pub fn set_proposal_count(env: &Env, count: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::ProposalCount, &count);
    bump(env, &DataKey::ProposalCount);
}

pub fn save_proposal(env: &Env, proposal_id: u32, proposal: &Proposal) {
    let key = DataKey::Proposal(proposal_id);
    env.storage().persistent().set(&key, proposal);
    bump(env, &key);
}

pub fn get_proposal(env: &Env, proposal_id: u32) -> Option<Proposal> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(proposal_id))
}

// ── Tally result ─────────────────────────────────────────────────────────────

pub fn set_winning_proposal(env: &Env, proposal_id: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::WinningProposal, &proposal_id);
    bump(env, &DataKey::WinningProposal);
}

pub fn get_winning_proposal(env: &Env) -> Option<u32> {
    env.storage().persistent().get(&DataKey::WinningProposal)
}

pub fn quorum_announced(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::QuorumAnnounced)
        .unwrap_or(false)
}

pub fn set_quorum_announced(env: &Env, announced: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::QuorumAnnounced, &announced);
    bump(env, &DataKey::QuorumAnnounced);
}
