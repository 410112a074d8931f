use soroban_sdk::{contracttype, Address, String};

/// Election lifecycle. Transitions only ever move forward through this
/// sequence; no operation regresses the status.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum WorkflowStatus {
    RegisteringVoters = 0,
    ProposalsRegistrationStarted = 1,
    ProposalsRegistrationEnded = 2,
    VotingSessionStarted = 3,
    VotingSessionEnded = 4,
    VotesTallied = 5,
}

/// A submitted proposal. Its id is its insertion position; everything but
/// `vote_count` is immutable after registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u32,
}

/// Per-voter ballot bookkeeping. `voted_proposal_id` is set exactly once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BallotRecord {
    pub has_voted: bool,
    pub voted_proposal_id: Option<u32>,
}

/// Result of a final tally attempt.
///
/// `winning_proposal_id` is `None` when the participation quorum was missed;
/// the counts show the ratio the quorum rule was evaluated against.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TallyOutcome {
    pub quorum_met: bool,
    pub winning_proposal_id: Option<u32>,
    pub ballots_cast: u32,
    pub eligible_voters: u32,
}

/// Storage keys
#[contracttype]
pub enum DataKey {
    Owner,
    Status,
    Paused,
    // Whether the owner counts toward the participation quorum
    QuorumCountsOwner,
    Whitelisted(Address),
    // Whitelist cardinality, the quorum denominator base
    VoterCount,
    Ballot(Address),
    BallotsCast,
    ProposalCount,
    Proposal(u32),
    WinningProposal,
    QuorumAnnounced,
}
