use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum VotingError {
    /// Caller lacks the required role or whitelist membership,
    /// or voting is paused.
    Unauthorized = 1,
    /// Operation is not legal in the current workflow status.
    PhaseViolation = 2,
    /// The voter already cast their one ballot.
    AlreadyVoted = 3,
    /// No proposal exists with the given id.
    IndexOutOfRange = 4,
    /// A winner was requested over an empty proposal list.
    EmptyInput = 5,
    /// Malformed input, e.g. an empty proposal description.
    InvalidArgument = 6,
    NotInitialized = 7,
    AlreadyInitialized = 8,
}
