#![no_std]

mod errors;
mod storage;
mod types;
mod voting;

pub use errors::VotingError;
pub use types::{BallotRecord, DataKey, Proposal, TallyOutcome, WorkflowStatus};
pub use voting::{VotingContract, VotingContractClient};
