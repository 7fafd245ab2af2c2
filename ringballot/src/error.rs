use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("ringballot: signer public key is not a member of the ring")]
    NotInRing,

    #[error("ringballot: ring must contain at least one public key")]
    EmptyRing,

    #[error("ringballot: no secret key - this identity can only verify")]
    NoSecretKey,

    #[error("ringballot: malformed signature - expected {expected} responses, found {found}")]
    MalformedSignature { expected: usize, found: usize },

    #[error("ringballot: expected {expected} nonces, found {found}")]
    NonceCountMismatch { expected: usize, found: usize },

    #[error("ringballot: vote payload of {0} bytes does not fit in 32 bytes")]
    ValueTooLarge(usize),

    #[error("ringballot: malformed input: {0}")]
    MalformedInput(String),

    #[error("ringballot: secure random number generator failed: {0}")]
    Randomness(#[from] rand::Error),

    #[error("ringballot: CBOR error deserializing signature: {0}")]
    CBORDeserialization(#[from] serde_cbor::Error),

    #[error("ringballot: JSON error deserializing signature: {0}")]
    JSONDeserialization(#[from] serde_json::Error),
}

/// Ballot box errors
#[derive(Debug, Error)]
pub enum BallotError {
    #[error("ringballot ballot box: vote {0} is not accepting registrations")]
    VoteNotCreated(String),

    #[error("ringballot ballot box: vote {0} is not open")]
    VoteNotOpen(String),

    #[error("ringballot ballot box: vote {0} is not closed")]
    VoteNotClosed(String),

    #[error("ringballot ballot box: vote {0} has no registered voters")]
    NoVoters(String),

    #[error("ringballot ballot box: choice code {0} is already defined")]
    DuplicateChoice(u8),

    #[error("ringballot ballot box: ballot ring does not match the registered voters")]
    RingMismatch,

    #[error("ringballot ballot box: ballot signature failed to verify")]
    InvalidSignature,

    #[error("ringballot ballot box: ballot is linked to an already cast ballot (tag {0})")]
    DoubleVote(String),

    #[error("ringballot ballot box: invalid public key: {0}")]
    InvalidPublicKey(#[from] Error),
}
