//! In-memory ballot box enforcing the rules a voting contract applies to submitted ballots.

use crate::*;
use curve25519_dalek::ristretto::RistrettoPoint;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteStatus {
    /// Accepting choices and voter registrations
    Created,
    /// Accepting ballots
    Open,
    Closed,
}

/// A single vote: its choices, the registered ring of voters and the ballots cast so far.
#[derive(Clone, Debug)]
pub struct BallotBox {
    pub id: String,
    pub subject: String,
    status: VoteStatus,
    choices: IndexMap<u8, String>,
    voters: Vec<Registration>,
    ring: Vec<RistrettoPoint>,
    ballots: Vec<LinkableRingSignature>,
    tags: HashSet<[u8; 32]>,
}

impl BallotBox {
    pub fn new(id: &str, subject: &str) -> Self {
        BallotBox {
            id: id.to_owned(),
            subject: subject.to_owned(),
            status: VoteStatus::Created,
            choices: IndexMap::new(),
            voters: vec![],
            ring: vec![],
            ballots: vec![],
            tags: HashSet::new(),
        }
    }

    pub fn status(&self) -> VoteStatus {
        self.status
    }

    pub fn choices(&self) -> &IndexMap<u8, String> {
        &self.choices
    }

    pub fn voters(&self) -> &[Registration] {
        &self.voters
    }

    /// The ring ballots must be signed over, in registration order.
    pub fn ring(&self) -> &[RistrettoPoint] {
        &self.ring
    }

    /// Accepted ballots in submission order
    pub fn ballots(&self) -> &[LinkableRingSignature] {
        &self.ballots
    }

    /// Define the description of a choice code.
    pub fn set_choice(&mut self, code: u8, description: &str) -> Result<(), BallotError> {
        self.require(VoteStatus::Created)?;
        if self.choices.contains_key(&code) {
            return Err(BallotError::DuplicateChoice(code));
        }
        self.choices.insert(code, description.to_owned());
        Ok(())
    }

    /// Add a voter's public key to the ring.
    pub fn register_voter(&mut self, registration: Registration) -> Result<(), BallotError> {
        self.require(VoteStatus::Created)?;
        check_public_key(&registration.public_key)?;
        debug!(vote_id = %self.id, voter = %registration.description, "registered voter");
        self.ring.push(registration.public_key);
        self.voters.push(registration);
        Ok(())
    }

    /// Stop registrations and start accepting ballots.
    pub fn open(&mut self) -> Result<(), BallotError> {
        self.require(VoteStatus::Created)?;
        if self.ring.is_empty() {
            return Err(BallotError::NoVoters(self.id.clone()));
        }
        self.status = VoteStatus::Open;
        info!(vote_id = %self.id, voters = self.ring.len(), "vote opened");
        Ok(())
    }

    /// Accept a ballot if it is signed over the registered ring and not linked to an earlier one.
    pub fn cast(
        &mut self,
        params: &Params,
        ballot: LinkableRingSignature,
    ) -> Result<(), BallotError> {
        self.require(VoteStatus::Open)?;

        if ballot.ring() != self.ring.as_slice() {
            warn!(vote_id = %self.id, "ballot rejected: ring mismatch");
            return Err(BallotError::RingMismatch);
        }
        if !ballot.is_valid(params) {
            warn!(vote_id = %self.id, "ballot rejected: invalid signature");
            return Err(BallotError::InvalidSignature);
        }

        let tag = ballot.tag().compress().to_bytes();
        if !self.tags.insert(tag) {
            warn!(vote_id = %self.id, tag = %hex::encode(tag), "ballot rejected: double vote");
            return Err(BallotError::DoubleVote(hex::encode(tag)));
        }

        debug!(vote_id = %self.id, tag = %hex::encode(tag), "ballot accepted");
        self.ballots.push(ballot);
        Ok(())
    }

    /// Stop accepting ballots.
    pub fn close(&mut self) -> Result<(), BallotError> {
        self.require(VoteStatus::Open)?;
        self.status = VoteStatus::Closed;
        info!(vote_id = %self.id, ballots = self.ballots.len(), "vote closed");
        Ok(())
    }

    /// Count the ballots of a closed vote.
    pub fn tally(&self) -> Result<TallyResult, BallotError> {
        self.require(VoteStatus::Closed)?;
        Ok(TallyResult::tally(&self.id, &self.choices, &self.ballots))
    }

    fn require(&self, status: VoteStatus) -> Result<(), BallotError> {
        if self.status == status {
            return Ok(());
        }
        let id = self.id.clone();
        Err(match status {
            VoteStatus::Created => BallotError::VoteNotCreated(id),
            VoteStatus::Open => BallotError::VoteNotOpen(id),
            VoteStatus::Closed => BallotError::VoteNotClosed(id),
        })
    }
}
