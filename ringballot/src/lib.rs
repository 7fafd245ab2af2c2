//! Linkable ring signatures for anonymous, single-use ballots.
//!
//! A voter proves membership in a registered ring of public keys without revealing which
//! member signed. Every signature carries a tag derived from the signer's secret key and the
//! ring, so two ballots cast with the same key over the same ring are linked.

#[macro_use]
extern crate serde;

mod ballot_box;
mod error;
mod group;
mod params;
mod ring;
mod scalar;
mod serde_hex;
mod signature;
mod tally;
mod util;
mod vote;
mod voter;

pub use ballot_box::*;
pub use error::*;
pub use group::*;
pub use params::*;
pub use ring::*;
pub use scalar::*;
pub use serde_hex::*;
pub use signature::*;
pub use tally::*;
pub use util::*;
pub use vote::*;
pub use voter::*;

pub use curve25519_dalek::ristretto::RistrettoPoint;
pub use curve25519_dalek::scalar::Scalar;

#[cfg(test)]
mod tests;
