//! Group operations required by the ring signature engine.

use crate::*;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use digest::Digest;
use sha2::Sha512;

const KIND_POINT: u8 = 0x01;
const KIND_SCALAR: u8 = 0x02;

/// A value that can be absorbed by [`Params::hash_to_scalar`].
pub trait HashInput {
    /// Distinguishes points from scalars inside a hashed tuple.
    fn kind(&self) -> u8;

    /// Canonical 32-byte encoding
    fn encode(&self) -> [u8; 32];
}

impl HashInput for RistrettoPoint {
    fn kind(&self) -> u8 {
        KIND_POINT
    }

    fn encode(&self) -> [u8; 32] {
        self.compress().to_bytes()
    }
}

impl HashInput for Scalar {
    fn kind(&self) -> u8 {
        KIND_SCALAR
    }

    fn encode(&self) -> [u8; 32] {
        self.to_bytes()
    }
}

impl Params {
    /// `s · G`
    pub fn mul_base(&self, s: &Scalar) -> RistrettoPoint {
        self.base() * s
    }

    /// `s · P`
    pub fn mul(&self, point: &RistrettoPoint, s: &Scalar) -> RistrettoPoint {
        point * s
    }

    /// Fiat-Shamir challenge: maps an ordered tuple of points and scalars into `[0, n)`.
    pub fn hash_to_scalar(&self, items: &[&dyn HashInput]) -> Scalar {
        let mut hash = Sha512::new();
        hash.update(self.scalar_domain());
        for item in items {
            hash.update([item.kind()]);
            hash.update(item.encode());
        }
        Scalar::from_hash(hash)
    }

    /// Maps arbitrary bytes onto the group with no known discrete log relative to `G`.
    pub fn hash_to_point(&self, bytes: &[u8]) -> RistrettoPoint {
        let mut hash = Sha512::new();
        hash.update(self.point_domain());
        hash.update(bytes);
        RistrettoPoint::from_hash(hash)
    }
}

/// Sum of all the given points (2 or 3 in the signature engine).
pub fn add_points(points: &[RistrettoPoint]) -> RistrettoPoint {
    points
        .iter()
        .fold(RistrettoPoint::identity(), |acc, point| acc + point)
}
