//! Arithmetic modulo the Ristretto255 group order `n`.
//!
//! Every scalar computation in the signature engine goes through these helpers. They are thin
//! wrappers over dalek's constant-time `Scalar` arithmetic, which keeps every value reduced into
//! `[0, n)` and never branches on secret bits.

use curve25519_dalek::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};

/// `a + b mod n`
#[inline]
pub fn add_mod_n(a: &Scalar, b: &Scalar) -> Scalar {
    a + b
}

/// `a - b mod n`
#[inline]
pub fn sub_mod_n(a: &Scalar, b: &Scalar) -> Scalar {
    a - b
}

/// `a * b mod n`
#[inline]
pub fn mul_mod_n(a: &Scalar, b: &Scalar) -> Scalar {
    a * b
}

/// Draw a scalar uniformly from `[0, n)`.
///
/// 64 random bytes are wide-reduced, so the modulo bias is negligible.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    Scalar::random(rng)
}

/// Draw `count` independent uniform scalars.
pub fn random_scalars<R: RngCore + CryptoRng>(rng: &mut R, count: usize) -> Vec<Scalar> {
    (0..count).map(|_| random_scalar(rng)).collect()
}
