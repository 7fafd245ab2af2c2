//! Linkable AOS 1-out-of-n ring signatures.
//!
//! A signature over a ring of `m` public keys consists of the tag, `m` response scalars and one
//! seed scalar. The challenge chain is a cyclic Schnorr-OR proof: every position except the
//! signer's is simulated with a random response, and the signer's position is opened with a fresh
//! commitment and patched once the chain wraps around.
//!
//! The tag is `x · L`, where `x` is the signer's secret scalar and `L` is hashed from the ordered
//! ring. It is identical for every signature produced by the same key over the same ring.

use crate::*;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, trace};
use zeroize::Zeroize;

/// Random values consumed by a single sign call.
///
/// Normally drawn fresh with [`SigningNonces::random`]. Supplying them explicitly makes signing
/// deterministic. Wiped when dropped.
#[derive(Clone)]
pub struct SigningNonces {
    pub responses: Vec<Scalar>,
    pub alpha: Scalar,
}

impl SigningNonces {
    pub fn random<R: RngCore + CryptoRng>(ring_size: usize, rng: &mut R) -> Self {
        SigningNonces {
            responses: random_scalars(rng, ring_size),
            alpha: random_scalar(rng),
        }
    }
}

impl Zeroize for SigningNonces {
    fn zeroize(&mut self) {
        self.responses.iter_mut().zeroize();
        self.alpha.zeroize();
    }
}

impl Drop for SigningNonces {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Position of `public` in the ring, if present.
pub fn ring_position(ring: &[RistrettoPoint], public: &RistrettoPoint) -> Option<usize> {
    ring.iter().position(|member| member == public)
}

/// Fold the ring into a single scalar, left to right.
///
/// Sensitive to both membership and order.
pub fn ring_digest(params: &Params, ring: &[RistrettoPoint]) -> Result<Scalar, Error> {
    let (first, rest) = ring.split_first().ok_or(Error::EmptyRing)?;
    let digest = rest
        .iter()
        .fold(params.hash_to_scalar(&[first]), |acc, member| {
            params.hash_to_scalar(&[&acc, member])
        });
    Ok(digest)
}

/// The per-ring base point `L` that tags are computed against.
pub fn ring_base(params: &Params, ring: &[RistrettoPoint]) -> Result<RistrettoPoint, Error> {
    let digest = ring_digest(params, ring)?;
    Ok(params.hash_to_point(digest.as_bytes()))
}

/// Values shared by signing and verification.
struct Context {
    base: RistrettoPoint,
    seed_hash: Scalar,
}

impl Context {
    fn new(params: &Params, base: RistrettoPoint, tag: &RistrettoPoint, message: &[u8]) -> Self {
        let message_point = params.hash_to_point(message);
        let seed_hash = params.hash_to_scalar(&[&message_point, tag]);
        Context { base, seed_hash }
    }

    /// One link of the challenge chain.
    fn challenge(
        &self,
        params: &Params,
        member: &RistrettoPoint,
        tag: &RistrettoPoint,
        response: &Scalar,
        c: &Scalar,
    ) -> Scalar {
        let a = add_points(&[params.mul_base(response), params.mul(member, c)]);
        let b = add_points(&[params.mul(&self.base, response), params.mul(tag, c)]);
        let inner = params.hash_to_scalar(&[tag, &a, &b]);
        params.hash_to_scalar(&[&self.seed_hash, &inner])
    }
}

/// Sign `message` as an anonymous member of `ring`.
pub fn sign<R: RngCore + CryptoRng>(
    params: &Params,
    ring: &[RistrettoPoint],
    keypair: &KeyPair,
    message: &[u8],
    rng: &mut R,
) -> Result<LinkableRingSignature, Error> {
    let nonces = SigningNonces::random(ring.len(), rng);
    sign_with_nonces(params, ring, keypair, message, nonces)
}

/// Sign with caller-supplied nonces.
///
/// Reusing nonces across different messages leaks the secret key; this exists for reproducible
/// test vectors.
pub fn sign_with_nonces(
    params: &Params,
    ring: &[RistrettoPoint],
    keypair: &KeyPair,
    message: &[u8],
    mut nonces: SigningNonces,
) -> Result<LinkableRingSignature, Error> {
    let m = ring.len();
    if m == 0 {
        return Err(Error::EmptyRing);
    }
    if nonces.responses.len() != m {
        return Err(Error::NonceCountMismatch {
            expected: m,
            found: nonces.responses.len(),
        });
    }
    let my_index = ring_position(ring, keypair.public()).ok_or(Error::NotInRing)?;

    let base = ring_base(params, ring)?;
    let tag = params.mul(&base, keypair.secret());
    let context = Context::new(params, base, &tag, message);

    // Walk the ring once, starting at the signer. challenges[i] is the challenge that
    // enters position i + 1.
    let mut challenges = vec![Scalar::zero(); m];
    let mut c = nonces.alpha;
    for step in 0..m {
        let i = (my_index + step) % m;
        c = context.challenge(params, &ring[i], &tag, &nonces.responses[i], &c);
        challenges[i] = c;
    }

    // Close the ring: the challenge that actually enters the signer's position is the last one
    // computed, so shift the signer's response by x * (alpha - c).
    let entering = challenges[(my_index + m - 1) % m];
    let gap = sub_mod_n(&nonces.alpha, &entering);
    let mut responses = std::mem::take(&mut nonces.responses);
    responses[my_index] = add_mod_n(&responses[my_index], &mul_mod_n(keypair.secret(), &gap));

    // Verification starts at position 0, so the seed is the challenge entering it.
    let seed = challenges[m - 1];

    debug!(ring_size = m, tag = %point_to_hex(&tag), "signed message");

    Ok(LinkableRingSignature::new(
        ring.to_vec(),
        tag,
        responses,
        seed,
        message.to_vec(),
    ))
}

/// Check a ring signature.
///
/// Returns `Ok(false)` when the challenge chain does not close, and an error when the inputs
/// are structurally malformed.
pub fn verify(
    params: &Params,
    ring: &[RistrettoPoint],
    tag: &RistrettoPoint,
    responses: &[Scalar],
    seed: &Scalar,
    message: &[u8],
) -> Result<bool, Error> {
    if ring.is_empty() {
        return Err(Error::EmptyRing);
    }
    if responses.len() != ring.len() {
        return Err(Error::MalformedSignature {
            expected: ring.len(),
            found: responses.len(),
        });
    }

    let base = ring_base(params, ring)?;
    let context = Context::new(params, base, tag, message);
    let c = ring
        .iter()
        .zip(responses)
        .fold(*seed, |c, (member, response)| {
            context.challenge(params, member, tag, response, &c)
        });

    let valid = c == *seed;
    trace!(ring_size = ring.len(), valid, "verified ring signature");
    Ok(valid)
}
