use crate::*;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use zeroize::Zeroize;

/// A secret scalar and its public point `x · G`.
///
/// The secret is wiped from memory when the key pair is dropped.
#[derive(Clone)]
pub struct KeyPair {
    secret: Scalar,
    public: RistrettoPoint,
}

impl KeyPair {
    pub fn generate<R: RngCore + CryptoRng>(params: &Params, rng: &mut R) -> Self {
        loop {
            if let Ok(keypair) = KeyPair::from_secret(params, random_scalar(rng)) {
                return keypair;
            }
        }
    }

    /// Wrap an existing secret, re-deriving the public point.
    ///
    /// A zero secret is rejected: its public point is the identity.
    pub fn from_secret(params: &Params, secret: Scalar) -> Result<Self, Error> {
        if secret == Scalar::zero() {
            return Err(Error::MalformedInput("secret key is zero".to_owned()));
        }
        let public = params.mul_base(&secret);
        Ok(KeyPair { secret, public })
    }

    pub fn secret(&self) -> &Scalar {
        &self.secret
    }

    pub fn public(&self) -> &RistrettoPoint {
        &self.public
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &point_to_hex(&self.public))
            .finish()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// A registered voter.
///
/// A voter built from a public key alone can be placed in a ring and used to check signatures,
/// but cannot sign.
#[derive(Clone, Debug)]
pub struct Voter {
    keypair: Option<KeyPair>,
    public_key: RistrettoPoint,
    pub description: String,
}

/// The `(description, public key)` pair published when a voter is registered.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Registration {
    pub description: String,

    #[serde(with = "PointHex")]
    pub public_key: RistrettoPoint,
}

impl Voter {
    /// Create a voter with a freshly generated key pair.
    pub fn new<R: RngCore + CryptoRng>(params: &Params, description: &str, rng: &mut R) -> Self {
        Voter::from_keypair(KeyPair::generate(params, rng), description)
    }

    pub fn from_secret(params: &Params, secret: Scalar, description: &str) -> Result<Self, Error> {
        let keypair = KeyPair::from_secret(params, secret)?;
        Ok(Voter::from_keypair(keypair, description))
    }

    pub fn from_keypair(keypair: KeyPair, description: &str) -> Self {
        Voter {
            public_key: *keypair.public(),
            keypair: Some(keypair),
            description: description.to_owned(),
        }
    }

    /// A verify-only voter
    pub fn from_public(public_key: RistrettoPoint, description: &str) -> Self {
        Voter {
            keypair: None,
            public_key,
            description: description.to_owned(),
        }
    }

    pub fn public_key(&self) -> &RistrettoPoint {
        &self.public_key
    }

    pub fn can_sign(&self) -> bool {
        self.keypair.is_some()
    }

    pub fn registration(&self) -> Registration {
        Registration {
            description: self.description.clone(),
            public_key: self.public_key,
        }
    }

    /// Ring-sign an arbitrary message.
    pub fn ring_sign<R: RngCore + CryptoRng>(
        &self,
        params: &Params,
        ring: &[RistrettoPoint],
        message: &[u8],
        rng: &mut R,
    ) -> Result<LinkableRingSignature, Error> {
        let keypair = self.keypair.as_ref().ok_or(Error::NoSecretKey)?;
        sign(params, ring, keypair, message, rng)
    }

    /// Ring-sign with caller-supplied nonces.
    pub fn ring_sign_with_nonces(
        &self,
        params: &Params,
        ring: &[RistrettoPoint],
        message: &[u8],
        nonces: SigningNonces,
    ) -> Result<LinkableRingSignature, Error> {
        let keypair = self.keypair.as_ref().ok_or(Error::NoSecretKey)?;
        sign_with_nonces(params, ring, keypair, message, nonces)
    }

    /// Pack `choice` into a randomly padded 32-byte message and ring-sign it.
    pub fn cast_ballot<R: RngCore + CryptoRng>(
        &self,
        params: &Params,
        ring: &[RistrettoPoint],
        choice: u8,
        rng: &mut R,
    ) -> Result<LinkableRingSignature, Error> {
        let message = encode_choice(choice, rng)?;
        self.ring_sign(params, ring, &message, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng;

    #[test]
    fn test_from_secret_rederives_public() {
        let params = Params::default();
        let secret = Scalar::from(1234u64);
        let voter = Voter::from_secret(&params, secret, "Voter0").unwrap();
        assert_eq!(*voter.public_key(), params.mul_base(&secret));
        assert!(voter.can_sign());
    }

    #[test]
    fn test_zero_secret_is_rejected() {
        let params = Params::default();
        assert!(matches!(
            KeyPair::from_secret(&params, Scalar::zero()),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            Voter::from_secret(&params, Scalar::zero(), "Voter0"),
            Err(Error::MalformedInput(_))
        ));

        // (n - 1) + 1 wraps to zero
        let minus_one = sub_mod_n(&Scalar::zero(), &Scalar::one());
        let wrapped = add_mod_n(&minus_one, &Scalar::one());
        assert!(KeyPair::from_secret(&params, wrapped).is_err());
    }

    #[test]
    fn test_public_only_voter_cannot_sign() {
        let mut rng = ChaChaRng::seed_from_u64(10);
        let params = Params::default();
        let signer = Voter::new(&params, "Voter0", &mut rng);
        let watcher = Voter::from_public(*signer.public_key(), "Voter0 (public)");
        let ring = vec![*signer.public_key()];

        assert!(!watcher.can_sign());
        assert!(matches!(
            watcher.ring_sign(&params, &ring, b"ballot", &mut rng),
            Err(Error::NoSecretKey)
        ));
        assert!(matches!(
            watcher.cast_ballot(&params, &ring, 1, &mut rng),
            Err(Error::NoSecretKey)
        ));
    }

    #[test]
    fn test_cast_ballot() {
        let mut rng = ChaChaRng::seed_from_u64(11);
        let params = Params::default();
        let voters: Vec<Voter> = (0..3)
            .map(|i| Voter::new(&params, &format!("Voter{}", i), &mut rng))
            .collect();
        let ring: Vec<RistrettoPoint> = voters.iter().map(|v| *v.public_key()).collect();

        let ballot = voters[1].cast_ballot(&params, &ring, 2, &mut rng).unwrap();
        assert!(ballot.is_valid(&params));
        assert_eq!(ballot.message().len(), VOTE_MESSAGE_LEN);
        assert_eq!(decode_choice(ballot.message()), Some(2));
    }

    #[test]
    fn test_registration_and_debug_hide_secret() {
        let params = Params::default();
        let secret = Scalar::from(99u64);
        let voter = Voter::from_secret(&params, secret, "Voter7").unwrap();

        let registration = voter.registration();
        assert_eq!(registration.description, "Voter7");
        assert_eq!(registration.public_key, params.mul_base(&secret));

        let json = serde_json::to_string(&registration).unwrap();
        let parsed: Registration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, registration);

        let debug = format!("{:?}", voter);
        assert!(!debug.contains(&scalar_to_hex(&secret)));
    }
}
