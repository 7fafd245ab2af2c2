use crate::*;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use std::convert::TryFrom;
use std::fmt;

/// A linkable ring signature over a message.
///
/// Produced by [`sign`] and immutable afterwards. The `tag` links signatures made by the same
/// secret key over the same ring; `responses` and `seed` form the proof transcript.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawSignature")]
pub struct LinkableRingSignature {
    #[serde(with = "ring_hex")]
    ring: Vec<RistrettoPoint>,

    #[serde(with = "PointHex")]
    tag: RistrettoPoint,

    #[serde(with = "scalars_hex")]
    responses: Vec<Scalar>,

    #[serde(with = "ScalarHex")]
    seed: Scalar,

    #[serde(with = "hex_serde")]
    message: Vec<u8>,
}

/// Decoded but unchecked signature fields.
#[derive(Deserialize)]
struct RawSignature {
    #[serde(with = "ring_hex")]
    ring: Vec<RistrettoPoint>,

    #[serde(with = "PointHex")]
    tag: RistrettoPoint,

    #[serde(with = "scalars_hex")]
    responses: Vec<Scalar>,

    #[serde(with = "ScalarHex")]
    seed: Scalar,

    #[serde(with = "hex_serde")]
    message: Vec<u8>,
}

impl TryFrom<RawSignature> for LinkableRingSignature {
    type Error = Error;

    fn try_from(raw: RawSignature) -> Result<Self, Error> {
        if raw.responses.len() != raw.ring.len() {
            return Err(Error::MalformedSignature {
                expected: raw.ring.len(),
                found: raw.responses.len(),
            });
        }
        Ok(LinkableRingSignature::new(
            raw.ring,
            raw.tag,
            raw.responses,
            raw.seed,
            raw.message,
        ))
    }
}

impl LinkableRingSignature {
    pub(crate) fn new(
        ring: Vec<RistrettoPoint>,
        tag: RistrettoPoint,
        responses: Vec<Scalar>,
        seed: Scalar,
        message: Vec<u8>,
    ) -> Self {
        LinkableRingSignature {
            ring,
            tag,
            responses,
            seed,
            message,
        }
    }

    /// Reassemble a signature from values read back from storage.
    ///
    /// The parts are decoded and range-checked; whether they form a valid signature is left to
    /// [`LinkableRingSignature::is_valid`].
    pub fn from_parts<S: AsRef<str>>(
        ring: &[S],
        tag: &str,
        responses: &[S],
        seed: &str,
        message: &[u8],
    ) -> Result<Self, Error> {
        let ring = ring_from_hex(ring)?;
        let responses = responses
            .iter()
            .map(|r| scalar_from_hex(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if responses.len() != ring.len() {
            return Err(Error::MalformedSignature {
                expected: ring.len(),
                found: responses.len(),
            });
        }

        Ok(LinkableRingSignature {
            ring,
            tag: point_from_hex(tag)?,
            responses,
            seed: scalar_from_hex(seed)?,
            message: message.to_vec(),
        })
    }

    pub fn ring(&self) -> &[RistrettoPoint] {
        &self.ring
    }

    pub fn tag(&self) -> &RistrettoPoint {
        &self.tag
    }

    pub fn responses(&self) -> &[Scalar] {
        &self.responses
    }

    pub fn seed(&self) -> &Scalar {
        &self.seed
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The ballot choice carried by this signature's message
    pub fn choice(&self) -> Option<u8> {
        decode_choice(&self.message)
    }

    /// Verify this signature against its own ring and message.
    ///
    /// Malformed signatures are reported as invalid.
    pub fn is_valid(&self, params: &Params) -> bool {
        verify(
            params,
            &self.ring,
            &self.tag,
            &self.responses,
            &self.seed,
            &self.message,
        )
        .unwrap_or(false)
    }

    /// Two signatures are linked iff their tags are equal, i.e. the same secret key signed both
    /// over the same ordered ring.
    pub fn is_linked(&self, other: &LinkableRingSignature) -> bool {
        self.tag == other.tag
    }

    /// Pack into CBOR bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_cbor::to_vec(self).expect("ringballot: Unexpected error packing signature")
    }

    /// Unpack from JSON or CBOR bytes
    ///
    /// A signature whose response count differs from its ring size is rejected with
    /// [`Error::MalformedSignature`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        // If it starts with `{` then it's JSON
        let raw: RawSignature = if bytes.first() == Some(&b'{') {
            serde_json::from_slice(bytes)?
        } else {
            serde_cbor::from_slice(bytes)?
        };
        LinkableRingSignature::try_from(raw)
    }
}

impl fmt::Display for LinkableRingSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ring: Vec<String> = self.ring.iter().map(point_to_hex).collect();
        let responses: Vec<String> = self.responses.iter().map(scalar_to_hex).collect();
        writeln!(f, "PKs: {}", ring.join(","))?;
        writeln!(f, "Tag: {}", point_to_hex(&self.tag))?;
        writeln!(f, "Ring: {}", responses.join(","))?;
        writeln!(f, "Seed: {}", scalar_to_hex(&self.seed))?;
        writeln!(f, "Msg: {}", hex::encode(&self.message))
    }
}
