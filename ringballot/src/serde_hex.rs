// Hex encodings for points and scalars crossing the serialization boundary.
use crate::*;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::IsIdentity;
use std::borrow::Cow;
use std::convert::TryInto;

pub use hex_buffer_serde::Hex;

/// Hex of the compressed Ristretto encoding.
pub fn point_to_hex(point: &RistrettoPoint) -> String {
    hex::encode(point.compress().as_bytes())
}

/// Hex of the canonical little-endian scalar encoding.
pub fn scalar_to_hex(scalar: &Scalar) -> String {
    hex::encode(scalar.as_bytes())
}

/// Decode a compressed Ristretto point, rejecting anything that is not a valid encoding.
pub fn point_from_bytes(bytes: &[u8]) -> Result<RistrettoPoint, Error> {
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
        Error::MalformedInput(format!("point must be 32 bytes, found {}", bytes.len()))
    })?;
    CompressedRistretto(bytes)
        .decompress()
        .ok_or_else(|| Error::MalformedInput("invalid point encoding".to_owned()))
}

pub fn point_from_hex(hex_str: &str) -> Result<RistrettoPoint, Error> {
    let bytes = hex::decode(hex_str).map_err(|e| Error::MalformedInput(e.to_string()))?;
    point_from_bytes(&bytes)
}

/// The identity element is never a valid public key.
pub fn check_public_key(point: &RistrettoPoint) -> Result<(), Error> {
    if point.is_identity() {
        return Err(Error::MalformedInput(
            "identity is not a valid public key".to_owned(),
        ));
    }
    Ok(())
}

/// Decode a point that is going to be used as a public key.
pub fn public_key_from_hex(hex_str: &str) -> Result<RistrettoPoint, Error> {
    let point = point_from_hex(hex_str)?;
    check_public_key(&point)?;
    Ok(point)
}

/// Decode a scalar, rejecting values outside `[0, n)`.
pub fn scalar_from_bytes(bytes: &[u8]) -> Result<Scalar, Error> {
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
        Error::MalformedInput(format!("scalar must be 32 bytes, found {}", bytes.len()))
    })?;
    Scalar::from_canonical_bytes(bytes)
        .ok_or_else(|| Error::MalformedInput("scalar is not reduced modulo the group order".to_owned()))
}

pub fn scalar_from_hex(hex_str: &str) -> Result<Scalar, Error> {
    let bytes = hex::decode(hex_str).map_err(|e| Error::MalformedInput(e.to_string()))?;
    scalar_from_bytes(&bytes)
}

/// Decode an ordered ring of hex public keys.
pub fn ring_from_hex<S: AsRef<str>>(keys: &[S]) -> Result<Vec<RistrettoPoint>, Error> {
    if keys.is_empty() {
        return Err(Error::EmptyRing);
    }
    keys.iter().map(|k| public_key_from_hex(k.as_ref())).collect()
}

// a single-purpose type for use in `#[serde(with)]`
pub enum PointHex {}

impl Hex<RistrettoPoint> for PointHex {
    type Error = Error;

    fn create_bytes(point: &RistrettoPoint) -> Cow<'_, [u8]> {
        point.compress().to_bytes().to_vec().into()
    }

    fn from_bytes(bytes: &[u8]) -> Result<RistrettoPoint, Error> {
        point_from_bytes(bytes)
    }
}

// a single-purpose type for use in `#[serde(with)]`
pub enum ScalarHex {}

impl Hex<Scalar> for ScalarHex {
    type Error = Error;

    fn create_bytes(scalar: &Scalar) -> Cow<'_, [u8]> {
        scalar.to_bytes().to_vec().into()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Scalar, Error> {
        scalar_from_bytes(bytes)
    }
}

/// `#[serde(with)]` module for a ring of public keys
pub mod ring_hex {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ring: &[RistrettoPoint], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(ring.iter().map(point_to_hex))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RistrettoPoint>, D::Error> {
        let keys = Vec::<String>::deserialize(d)?;
        ring_from_hex(&keys).map_err(de::Error::custom)
    }
}

/// `#[serde(with)]` module for a list of scalars
pub mod scalars_hex {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(scalars: &[Scalar], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(scalars.iter().map(scalar_to_hex))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Scalar>, D::Error> {
        let scalars = Vec::<String>::deserialize(d)?;
        scalars
            .iter()
            .map(|s| scalar_from_hex(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(de::Error::custom)
    }
}
