use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::RistrettoPoint;

/// Application domain used by [`Params::default`].
pub const DEFAULT_DOMAIN: &str = "ringballot-v1";

/// Group configuration shared by every signing and verification call.
///
/// The scalar field order is fixed by the Ristretto255 group. The base point and the two hash
/// domain tags are configurable, so deployments can isolate their signatures from each other.
#[derive(Clone, Debug)]
pub struct Params {
    base: RistrettoPoint,
    scalar_domain: Vec<u8>,
    point_domain: Vec<u8>,
}

impl Params {
    /// Build parameters for the given base point and application domain.
    ///
    /// The hash-to-scalar and hash-to-point tags are both derived from `domain` and always differ.
    pub fn new(base: RistrettoPoint, domain: &str) -> Self {
        Params {
            base,
            scalar_domain: format!("{}/hash-to-scalar", domain).into_bytes(),
            point_domain: format!("{}/hash-to-point", domain).into_bytes(),
        }
    }

    /// Ristretto255 base point with a custom application domain.
    pub fn with_domain(domain: &str) -> Self {
        Params::new(RISTRETTO_BASEPOINT_POINT, domain)
    }

    /// The base point `G`
    pub fn base(&self) -> &RistrettoPoint {
        &self.base
    }

    pub(crate) fn scalar_domain(&self) -> &[u8] {
        &self.scalar_domain
    }

    pub(crate) fn point_domain(&self) -> &[u8] {
        &self.point_domain
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::with_domain(DEFAULT_DOMAIN)
    }
}
