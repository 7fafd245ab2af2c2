use crate::*;

/// Generate a fresh voter key pair from the operating system's CSPRNG.
pub fn generate_keypair(params: &Params) -> KeyPair {
    let mut csprng = rand::rngs::OsRng {};
    KeyPair::generate(params, &mut csprng)
}
