use ringballot::{scalar_from_hex, Error, Params, Scalar, DEFAULT_DOMAIN};
use std::env::var;

/// Settings read from the environment
pub struct Config {
    pub secret_key: Option<Scalar>,
    pub domain: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let secret_key = match var("RINGBALLOT_SECRET_KEY") {
            Ok(val) => Some(scalar_from_hex(val.trim())?),
            Err(_e) => None,
        };

        let domain = match var("RINGBALLOT_DOMAIN") {
            Ok(val) => val,
            Err(_e) => DEFAULT_DOMAIN.to_owned(),
        };

        Ok(Config { secret_key, domain })
    }

    pub fn params(&self) -> Params {
        Params::with_domain(&self.domain)
    }
}
