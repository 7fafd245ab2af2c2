use crate::config::Config;
use ringballot::{point_to_hex, scalar_from_hex, Voter};
use tracing::info;

pub fn command_sign(matches: &clap::ArgMatches, config: &Config) {
    let params = config.params();
    let ring = crate::read_ring("sign", matches.value_of("RING").unwrap());

    let choice: u8 = match matches.value_of("CHOICE").unwrap().parse() {
        Ok(choice) => choice,
        Err(e) => {
            eprintln!("ringballot sign: invalid choice: {}", e);
            std::process::exit(1);
        }
    };

    let secret_key = match matches.value_of("secret-key") {
        Some(hex) => scalar_from_hex(hex).unwrap_or_else(|e| {
            eprintln!("ringballot sign: invalid secret key: {}", e);
            std::process::exit(1);
        }),
        None => match config.secret_key {
            Some(sk) => sk,
            None => {
                eprintln!("ringballot sign: --secret-key or RINGBALLOT_SECRET_KEY required");
                std::process::exit(1);
            }
        },
    };

    let voter = Voter::from_secret(&params, secret_key, "").unwrap_or_else(|e| {
        eprintln!("ringballot sign: invalid secret key: {}", e);
        std::process::exit(1);
    });
    let mut rng = rand::rngs::OsRng {};
    let signature = voter
        .cast_ballot(&params, &ring, choice, &mut rng)
        .unwrap_or_else(|e| {
            eprintln!("ringballot sign: {}", e);
            std::process::exit(1);
        });
    info!(ring_size = ring.len(), tag = %point_to_hex(signature.tag()), "ballot signed");

    match matches.value_of("output") {
        Some(output) => {
            let output = crate::expand(output);
            let bytes = if matches.is_present("cbor") {
                signature.to_bytes()
            } else {
                serde_json::to_vec_pretty(&signature).unwrap()
            };
            if let Err(e) = std::fs::write(&output, bytes) {
                eprintln!("ringballot sign: unable to write {}: {}", output, e);
                std::process::exit(1);
            }
        }
        None => {
            let json = serde_json::to_string_pretty(&signature).unwrap();
            println!("{}", json);
        }
    }
}
