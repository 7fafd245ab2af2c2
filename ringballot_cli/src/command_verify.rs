use crate::config::Config;
use ringballot::{point_to_hex, LinkableRingSignature};
use tracing::warn;

pub fn command_verify(matches: &clap::ArgMatches, config: &Config) {
    let params = config.params();
    let signature: LinkableRingSignature =
        crate::read_file("verify", matches.value_of("SIGNATURE").unwrap());

    if let Some(ring_file) = matches.value_of("ring") {
        let ring = crate::read_ring("verify", ring_file);
        if signature.ring() != ring.as_slice() {
            warn!("signature ring does not match {}", ring_file);
            println!("INVALID: ring mismatch");
            std::process::exit(1);
        }
    }

    if signature.is_valid(&params) {
        println!("OK");
        println!("tag: {}", point_to_hex(signature.tag()));
        if let Some(choice) = signature.choice() {
            println!("choice: {}", choice);
        }
    } else {
        println!("INVALID");
        std::process::exit(1);
    }
}

pub fn command_link(matches: &clap::ArgMatches) {
    let first: LinkableRingSignature = crate::read_file("link", matches.value_of("FIRST").unwrap());
    let second: LinkableRingSignature =
        crate::read_file("link", matches.value_of("SECOND").unwrap());

    if first.is_linked(&second) {
        println!("linked: {}", point_to_hex(first.tag()));
    } else {
        println!("not linked");
    }
}
