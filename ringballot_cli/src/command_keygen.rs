use crate::config::Config;
use ringballot::{generate_keypair, point_to_hex, scalar_to_hex, Registration, Voter};
use tracing::info;

pub fn command_keygen(matches: &clap::ArgMatches, config: &Config) {
    let params = config.params();
    let keypair = generate_keypair(&params);
    let (secret, public) = (
        scalar_to_hex(keypair.secret()),
        point_to_hex(keypair.public()),
    );

    println!("secret-key: {}", secret);
    println!("public-key: {}", public);

    if let Some(ring_file) = matches.value_of("register") {
        let ring_file = crate::expand(ring_file);
        let description = matches.value_of("description").unwrap_or("");
        let voter = Voter::from_keypair(keypair, description);

        let mut registrations: Vec<Registration> = if std::path::Path::new(&ring_file).exists() {
            crate::read_file("keygen", &ring_file)
        } else {
            vec![]
        };
        registrations.push(voter.registration());

        let json = serde_json::to_string_pretty(&registrations).unwrap();
        if let Err(e) = std::fs::write(&ring_file, json) {
            eprintln!("ringballot keygen: unable to write {}: {}", ring_file, e);
            std::process::exit(1);
        }
        info!(ring = %ring_file, voters = registrations.len(), "registered voter");
    }
}
