use crate::config::Config;
use ringballot::{BallotBox, LinkableRingSignature, Registration};
use tracing::{info, warn};

pub fn command_tally(matches: &clap::ArgMatches, config: &Config) {
    let params = config.params();
    let ring_file = matches.value_of("RING").unwrap();
    let registrations: Vec<Registration> = crate::read_file("tally", ring_file);

    let mut ballot_box = BallotBox::new(ring_file, "");
    let choices = matches.value_of("choices").unwrap().split(',');
    for (code, description) in choices.enumerate() {
        if code > u8::MAX as usize {
            eprintln!("ringballot tally: at most 256 choices are supported");
            std::process::exit(1);
        }
        if let Err(e) = ballot_box.set_choice(code as u8, description.trim()) {
            eprintln!("ringballot tally: {}", e);
            std::process::exit(1);
        }
    }
    for registration in registrations {
        if let Err(e) = ballot_box.register_voter(registration) {
            eprintln!("ringballot tally: {}", e);
            std::process::exit(1);
        }
    }
    if let Err(e) = ballot_box.open() {
        eprintln!("ringballot tally: {}", e);
        std::process::exit(1);
    }

    let mut rejected = 0;
    for filename in matches.values_of("SIGNATURES").unwrap() {
        let signature: LinkableRingSignature = crate::read_file("tally", filename);
        if let Err(e) = ballot_box.cast(&params, signature) {
            warn!("ballot {} rejected: {}", filename, e);
            rejected += 1;
        }
    }

    let result = ballot_box
        .close()
        .and_then(|_| ballot_box.tally())
        .unwrap_or_else(|e| {
            eprintln!("ringballot tally: {}", e);
            std::process::exit(1);
        });
    info!(accepted = ballot_box.ballots().len(), rejected, "ballots counted");

    println!("Tally:");
    for (description, votes) in result.totals.iter() {
        println!("  {} got {} votes", description, votes);
    }
    if result.skipped > 0 {
        println!("  {} ballots carried an unknown choice", result.skipped);
    }
    if rejected > 0 {
        println!("  {} ballots were rejected", rejected);
    }

    let winners = result.winners();
    match winners.len() {
        0 => println!("No winner"),
        1 => println!("The winner is {}", winners[0]),
        _ => println!("Tie between {}", winners.join(", ")),
    }
}
