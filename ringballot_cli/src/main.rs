use clap::{App, AppSettings, Arg, SubCommand};
use num_enum::TryFromPrimitive;
use serde::de::DeserializeOwned;
use tracing::Level;

mod command_keygen;
mod command_sign;
mod command_tally;
mod command_verify;
mod config;

use command_keygen::command_keygen;
use command_sign::command_sign;
use command_tally::command_tally;
use command_verify::{command_link, command_verify};

#[derive(TryFromPrimitive, PartialEq, Copy, Clone)]
#[repr(u8)]
enum Verbosity {
    Warn = 0,
    Info = 1,
    Debug = 2,
}

impl Verbosity {
    fn level(self) -> Level {
        match self {
            Verbosity::Warn => Level::WARN,
            Verbosity::Info => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
        }
    }
}

fn main() {
    let matches = App::new("RingBallot CLI")
        .version("0.1")
        .about("Signs, verifies and counts anonymous ring-signed ballots")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            SubCommand::with_name("keygen")
                .about("Generate a voter key pair")
                .arg(
                    Arg::with_name("description")
                        .long("description")
                        .takes_value(true)
                        .help("Human readable label for the voter"),
                )
                .arg(
                    Arg::with_name("register")
                        .long("register")
                        .takes_value(true)
                        .value_name("RING")
                        .help("Append the voter's registration to this ring file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("sign")
                .about("Cast a ballot as an anonymous member of a ring")
                .arg(
                    Arg::with_name("RING")
                        .index(1)
                        .required(true)
                        .help("Ring file (JSON or CBOR list of registrations)"),
                )
                .arg(
                    Arg::with_name("CHOICE")
                        .index(2)
                        .required(true)
                        .help("Ballot choice code (0-255)"),
                )
                .arg(
                    Arg::with_name("secret-key")
                        .long("secret-key")
                        .takes_value(true)
                        .help("Voter secret key in hex - can also be set with RINGBALLOT_SECRET_KEY"),
                )
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .help("Write the signature to a file instead of stdout"),
                )
                .arg(
                    Arg::with_name("cbor")
                        .long("cbor")
                        .requires("output")
                        .help("Write the signature as CBOR"),
                ),
        )
        .subcommand(
            SubCommand::with_name("verify")
                .about("Verify a ring-signed ballot")
                .arg(
                    Arg::with_name("SIGNATURE")
                        .index(1)
                        .required(true)
                        .help("Signature file in JSON or CBOR format"),
                )
                .arg(
                    Arg::with_name("ring")
                        .long("ring")
                        .takes_value(true)
                        .help("Require the signature to be made over this ring file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("link")
                .about("Check whether two ballots were cast with the same key")
                .arg(Arg::with_name("FIRST").index(1).required(true))
                .arg(Arg::with_name("SECOND").index(2).required(true)),
        )
        .subcommand(
            SubCommand::with_name("tally")
                .about("Count ballots cast over a ring")
                .arg(
                    Arg::with_name("RING")
                        .index(1)
                        .required(true)
                        .help("Ring file (JSON or CBOR list of registrations)"),
                )
                .arg(
                    Arg::with_name("choices")
                        .long("choices")
                        .takes_value(true)
                        .required(true)
                        .help("Comma separated choice descriptions, code 0 first"),
                )
                .arg(
                    Arg::with_name("SIGNATURES")
                        .index(2)
                        .multiple(true)
                        .required(true)
                        .help("Signature files in JSON or CBOR format"),
                ),
        )
        .get_matches();

    let verbosity = Verbosity::try_from_primitive(matches.occurrences_of("v").min(2) as u8)
        .unwrap_or(Verbosity::Warn);
    tracing_subscriber::fmt()
        .with_max_level(verbosity.level())
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_env().unwrap_or_else(|e| {
        eprintln!("ringballot: invalid environment: {}", e);
        std::process::exit(1);
    });

    // Subcommands
    match matches.subcommand() {
        ("keygen", Some(matches)) => command_keygen(matches, &config),
        ("sign", Some(matches)) => command_sign(matches, &config),
        ("verify", Some(matches)) => command_verify(matches, &config),
        ("link", Some(matches)) => command_link(matches),
        ("tally", Some(matches)) => command_tally(matches, &config),
        _ => unreachable!(),
    }
}

/// Expand `~` and environment variables in a path argument.
pub fn expand(path: &str) -> String {
    shellexpand::full(path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| path.to_owned())
}

/// Read a JSON or CBOR file, exiting with a message on failure.
pub fn read_file<T: DeserializeOwned>(command: &str, filename: &str) -> T {
    use content_inspector::ContentType;

    let filename = expand(filename);
    let file_bytes = match std::fs::read(&filename) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("ringballot {}: unable to read {}: {}", command, filename, e);
            std::process::exit(1);
        }
    };

    match content_inspector::inspect(&file_bytes) {
        ContentType::UTF_8 => serde_json::from_slice(&file_bytes).unwrap_or_else(|e| {
            eprintln!("ringballot {}: unable to parse {}: {}", command, filename, e);
            std::process::exit(1);
        }),
        ContentType::BINARY => serde_cbor::from_slice(&file_bytes).unwrap_or_else(|e| {
            eprintln!("ringballot {}: unable to parse {}: {}", command, filename, e);
            std::process::exit(1);
        }),
        _ => {
            eprintln!("ringballot {}: invalid file format for {}", command, filename);
            std::process::exit(1);
        }
    }
}

/// Load a ring of registrations and return its public keys in order.
pub fn read_ring(command: &str, filename: &str) -> Vec<ringballot::RistrettoPoint> {
    let registrations: Vec<ringballot::Registration> = read_file(command, filename);
    if registrations.is_empty() {
        eprintln!("ringballot {}: ring {} has no voters", command, filename);
        std::process::exit(1);
    }
    for registration in &registrations {
        if let Err(e) = ringballot::check_public_key(&registration.public_key) {
            eprintln!("ringballot {}: voter {}: {}", command, registration.description, e);
            std::process::exit(1);
        }
    }
    registrations.iter().map(|r| r.public_key).collect()
}
