use super::*;
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;

#[test]
fn end_to_end_vote() {
    let mut rng = ChaChaRng::seed_from_u64(0x5EED);
    let params = Params::default();

    // Register three voters
    let voters: Vec<Voter> = (0..3)
        .map(|i| Voter::new(&params, &format!("Voter{}", i), &mut rng))
        .collect();

    // Create the vote with two choices
    let mut ballot_box = BallotBox::new("council", "Elect the council chair");
    ballot_box.set_choice(7, "Alice").unwrap();
    ballot_box.set_choice(9, "Bob").unwrap();
    for voter in &voters {
        ballot_box.register_voter(voter.registration()).unwrap();
    }
    ballot_box.open().unwrap();

    // The ring is published so anyone can sign and verify against it
    let ring: Vec<RistrettoPoint> = ballot_box.ring().to_vec();
    assert_eq!(ring, vec![*voters[0].public_key(), *voters[1].public_key(), *voters[2].public_key()]);

    // Voter1 votes 7
    let first = voters[1].cast_ballot(&params, &ring, 7, &mut rng).unwrap();
    assert!(first.is_valid(&params));
    assert_eq!(first.message().len(), 32);

    // Ballots are shipped as JSON and read back on the other side
    let shipped = serde_json::to_vec(&first).unwrap();
    let received = LinkableRingSignature::from_bytes(&shipped).unwrap();
    ballot_box.cast(&params, received).unwrap();

    // Voter1 tries again with 9: linked to the first ballot
    let second = voters[1].cast_ballot(&params, &ring, 9, &mut rng).unwrap();
    assert!(second.is_valid(&params));
    assert!(first.is_linked(&second));
    assert!(matches!(
        ballot_box.cast(&params, second),
        Err(BallotError::DoubleVote(_))
    ));

    // Voter0 votes 9: a different tag
    let third = voters[0].cast_ballot(&params, &ring, 9, &mut rng).unwrap();
    assert!(!first.is_linked(&third));
    ballot_box.cast(&params, third).unwrap();

    ballot_box.close().unwrap();
    let result = ballot_box.tally().unwrap();
    assert_eq!(result.num_votes, 2);
    assert_eq!(result.totals["Alice"], 1);
    assert_eq!(result.totals["Bob"], 1);
    assert_eq!(result.winners(), vec!["Alice", "Bob"]);
}

#[test]
fn golden_signature_is_reproducible() {
    let params = Params::default();
    let voters: Vec<Voter> = (1..=3u64)
        .map(|i| {
            Voter::from_secret(&params, Scalar::from(i * 1000 + 7), &format!("Voter{}", i))
                .unwrap()
        })
        .collect();
    let ring: Vec<RistrettoPoint> = voters.iter().map(|v| *v.public_key()).collect();

    let nonces = || SigningNonces {
        responses: (1..=3u64).map(Scalar::from).collect(),
        alpha: Scalar::from(42u64),
    };
    let mut message = [0u8; 32];
    message[31] = 7;

    let first = voters[1]
        .ring_sign_with_nonces(&params, &ring, &message, nonces())
        .unwrap();
    let second = voters[1]
        .ring_sign_with_nonces(&params, &ring, &message, nonces())
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_bytes(), second.to_bytes());
    assert!(first.is_valid(&params));

    // The tag depends only on the secret and the ring
    let base = ring_base(&params, &ring).unwrap();
    assert_eq!(*first.tag(), params.mul(&base, &Scalar::from(2007u64)));

    // Only the signer's own response is patched
    assert_eq!(first.responses()[0], Scalar::from(1u64));
    assert_ne!(first.responses()[1], Scalar::from(2u64));
    assert_eq!(first.responses()[2], Scalar::from(3u64));

    // Pinned transcript for the default domain
    assert_eq!(
        point_to_hex(first.tag()),
        "fa2cc3d9c7c09cd34949ba6088d2b7b0940f8bf6e19e3b5be542fcf897ca2b07"
    );
    assert_eq!(
        scalar_to_hex(first.seed()),
        "6b54e67ac4ea4052a47fac28e4ae01c69cac4c916fbac7571b873d7cb896340a"
    );
    assert_eq!(
        scalar_to_hex(&first.responses()[1]),
        "db2d45c1122783e66fb0a0f86b60f334416abb1da43feb2c528a38445408b00b"
    );
}

#[test]
fn verifier_only_parties_check_ballots() {
    let mut rng = ChaChaRng::seed_from_u64(77);
    let params = Params::default();
    let signer = Voter::new(&params, "Voter0", &mut rng);
    let others: Vec<Voter> = (1..4)
        .map(|i| Voter::new(&params, &format!("Voter{}", i), &mut rng))
        .collect();

    let mut ring = vec![*signer.public_key()];
    ring.extend(others.iter().map(|v| *v.public_key()));

    // The verifier only knows registrations, never secret keys
    let registrations: Vec<Registration> = std::iter::once(&signer)
        .chain(others.iter())
        .map(|v| v.registration())
        .collect();
    let public_ring: Vec<RistrettoPoint> = registrations
        .iter()
        .map(|r| Voter::from_public(r.public_key, &r.description))
        .map(|v| *v.public_key())
        .collect();
    assert_eq!(public_ring, ring);

    let ballot = signer.cast_ballot(&params, &ring, 1, &mut rng).unwrap();
    assert!(verify(
        &params,
        &public_ring,
        ballot.tag(),
        ballot.responses(),
        ballot.seed(),
        ballot.message()
    )
    .unwrap());
}
