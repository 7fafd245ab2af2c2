//! Ballot choices are carried in a fixed 32-byte message: the choice bytes are right-aligned and
//! the rest is filled with random bytes, so messages have a fixed length and never repeat.

use crate::*;
use rand_core::{CryptoRng, RngCore};

/// Length of every ballot message.
pub const VOTE_MESSAGE_LEN: usize = 32;

/// Right-align `vote` in a 32-byte message, left-padded with random bytes.
pub fn pack_vote<R: RngCore + CryptoRng>(
    vote: &[u8],
    rng: &mut R,
) -> Result<[u8; VOTE_MESSAGE_LEN], Error> {
    if vote.len() > VOTE_MESSAGE_LEN {
        return Err(Error::ValueTooLarge(vote.len()));
    }

    let mut message = [0u8; VOTE_MESSAGE_LEN];
    let split = VOTE_MESSAGE_LEN - vote.len();
    rng.try_fill_bytes(&mut message[..split])?;
    message[split..].copy_from_slice(vote);

    Ok(message)
}

/// Pack a single-byte ballot choice.
pub fn encode_choice<R: RngCore + CryptoRng>(
    choice: u8,
    rng: &mut R,
) -> Result<[u8; VOTE_MESSAGE_LEN], Error> {
    pack_vote(&[choice], rng)
}

/// Recover a single-byte choice: the low-order byte of the message read as a big-endian integer.
pub fn decode_choice(message: &[u8]) -> Option<u8> {
    message.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng;

    #[test]
    fn test_every_choice_round_trips() {
        let mut rng = ChaChaRng::seed_from_u64(12);
        for choice in 0..=255u8 {
            let message = encode_choice(choice, &mut rng).unwrap();
            assert_eq!(message.len(), VOTE_MESSAGE_LEN);
            assert_eq!(decode_choice(&message), Some(choice));
        }
    }

    #[test]
    fn test_padding_is_random() {
        let mut rng = ChaChaRng::seed_from_u64(13);
        let first = encode_choice(1, &mut rng).unwrap();
        let second = encode_choice(1, &mut rng).unwrap();
        assert_ne!(&first[..31], &second[..31]);
    }

    #[test]
    fn test_pack_vote_sizes() {
        let mut rng = ChaChaRng::seed_from_u64(14);

        let full = [7u8; 32];
        assert_eq!(pack_vote(&full, &mut rng).unwrap(), full);

        let empty = pack_vote(&[], &mut rng).unwrap();
        assert_eq!(empty.len(), VOTE_MESSAGE_LEN);

        let multi = pack_vote(&[1, 2, 3], &mut rng).unwrap();
        assert_eq!(&multi[29..], &[1, 2, 3]);

        assert!(matches!(
            pack_vote(&[0u8; 33], &mut rng),
            Err(Error::ValueTooLarge(33))
        ));
    }

    #[test]
    fn test_decode_empty_message() {
        assert_eq!(decode_choice(&[]), None);
    }
}
