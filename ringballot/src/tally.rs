use crate::*;
use indexmap::IndexMap;
use tracing::warn;

/// Counted ballots for a single vote.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TallyResult {
    pub vote_id: String,

    /// Number of ballots that carried a known choice
    pub num_votes: usize,

    /// Ballots whose choice code is not one of the vote's choices
    pub skipped: usize,

    /// Votes per choice description, in the order the choices were defined
    pub totals: IndexMap<String, usize>,
}

impl TallyResult {
    pub fn tally(
        vote_id: &str,
        choices: &IndexMap<u8, String>,
        ballots: &[LinkableRingSignature],
    ) -> Self {
        let mut totals: IndexMap<String, usize> = choices
            .values()
            .map(|description| (description.clone(), 0))
            .collect();
        let mut num_votes = 0;
        let mut skipped = 0;

        for ballot in ballots {
            let description = ballot.choice().and_then(|code| choices.get(&code));
            match description {
                Some(description) => {
                    *totals.entry(description.clone()).or_insert(0) += 1;
                    num_votes += 1;
                }
                None => {
                    warn!(vote_id, choice = ?ballot.choice(), "ballot skipped: not a valid choice");
                    skipped += 1;
                }
            }
        }

        TallyResult {
            vote_id: vote_id.to_owned(),
            num_votes,
            skipped,
            totals,
        }
    }

    /// Choices with the most votes. Ties return every tied choice; no votes returns nothing.
    pub fn winners(&self) -> Vec<&str> {
        let max = self.totals.values().copied().max().unwrap_or(0);
        if max == 0 {
            return vec![];
        }
        self.totals
            .iter()
            .filter(|(_, count)| **count == max)
            .map(|(description, _)| description.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::ristretto::RistrettoPoint;
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng;

    #[test]
    fn test_tally() {
        let mut rng = ChaChaRng::seed_from_u64(30);
        let params = Params::default();
        let voters: Vec<Voter> = (0..5)
            .map(|i| Voter::new(&params, &format!("Voter{}", i), &mut rng))
            .collect();
        let ring: Vec<RistrettoPoint> = voters.iter().map(|v| *v.public_key()).collect();

        let mut choices = IndexMap::new();
        choices.insert(0u8, "Yes".to_owned());
        choices.insert(1u8, "No".to_owned());
        choices.insert(2u8, "Abstain".to_owned());

        let picks = [0u8, 1, 0, 0, 9];
        let ballots: Vec<LinkableRingSignature> = voters
            .iter()
            .zip(picks.iter())
            .map(|(voter, choice)| voter.cast_ballot(&params, &ring, *choice, &mut rng).unwrap())
            .collect();

        let result = TallyResult::tally("referendum", &choices, &ballots);
        assert_eq!(result.num_votes, 4);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.totals["Yes"], 3);
        assert_eq!(result.totals["No"], 1);
        assert_eq!(result.totals["Abstain"], 0);
        assert_eq!(
            result.totals.keys().collect::<Vec<_>>(),
            vec!["Yes", "No", "Abstain"]
        );
        assert_eq!(result.winners(), vec!["Yes"]);
    }

    #[test]
    fn test_empty_tally() {
        let mut choices = IndexMap::new();
        choices.insert(0u8, "Yes".to_owned());
        let result = TallyResult::tally("empty", &choices, &[]);
        assert_eq!(result.num_votes, 0);
        assert_eq!(result.totals["Yes"], 0);
        assert!(result.winners().is_empty());
    }
}
