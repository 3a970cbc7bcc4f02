use serde::{Deserialize, Serialize};

use super::contest::BallotContest;

/// A single encrypted ballot.  Spoiled ballots are decrypted individually, so
/// guardians compute shares over these as well as over the tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub object_id: String,
    pub contests: Vec<BallotContest>,
}
