use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::contest::TallyContest;

/// The encrypted tally of an election: the homomorphic sum of every cast
/// ballot, organized contest by contest and keyed by contest object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub tally_id: String,
    pub contests: BTreeMap<String, TallyContest>,
}
