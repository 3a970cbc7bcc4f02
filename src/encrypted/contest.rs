use num::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::selection::{BallotSelection, TallySelection};
use crate::crypto::elgamal::Message;

/// The accumulated encryptions for every selection in one contest of a tally,
/// keyed by selection object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyContest {
    pub object_id: String,
    pub sequence_order: u64,
    #[serde(with = "crate::serialize::big_uint")]
    pub description_hash: BigUint,
    pub selections: BTreeMap<String, TallySelection>,
}

/// One contest on an encrypted ballot.  Selections keep the order they were
/// encrypted in; the optional extended data carries encrypted write-in
/// content for contests that allow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotContest {
    pub object_id: String,
    pub sequence_order: u64,
    #[serde(with = "crate::serialize::big_uint")]
    pub description_hash: BigUint,
    pub selections: Vec<BallotSelection>,
    pub extended_data: Option<Message>,
}
