use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::crypto::elgamal::Message;

/// Anything that looks like an encrypted selection: a leaf of a ciphertext
/// tree.  Tally selections and ballot selections are distinct types upstream,
/// but share computation and verification treat them identically, so both
/// implement this.
pub trait CiphertextSelection {
    fn object_id(&self) -> &str;
    fn sequence_order(&self) -> u64;
    /// The hash of the selection description this ciphertext was encrypted
    /// from.  A mismatch here means the ciphertext and the share were built
    /// against different manifest versions.
    fn description_hash(&self) -> &BigUint;
    fn message(&self) -> &Message;
}

/// The homomorphically accumulated encryption of one selection's tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySelection {
    pub object_id: String,
    pub sequence_order: u64,
    #[serde(with = "crate::serialize::big_uint")]
    pub description_hash: BigUint,
    pub message: Message,
}

/// A single encrypted selection on a cast or spoiled ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSelection {
    pub object_id: String,
    pub sequence_order: u64,
    #[serde(with = "crate::serialize::big_uint")]
    pub description_hash: BigUint,
    pub message: Message,

    /// Placeholder selections pad a contest out to its selection limit.  They
    /// are decrypted like any other selection.
    pub is_placeholder: bool,
}

impl CiphertextSelection for TallySelection {
    fn object_id(&self) -> &str {
        &self.object_id
    }
    fn sequence_order(&self) -> u64 {
        self.sequence_order
    }
    fn description_hash(&self) -> &BigUint {
        &self.description_hash
    }
    fn message(&self) -> &Message {
        &self.message
    }
}

impl CiphertextSelection for BallotSelection {
    fn object_id(&self) -> &str {
        &self.object_id
    }
    fn sequence_order(&self) -> u64 {
        self.sequence_order
    }
    fn description_hash(&self) -> &BigUint {
        &self.description_hash
    }
    fn message(&self) -> &Message {
        &self.message
    }
}
