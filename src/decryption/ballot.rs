use num::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::contest::ContestShare;
use crate::encrypted::Ballot;
use crate::errors::ErrorContext;
use crate::guardian::{Guardian, GuardianPublicKey};

/// One guardian's share of the decryption of a spoiled ballot.  The share
/// remembers which tally's decryption it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotShare {
    pub guardian_id: String,
    pub tally_id: String,
    pub ballot_id: String,
    pub contests: BTreeMap<String, ContestShare>,
}

impl BallotShare {
    pub fn compute(
        guardian: &Guardian,
        tally_id: &str,
        ballot: &Ballot,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> BallotShare {
        BallotShare {
            guardian_id: guardian.guardian_id().to_owned(),
            tally_id: tally_id.to_owned(),
            ballot_id: ballot.object_id.clone(),
            contests: ballot
                .contests
                .iter()
                .map(|contest| {
                    (
                        contest.object_id.clone(),
                        ContestShare::compute_ballot(guardian, contest, extended_base_hash, rng),
                    )
                })
                .collect(),
        }
    }

    /// Check this share against the ballot it claims to decrypt and the
    /// public key of the guardian it claims to come from.  Fails fast.
    pub fn is_valid(
        &self,
        ballot: &Ballot,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
    ) -> bool {
        let by_id = Self::contests_by_id(ballot);
        self.guardian_id == guardian_key.owner_id
            && self.ballot_id == ballot.object_id
            && self
                .contests
                .keys()
                .map(String::as_str)
                .eq(by_id.keys().copied())
            && self.contests.iter().all(|(id, share)| {
                share.is_valid_ballot(by_id[id.as_str()], guardian_key, extended_base_hash)
            })
    }

    /// Like `is_valid`, but records a message for every individual failure.
    pub fn check(
        &self,
        ballot: &Ballot,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
        ctx: &mut ErrorContext,
    ) {
        let mut ctx = ctx.scope(&format!(
            "share of guardian {} for ballot {}",
            self.guardian_id, self.ballot_id
        ));

        ctx.check(
            self.guardian_id == guardian_key.owner_id,
            "share was not produced by the claimed guardian",
        );
        ctx.check(
            self.ballot_id == ballot.object_id,
            "share refers to a different ballot",
        );

        let by_id = Self::contests_by_id(ballot);
        ctx.check(
            self.contests
                .keys()
                .map(String::as_str)
                .eq(by_id.keys().copied()),
            "share and ballot do not cover the same contests",
        );
        for (id, share) in &self.contests {
            if let Some(contest) = by_id.get(id.as_str()) {
                share.check_ballot(contest, guardian_key, extended_base_hash, &mut ctx);
            }
        }
    }

    fn contests_by_id(ballot: &Ballot) -> BTreeMap<&str, &crate::encrypted::BallotContest> {
        ballot
            .contests
            .iter()
            .map(|c| (c.object_id.as_str(), c))
            .collect()
    }
}
