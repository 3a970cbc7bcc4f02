use num::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::selection::SelectionShare;
use crate::crypto::elgamal::Message;
use crate::crypto::group::Element;
use crate::encrypted::{BallotContest, CiphertextSelection, TallyContest};
use crate::errors::ErrorContext;
use crate::guardian::{Guardian, GuardianPublicKey};

/// One guardian's share of the decryption of a contest: a selection share per
/// encrypted selection, keyed by selection object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestShare {
    pub object_id: String,
    pub sequence_order: u64,
    #[serde(with = "crate::serialize::big_uint")]
    pub description_hash: BigUint,
    pub selections: BTreeMap<String, SelectionShare>,

    /// The partial decryption of the contest's encrypted extended data, when
    /// the contest carries any.  Only ballot contests do.
    pub extended_data: Option<Element>,

    /// Commitment slot for a future extended-data correctness proof.  No
    /// producer populates it today; verification places no constraint on it.
    pub extended_data_commitment: Option<Message>,
}

impl ContestShare {
    /// Compute `guardian`'s share for one contest of an encrypted tally.
    pub fn compute_tally(
        guardian: &Guardian,
        contest: &TallyContest,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> ContestShare {
        ContestShare {
            object_id: contest.object_id.clone(),
            sequence_order: contest.sequence_order,
            description_hash: contest.description_hash.clone(),
            selections: Self::compute_selections(
                guardian,
                contest.selections.values(),
                extended_base_hash,
                rng,
            ),
            extended_data: None,
            extended_data_commitment: None,
        }
    }

    /// Compute `guardian`'s share for one contest of an encrypted ballot,
    /// partially decrypting the extended data alongside the selections.
    pub fn compute_ballot(
        guardian: &Guardian,
        contest: &BallotContest,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> ContestShare {
        ContestShare {
            object_id: contest.object_id.clone(),
            sequence_order: contest.sequence_order,
            description_hash: contest.description_hash.clone(),
            selections: Self::compute_selections(
                guardian,
                contest.selections.iter(),
                extended_base_hash,
                rng,
            ),
            extended_data: contest
                .extended_data
                .as_ref()
                .map(|message| guardian.partial_decrypt(message)),
            extended_data_commitment: None,
        }
    }

    fn compute_selections<'a, S: CiphertextSelection + 'a>(
        guardian: &Guardian,
        selections: impl Iterator<Item = &'a S>,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> BTreeMap<String, SelectionShare> {
        selections
            .map(|selection| {
                (
                    selection.object_id().to_owned(),
                    SelectionShare::compute(guardian, selection, extended_base_hash, rng),
                )
            })
            .collect()
    }

    /// Check this share against one contest of a tally.
    pub fn is_valid_tally(
        &self,
        contest: &TallyContest,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
    ) -> bool {
        self.object_id == contest.object_id
            && self.description_hash == contest.description_hash
            && self.extended_data.is_none()
            && self.selections.keys().eq(contest.selections.keys())
            && self.selections.iter().all(|(id, share)| {
                share.is_valid(&contest.selections[id], guardian_key, extended_base_hash)
            })
    }

    /// Check this share against one contest of a ballot.
    pub fn is_valid_ballot(
        &self,
        contest: &BallotContest,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
    ) -> bool {
        let by_id = Self::ballot_selections_by_id(contest);
        self.object_id == contest.object_id
            && self.description_hash == contest.description_hash
            && self.extended_data.is_some() == contest.extended_data.is_some()
            && self
                .selections
                .keys()
                .map(String::as_str)
                .eq(by_id.keys().copied())
            && self.selections.iter().all(|(id, share)| {
                share.is_valid(by_id[id.as_str()], guardian_key, extended_base_hash)
            })
    }

    /// Like `is_valid_tally`, but records a message for every failure.
    pub fn check_tally(
        &self,
        contest: &TallyContest,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
        ctx: &mut ErrorContext,
    ) {
        let mut ctx = ctx.scope(&format!("share for contest {}", self.object_id));
        self.check_common(&contest.object_id, &contest.description_hash, &mut ctx);
        ctx.check(
            self.extended_data.is_none(),
            "tally contests have no extended data to share",
        );

        let by_id: BTreeMap<&str, &crate::encrypted::TallySelection> = contest
            .selections
            .iter()
            .map(|(id, s)| (id.as_str(), s))
            .collect();
        self.check_selections(&by_id, guardian_key, extended_base_hash, &mut ctx);
    }

    /// Like `is_valid_ballot`, but records a message for every failure.
    pub fn check_ballot(
        &self,
        contest: &BallotContest,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
        ctx: &mut ErrorContext,
    ) {
        let mut ctx = ctx.scope(&format!("share for contest {}", self.object_id));
        self.check_common(&contest.object_id, &contest.description_hash, &mut ctx);
        ctx.check(
            self.extended_data.is_some() == contest.extended_data.is_some(),
            "extended data is shared if and only if the contest carries any",
        );

        let by_id = Self::ballot_selections_by_id(contest);
        self.check_selections(&by_id, guardian_key, extended_base_hash, &mut ctx);
    }

    fn check_common(&self, object_id: &str, description_hash: &BigUint, ctx: &mut ErrorContext) {
        ctx.check(
            self.object_id == object_id,
            "share refers to a different contest",
        );
        ctx.check(
            &self.description_hash == description_hash,
            "contest description hash differs",
        );
    }

    fn check_selections<S: CiphertextSelection>(
        &self,
        by_id: &BTreeMap<&str, &S>,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
        ctx: &mut ErrorContext,
    ) {
        ctx.check(
            self.selections
                .keys()
                .map(String::as_str)
                .eq(by_id.keys().copied()),
            "share and contest do not cover the same selections",
        );
        for (id, share) in &self.selections {
            if let Some(selection) = by_id.get(id.as_str()) {
                share.check(*selection, guardian_key, extended_base_hash, ctx);
            }
        }
    }

    fn ballot_selections_by_id(
        contest: &BallotContest,
    ) -> BTreeMap<&str, &crate::encrypted::BallotSelection> {
        contest
            .selections
            .iter()
            .map(|s| (s.object_id.as_str(), s))
            .collect()
    }
}
