use num::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::contest::ContestShare;
use crate::encrypted::Tally;
use crate::errors::ErrorContext;
use crate::guardian::{Guardian, GuardianPublicKey};

/// One guardian's share of the decryption of an entire tally: a contest share
/// per contest, keyed by contest object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyShare {
    pub guardian_id: String,
    pub tally_id: String,
    pub contests: BTreeMap<String, ContestShare>,
}

impl TallyShare {
    pub fn compute(
        guardian: &Guardian,
        tally: &Tally,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> TallyShare {
        TallyShare {
            guardian_id: guardian.guardian_id().to_owned(),
            tally_id: tally.tally_id.clone(),
            contests: tally
                .contests
                .iter()
                .map(|(id, contest)| {
                    (
                        id.clone(),
                        ContestShare::compute_tally(guardian, contest, extended_base_hash, rng),
                    )
                })
                .collect(),
        }
    }

    /// Check this share against the tally it claims to decrypt and the public
    /// key of the guardian it claims to come from.  Fails fast.
    pub fn is_valid(
        &self,
        tally: &Tally,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
    ) -> bool {
        self.guardian_id == guardian_key.owner_id
            && self.tally_id == tally.tally_id
            && self.contests.keys().eq(tally.contests.keys())
            && self.contests.iter().all(|(id, share)| {
                share.is_valid_tally(&tally.contests[id], guardian_key, extended_base_hash)
            })
    }

    /// Like `is_valid`, but records a message for every individual failure.
    pub fn check(
        &self,
        tally: &Tally,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
        ctx: &mut ErrorContext,
    ) {
        let mut ctx = ctx.scope(&format!(
            "share of guardian {} for tally {}",
            self.guardian_id, self.tally_id
        ));

        ctx.check(
            self.guardian_id == guardian_key.owner_id,
            "share was not produced by the claimed guardian",
        );
        ctx.check(
            self.tally_id == tally.tally_id,
            "share refers to a different tally",
        );
        ctx.check(
            self.contests.keys().eq(tally.contests.keys()),
            "share and tally do not cover the same contests",
        );
        for (id, share) in &self.contests {
            if let Some(contest) = tally.contests.get(id) {
                share.check_tally(contest, guardian_key, extended_base_hash, &mut ctx);
            }
        }
    }
}
