//! Partial decryption shares.
//!
//! After the encrypted tally is accumulated, each guardian walks the tally
//! (and every spoiled ballot) and computes, for each encrypted selection, the
//! share `M_i = a^s_i` together with a Chaum-Pedersen proof that the share
//! was produced with the guardian's committed secret key.  The shares mirror
//! the shape of the ciphertexts they decrypt: selection shares nest in
//! contest shares, which nest in one share per tally or ballot.
//!
//! Combining shares into plaintexts is a separate concern and happens
//! elsewhere; this module only produces and verifies the per-guardian
//! contributions.

use num::BigUint;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

use crate::encrypted::{Ballot, Tally};
use crate::guardian::Guardian;

pub mod ballot;
pub mod contest;
pub mod round;
pub mod selection;
pub mod tally;

pub use ballot::BallotShare;
pub use contest::ContestShare;
pub use round::{DecryptionRound, RoundPhase, TransitionError};
pub use selection::SelectionShare;
pub use tally::TallyShare;

impl Guardian {
    /// Compute this guardian's share of the decryption of an entire tally.
    pub fn compute_tally_share(
        &self,
        tally: &Tally,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> TallyShare {
        debug!(
            guardian_id = %self.guardian_id(),
            tally_id = %tally.tally_id,
            contests = tally.contests.len(),
            "computing tally share"
        );
        TallyShare::compute(self, tally, extended_base_hash, rng)
    }

    /// Compute this guardian's share of the decryption of a single spoiled
    /// ballot belonging to the tally named by `tally_id`.
    pub fn compute_ballot_share(
        &self,
        tally_id: &str,
        ballot: &Ballot,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> BallotShare {
        BallotShare::compute(self, tally_id, ballot, extended_base_hash, rng)
    }

    /// Compute shares for a batch of spoiled ballots, keyed by ballot id.
    pub fn compute_ballot_shares(
        &self,
        tally_id: &str,
        ballots: &[Ballot],
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> BTreeMap<String, BallotShare> {
        ballots
            .iter()
            .map(|ballot| {
                (
                    ballot.object_id.clone(),
                    self.compute_ballot_share(tally_id, ballot, extended_base_hash, rng),
                )
            })
            .collect()
    }

    /// Compute everything this guardian contributes to a decryption: the
    /// tally share plus one share per spoiled ballot.
    pub fn compute_decryption_shares(
        &self,
        tally: &Tally,
        ballots: &[Ballot],
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> (TallyShare, BTreeMap<String, BallotShare>) {
        let tally_share = self.compute_tally_share(tally, extended_base_hash, rng);
        let ballot_shares =
            self.compute_ballot_shares(&tally.tally_id, ballots, extended_base_hash, rng);
        (tally_share, ballot_shares)
    }
}
