use num::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::crypto::chaum_pedersen;
use crate::crypto::group::{random_exponent, Element};
use crate::crypto::hash::hash_umc;
use crate::encrypted::CiphertextSelection;
use crate::errors::ErrorContext;
use crate::guardian::{Guardian, GuardianPublicKey};

/// One guardian's share of the decryption of one encrypted selection: the
/// value `M_i = a^s_i` with a Chaum-Pedersen proof that `s_i` is the secret
/// behind the guardian's published public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionShare {
    pub object_id: String,
    pub sequence_order: u64,
    #[serde(with = "crate::serialize::big_uint")]
    pub description_hash: BigUint,
    pub guardian_id: String,
    pub share: Element,
    pub proof: chaum_pedersen::Proof,
}

impl SelectionShare {
    /// Compute `guardian`'s share for one encrypted selection and prove it.
    pub fn compute(
        guardian: &Guardian,
        selection: &impl CiphertextSelection,
        extended_base_hash: &BigUint,
        rng: &mut impl Rng,
    ) -> SelectionShare {
        let message = selection.message();
        let share = guardian.partial_decrypt(message);
        let proof = chaum_pedersen::Proof::prove_exp(
            guardian.key_pair().public_key(),
            guardian.key_pair().secret_key(),
            &message.pad,
            &share,
            &random_exponent(rng),
            |msg, comm| hash_umc(extended_base_hash, msg, comm),
        );
        SelectionShare {
            object_id: selection.object_id().to_owned(),
            sequence_order: selection.sequence_order(),
            description_hash: selection.description_hash().clone(),
            guardian_id: guardian.guardian_id().to_owned(),
            share,
            proof,
        }
    }

    /// Check this share against the selection it claims to decrypt and the
    /// public key of the guardian it claims to come from.  Fails fast on the
    /// first discrepancy.
    pub fn is_valid(
        &self,
        selection: &impl CiphertextSelection,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
    ) -> bool {
        self.guardian_id == guardian_key.owner_id
            && self.object_id == selection.object_id()
            && &self.description_hash == selection.description_hash()
            && self
                .proof
                .check_exp(
                    &guardian_key.public_key,
                    &selection.message().pad,
                    &self.share,
                    |msg, comm| hash_umc(extended_base_hash, msg, comm),
                )
                .is_ok()
    }

    /// Like `is_valid`, but records every failure with its cause, so callers
    /// can tell an identity mismatch apart from a bad proof.
    pub fn check(
        &self,
        selection: &impl CiphertextSelection,
        guardian_key: &GuardianPublicKey,
        extended_base_hash: &BigUint,
        ctx: &mut ErrorContext,
    ) {
        let mut ctx = ctx.scope(&format!("share for selection {}", self.object_id));

        ctx.check(
            self.guardian_id == guardian_key.owner_id,
            "share was not produced by the claimed guardian",
        );
        ctx.check(
            self.object_id == selection.object_id(),
            "share refers to a different selection",
        );
        ctx.check(
            &self.description_hash == selection.description_hash(),
            "selection description hash differs",
        );

        let status = self.proof.check_exp(
            &guardian_key.public_key,
            &selection.message().pad,
            &self.share,
            |msg, comm| hash_umc(extended_base_hash, msg, comm),
        );
        ctx.check(status.challenge, "proof challenge is inconsistent");
        ctx.check(
            status.response.is_ok(),
            "proof does not certify the share value",
        );
    }
}
