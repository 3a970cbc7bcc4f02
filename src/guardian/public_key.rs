use serde::{Deserialize, Serialize};

use crate::crypto::group::Element;
use crate::crypto::hash::hash_uints;
use crate::crypto::schnorr;
use crate::errors::{ConstructionError, ErrorContext};

/// The public record a guardian publishes after the key ceremony: their
/// election public key plus the commitments and proofs for every polynomial
/// coefficient.  This is everything other participants need in order to
/// verify the guardian's later partial decryptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianPublicKey {
    pub owner_id: String,
    pub sequence_order: u64,
    pub public_key: Element,
    pub coefficient_commitments: Vec<Element>,
    pub coefficient_proofs: Vec<schnorr::Proof>,
}

impl GuardianPublicKey {
    /// Assemble a public-key record from its parts.  The commitment and proof
    /// lists must be non-empty and of equal length; cryptographic validity is
    /// checked separately by `is_valid`.
    pub fn new(
        owner_id: String,
        sequence_order: u64,
        public_key: Element,
        coefficient_commitments: Vec<Element>,
        coefficient_proofs: Vec<schnorr::Proof>,
    ) -> Result<GuardianPublicKey, ConstructionError> {
        if sequence_order == 0 {
            return Err(ConstructionError::SequenceOrderZero);
        }
        if coefficient_commitments.is_empty() {
            return Err(ConstructionError::EmptyPolynomial);
        }
        if coefficient_commitments.len() != coefficient_proofs.len() {
            return Err(ConstructionError::CommitmentCount {
                commitments: coefficient_commitments.len(),
                proofs: coefficient_proofs.len(),
            });
        }
        Ok(GuardianPublicKey {
            owner_id,
            sequence_order,
            public_key,
            coefficient_commitments,
            coefficient_proofs,
        })
    }

    /// Check every coefficient proof, and that the public key is the first
    /// coefficient commitment.
    pub fn is_valid(&self) -> bool {
        let mut errs = Vec::new();
        self.check(&mut ErrorContext::new(&mut errs));
        errs.is_empty()
    }

    /// Like `is_valid`, but records a message for every individual failure.
    pub fn check(&self, ctx: &mut ErrorContext) {
        let mut ctx = ctx.scope(&format!("public key of guardian {}", self.owner_id));

        ctx.check(
            self.coefficient_commitments.first() == Some(&self.public_key),
            "public key is not the first coefficient commitment",
        );

        for (i, (commitment, proof)) in self
            .coefficient_commitments
            .iter()
            .zip(self.coefficient_proofs.iter())
            .enumerate()
        {
            let mut ctx = ctx.scope(&format!("coefficient {}", i));
            let status = proof.check(commitment, |key, comm| {
                hash_uints(&[key.as_uint(), comm.as_uint()])
            });
            ctx.check(status.challenge, "proof challenge is inconsistent");
            ctx.check(status.response, "proof response does not verify");
        }
    }
}
