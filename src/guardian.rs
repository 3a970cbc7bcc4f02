//! Guardians are the trustees of an election.  Each holds a secret Shamir
//! polynomial whose constant coefficient is their ElGamal secret key; after
//! the tally is accumulated, each guardian contributes partial decryptions
//! computed with that key.

use num::traits::Pow;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::elgamal::{KeyPair, Message};
use crate::crypto::group::{gen_pow, Element};
use crate::errors::ConstructionError;

pub mod polynomial;
pub mod public_key;

pub use polynomial::{ElectionPolynomial, SecretCoefficient};
pub use public_key::GuardianPublicKey;

/// A guardian's complete key material.  The key pair and the polynomial are
/// kept consistent by construction: the secret key is always the polynomial's
/// constant coefficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardian {
    guardian_id: String,
    sequence_order: u64,
    key_pair: KeyPair,
    polynomial: ElectionPolynomial,
}

impl Guardian {
    /// Run the single-guardian part of the key ceremony: generate a fresh
    /// polynomial of `quorum` coefficients and take the election key pair
    /// from its constant coefficient.
    pub fn generate(
        guardian_id: String,
        sequence_order: u64,
        quorum: usize,
        rng: &mut impl Rng,
    ) -> Result<Guardian, ConstructionError> {
        let polynomial = ElectionPolynomial::generate(quorum, rng)?;
        debug!(
            guardian_id = %guardian_id,
            sequence_order,
            quorum,
            "generated guardian key material"
        );
        Guardian::from_polynomial(guardian_id, sequence_order, polynomial)
    }

    /// Build a guardian around an existing key pair, generating the remaining
    /// `quorum - 1` polynomial coefficients at random.
    pub fn from_key_pair(
        guardian_id: String,
        sequence_order: u64,
        quorum: usize,
        key_pair: KeyPair,
        rng: &mut impl Rng,
    ) -> Result<Guardian, ConstructionError> {
        if sequence_order == 0 {
            return Err(ConstructionError::SequenceOrderZero);
        }
        let polynomial = ElectionPolynomial::from_key_pair(quorum, &key_pair, rng)?;
        Ok(Guardian {
            guardian_id,
            sequence_order,
            key_pair,
            polynomial,
        })
    }

    /// Build a guardian around an existing polynomial, deriving the key pair
    /// from its constant coefficient.
    pub fn from_polynomial(
        guardian_id: String,
        sequence_order: u64,
        polynomial: ElectionPolynomial,
    ) -> Result<Guardian, ConstructionError> {
        if sequence_order == 0 {
            return Err(ConstructionError::SequenceOrderZero);
        }
        let constant = polynomial
            .coefficients()
            .first()
            .ok_or(ConstructionError::EmptyPolynomial)?;
        let key_pair = KeyPair::new(constant.value().clone());
        Ok(Guardian {
            guardian_id,
            sequence_order,
            key_pair,
            polynomial,
        })
    }

    /// Adopt a key pair and a polynomial that were produced separately, e.g.
    /// deserialized from a guardian's stored state.  The two must agree: the
    /// secret key must be the polynomial's constant coefficient, and the
    /// constant commitment must stand behind that same secret.
    pub fn from_parts(
        guardian_id: String,
        sequence_order: u64,
        key_pair: KeyPair,
        polynomial: ElectionPolynomial,
    ) -> Result<Guardian, ConstructionError> {
        if sequence_order == 0 {
            return Err(ConstructionError::SequenceOrderZero);
        }
        let constant = polynomial
            .coefficients()
            .first()
            .ok_or(ConstructionError::EmptyPolynomial)?;
        if key_pair.secret_key() != constant.value() {
            return Err(ConstructionError::KeyPairPolynomialMismatch);
        }
        if constant.commitment() != &gen_pow(constant.value()) {
            return Err(ConstructionError::KeyPairInconsistent);
        }
        Ok(Guardian {
            guardian_id,
            sequence_order,
            key_pair,
            polynomial,
        })
    }

    pub fn guardian_id(&self) -> &str {
        &self.guardian_id
    }

    pub fn sequence_order(&self) -> u64 {
        self.sequence_order
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn polynomial(&self) -> &ElectionPolynomial {
        &self.polynomial
    }

    /// The guardian's publishable record: public key, coefficient
    /// commitments, and proofs, with no secret material.
    pub fn public_key(&self) -> GuardianPublicKey {
        GuardianPublicKey {
            owner_id: self.guardian_id.clone(),
            sequence_order: self.sequence_order,
            public_key: self.key_pair.public_key().clone(),
            coefficient_commitments: self.polynomial.commitments(),
            coefficient_proofs: self.polynomial.proofs(),
        }
    }

    /// Compute `M_i = a^s_i`, this guardian's share of the decryption of one
    /// ciphertext with pad `a`.
    pub fn partial_decrypt(&self, message: &Message) -> Element {
        message.pad.pow(self.key_pair.secret_key())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num::BigUint;
    use crate::crypto::group::{generator, random_exponent};

    #[test]
    fn generated_key_pair_is_polynomial_constant() {
        let mut rng = rand::thread_rng();
        let guardian = Guardian::generate("alice".to_owned(), 1, 3, &mut rng).unwrap();
        assert_eq!(
            guardian.key_pair().secret_key(),
            guardian.polynomial().coefficients()[0].value()
        );
        assert_eq!(
            guardian.key_pair().public_key(),
            guardian.polynomial().coefficients()[0].commitment()
        );
    }

    #[test]
    fn sequence_order_zero_is_rejected() {
        let mut rng = rand::thread_rng();
        assert_eq!(
            Guardian::generate("alice".to_owned(), 0, 3, &mut rng).unwrap_err(),
            ConstructionError::SequenceOrderZero
        );
    }

    #[test]
    fn from_key_pair_keeps_the_supplied_keys() {
        let mut rng = rand::thread_rng();
        let key_pair = KeyPair::generate(&mut rng);
        let public_key = key_pair.public_key().clone();

        let guardian =
            Guardian::from_key_pair("alice".to_owned(), 1, 3, key_pair, &mut rng).unwrap();
        assert_eq!(guardian.key_pair().public_key(), &public_key);
        assert_eq!(
            guardian.polynomial().coefficients()[0].commitment(),
            &public_key
        );
        assert_eq!(guardian.public_key().public_key, public_key);
    }

    #[test]
    fn from_parts_accepts_matching_state() {
        let mut rng = rand::thread_rng();
        let original = Guardian::generate("alice".to_owned(), 1, 3, &mut rng).unwrap();
        let restored = Guardian::from_parts(
            "alice".to_owned(),
            1,
            original.key_pair().clone(),
            original.polynomial().clone(),
        )
        .unwrap();
        assert_eq!(
            restored.key_pair().public_key(),
            original.key_pair().public_key()
        );
    }

    #[test]
    fn from_parts_rejects_foreign_key_pair() {
        let mut rng = rand::thread_rng();
        let guardian = Guardian::generate("alice".to_owned(), 1, 3, &mut rng).unwrap();
        let other = KeyPair::generate(&mut rng);
        assert_eq!(
            Guardian::from_parts(
                "alice".to_owned(),
                1,
                other,
                guardian.polynomial().clone(),
            )
            .unwrap_err(),
            ConstructionError::KeyPairPolynomialMismatch
        );
    }

    #[test]
    fn public_key_record_has_quorum_commitments() {
        let mut rng = rand::thread_rng();
        let guardian = Guardian::generate("alice".to_owned(), 2, 3, &mut rng).unwrap();
        let record = guardian.public_key();
        assert_eq!(record.owner_id, "alice");
        assert_eq!(record.sequence_order, 2);
        assert_eq!(record.coefficient_commitments.len(), 3);
        assert_eq!(record.coefficient_proofs.len(), 3);
    }

    #[test]
    fn partial_decrypt_is_pad_to_the_secret_key() {
        let mut rng = rand::thread_rng();
        let guardian = Guardian::generate("alice".to_owned(), 1, 2, &mut rng).unwrap();

        let m: BigUint = 5_u32.into();
        let nonce = random_exponent(&mut rng);
        let message =
            Message::encrypt(guardian.key_pair().public_key(), &m, &nonce);

        let share = guardian.partial_decrypt(&message);
        assert_eq!(share, message.pad.pow(guardian.key_pair().secret_key()));

        // With a single guardian the share alone unblinds the message.
        let g_to_m = generator().pow(&crate::crypto::group::Exponent::new(m));
        assert_eq!(&message.data, &(&g_to_m * &share));
    }
}
