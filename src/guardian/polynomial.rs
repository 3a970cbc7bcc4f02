//! During the key ceremony, each guardian randomly generates `t` secret
//! coefficients (`t` being the quorum threshold), the first of which is their
//! ElGamal private key.  From each coefficient they compute a public
//! commitment `g^a_j`, the first of which is their public key.
//!
//! The guardian publishes the commitments together with a non-interactive
//! zero-knowledge Schnorr proof per coefficient.  The proofs function as a
//! binding committment to the private values: the guardian cannot lose or
//! alter a secret coefficient without invalidating the proofs that they have
//! published.

use num::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::elgamal::KeyPair;
use crate::crypto::group::{gen_pow, random_exponent, subgroup_prime, Element, Exponent};
use crate::crypto::hash::hash_uints;
use crate::crypto::schnorr;
use crate::errors::ConstructionError;

/// One secret coefficient `a_j` of a guardian's polynomial, together with its
/// public commitment `K_j = g^a_j` and the proof of knowledge of `a_j`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretCoefficient {
    value: Exponent,
    commitment: Element,
    proof: schnorr::Proof,
}

impl SecretCoefficient {
    /// Adopt an externally generated coefficient.  The commitment and proof
    /// are taken as-is; `is_valid` checks whether they actually correspond.
    pub fn new(
        value: Exponent,
        commitment: Element,
        proof: schnorr::Proof,
    ) -> SecretCoefficient {
        SecretCoefficient {
            value,
            commitment,
            proof,
        }
    }

    fn from_value(value: Exponent, rng: &mut impl Rng) -> SecretCoefficient {
        let commitment = gen_pow(&value);
        let proof = schnorr::Proof::prove(
            &commitment,
            &value,
            &random_exponent(rng),
            |key, comm| hash_uints(&[key.as_uint(), comm.as_uint()]),
        );
        SecretCoefficient {
            value,
            commitment,
            proof,
        }
    }

    pub fn value(&self) -> &Exponent {
        &self.value
    }

    pub fn commitment(&self) -> &Element {
        &self.commitment
    }

    pub fn proof(&self) -> &schnorr::Proof {
        &self.proof
    }

    /// Check the proof of knowledge against the commitment.
    pub fn is_valid(&self) -> bool {
        self.proof
            .check(&self.commitment, |key, comm| {
                hash_uints(&[key.as_uint(), comm.as_uint()])
            })
            .is_ok()
    }
}

impl Drop for SecretCoefficient {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// A guardian's secret Shamir polynomial `P(x) = a_0 + a_1 x + … + a_{t-1}
/// x^{t-1} mod q`.  The constant coefficient `a_0` is the guardian's ElGamal
/// secret key; evaluations `P(l)` at the other guardians' 1-based sequence
/// orders are the key-backup coordinates a full ceremony distributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionPolynomial {
    coefficients: Vec<SecretCoefficient>,
}

impl ElectionPolynomial {
    /// Generate a fresh polynomial with `quorum` uniformly random
    /// coefficients.
    pub fn generate(quorum: usize, rng: &mut impl Rng) -> Result<Self, ConstructionError> {
        if quorum == 0 {
            return Err(ConstructionError::EmptyPolynomial);
        }
        let coefficients = (0..quorum)
            .map(|_| SecretCoefficient::from_value(random_exponent(rng), rng))
            .collect();
        Ok(ElectionPolynomial { coefficients })
    }

    /// Generate a polynomial whose constant coefficient is the secret key of
    /// an externally supplied key pair.
    pub fn from_key_pair(
        quorum: usize,
        key_pair: &KeyPair,
        rng: &mut impl Rng,
    ) -> Result<Self, ConstructionError> {
        if quorum == 0 {
            return Err(ConstructionError::EmptyPolynomial);
        }
        let mut coefficients = Vec::with_capacity(quorum);
        coefficients.push(SecretCoefficient::from_value(
            key_pair.secret_key().clone(),
            rng,
        ));
        for _ in 1..quorum {
            coefficients.push(SecretCoefficient::from_value(random_exponent(rng), rng));
        }
        Ok(ElectionPolynomial { coefficients })
    }

    /// Adopt externally supplied coefficients.  The count must equal the
    /// quorum exactly; coefficients are never silently truncated or padded.
    pub fn from_coefficients(
        coefficients: Vec<SecretCoefficient>,
        quorum: usize,
    ) -> Result<Self, ConstructionError> {
        if quorum == 0 || coefficients.is_empty() {
            return Err(ConstructionError::EmptyPolynomial);
        }
        if coefficients.len() != quorum {
            return Err(ConstructionError::CoefficientCount {
                expected: quorum,
                found: coefficients.len(),
            });
        }
        Ok(ElectionPolynomial { coefficients })
    }

    pub fn coefficients(&self) -> &[SecretCoefficient] {
        &self.coefficients
    }

    pub fn quorum(&self) -> usize {
        self.coefficients.len()
    }

    /// The ordered public commitments, suitable for broadcast.
    pub fn commitments(&self) -> Vec<Element> {
        self.coefficients
            .iter()
            .map(|c| c.commitment().clone())
            .collect()
    }

    /// The ordered proofs of knowledge, suitable for broadcast.
    pub fn proofs(&self) -> Vec<schnorr::Proof> {
        self.coefficients.iter().map(|c| c.proof().clone()).collect()
    }

    /// Evaluate `P(x) mod q`.  The argument is a guardian's 1-based sequence
    /// order; the result is that guardian's backup coordinate of this secret.
    pub fn evaluate(&self, x: u64) -> Exponent {
        let x = BigUint::from(x);
        let q = subgroup_prime();

        let mut sum = BigUint::from(0_u32);
        for (j, coefficient) in self.coefficients.iter().enumerate() {
            let term = coefficient.value().as_uint() * x.modpow(&BigUint::from(j), q) % q;
            sum = (sum + term) % q;
        }
        Exponent::new(sum)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num::traits::Zero;

    #[test]
    fn generate_has_quorum_coefficients() {
        let mut rng = rand::thread_rng();
        let polynomial = ElectionPolynomial::generate(3, &mut rng).unwrap();
        assert_eq!(polynomial.quorum(), 3);
        assert_eq!(polynomial.commitments().len(), 3);
        assert_eq!(polynomial.proofs().len(), 3);
    }

    #[test]
    fn generate_rejects_zero_quorum() {
        let mut rng = rand::thread_rng();
        assert_eq!(
            ElectionPolynomial::generate(0, &mut rng).unwrap_err(),
            ConstructionError::EmptyPolynomial
        );
    }

    #[test]
    fn every_commitment_verifies_against_its_proof() {
        let mut rng = rand::thread_rng();
        let polynomial = ElectionPolynomial::generate(3, &mut rng).unwrap();
        for coefficient in polynomial.coefficients() {
            assert!(coefficient.is_valid());
        }
    }

    #[test]
    fn from_key_pair_pins_constant_coefficient() {
        let mut rng = rand::thread_rng();
        let key_pair = KeyPair::generate(&mut rng);
        let polynomial = ElectionPolynomial::from_key_pair(3, &key_pair, &mut rng).unwrap();
        assert_eq!(polynomial.coefficients()[0].value(), key_pair.secret_key());
        assert_eq!(
            polynomial.coefficients()[0].commitment(),
            key_pair.public_key()
        );
    }

    #[test]
    fn from_coefficients_rejects_wrong_count() {
        let mut rng = rand::thread_rng();
        let donor = ElectionPolynomial::generate(2, &mut rng).unwrap();
        let coefficients = donor.coefficients().to_vec();
        assert_eq!(
            ElectionPolynomial::from_coefficients(coefficients, 3).unwrap_err(),
            ConstructionError::CoefficientCount {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn evaluate_at_zero_is_constant_coefficient() {
        let mut rng = rand::thread_rng();
        let polynomial = ElectionPolynomial::generate(3, &mut rng).unwrap();
        assert_eq!(
            &polynomial.evaluate(0),
            polynomial.coefficients()[0].value()
        );
    }

    #[test]
    fn evaluate_sums_terms() {
        let mut rng = rand::thread_rng();
        let polynomial = ElectionPolynomial::generate(2, &mut rng).unwrap();
        let a0 = polynomial.coefficients()[0].value();
        let a1 = polynomial.coefficients()[1].value();

        // P(2) = a0 + 2 a1 mod q
        let expected = a0 + &(a1 + a1);
        assert_eq!(polynomial.evaluate(2), expected);

        // P(x) is not identically its constant term unless a1 is zero.
        if !a1.is_zero() {
            assert_ne!(&polynomial.evaluate(2), a0);
        }
    }
}
