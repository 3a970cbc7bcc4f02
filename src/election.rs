//! Election-wide parameters and the hashes derived from them.  The extended
//! base hash binds every proof challenge to the specific election, its
//! baseline parameters, and the commitments of all participating guardians.

use num::traits::One;
use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::crypto::group::Element;
use crate::crypto::hash::hash_uints;
use crate::guardian::GuardianPublicKey;

/// The baseline cryptographic parameters of an election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    pub num_guardians: u64,
    pub quorum: u64,

    /// The prime modulus for all group arithmetic.
    #[serde(with = "crate::serialize::big_uint")]
    pub prime: BigUint,

    /// The generator of the order-`q` subgroup.
    #[serde(with = "crate::serialize::big_uint")]
    pub generator: BigUint,
}

/// The base hash `Q`, computed over the baseline parameters before any
/// guardian keys exist.
pub fn compute_base_hash(parameters: &Parameters) -> BigUint {
    hash_uints(&[
        &parameters.prime,
        &parameters.generator,
        &parameters.num_guardians.into(),
        &parameters.quorum.into(),
    ])
}

/// The extended base hash `Q̄`: the base hash combined with every coefficient
/// commitment of every guardian, in the order given.  Every decryption proof
/// challenge derives from this value.
pub fn compute_extended_base_hash(
    base_hash: &BigUint,
    public_keys: &[GuardianPublicKey],
) -> BigUint {
    let mut inputs = vec![base_hash];
    for key in public_keys {
        for commitment in &key.coefficient_commitments {
            inputs.push(commitment.as_uint());
        }
    }
    hash_uints(&inputs)
}

/// The joint election public key: the product of every guardian's election
/// public key.  Ballots are encrypted against this key, and no subset of
/// guardians smaller than the full quorum can reconstruct its secret.
pub fn compute_joint_public_key(public_keys: &[GuardianPublicKey]) -> Element {
    public_keys
        .iter()
        .fold(Element::one(), |acc, key| &acc * &key.public_key)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::group::{generator, prime};
    use crate::guardian::Guardian;

    fn parameters() -> Parameters {
        Parameters {
            num_guardians: 5,
            quorum: 3,
            prime: prime().clone(),
            generator: generator().as_uint().clone(),
        }
    }

    #[test]
    fn base_hash_depends_on_quorum() {
        let p1 = parameters();
        let mut p2 = parameters();
        p2.quorum = 4;
        assert_ne!(compute_base_hash(&p1), compute_base_hash(&p2));
    }

    #[test]
    fn extended_base_hash_depends_on_commitments() {
        let mut rng = rand::thread_rng();
        let base_hash = compute_base_hash(&parameters());

        let keys_a = vec![Guardian::generate("alice".to_owned(), 1, 3, &mut rng)
            .unwrap()
            .public_key()];
        let keys_b = vec![Guardian::generate("bob".to_owned(), 1, 3, &mut rng)
            .unwrap()
            .public_key()];

        assert_ne!(
            compute_extended_base_hash(&base_hash, &keys_a),
            compute_extended_base_hash(&base_hash, &keys_b)
        );
    }

    #[test]
    fn joint_key_is_product_of_public_keys() {
        let mut rng = rand::thread_rng();
        let alice = Guardian::generate("alice".to_owned(), 1, 2, &mut rng).unwrap();
        let bob = Guardian::generate("bob".to_owned(), 2, 2, &mut rng).unwrap();

        let joint =
            compute_joint_public_key(&[alice.public_key(), bob.public_key()]);
        assert_eq!(
            joint,
            alice.key_pair().public_key() * bob.key_pair().public_key()
        );
    }
}
