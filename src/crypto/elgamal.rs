use num::traits::Pow;
use num::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::group::{gen_pow, generator, Element, Exponent};

/// A message that has been encrypted using exponential ElGamal: the pair
/// `(pad, data) = (gʳ, gᵐ hʳ)`, where `m` is the cleartext, `r` is the
/// one-time secret, and `h` is the public key used for encryption.
///
/// Homomorphic addition of two messages multiplies them componentwise, which
/// is what lets encrypted ballots be summed into an encrypted tally before
/// any decryption happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The one-time public key `a = gʳ`, called the pad.
    pub pad: Element,

    /// The encoding `b = gᵐ hʳ` of the cleartext.
    pub data: Element,
}

impl Message {
    /// Encrypt `m` under `public_key`, using `one_time_secret` as the
    /// encryption nonce `r`.
    pub fn encrypt(public_key: &Element, m: &BigUint, one_time_secret: &Exponent) -> Message {
        let g = generator();
        let h = public_key;
        let r = one_time_secret;
        let m = Exponent::new(m.clone());

        Message {
            pad: g.pow(r),
            data: &g.pow(&m) * &h.pow(r),
        }
    }

    /// Homomorphically add another message to this one, producing an
    /// encryption of the sum of the two cleartexts.
    pub fn h_add(&self, other: &Message) -> Message {
        Message {
            pad: &self.pad * &other.pad,
            data: &self.data * &other.data,
        }
    }
}

/// An ElGamal key pair `(s, K = gˢ)`.  The public key is always derived from
/// the secret key, so the two cannot disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPair {
    secret_key: Exponent,
    public_key: Element,
}

impl KeyPair {
    /// Build a key pair from a secret key, deriving `K = gˢ`.
    pub fn new(secret_key: Exponent) -> KeyPair {
        let public_key = gen_pow(&secret_key);
        KeyPair {
            secret_key,
            public_key,
        }
    }

    /// Generate a key pair from a uniformly random secret key.
    pub fn generate(rng: &mut impl rand::Rng) -> KeyPair {
        KeyPair::new(crate::crypto::group::random_exponent(rng))
    }

    pub fn secret_key(&self) -> &Exponent {
        &self.secret_key
    }

    pub fn public_key(&self) -> &Element {
        &self.public_key
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}
