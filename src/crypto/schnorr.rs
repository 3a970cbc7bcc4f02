use num::traits::Pow;
use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::crypto::group::{gen_pow, generator, Element, Exponent};

/// A non-interactive zero-knowledge Schnorr proof of knowledge of a private
/// key `s` corresponding to a public key `h`.  During the key ceremony each
/// guardian publishes one of these per polynomial coefficient, committing to
/// the secret coefficients without revealing them.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Proof {
    /// The one-use public key `k = gʳ` generated from the random one-use
    /// private key `r`.  This acts as a committment to `r`.
    pub committment: Element,

    /// The challenge `c` produced by hashing relevant parameters, including
    /// the original public key `h` and the one-time public key `k`.
    pub challenge: Exponent,

    /// The response `u = r + c s mod q` to the challenge.
    pub response: Exponent,
}

/// The result of checking proof validity.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub challenge: bool,
    pub response: bool,
}

impl Proof {
    /// Check that this proof establishes possession of the secret key behind
    /// `public_key`.  The callback `gen_challenge` recomputes the expected
    /// challenge from the public key and the committment.
    pub fn check(
        &self,
        public_key: &Element,
        gen_challenge: impl FnOnce(&Element, &Element) -> BigUint,
    ) -> Status {
        let expected = Exponent::new(gen_challenge(public_key, &self.committment));
        Status {
            challenge: self.challenge == expected,
            response: self.is_response_ok(public_key),
        }
    }

    /// The verifier accepts the response if `g^u = k ⋅ h^c`.
    fn is_response_ok(&self, public_key: &Element) -> bool {
        let g = generator();
        let h = public_key;
        let k = &self.committment;
        let c = &self.challenge;
        let u = &self.response;

        g.pow(u) == k * &h.pow(c)
    }

    /// Construct a proof of knowledge of `secret_key`, using `one_time_secret`
    /// as the ephemeral key `r`.
    pub fn prove(
        public_key: &Element,
        secret_key: &Exponent,
        one_time_secret: &Exponent,
        gen_challenge: impl FnOnce(&Element, &Element) -> BigUint,
    ) -> Proof {
        let s = secret_key;
        let r = one_time_secret;

        let committment = gen_pow(r);
        let challenge = Exponent::new(gen_challenge(public_key, &committment));
        let response = r + &(&challenge * s);

        Proof {
            committment,
            challenge,
            response,
        }
    }
}

impl Status {
    pub fn is_ok(&self) -> bool {
        self.challenge && self.response
    }
}
