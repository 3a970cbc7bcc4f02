use num::traits::Pow;
use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::crypto::elgamal::Message;
use crate::crypto::group::{generator, Element, Exponent};

/// A proof transcript from the Chaum-Pedersen protocol.
///
/// Two kinds of properties are proved with it here:
///
/// * `zero`: an `elgamal::Message` is an encryption of zero.
/// * `exp`: a `result` is some `base` raised to the prover's secret key.
///
/// The `exp` form is what certifies a partial decryption: the guardian shows
/// that its share `M_i = pad^s_i` was computed with the same secret key `s_i`
/// that stands behind its published public key, without revealing `s_i`.
///
/// For each property, the API provides:
///
/// * `check_*`: Check that this is a valid proof of the property, including
///   that the challenge was derived by `gen_challenge`.
/// * `transcript_*`: Check only that this is a valid proof transcript.
///   **This is not sufficient to prove that the property holds:** the caller
///   must also check that the transcript uses the correct challenge.
/// * `prove_*`: Construct a `Proof` showing that the property holds.  (If the
///   property doesn't actually hold, this method will succeed but produce an
///   invalid proof.)
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Proof {
    pub committment: Message,
    pub challenge: Exponent,
    pub response: Exponent,
}

/// The result of checking proof validity.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub challenge: bool,
    pub response: ResponseStatus,
}

/// The result of checking transcript validity.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseStatus {
    pub public_key: bool,
    pub ciphertext: bool,
}

impl Proof {
    /// Use this `Proof` to establish that `message` is an encryption of zero under `public_key`.
    pub fn check_zero(
        &self,
        public_key: &Element,
        message: &Message,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Status {
        let expected = Exponent::new(gen_challenge(message, &self.committment));
        Status {
            challenge: self.challenge == expected,
            response: self.transcript_zero(public_key, message),
        }
    }

    /// Check validity of this transcript for proving that `message` is an encryption of zero.
    pub fn transcript_zero(&self, public_key: &Element, message: &Message) -> ResponseStatus {
        // Unpack inputs, using the names from the crypto documentation.
        let g = generator();
        let h = public_key;
        let a = &message.pad;
        let b = &message.data;
        let alpha = &self.committment.pad;
        let beta = &self.committment.data;
        let c = &self.challenge;
        let u = &self.response;

        // The verifier accepts if `g^u = α ⋅ a^c`, like they would for a
        // Schnorr proof, but they also check that `h^u = β ⋅ b^c`.
        let alpha_ok = g.pow(u) == alpha * &a.pow(c);
        let beta_ok = h.pow(u) == beta * &b.pow(c);

        ResponseStatus {
            public_key: alpha_ok,
            ciphertext: beta_ok,
        }
    }

    /// Construct a proof that `message` is an encryption of zero.  This requires knowing the
    /// `one_time_secret` key that was used to construct `message`.  The callback `gen_challenge`
    /// is used to generate a challenge given the message and commitment.
    pub fn prove_zero(
        public_key: &Element,
        message: &Message,
        one_time_secret: &Exponent,
        one_time_exponent: &Exponent,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Proof {
        let g = generator();
        let h = public_key;
        let r = one_time_secret;
        let t = one_time_exponent;

        // Publish the commitment pair `(α, β) = (g^t, h^t)`.
        let commitment = Message {
            pad: g.pow(t),
            data: h.pow(t),
        };

        let challenge = Exponent::new(gen_challenge(message, &commitment));
        let c = &challenge;

        // Respond with `u = t + c r mod q`, like a Schnorr proof of
        // possession of `r`.
        let u = t + &(c * r);

        Proof {
            committment: commitment,
            challenge,
            response: u,
        }
    }

    /// Use this `Proof` to establish that `result = base^secret_key`, where `secret_key` is the
    /// secret key corresponding to `public_key`.
    pub fn check_exp(
        &self,
        public_key: &Element,
        base: &Element,
        result: &Element,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Status {
        // See `transcript_exp` for explanation.
        self.check_zero(
            base,
            &Message {
                pad: public_key.clone(),
                data: result.clone(),
            },
            gen_challenge,
        )
    }

    /// Check validity of this transcript for proving that `result = base^secret_key`, where
    /// `secret_key` is the secret key corresponding to `public_key`.
    pub fn transcript_exp(
        &self,
        public_key: &Element,
        base: &Element,
        result: &Element,
    ) -> ResponseStatus {
        // From the ElectionGuard spec:
        //
        // "trustee Ti computes its share of the decryption as Mi=A^si mod p."
        // "commits to the pair ai,bi = g^ui mod p, A^ui mod p"
        // "verified by checking that both g^vi mod p=ai*Ki^ci mod p and A^vi mod p=bi*Mi^ci mod p"
        //
        // (Notation: their commitment (ai, bi) is our (alpha, beta); their randomness `ui` is our
        // `t`; their response `vi` is our `u`; their keypair (si, Ki) is our (s, h).)
        //
        // Comparing this to `transcript_zero`, this turns out to be the same as a proof that the
        // message `(Ki, Mi)` is an encryption of zero under the "public key" `A` / `base`.
        self.transcript_zero(
            base,
            &Message {
                pad: public_key.clone(),
                data: result.clone(),
            },
        )
    }

    /// Construct a proof that `result = base^secret_key`, where `secret_key` is the secret key
    /// corresponding to `public_key`.
    pub fn prove_exp(
        public_key: &Element,
        secret_key: &Exponent,
        base: &Element,
        result: &Element,
        one_time_exponent: &Exponent,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Proof {
        // See `transcript_exp` for explanation.  In that formulation, the long-term secret key is
        // the equivalent of the "one-time secret" used to encrypt the zero message.
        Self::prove_zero(
            base,
            &Message {
                pad: public_key.clone(),
                data: result.clone(),
            },
            secret_key,
            one_time_exponent,
            gen_challenge,
        )
    }
}

impl Status {
    pub fn is_ok(&self) -> bool {
        self.challenge && self.response.is_ok()
    }
}

impl ResponseStatus {
    pub fn is_ok(&self) -> bool {
        self.public_key && self.ciphertext
    }
}
