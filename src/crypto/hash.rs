use num::BigUint;
use sha2::{Digest, Sha256};

use crate::crypto::elgamal::Message;

/// Hash a sequence of unsigned integers by chaining their big-endian byte
/// representations through SHA-256.  All Fiat-Shamir challenges in this crate
/// are derived this way.
pub fn hash_uints(xs: &[&BigUint]) -> BigUint {
    let mut hasher = Sha256::new();
    for x in xs {
        hasher.update(x.to_bytes_be());
    }
    BigUint::from_bytes_be(&hasher.finalize())
}

/// Compute a challenge from a `u`int (the extended base hash), a `m`essage,
/// and a proof `c`ommitment, in that order.  This is the challenge shape used
/// by every Chaum-Pedersen proof over a single message.
pub fn hash_umc(ext: &BigUint, message: &Message, commitment: &Message) -> BigUint {
    hash_uints(&[
        ext,
        message.pad.as_uint(),
        message.data.as_uint(),
        commitment.pad.as_uint(),
        commitment.data.as_uint(),
    ])
}
