use lazy_static::*;
use num::bigint::RandomBits;
use num::traits::{Num, One, Pow, Zero};
use num::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};
use zeroize::Zeroize;

/// An element of the multiplicative group of integers modulo the prime `p`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element {
    #[serde(with = "crate::serialize::big_uint")]
    element: BigUint,
}

/// An exponent in the additive group of integers modulo the subgroup order
/// `q = (p - 1) / 2`.  Secret keys, polynomial coefficients, proof challenges,
/// and proof responses all live here.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exponent {
    #[serde(with = "crate::serialize::big_uint")]
    exponent: BigUint,
}

impl Element {
    /// Return the generator element of the group `G`.
    pub fn gen() -> Element {
        Element::unchecked(GENERATOR.clone())
    }

    /// Inject an integer into the group: this wraps modulo the prime modulus if
    /// the number is greater than or equal to the modulus.
    pub fn new(element: BigUint) -> Element {
        Element::unchecked(element % &*PRIME_MODULUS)
    }

    /// Construct an element of a group without checking whether the given
    /// integer is part of the group: this is unsafe!
    fn unchecked(element: BigUint) -> Element {
        Element { element }
    }

    pub fn as_uint(&self) -> &BigUint {
        &self.element
    }
}

impl Exponent {
    /// Inject an integer into the exponent group: this wraps modulo the
    /// subgroup order if the number is greater than or equal to it.
    pub fn new(exponent: BigUint) -> Exponent {
        Exponent::unchecked(exponent % &*PRIME_SUBGROUP_MODULUS)
    }

    /// Construct an exponent of a group without checking whether the given
    /// integer is part of the group: this is unsafe!
    fn unchecked(exponent: BigUint) -> Exponent {
        Exponent { exponent }
    }

    pub fn as_uint(&self) -> &BigUint {
        &self.exponent
    }
}

impl Zeroize for Exponent {
    /// Secret exponents are cleared when their owners are dropped, so a
    /// discarded key pair or polynomial leaves no recoverable key material
    /// behind in its allocation.
    fn zeroize(&mut self) {
        self.exponent.set_zero();
    }
}

lazy_static! {
    static ref GENERATOR_ELEMENT: Element = Element::gen();
}

pub fn generator() -> &'static Element {
    &*GENERATOR_ELEMENT
}

pub fn prime() -> &'static BigUint {
    &*PRIME_MODULUS
}

pub fn subgroup_prime() -> &'static BigUint {
    &*PRIME_SUBGROUP_MODULUS
}

// Multiplicative group operations

impl One for Element {
    /// Return the element one, which is always part of any valid group.
    fn one() -> Element {
        Element::unchecked(BigUint::one())
    }
}

impl Mul for Element {
    type Output = Element;
    /// Multiply group elements, modulo the group's prime modulus.
    fn mul(self, other: Element) -> Element {
        Element::unchecked(self.element * other.element % &*PRIME_MODULUS)
    }
}

impl Mul for &Element {
    type Output = Element;
    /// Multiply group elements, modulo the group's prime modulus.
    fn mul(self, other: &Element) -> Element {
        Element::unchecked(&self.element * &other.element % &*PRIME_MODULUS)
    }
}

impl Pow<&Exponent> for &Element {
    type Output = Element;
    /// Raise one group element to the power of an element of the corresponding
    /// exponent group, modulo the group's prime modulus.
    fn pow(self, other: &Exponent) -> Element {
        Element::unchecked(self.element.modpow(&other.exponent, &*PRIME_MODULUS))
    }
}

pub fn gen_pow(exp: &Exponent) -> Element {
    Element::gen().pow(exp)
}

// Additive exponent group operations

impl Zero for Exponent {
    /// The zero exponent
    fn zero() -> Exponent {
        Exponent::unchecked(BigUint::zero())
    }
    /// Test if an exponent is zero
    fn is_zero(&self) -> bool {
        self.exponent.is_zero()
    }
}

impl One for Exponent {
    /// The one exponent
    fn one() -> Exponent {
        Exponent::unchecked(BigUint::one())
    }
    /// Test if an exponent is one
    fn is_one(&self) -> bool {
        self.exponent.is_one()
    }
}

impl Add for Exponent {
    type Output = Exponent;
    /// Add group exponents, modulo the subgroup order.
    fn add(self, other: Exponent) -> Exponent {
        let a = self.exponent;
        let b = other.exponent;
        Exponent::unchecked((a + b) % &*PRIME_SUBGROUP_MODULUS)
    }
}

impl Add for &Exponent {
    type Output = Exponent;
    /// Add group exponents, modulo the subgroup order.
    fn add(self, other: &Exponent) -> Exponent {
        let a = &self.exponent;
        let b = &other.exponent;
        Exponent::unchecked((a + b) % &*PRIME_SUBGROUP_MODULUS)
    }
}

impl Sub for Exponent {
    type Output = Exponent;
    /// Subtract group exponents, modulo the subgroup order.
    fn sub(self, other: Exponent) -> Exponent {
        let a = self.exponent;
        let b = other.exponent;
        Exponent::unchecked((a + &*PRIME_SUBGROUP_MODULUS - b) % &*PRIME_SUBGROUP_MODULUS)
    }
}

impl Sub for &Exponent {
    type Output = Exponent;
    /// Subtract group exponents, modulo the subgroup order.
    fn sub(self, other: &Exponent) -> Exponent {
        let a = &self.exponent;
        let b = &other.exponent;
        Exponent::unchecked((a + &*PRIME_SUBGROUP_MODULUS - b) % &*PRIME_SUBGROUP_MODULUS)
    }
}

impl Mul for Exponent {
    type Output = Exponent;
    /// Multiply group exponents, modulo the subgroup order.
    fn mul(self, other: Exponent) -> Exponent {
        let a = self.exponent;
        let b = other.exponent;
        Exponent::unchecked(a * b % &*PRIME_SUBGROUP_MODULUS)
    }
}

impl Mul for &Exponent {
    type Output = Exponent;
    /// Multiply group exponents, modulo the subgroup order.
    fn mul(self, other: &Exponent) -> Exponent {
        let a = &self.exponent;
        let b = &other.exponent;
        Exponent::unchecked(a * b % &*PRIME_SUBGROUP_MODULUS)
    }
}

/// Sample an exponent uniformly from `[0, q)`.  All secret coefficients and
/// one-time proof nonces come from here.  A failing entropy source panics
/// inside `rand`, which is the correct outcome: there is no meaningful way to
/// continue a key ceremony without randomness.
pub fn random_exponent(rng: &mut impl Rng) -> Exponent {
    let q = subgroup_prime();
    loop {
        let x: BigUint = rng.sample(RandomBits::new(q.bits()));
        if &x < q {
            return Exponent::unchecked(x);
        }
    }
}

// BigUint -> Element/Exponent conversion

impl From<BigUint> for Element {
    /// This succeeds if and only if the given value is nonzero and strictly
    /// less than the prime modulus of the group.
    fn from(number: BigUint) -> Self {
        if !number.is_zero() && number < *PRIME_MODULUS {
            Element { element: number }
        } else {
            panic!("argument out of range for conversion to group element")
        }
    }
}

impl From<BigUint> for Exponent {
    /// This succeeds if and only if the given value is strictly less than the
    /// subgroup order.
    fn from(number: BigUint) -> Self {
        if number < *PRIME_SUBGROUP_MODULUS {
            Exponent { exponent: number }
        } else {
            panic!("argument out of range for conversion to group exponent")
        }
    }
}

impl From<u32> for Element {
    fn from(number: u32) -> Self {
        BigUint::from(number).into()
    }
}

impl From<u32> for Exponent {
    fn from(number: u32) -> Self {
        BigUint::from(number).into()
    }
}

// # The group used for all element and exponent arithmetic
//
// The default modulus is the 1536-bit safe prime from
// [IETF RFC 3526](https://tools.ietf.org/html/rfc3526); the generator 4 is a
// quadratic residue, so it generates the order-`q` subgroup.  Unit tests run
// against a small safe-prime group instead, since 1536-bit exponentiations
// make exhaustive tests painfully slow.

#[cfg(not(test))]
lazy_static! {
    /// The prime modulus `p` for all group operations
    pub static ref PRIME_MODULUS: BigUint =
        PRIME_1536.clone();

    pub static ref GENERATOR: BigUint = BigUint::from(4_u32);
}

#[cfg(test)]
lazy_static! {
    pub static ref PRIME_MODULUS: BigUint = BigUint::from(200087_u32);
    pub static ref GENERATOR: BigUint = BigUint::from(25_u32);
}

lazy_static! {
    static ref PRIME_1536: BigUint =
        parse_biguint_hex_or_panic(PRIME_HEX_1536);

    /// The order `q = (p - 1) / 2` of the subgroup generated by the generator
    /// (the modulus for the additive group of exponents)
    pub static ref PRIME_SUBGROUP_MODULUS: BigUint =
        (&*PRIME_MODULUS - BigUint::one()) / BigUint::from(2_u8);
}

/// Parse a hex string (which might contain spaces, tabs, or newlines) into a
/// BigUint or panic if it can't be done (this is meant to be used for
/// hard-coded constants)
fn parse_biguint_hex_or_panic(hex: &str) -> BigUint {
    BigUint::from_str_radix(
        &hex.replace(' ', "").replace('\n', "").replace('\t', ""),
        16,
    )
    .expect("Invalid hex input for parse_biguint_hex_or_panic")
}

/// The prime modulus for the 1536-bit group
const PRIME_HEX_1536: &str = "FFFFFFFF FFFFFFFF C90FDAA2 2168C234 C4C6628B 80DC1CD1
     29024E08 8A67CC74 020BBEA6 3B139B22 514A0879 8E3404DD
     EF9519B3 CD3A431B 302B0A6D F25F1437 4FE1356D 6D51C245
     E485B576 625E7EC6 F44C42E9 A637ED6B 0BFF5CB6 F406B7ED
     EE386BFB 5A899FA5 AE9F2411 7C4B1FE6 49286651 ECE45B3D
     C2007CB8 A163BF05 98DA4836 1C55D39A 69163FA8 FD24CF5F
     83655D23 DCA3AD96 1C62F356 208552BB 9ED52907 7096966D
     670C354E 4ABC9804 F1746C08 CA237327 FFFFFFFF FFFFFFFF";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn modp_1536_parses() {
        assert!(*PRIME_1536 > BigUint::zero(), "MODP 1536 did not parse");
    }

    #[test]
    fn subgroup_modulus_correct() {
        assert!(
            (&*PRIME_MODULUS - BigUint::one()) / BigUint::from(2_u8)
                == *PRIME_SUBGROUP_MODULUS,
            "(PRIME_MODULUS - 1) / 2 != PRIME_SUBGROUP_MODULUS"
        );
    }

    #[test]
    fn exponent_wraps_at_subgroup_order() {
        let q = subgroup_prime().clone();
        assert!(Exponent::new(q.clone()).is_zero());
        assert!(Exponent::new(q + BigUint::one()).is_one());
    }

    #[test]
    fn random_exponent_below_subgroup_order() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let x = random_exponent(&mut rng);
            assert!(x.as_uint() < subgroup_prime());
        }
    }

    #[test]
    fn zeroize_clears_exponent() {
        use zeroize::Zeroize;
        let mut x = Exponent::from(12345_u32);
        x.zeroize();
        assert!(x.is_zero());
    }
}
