use num::{BigUint, Num};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Serialize a `BigUint` as a decimal string.  Group elements and hashes are
/// far too large for any JSON number representation, and decimal strings
/// survive every structured interchange format losslessly.
pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.to_str_radix(10).serialize(serializer)
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StringOrUint {
    String(String),
    Uint(u64),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let su: StringOrUint = Deserialize::deserialize(deserializer)?;
    match su {
        StringOrUint::String(s) => BigUint::from_str_radix(&s, 10).map_err(de::Error::custom),
        StringOrUint::Uint(u) => Ok(BigUint::from(u)),
    }
}
