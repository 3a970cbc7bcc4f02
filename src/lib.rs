// Many variables have names that mimic the names in the ElectionGuard spec, like `Mi` for
// `M_i`.  These names don't fit Rust's normal style guidelines.
#![allow(non_snake_case)]

pub mod crypto;
pub mod decryption;
pub mod election;
pub mod encrypted;
pub mod errors;
pub mod guardian;
pub mod serialize;
