//! Amino JSON number rendering.
//!
//! Amino JSON writes 64-bit integers as decimal strings. Signers hash the
//! exact bytes, so these helpers are used on every integer of the sign doc.

use serde::{Deserializer, Serializer};

use crate::blockchain::wire::{int_or_string, uint_or_string};

/// `u64` as a decimal string.
pub mod u64_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        uint_or_string(deserializer)
    }
}

/// `i64` as a decimal string.
pub mod i64_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        int_or_string(deserializer)
    }
}
