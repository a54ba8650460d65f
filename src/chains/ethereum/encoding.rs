//! Caller-side field encodings
//!
//! Wallet front ends hand over transactions built by ethereumjs, where
//! quantities are hex strings (sometimes plain numbers) and byte fields are
//! either buffers or hex.

use ethereum_types::U256;
use serde::{Deserialize, Serialize};

use crate::errors::{EthUtilsError, Result};

/// Byte field given either as raw bytes or as a hex string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteLike {
    Raw(Vec<u8>),
    Hex(String),
}

impl ByteLike {
    pub fn to_bytes(&self, field: &'static str) -> Result<Vec<u8>> {
        match self {
            ByteLike::Raw(bytes) => Ok(bytes.clone()),
            ByteLike::Hex(text) => hex::decode(strip_hex_prefix(text)).map_err(|_| {
                EthUtilsError::InvalidHex {
                    field,
                    value: text.clone(),
                }
            }),
        }
    }
}

impl Default for ByteLike {
    fn default() -> Self {
        ByteLike::Raw(Vec::new())
    }
}

impl From<Vec<u8>> for ByteLike {
    fn from(bytes: Vec<u8>) -> Self {
        ByteLike::Raw(bytes)
    }
}

/// Numeric field given as a base-16 string or a plain number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Hex(String),
}

impl Quantity {
    pub fn to_u64(&self, field: &'static str) -> Result<u64> {
        match self {
            Quantity::Number(n) => Ok(*n),
            Quantity::Hex(text) => {
                let digits = significant_digits(field, text)?;
                if digits.is_empty() {
                    return Ok(0);
                }
                u64::from_str_radix(digits, 16).map_err(|_| invalid_hex(field, text))
            }
        }
    }

    pub fn to_u256(&self, field: &'static str) -> Result<U256> {
        match self {
            Quantity::Number(n) => Ok(U256::from(*n)),
            Quantity::Hex(text) => {
                let digits = significant_digits(field, text)?;
                if digits.is_empty() {
                    return Ok(U256::zero());
                }
                U256::from_str_radix(digits, 16).map_err(|_| invalid_hex(field, text))
            }
        }
    }
}

impl From<&str> for Quantity {
    fn from(text: &str) -> Self {
        Quantity::Hex(text.to_string())
    }
}

impl From<u64> for Quantity {
    fn from(n: u64) -> Self {
        Quantity::Number(n)
    }
}

pub(crate) fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Hex digits without prefix or leading zeros; empty means zero.
fn significant_digits<'a>(field: &'static str, text: &'a str) -> Result<&'a str> {
    let digits = strip_hex_prefix(text);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid_hex(field, text));
    }
    Ok(digits.trim_start_matches('0'))
}

fn invalid_hex(field: &'static str, text: &str) -> EthUtilsError {
    EthUtilsError::InvalidHex {
        field,
        value: text.to_string(),
    }
}
