//! BIP32 keypath parsing and formatting

use crate::config::FirmwareBinding;
use crate::errors::{EthUtilsError, Result};

/// BIP44 purpose value
pub const BIP44_PURPOSE: u32 = 44;

/// SLIP-44 coin type for Ethereum mainnet
pub const ETH_COIN_TYPE: u32 = 60;

/// SLIP-44 coin type shared by all testnets
pub const TESTNET_COIN_TYPE: u32 = 1;

/// Parse a keypath string such as `m/44'/60'/0'/0` into its components.
///
/// Segments suffixed with `'` are hardened by adding `binding.hardened`.
/// Empty segments and repeated `m` segments are skipped.
pub fn path_from_string(binding: &FirmwareBinding, path: &str) -> Result<Vec<u32>> {
    let lowered = path.to_lowercase();
    let mut levels = lowered.split('/');

    if levels.next() != Some("m") {
        return Err(EthUtilsError::InvalidKeypath(format!(
            "keypath must start with 'm': {:?}",
            path
        )));
    }

    let mut components = Vec::new();
    for level in levels {
        if level.is_empty() || level == "m" {
            continue;
        }

        let component = match level.strip_suffix('\'') {
            Some(index) => parse_index(index, path)?
                .checked_add(binding.hardened)
                .ok_or_else(|| {
                    EthUtilsError::InvalidKeypath(format!(
                        "hardened index out of range in {:?}: {}",
                        path, level
                    ))
                })?,
            None => parse_index(level, path)?,
        };
        components.push(component);
    }

    Ok(components)
}

fn parse_index(segment: &str, path: &str) -> Result<u32> {
    // u32::from_str accepts a leading '+', keypaths do not
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EthUtilsError::InvalidKeypath(format!(
            "invalid segment in {:?}: {:?}",
            path, segment
        )));
    }

    segment.parse::<u32>().map_err(|_| {
        EthUtilsError::InvalidKeypath(format!("segment out of range in {:?}: {}", path, segment))
    })
}

/// Render components back into keypath form, marking hardened ones with `'`.
///
/// Expects a binding that passed [`FirmwareBinding::validate`].
pub fn path_to_string(binding: &FirmwareBinding, path: &[u32]) -> String {
    let mut out = String::from("m");
    for &index in path {
        if binding.is_hardened(index) {
            out.push_str(&format!("/{}'", index - binding.hardened));
        } else {
            out.push_str(&format!("/{}", index));
        }
    }
    out
}

/// Keypath of an Ethereum account, `m/44'/60'/0'/0/<account>`
///
/// Only text is produced; the `'` marks take the binding's hardened offset
/// when the path goes through [`path_from_string`].
pub fn eth_account_path(account: u32) -> String {
    format!("m/{}'/{}'/0'/0/{}", BIP44_PURPOSE, ETH_COIN_TYPE, account)
}
