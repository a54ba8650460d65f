//! Ethereum and EVM chain support for KeepKey
//!
//! Prepares signing requests for the device:
//! - Keypath parsing (`m/44'/60'/0'/0/<n>`)
//! - Network selection from chain id or keypath
//! - Transaction field normalization

use anyhow::Result;

use crate::config::FirmwareBinding;

pub mod coin;
pub mod encoding;
pub mod path;
pub mod transaction;

pub use coin::{coin_from_chain_id, coin_from_path, EthCoin};
pub use encoding::{ByteLike, Quantity};
pub use path::{eth_account_path, path_from_string, path_to_string};
pub use transaction::{
    sanitize_eth_transaction_data, sanitize_json, EthSignRequest, EthSignatureData, EthTxFields,
};

/// Main Ethereum support structure
pub struct EthereumSupport;

impl EthereumSupport {
    /// Parse a keypath string into device path components
    pub fn path_from_string(binding: &FirmwareBinding, keypath: &str) -> Result<Vec<u32>> {
        Ok(path::path_from_string(binding, keypath)?)
    }

    /// Firmware coin value for a keypath
    pub fn coin_from_path(binding: &FirmwareBinding, keypath: &[u32]) -> Result<i32> {
        Ok(coin::coin_from_path(binding, keypath)?.to_proto(binding))
    }

    /// Build the request for the device's ETH sign call
    pub fn prepare_sign_request(
        binding: &FirmwareBinding,
        sig_data: &EthSignatureData,
    ) -> Result<EthSignRequest> {
        Ok(transaction::sanitize_eth_transaction_data(binding, sig_data)?)
    }
}
