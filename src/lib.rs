pub mod chains;
pub mod config;
pub mod errors;

// Re-export main types
pub use chains::ethereum::{
    coin_from_chain_id, coin_from_path, eth_account_path, path_from_string, path_to_string,
    sanitize_eth_transaction_data, sanitize_json, EthCoin, EthSignRequest, EthSignatureData,
    EthTxFields,
};
pub use chains::EthereumSupport;
pub use config::{CoinTable, FirmwareBinding, HARDENED};
pub use errors::{EthUtilsError, Result};
