//! Ethereum transaction sanitization

use serde::{Deserialize, Serialize};

use super::coin::coin_from_chain_id;
use super::encoding::{ByteLike, Quantity};
use super::path::path_from_string;
use crate::config::FirmwareBinding;
use crate::errors::{EthUtilsError, Result};

/// Signature data as produced by an ethereumjs `Transaction`
///
/// ```json
/// {
///   "path": "m/44'/60'/0'/0/0",
///   "recipient": "0x...",
///   "data": [],
///   "tx": { "value": "0x1", "data": "0x", "chainId": 1, "nonce": "0x0",
///           "gasLimit": "0x5208", "gasPrice": "0x3b9aca00" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthSignatureData {
    pub path: Option<String>,
    pub recipient: Option<ByteLike>,
    pub data: Option<ByteLike>,
    #[serde(default)]
    pub tx: EthTxFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthTxFields {
    pub value: Option<Quantity>,
    /// Hex copy of the payload; the top-level `data` is what gets signed
    pub data: Option<ByteLike>,
    pub chain_id: Option<u64>,
    pub nonce: Option<Quantity>,
    pub gas_limit: Option<Quantity>,
    pub gas_price: Option<Quantity>,
}

/// Normalized request handed to the device's ETH sign call
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthSignRequest {
    /// Firmware `ETHCoin` value
    pub coin: i32,
    pub path: Vec<u32>,
    pub nonce: u64,
    /// Wei, decimal
    pub gas_price: String,
    pub gas_limit: u64,
    #[serde_as(as = "serde_with::hex::Hex")]
    pub recipient: Vec<u8>,
    /// Wei, decimal
    pub value: String,
    #[serde_as(as = "serde_with::hex::Hex")]
    pub data: Vec<u8>,
    pub chain_id: u64,
}

/// Convert signature data into the exact shape the firmware expects.
///
/// Every failure is reported as `SanitizationFailed`; the underlying error is
/// available through `source()` or [`EthUtilsError::cause`].
pub fn sanitize_eth_transaction_data(
    binding: &FirmwareBinding,
    sig_data: &EthSignatureData,
) -> Result<EthSignRequest> {
    match build_sign_request(binding, sig_data) {
        Ok(request) => {
            log::debug!(
                "Sanitized ETH transaction: chain_id={} coin={} nonce={} gas_limit={}",
                request.chain_id,
                request.coin,
                request.nonce,
                request.gas_limit
            );
            Ok(request)
        }
        Err(e) => {
            log::warn!("ethTx data sanitization failed: {}", e);
            Err(EthUtilsError::SanitizationFailed(Box::new(e)))
        }
    }
}

/// Deserialize signature data from JSON and sanitize it.
pub fn sanitize_json(binding: &FirmwareBinding, json: &str) -> anyhow::Result<EthSignRequest> {
    let sig_data: EthSignatureData = serde_json::from_str(json)
        .map_err(|e| EthUtilsError::SanitizationFailed(Box::new(e.into())))?;
    Ok(sanitize_eth_transaction_data(binding, &sig_data)?)
}

fn build_sign_request(
    binding: &FirmwareBinding,
    sig_data: &EthSignatureData,
) -> Result<EthSignRequest> {
    let tx = &sig_data.tx;

    let chain_id = tx.chain_id.ok_or(EthUtilsError::MissingField("tx.chainId"))?;
    let coin = coin_from_chain_id(binding, chain_id)?;

    let path = path_from_string(binding, required(&sig_data.path, "path")?)?;

    let nonce = match &tx.nonce {
        Some(nonce) => nonce.to_u64("tx.nonce")?,
        None => 0,
    };

    let gas_price = required(&tx.gas_price, "tx.gasPrice")?
        .to_u256("tx.gasPrice")?
        .to_string();
    let gas_limit = required(&tx.gas_limit, "tx.gasLimit")?.to_u64("tx.gasLimit")?;

    let recipient = required(&sig_data.recipient, "recipient")?.to_bytes("recipient")?;

    let value = match &tx.value {
        Some(value) => value.to_u256("tx.value")?.to_string(),
        None => "0".to_string(),
    };

    let data = required(&sig_data.data, "data")?.to_bytes("data")?;

    Ok(EthSignRequest {
        coin: coin.to_proto(binding),
        path,
        nonce,
        gas_price,
        gas_limit,
        recipient,
        value,
        data,
        chain_id,
    })
}

fn required<'a, T>(field: &'a Option<T>, name: &'static str) -> Result<&'a T> {
    field.as_ref().ok_or(EthUtilsError::MissingField(name))
}
