//! Firmware binding: the values the device protocol owns and this crate only reads.

use serde::{Deserialize, Serialize};

use crate::chains::ethereum::EthCoin;
use crate::errors::{EthUtilsError, Result};

/// BIP32 hardened derivation flag
pub const HARDENED: u32 = 0x8000_0000;

/// Wire values of the firmware `ETHCoin` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinTable {
    pub eth: i32,
    pub ropsten_eth: i32,
    pub rinkeby_eth: i32,
}

impl Default for CoinTable {
    fn default() -> Self {
        Self {
            eth: 0,
            ropsten_eth: 1,
            rinkeby_eth: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirmwareBinding {
    /// Offset added to hardened path components
    pub hardened: u32,
    pub coins: CoinTable,
    /// Resolve Rinkeby chain ids to the Ropsten coin. The device shows
    /// "Ropsten" for Rinkeby transactions while this is set.
    pub alias_rinkeby_to_ropsten: bool,
}

impl Default for FirmwareBinding {
    fn default() -> Self {
        Self {
            hardened: HARDENED,
            coins: CoinTable::default(),
            alias_rinkeby_to_ropsten: true,
        }
    }
}

impl FirmwareBinding {
    /// Parse a binding from JSON; missing keys take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let binding: FirmwareBinding = serde_json::from_str(json)?;
        binding.validate()?;
        log::debug!("Loaded firmware binding: {:?}", binding);
        Ok(binding)
    }

    pub fn validate(&self) -> Result<()> {
        // Plain indices below the offset must never read as hardened ones
        if self.hardened < HARDENED {
            return Err(EthUtilsError::InvalidBinding(format!(
                "hardened offset must be at least {:#x}, got {:#x}",
                HARDENED, self.hardened
            )));
        }

        let CoinTable { eth, ropsten_eth, rinkeby_eth } = self.coins;
        if eth == ropsten_eth || eth == rinkeby_eth || ropsten_eth == rinkeby_eth {
            return Err(EthUtilsError::InvalidBinding(format!(
                "coin values must be distinct (eth={}, ropstenEth={}, rinkebyEth={})",
                eth, ropsten_eth, rinkeby_eth
            )));
        }

        Ok(())
    }

    /// Firmware wire value for a coin
    pub fn coin_value(&self, coin: EthCoin) -> i32 {
        match coin {
            EthCoin::Eth => self.coins.eth,
            EthCoin::RopstenEth => self.coins.ropsten_eth,
            EthCoin::RinkebyEth => self.coins.rinkeby_eth,
        }
    }

    /// Whether `index` carries the hardened offset
    pub fn is_hardened(&self, index: u32) -> bool {
        index >= self.hardened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binding_matches_device_protocol() {
        let binding = FirmwareBinding::default();
        assert_eq!(binding.hardened, 2147483648);
        assert_eq!(binding.coin_value(EthCoin::Eth), 0);
        assert_eq!(binding.coin_value(EthCoin::RopstenEth), 1);
        assert_eq!(binding.coin_value(EthCoin::RinkebyEth), 2);
        assert!(binding.alias_rinkeby_to_ropsten);
        assert!(binding.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_keys() {
        let binding = FirmwareBinding::from_json(r#"{"aliasRinkebyToRopsten": false}"#).unwrap();
        assert!(!binding.alias_rinkeby_to_ropsten);
        assert_eq!(binding.hardened, HARDENED);
        assert_eq!(binding.coins, CoinTable::default());
    }

    #[test]
    fn test_from_json_custom_coins() {
        let binding = FirmwareBinding::from_json(
            r#"{"coins": {"eth": 10, "ropstenEth": 11, "rinkebyEth": 12}}"#,
        )
        .unwrap();
        assert_eq!(binding.coin_value(EthCoin::RinkebyEth), 12);
    }

    #[test]
    fn test_from_json_rejects_invalid_binding() {
        for hardened in [0, 50, 0x7fff_ffff] {
            let json = format!(r#"{{"hardened": {}}}"#, hardened);
            let err = FirmwareBinding::from_json(&json).unwrap_err();
            assert!(matches!(err, EthUtilsError::InvalidBinding(_)), "{}", hardened);
        }
        assert!(FirmwareBinding::from_json(r#"{"hardened": 4294967295}"#).is_ok());

        let err = FirmwareBinding::from_json(
            r#"{"coins": {"eth": 1, "ropstenEth": 1, "rinkebyEth": 2}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EthUtilsError::InvalidBinding(_)));

        let err = FirmwareBinding::from_json("not json").unwrap_err();
        assert!(matches!(err, EthUtilsError::Serialization(_)));
    }
}
