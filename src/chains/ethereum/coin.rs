//! Network selection for the device's ETHCoin enum

use super::path::{BIP44_PURPOSE, ETH_COIN_TYPE, TESTNET_COIN_TYPE};
use crate::config::FirmwareBinding;
use crate::errors::{EthUtilsError, Result};

/// Networks the firmware can display for an Ethereum signing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EthCoin {
    Eth,
    RopstenEth,
    RinkebyEth,
}

impl EthCoin {
    /// Convert to the firmware enum value
    pub fn to_proto(&self, binding: &FirmwareBinding) -> i32 {
        binding.coin_value(*self)
    }
}

/// Resolve the coin for an EVM chain id.
pub fn coin_from_chain_id(binding: &FirmwareBinding, chain_id: u64) -> Result<EthCoin> {
    match chain_id {
        1 => Ok(EthCoin::Eth),
        3 => Ok(EthCoin::RopstenEth),
        4 | 42 if binding.alias_rinkeby_to_ropsten => Ok(EthCoin::RopstenEth),
        4 | 42 => Ok(EthCoin::RinkebyEth),
        _ => Err(EthUtilsError::UnsupportedNetwork(chain_id)),
    }
}

/// Resolve the coin from a BIP44 keypath (`m/44'/60'/...` or `m/44'/1'/...`).
///
/// Testnet paths cannot tell Ropsten from Rinkeby, so both resolve to
/// `RopstenEth`.
pub fn coin_from_path(binding: &FirmwareBinding, path: &[u32]) -> Result<EthCoin> {
    let purpose = path.first().copied();
    if purpose != Some(BIP44_PURPOSE) && purpose != BIP44_PURPOSE.checked_add(binding.hardened) {
        return Err(EthUtilsError::InvalidKeypath(format!(
            "expected BIP44 purpose, got {:?}",
            path
        )));
    }

    let coin_type = path.get(1).copied().ok_or_else(|| {
        EthUtilsError::InvalidKeypath(format!("missing coin type in {:?}", path))
    })?;
    let is_coin = |base: u32| coin_type == base || base.checked_add(binding.hardened) == Some(coin_type);

    if is_coin(ETH_COIN_TYPE) {
        Ok(EthCoin::Eth)
    } else if is_coin(TESTNET_COIN_TYPE) {
        Ok(EthCoin::RopstenEth)
    } else {
        Err(EthUtilsError::InvalidKeypath(format!(
            "unsupported coin type {} in {:?}",
            coin_type, path
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HARDENED;

    #[test]
    fn test_coin_from_chain_id() {
        let binding = FirmwareBinding::default();
        assert_eq!(coin_from_chain_id(&binding, 1).unwrap(), EthCoin::Eth);
        assert_eq!(coin_from_chain_id(&binding, 3).unwrap(), EthCoin::RopstenEth);
        assert_eq!(coin_from_chain_id(&binding, 4).unwrap(), EthCoin::RopstenEth);
        assert_eq!(coin_from_chain_id(&binding, 42).unwrap(), EthCoin::RopstenEth);
    }

    #[test]
    fn test_rinkeby_without_alias() {
        let binding = FirmwareBinding {
            alias_rinkeby_to_ropsten: false,
            ..FirmwareBinding::default()
        };
        assert_eq!(coin_from_chain_id(&binding, 4).unwrap(), EthCoin::RinkebyEth);
        assert_eq!(coin_from_chain_id(&binding, 42).unwrap(), EthCoin::RinkebyEth);
        assert_eq!(EthCoin::RinkebyEth.to_proto(&binding), 2);
    }

    #[test]
    fn test_unsupported_chain_id() {
        let binding = FirmwareBinding::default();
        for chain_id in [0, 5, 56, 137, 999] {
            let err = coin_from_chain_id(&binding, chain_id).unwrap_err();
            assert!(matches!(err, EthUtilsError::UnsupportedNetwork(id) if id == chain_id));
        }
    }

    #[test]
    fn test_coin_from_path() {
        let binding = FirmwareBinding::default();
        assert_eq!(coin_from_path(&binding, &[44, 60, 0, 0]).unwrap(), EthCoin::Eth);
        assert_eq!(
            coin_from_path(&binding, &[44 + HARDENED, 60 + HARDENED, HARDENED, 0]).unwrap(),
            EthCoin::Eth
        );
        assert_eq!(coin_from_path(&binding, &[44, 1]).unwrap(), EthCoin::RopstenEth);
        assert_eq!(
            coin_from_path(&binding, &[44 + HARDENED, 1 + HARDENED]).unwrap(),
            EthCoin::RopstenEth
        );
    }

    #[test]
    fn test_coin_from_path_rejects_non_bip44() {
        let binding = FirmwareBinding::default();
        let cases: [&[u32]; 6] = [&[1, 60], &[], &[44], &[44, 0], &[44, 61], &[49 + HARDENED, 60]];
        for bad in cases {
            let err = coin_from_path(&binding, bad).unwrap_err();
            assert!(matches!(err, EthUtilsError::InvalidKeypath(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_coin_from_path_with_small_offset() {
        let binding = FirmwareBinding {
            hardened: 50,
            ..FirmwareBinding::default()
        };
        let path = crate::chains::ethereum::path_from_string(&binding, "m/44/60/0/0").unwrap();
        assert_eq!(path, vec![44, 60, 0, 0]);
        assert_eq!(coin_from_path(&binding, &path).unwrap(), EthCoin::Eth);
        assert_eq!(coin_from_path(&binding, &[94, 110]).unwrap(), EthCoin::Eth);
        assert_eq!(coin_from_path(&binding, &[44, 51]).unwrap(), EthCoin::RopstenEth);
        assert!(coin_from_path(&binding, &[44, 10]).is_err());
    }

    #[test]
    fn test_to_proto_uses_binding_values() {
        let mut binding = FirmwareBinding::default();
        binding.coins.eth = 7;
        assert_eq!(EthCoin::Eth.to_proto(&binding), 7);
    }
}
