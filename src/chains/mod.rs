//! Chain support for KeepKey hardware wallets
//!
//! Each chain module turns caller-side data into the exact values the
//! device firmware expects.

pub mod ethereum;

pub use ethereum::EthereumSupport;
