use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};

use crate::utils::error::{Error, Result};

/// Human-readable part of every account and contract address
pub const ADDRESS_HRP: &str = "erd";

/// Length of an account public key in bytes
pub const PUBKEY_LEN: usize = 32;

/// An on-chain account address: the 32-byte public key and its bech32 form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pubkey: [u8; PUBKEY_LEN],
    bech32: String,
}

impl Address {
    /// Build an address from a raw public key
    pub fn from_pubkey(pubkey: [u8; PUBKEY_LEN]) -> Result<Self> {
        let bech32 = bech32::encode(ADDRESS_HRP, pubkey.to_base32(), Variant::Bech32)
            .map_err(|e| Error::AddressError(format!("cannot encode public key: {}", e)))?;
        Ok(Self { pubkey, bech32 })
    }

    /// Parse an `erd1...` address
    pub fn from_bech32(value: &str) -> Result<Self> {
        let (hrp, data, variant) = bech32::decode(value)
            .map_err(|e| Error::AddressError(format!("{}: {}", value, e)))?;
        if hrp != ADDRESS_HRP {
            return Err(Error::AddressError(format!(
                "{}: expected prefix '{}', got '{}'",
                value, ADDRESS_HRP, hrp
            )));
        }
        if variant != Variant::Bech32 {
            return Err(Error::AddressError(format!("{}: bech32m is not accepted", value)));
        }
        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| Error::AddressError(format!("{}: {}", value, e)))?;
        let pubkey: [u8; PUBKEY_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            Error::AddressError(format!("{}: expected {} bytes, got {}", value, PUBKEY_LEN, b.len()))
        })?;
        Self::from_pubkey(pubkey)
    }

    pub fn pubkey(&self) -> &[u8; PUBKEY_LEN] {
        &self.pubkey
    }

    /// Lowercase hex of the public key, as used in contract-call arguments
    pub fn to_hex(&self) -> String {
        hex::encode(self.pubkey)
    }

    pub fn as_bech32(&self) -> &str {
        &self.bech32
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bech32(s.trim())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}
