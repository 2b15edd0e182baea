use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const ADDRESS_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressParseError {
    #[error("Invalid address length {0}, expected 40 hex characters")]
    InvalidLength(usize),
    #[error("Invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// 160-bit account identifier, rendered as `0x` prefixed hex.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Counterparty of mint and burn transfers.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    /// Takes the trailing 20 bytes of a 32 byte digest.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::InvalidLength(digits.len()));
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let address: Address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap();
        assert_eq!(
            address.to_string(),
            "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
        );

        let unprefixed: Address = "70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap();
        assert_eq!(address, unprefixed);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::InvalidLength(4))
        );
        assert_eq!(
            "0xzz997970c51812dc3a010c7d01b50e0d17dc79c8".parse::<Address>(),
            Err(AddressParseError::InvalidHex(
                hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 }
            ))
        );
    }

    #[test]
    fn test_serde_as_string() {
        let address = Address::new([0x11; 20]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0x1111111111111111111111111111111111111111\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
