//! Legacy base58check MotaCoin addresses.
//!
//! An address is a one byte version ("header") followed by a 20 byte hash160,
//! base58 encoded with a 4 byte double-SHA256 checksum. The version byte says
//! which network the address belongs to and whether it pays to a pubkey hash
//! or a script hash.

use std::fmt;

use bitcoin::base58;
use serde_with::SerializeDisplay;

use crate::network::{MtNetwork, NetworkParams};

/// Errors that can occur when decoding an [`Address`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid base58check encoding: {0}")]
    Base58(#[from] base58::Error),
    #[error("Invalid address payload length: {0}")]
    InvalidLength(usize),
    #[error("Address version {version} is not valid on {network}")]
    WrongVersion { version: u8, network: MtNetwork },
}

/// A decoded and version-checked MotaCoin address.
///
/// Only constructible through [`Address::from_base58`] or the `p2pkh` / `p2sh`
/// constructors, so the version byte is always one the network accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[derive(SerializeDisplay)]
pub struct Address {
    version: u8,
    hash: [u8; Self::HASH_LEN],
}

impl Address {
    /// Length of the hash160 payload.
    pub const HASH_LEN: usize = 20;

    /// Longest string we bother base58-decoding. A 25 byte payload never
    /// encodes to more than 34 characters; anything past 50 is garbage.
    const MAX_BASE58_LEN: usize = 50;

    /// Pay to pubkey hash.
    pub fn p2pkh(params: &NetworkParams, hash: [u8; Self::HASH_LEN]) -> Self {
        Self {
            version: params.address_header,
            hash,
        }
    }

    /// Pay to script hash.
    pub fn p2sh(params: &NetworkParams, hash: [u8; Self::HASH_LEN]) -> Self {
        Self {
            version: params.p2sh_header,
            hash,
        }
    }

    /// Decode a base58check address string and check that its version byte is
    /// acceptable on the given network.
    pub fn from_base58(params: &NetworkParams, s: &str) -> Result<Self, Error> {
        if s.len() > Self::MAX_BASE58_LEN {
            return Err(Error::InvalidLength(s.len() * 11 / 15));
        }

        let data = base58::decode_check(s)?;
        let (version, hash) = match data.split_first() {
            Some((version, hash)) if hash.len() == Self::HASH_LEN =>
                (*version, hash),
            _ => return Err(Error::InvalidLength(data.len())),
        };

        if !params.acceptable_address_codes().contains(&version) {
            return Err(Error::WrongVersion {
                version,
                network: params.network,
            });
        }

        let mut out = [0u8; Self::HASH_LEN];
        out.copy_from_slice(hash);
        Ok(Self { version, hash: out })
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    pub fn hash160(&self) -> &[u8; Self::HASH_LEN] {
        &self.hash
    }

    /// Whether this is a pay-to-script-hash address on the given network.
    #[inline]
    pub fn is_p2sh(&self, params: &NetworkParams) -> bool {
        self.version == params.p2sh_header
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefixed = [0u8; 1 + Self::HASH_LEN];
        prefixed[0] = self.version;
        prefixed[1..].copy_from_slice(&self.hash);
        f.write_str(&base58::encode_check(&prefixed))
    }
}
