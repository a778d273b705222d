use std::{fmt, fmt::Display, str::FromStr};

use anyhow::anyhow;
#[cfg(any(test, feature = "test-utils"))]
use proptest_derive::Arbitrary;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::VariantArray;

use crate::amount::Amount;

/// The MotaCoin networks we know how to talk about.
///
/// Serializes as "mainnet" / "testnet" via its [`FromStr`] and [`Display`]
/// impls.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray)]
#[derive(SerializeDisplay, DeserializeFromStr)]
#[cfg_attr(any(test, feature = "test-utils"), derive(Arbitrary))]
pub enum MtNetwork {
    Mainnet,
    Testnet,
}

impl MtNetwork {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Get the [`NetworkParams`] for this network.
    #[inline]
    pub fn params(self) -> &'static NetworkParams {
        match self {
            Self::Mainnet => &NetworkParams::MAINNET,
            Self::Testnet => &NetworkParams::TESTNET,
        }
    }
}

impl FromStr for MtNetwork {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            _ => Err(anyhow!("Invalid `MtNetwork`: '{s}'")),
        }
    }
}

impl Display for MtNetwork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-network constants needed to validate addresses and payment URIs.
///
/// There's no global "current network"; callers pass the params they want
/// explicitly, e.g. `MtNetwork::Mainnet.params()`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkParams {
    pub network: MtNetwork,
    /// base58 version byte for pay-to-pubkey-hash addresses.
    pub address_header: u8,
    /// base58 version byte for pay-to-script-hash addresses.
    pub p2sh_header: u8,
    /// The payment URI scheme, compared case-sensitively.
    pub uri_scheme: &'static str,
    /// No valid amount may exceed this.
    pub max_money: Amount,
}

impl NetworkParams {
    /// The `<scheme>:` prefix used in MotaCoin payment URIs. Yes, it's missing
    /// a "c"; wallets in the wild all emit it this way.
    pub const URI_SCHEME: &'static str = "motaoin";

    pub const MAINNET: Self = Self {
        network: MtNetwork::Mainnet,
        // "P..."
        address_header: 55,
        // "p..."
        p2sh_header: 117,
        uri_scheme: Self::URI_SCHEME,
        max_money: Amount::MAX_MOTACOIN_SUPPLY,
    };

    pub const TESTNET: Self = Self {
        network: MtNetwork::Testnet,
        // "m..." or "n..."
        address_header: 111,
        // "2..."
        p2sh_header: 196,
        uri_scheme: Self::URI_SCHEME,
        max_money: Amount::MAX_MOTACOIN_SUPPLY,
    };

    #[inline]
    pub fn for_network(network: MtNetwork) -> &'static Self {
        network.params()
    }

    /// The address version bytes this network accepts.
    #[inline]
    pub fn acceptable_address_codes(&self) -> [u8; 2] {
        [self.address_header, self.p2sh_header]
    }
}
