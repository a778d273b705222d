//! Strict parsing and building of MotaCoin payment URIs.
//!
//! A payment URI is a BIP21-style link a wallet can hand to another wallet:
//!
//! ```not_rust
//! motaoin:PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4?amount=12.34&label=Hello
//! motaoin:?r=https%3A%2F%2Fmerchant.com%2Fpay.php%3Fh%3D2a8628fc2fbe
//! ```
//!
//! Parsing happens in two steps. [`Uri::parse`] checks the raw grammar and
//! splits the input into a scheme, a body, and ordered query params.
//! [`MotaUri::parse`] then interprets those tokens against a network's
//! [`NetworkParams`]. [`build`] and [`MotaUri::to_uri_string`] go the other
//! way.
//!
//! Unlike most wallet parsers, this one is strict: anything malformed,
//! duplicated, or required-but-unknown is a [`ParseError`] rather than being
//! silently dropped.
//!
//! [`NetworkParams`]: mota_common::network::NetworkParams

use std::borrow::Cow;

use mota_common::{address, amount};

/// Export all public types so they are accessible via the crate root.
pub use crate::{
    mota_uri::{MotaUri, build},
    uri::{Uri, UriParam},
};

/// Amount parsing and value decoding.
mod helpers;
/// `MotaUri` interpretation, serialization, and the `build` fn.
mod mota_uri;
/// Low level URI building blocks: `Uri`, `UriParam`
mod uri;

/// Refuse to parse any input longer than this many KiB.
const MAX_INPUT_LEN_KIB: usize = 8;

/// Everything that can go wrong when parsing a payment URI. Building never
/// fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported URI scheme: '{0}'")]
    Scheme(String),

    #[error("Bad URI syntax: {0}")]
    Syntax(Cow<'static, str>),

    #[error("Bad address '{text}'")]
    BadAddress {
        text: String,
        #[source]
        source: address::Error,
    },

    #[error("Duplicate field '{0}'")]
    DuplicateField(String),

    #[error("Bad amount '{text}': {reason}")]
    AmountFormat { text: String, reason: &'static str },

    #[error("Bad amount '{text}'")]
    AmountRange {
        text: String,
        #[source]
        source: amount::Error,
    },

    #[error("Unsupported required field '{0}'")]
    UnsupportedRequiredField(String),

    #[error("No address and no payment request URL")]
    MissingAddress,
}

impl ParseError {
    pub(crate) fn syntax(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Syntax(msg.into())
    }
}
