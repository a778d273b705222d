//! MotaCoin payment URI interpretation and serialization.
//!
//! + [BIP21 - URI Scheme](https://github.com/bitcoin/bips/blob/master/bip-0021.mediawiki)
//! + [BIP72 - Payment Protocol URIs](https://github.com/bitcoin/bips/blob/master/bip-0072.mediawiki)
//!
//! Examples:
//!
//! ```not_rust
//! motaoin:PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4
//!
//! motaoin:PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4?amount=12.34&label=Hello
//!
//! motaoin:PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4?amount=50&message=Donation%20for%20project%20xyz
//!
//! motaoin:?r=https%3A%2F%2Fmerchant.com%2Fpay.php%3Fh%3D2a8628fc2fbe
//! ```

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashSet},
    fmt,
};

use mota_common::{address::Address, amount::Amount, network::NetworkParams};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    ParseError, helpers,
    uri::{Uri, UriParam},
};

/// A parsed MotaCoin payment URI.
///
/// A successfully parsed [`MotaUri`] always has an `address`, at least one
/// payment request URL, or both.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MotaUri {
    /// The address to pay, from the URI body or an `address` param.
    pub address: Option<Address>,

    /// Requested amount
    pub amount: Option<Amount>,

    /// Payee label / vendor. Never `Some("")`.
    pub label: Option<String>,

    /// Payment note. Never `Some("")`.
    pub message: Option<String>,

    /// Payment request URLs from the `r`, `r1`, `r2`, ... params, with the
    /// highest index first and the bare `r` URL last.
    pub payment_request_urls: Vec<String>,

    /// Every other (decoded) param, in the order it appeared.
    pub extra_params: Vec<(String, String)>,
}

impl MotaUri {
    /// Parse and validate a payment URI for the given network.
    pub fn parse(params: &NetworkParams, s: &str) -> Result<Self, ParseError> {
        let uri = Uri::parse(s)?;
        Self::parse_uri(params, uri)
    }

    /// Interpret an already tokenized [`Uri`].
    pub fn parse_uri(
        params: &NetworkParams,
        uri: Uri<'_>,
    ) -> Result<Self, ParseError> {
        if uri.scheme != params.uri_scheme {
            return Err(ParseError::Scheme(uri.scheme.to_owned()));
        }

        debug!(
            network = %params.network,
            num_params = uri.params.len(),
            "Parsing payment URI"
        );
        Self::parse_uri_inner(params, uri)
    }

    fn parse_uri_inner(
        params: &NetworkParams,
        uri: Uri<'_>,
    ) -> Result<Self, ParseError> {
        let mut out = Self::default();

        // Parse "motaoin:{address}" from URI body
        if !uri.body.is_empty() {
            out.address = Some(decode_address(params, &uri.body)?);
        }

        // Every key except `address` is only allowed once.
        let mut seen_keys = HashSet::new();
        // idx -> (key, url)
        let mut request_urls = BTreeMap::<u32, (String, String)>::new();

        // Parse URI parameters
        for param in &uri.params {
            let Some(raw_value) = &param.value else {
                let key = &param.key;
                return Err(ParseError::syntax(format!(
                    "no separator in '{key}'"
                )));
            };

            let key =
                helpers::decode_component(&param.key)?.to_ascii_lowercase();
            if key.is_empty() {
                return Err(ParseError::syntax("empty name"));
            }

            if key == "address" {
                // Checked before decoding, so a garbage or empty duplicate is
                // still reported as a duplicate.
                if out.address.is_some() {
                    return Err(ParseError::DuplicateField(key));
                }
                if !raw_value.is_empty() {
                    let text = helpers::decode_component(raw_value)?;
                    out.address = Some(decode_address(params, &text)?);
                }
                continue;
            }

            if key.starts_with("req-") {
                return Err(ParseError::UnsupportedRequiredField(key));
            }

            // An empty value is the same as leaving the param out, except for
            // `amount`, which must be a number.
            if raw_value.is_empty() && key != "amount" {
                continue;
            }

            if !seen_keys.insert(key.clone()) {
                return Err(ParseError::DuplicateField(key));
            }

            match key.as_str() {
                "amount" => {
                    let amount = helpers::parse_amount(params, raw_value)?;
                    out.amount = Some(amount);
                }
                "label" => {
                    let label = helpers::decode_component(raw_value)?;
                    out.label = Some(label.into_owned());
                }
                "message" => {
                    let message = helpers::decode_component(raw_value)?;
                    out.message = Some(message.into_owned());
                }
                _ =>
                    if let Some(idx) = helpers::payment_request_index(&key) {
                        let url = helpers::decode_component(raw_value)?;
                        request_urls.insert(idx, (key, url.into_owned()));
                    } else {
                        let value = helpers::decode_component(raw_value)?;
                        out.extra_params.push((key, value.into_owned()));
                    },
            }
        }

        // Follow the `r`, `r1`, `r2`, ... chain until the first gap.
        let mut idx = 0;
        while let Some((_key, url)) = request_urls.remove(&idx) {
            out.payment_request_urls.push(url);
            idx += 1;
        }
        out.payment_request_urls.reverse();

        // Anything past the gap is dropped.
        for (key, url) in request_urls.into_values() {
            warn!(%key, %url, "Ignoring payment request URL after `r` gap");
        }

        if out.address.is_none() && out.payment_request_urls.is_empty() {
            return Err(ParseError::MissingAddress);
        }

        Ok(out)
    }

    /// The URL from the bare `r` param, if any.
    pub fn payment_request_url(&self) -> Option<&str> {
        self.payment_request_urls.last().map(String::as_str)
    }

    /// Look up an unrecognized param by name.
    pub fn extra_param(&self, name: &str) -> Option<&str> {
        self.extra_params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Serialize into a payment URI string for the given network.
    /// [`MotaUri::parse`] on the result gives back an equal [`MotaUri`].
    pub fn to_uri_string(&self, params: &NetworkParams) -> String {
        self.to_uri(params).to_string()
    }

    fn to_uri(&self, params: &NetworkParams) -> Uri<'static> {
        let mut out = Uri {
            scheme: params.uri_scheme,
            body: Cow::Borrowed(""),
            params: Vec::new(),
        };

        if let Some(address) = &self.address {
            out.body = Cow::Owned(address.to_string());
        }

        // Canonical coin decimal, e.g. "12.34", "0.1", "1000"
        if let Some(amount) = &self.amount {
            let coins = amount.coins().to_string();
            out.params.push(UriParam::encode("amount", &coins));
        }

        if let Some(label) = self.label.as_deref().filter(|s| !s.is_empty()) {
            out.params.push(UriParam::encode("label", label));
        }

        let message = self.message.as_deref().filter(|s| !s.is_empty());
        if let Some(message) = message {
            out.params.push(UriParam::encode("message", message));
        }

        // The last URL is the bare `r` one.
        let urls = self.payment_request_urls.iter().rev();
        for (idx, url) in (0..).zip(urls) {
            let key = helpers::payment_request_key(idx);
            out.params.push(UriParam::encode(&key, url));
        }

        for (key, value) in &self.extra_params {
            if !value.is_empty() {
                out.params.push(UriParam::encode(key, value));
            }
        }

        out
    }
}

// "MotaUri['amount'='12340000','label'='Hello',...,'address'='PKf1...']"
impl fmt::Display for MotaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Vec::<(Cow<'_, str>, String)>::new();

        if let Some(amount) = &self.amount {
            fields.push(("amount".into(), amount.to_string()));
        }
        if let Some(label) = &self.label {
            fields.push(("label".into(), label.clone()));
        }
        if let Some(message) = &self.message {
            fields.push(("message".into(), message.clone()));
        }

        let urls = self.payment_request_urls.iter().rev();
        for (idx, url) in (0..).zip(urls) {
            fields.push((helpers::payment_request_key(idx), url.clone()));
        }

        for (key, value) in &self.extra_params {
            fields.push((key.into(), value.clone()));
        }

        // The address always goes last.
        if let Some(address) = &self.address {
            fields.push(("address".into(), address.to_string()));
        }

        f.write_str("MotaUri[")?;
        for (idx, (key, value)) in fields.iter().enumerate() {
            let sep = if idx == 0 { "" } else { "," };
            write!(f, "{sep}'{key}'='{value}'")?;
        }
        f.write_str("]")
    }
}

/// Build a payment URI from its parts. Empty labels and messages are left out,
/// and the `?` only appears if there's at least one param.
///
/// ```
/// # use mota_common::{address::Address, amount::Amount, network::NetworkParams};
/// let params = &NetworkParams::MAINNET;
/// let address = Address::from_base58(
///     params,
///     "PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4",
/// )
/// .unwrap();
/// let amount = Amount::from_units(12_340_000);
///
/// let uri = mota_payment_uri::build(
///     params,
///     &address,
///     Some(amount),
///     Some("Hello World"),
///     None,
/// );
/// assert_eq!(
///     uri,
///     "motaoin:PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4?amount=12.34&label=Hello%20World",
/// );
/// ```
pub fn build(
    params: &NetworkParams,
    address: &Address,
    amount: Option<Amount>,
    label: Option<&str>,
    message: Option<&str>,
) -> String {
    let uri = MotaUri {
        address: Some(*address),
        amount,
        label: label.filter(|s| !s.is_empty()).map(str::to_owned),
        message: message.filter(|s| !s.is_empty()).map(str::to_owned),
        ..MotaUri::default()
    };
    uri.to_uri_string(params)
}

fn decode_address(
    params: &NetworkParams,
    text: &str,
) -> Result<Address, ParseError> {
    Address::from_base58(params, text).map_err(|source| {
        ParseError::BadAddress {
            text: text.to_owned(),
            source,
        }
    })
}

#[cfg(test)]
mod test {
    use mota_common::{
        address, amount,
        test_utils::arbitrary::any_mainnet_address,
    };
    use proptest::{
        arbitrary::any,
        collection::{btree_map, vec},
        option, prop_assert, prop_assert_eq, proptest,
        strategy::Strategy,
    };

    use super::*;

    const PARAMS: &NetworkParams = &NetworkParams::MAINNET;
    const MAINNET_GOOD_ADDRESS: &str = "PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4";
    const MAINNET_BAD_ADDRESS: &str = "mranY19RYUjgJjXY4BJNYp88WXXAg7Pr9T";

    fn good_address() -> Address {
        Address::from_base58(PARAMS, MAINNET_GOOD_ADDRESS).unwrap()
    }

    fn coins(s: &str) -> Amount {
        helpers::parse_amount(PARAMS, s).unwrap()
    }

    #[track_caller]
    fn parse_ok(s: &str) -> MotaUri {
        MotaUri::parse(PARAMS, s).unwrap()
    }

    #[track_caller]
    fn parse_err(s: &str) -> ParseError {
        MotaUri::parse(PARAMS, s).unwrap_err()
    }

    /// "motaoin:{MAINNET_GOOD_ADDRESS}{suffix}"
    fn good_uri(suffix: &str) -> String {
        format!("motaoin:{MAINNET_GOOD_ADDRESS}{suffix}")
    }

    #[test]
    fn test_build_manual() {
        let address = good_address();
        let build = |amount: Option<&str>,
                     label: Option<&str>,
                     message: Option<&str>| {
            build(PARAMS, &address, amount.map(coins), label, message)
        };

        // simple example, and back again
        let s = build(Some("12.34"), Some("Hello"), Some("AMessage"));
        assert_eq!(s, good_uri("?amount=12.34&label=Hello&message=AMessage"));
        let uri = parse_ok(&s);
        assert_eq!(uri.address, Some(good_address()));
        assert_eq!(uri.amount, Some(Amount::from_units(12_340_000)));
        assert_eq!(uri.label.as_deref(), Some("Hello"));
        assert_eq!(uri.message.as_deref(), Some("AMessage"));

        // example with spaces, ampersand and plus
        assert_eq!(
            build(
                Some("12.34"),
                Some("Hello World"),
                Some("Mess & age + hope"),
            ),
            good_uri(
                "?amount=12.34&label=Hello%20World\
                 &message=Mess%20%26%20age%20%2B%20hope"
            ),
        );

        // no amount, label present, message present
        assert_eq!(
            build(None, Some("Hello"), Some("glory")),
            good_uri("?label=Hello&message=glory"),
        );

        // amount present, no label, message present
        assert_eq!(
            build(Some("0.1"), None, Some("glory")),
            good_uri("?amount=0.1&message=glory"),
        );
        assert_eq!(
            build(Some("0.1"), Some(""), Some("glory")),
            good_uri("?amount=0.1&message=glory"),
        );

        // amount present, label present, no message
        assert_eq!(
            build(Some("12.34"), Some("Hello"), None),
            good_uri("?amount=12.34&label=Hello"),
        );
        assert_eq!(
            build(Some("12.34"), Some("Hello"), Some("")),
            good_uri("?amount=12.34&label=Hello"),
        );

        // amount present, no label, no message
        assert_eq!(build(Some("1000"), None, None), good_uri("?amount=1000"));
        assert_eq!(
            build(Some("1000"), Some(""), Some("")),
            good_uri("?amount=1000"),
        );

        // no amount, label present, no message
        assert_eq!(build(None, Some("Hello"), None), good_uri("?label=Hello"));

        // no amount, no label, message present
        assert_eq!(
            build(None, None, Some("Agatha")),
            good_uri("?message=Agatha"),
        );
        assert_eq!(
            build(None, Some(""), Some("Agatha")),
            good_uri("?message=Agatha"),
        );

        // no amount, no label, no message
        assert_eq!(build(None, None, None), good_uri(""));
        assert_eq!(build(None, Some(""), Some("")), good_uri(""));
    }

    #[test]
    fn test_parse_good() {
        // just an address
        let uri = parse_ok(&good_uri(""));
        assert_eq!(uri.address, Some(good_address()));
        assert_eq!(uri.address.unwrap().hash160().len(), 20);
        assert_eq!(uri.amount, None);
        assert_eq!(uri.label, None);
        assert_eq!(uri.payment_request_url(), None);
        assert!(uri.payment_request_urls.is_empty());

        // amounts
        let uri = parse_ok(&good_uri("?amount=6543210.123456"));
        assert_eq!(uri.amount.unwrap().to_string(), "6543210123456");
        let uri = parse_ok(&good_uri("?amount=.123456"));
        assert_eq!(uri.amount.unwrap().to_string(), "123456");
        let uri = parse_ok(&good_uri("?amount=6543210"));
        assert_eq!(uri.amount.unwrap().to_string(), "6543210000000");

        // labels
        let uri = parse_ok(&good_uri("?label=Hello%20World"));
        assert_eq!(uri.label.as_deref(), Some("Hello World"));
        let uri = parse_ok(&good_uri("?label=Hello+Earth+%26+Mars+%2B+Venus"));
        assert_eq!(uri.label.as_deref(), Some("Hello Earth & Mars + Venus"));
        let uri =
            parse_ok(&good_uri("?label=%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0"));
        assert_eq!(uri.label.as_deref(), Some("Москва"));
        let uri = parse_ok(&good_uri("?label=aardvark=zebra"));
        assert_eq!(uri.label.as_deref(), Some("aardvark=zebra"));

        // message
        let uri = parse_ok(&good_uri("?message=Hello%20World"));
        assert_eq!(uri.message.as_deref(), Some("Hello World"));

        // empty label and message are absent
        assert_eq!(parse_ok(&good_uri("?label=")).label, None);
        assert_eq!(parse_ok(&good_uri("?message=")).message, None);
        let uri = parse_ok("motaoin:?address=&r=URL1");
        assert_eq!(uri.address, None);
        assert_eq!(uri.payment_request_url(), Some("URL1"));

        // keys are case-insensitive
        let uri = parse_ok(&good_uri("?AMOUNT=1&Label=Hi"));
        assert_eq!(uri.amount, Some(coins("1")));
        assert_eq!(uri.label.as_deref(), Some("Hi"));

        // address in a param instead of the body
        let uri = parse_ok(&format!("motaoin:?address={MAINNET_GOOD_ADDRESS}"));
        assert_eq!(uri.address, Some(good_address()));

        // tolerated "//" form, trailing zeros beyond six places
        let uri = parse_ok(&format!(
            "motaoin://{MAINNET_GOOD_ADDRESS}?amount=0.01000000"
        ));
        assert_eq!(uri.address.unwrap().to_string(), MAINNET_GOOD_ADDRESS);
        assert_eq!(uri.amount, Some(Amount::from_units(10_000)));
    }

    #[test]
    fn test_parse_display() {
        let uri = parse_ok(&good_uri(
            "?amount=6543210&label=Hello%20World&message=Be%20well",
        ));
        assert_eq!(
            uri.to_string(),
            "MotaUri['amount'='6543210000000','label'='Hello World',\
             'message'='Be well','address'='PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4']",
        );

        // The address goes last no matter where it appeared
        let uri = parse_ok(&format!(
            "motaoin:?address={MAINNET_GOOD_ADDRESS}&aardvark=true&label=Hi"
        ));
        assert_eq!(
            uri.to_string(),
            "MotaUri['label'='Hi','aardvark'='true',\
             'address'='PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4']",
        );

        let uri = parse_ok("motaoin:?r=URL1&r1=URL2");
        assert_eq!(uri.to_string(), "MotaUri['r'='URL1','r1'='URL2']");
    }

    #[test]
    fn test_parse_unknown() {
        // unknown, not required
        let uri = parse_ok(&good_uri("?aardvark=true"));
        assert_eq!(
            uri.to_string(),
            "MotaUri['aardvark'='true',\
             'address'='PKf1PvTHnNncWTigggeXPnt5GH6LuDsnM4']",
        );
        assert_eq!(uri.extra_param("aardvark"), Some("true"));
        assert_eq!(uri.extra_param("AARDVARK"), Some("true"));
        assert_eq!(uri.extra_param("zebra"), None);

        // extras keep their order
        let uri = parse_ok(&good_uri("?zebra=1&aardvark=2&moose=3"));
        let keys = uri
            .extra_params
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, ["zebra", "aardvark", "moose"]);

        // unknown, isolated
        let err = parse_err(&good_uri("?aardvark"));
        assert!(err.to_string().contains("no separator"), "{err}");

        // unknown, required
        let err = parse_err(&good_uri("?req-aardvark=true"));
        assert_eq!(
            err,
            ParseError::UnsupportedRequiredField("req-aardvark".to_owned())
        );
        assert!(err.to_string().contains("req-aardvark"));

        // unknown, required, even when empty
        assert_eq!(
            parse_err(&good_uri("?req-aardvark=")),
            ParseError::UnsupportedRequiredField("req-aardvark".to_owned())
        );
        assert_eq!(
            parse_err(&good_uri("?label=Hi&REQ-Aardvark=&message=Yo")),
            ParseError::UnsupportedRequiredField("req-aardvark".to_owned())
        );
    }

    #[test]
    fn test_parse_payment_requests() {
        // payment request only
        let uri = parse_ok(
            "motaoin:?r=https%3A%2F%2Fmotaoincore.org%2F%7Egavin%2Ff.php\
             %3Fh%3Db0f02e7cea67f168e25ec9b9f9d584f9",
        );
        let url =
            "https://motaoincore.org/~gavin/f.php?h=b0f02e7cea67f168e25ec9b9f9d584f9";
        assert_eq!(uri.payment_request_url(), Some(url));
        assert_eq!(uri.payment_request_urls, [url]);
        assert_eq!(uri.address, None);

        // multiple payment requests
        let uri = parse_ok(
            "motaoin:?r=https%3A%2F%2Fmotaoincore.org%2F%7Egavin\
             &r1=bt:112233445566",
        );
        assert_eq!(
            uri.payment_request_urls,
            ["bt:112233445566", "https://motaoincore.org/~gavin"],
        );
        assert_eq!(
            uri.payment_request_url(),
            Some("https://motaoincore.org/~gavin")
        );

        // unescaped '?' in the URL
        let uri =
            parse_ok("motaoin:?r=https://merchant.com/pay.php?h%3D2a8628fc2fbe");
        assert_eq!(
            uri.payment_request_urls,
            ["https://merchant.com/pay.php?h=2a8628fc2fbe"],
        );
        assert_eq!(uri.address, None);

        // key order doesn't matter, the chain does
        let uri = parse_ok("motaoin:?r2=C&r=A&r1=B");
        assert_eq!(uri.payment_request_urls, ["C", "B", "A"]);
        assert_eq!(uri.payment_request_url(), Some("A"));
    }

    #[test]
    fn test_parse_payment_request_gap() {
        mota_logger::init_for_testing();

        // "r2" and "r5" come after a gap, so they're dropped
        let uri = parse_ok(&good_uri("?r5=E&r=A&aardvark=true&r2=C"));
        assert_eq!(uri.payment_request_urls, ["A"]);
        assert_eq!(
            uri.extra_params,
            [("aardvark".to_owned(), "true".to_owned())],
        );
        assert_eq!(uri.extra_param("r2"), None);
        assert_eq!(uri.extra_param("r5"), None);

        // no chain at all
        assert_eq!(
            parse_err("motaoin:?r1=https://example.com"),
            ParseError::MissingAddress,
        );

        // "r0" and "r01" aren't payment request keys
        let uri = parse_ok(&good_uri("?r0=A&r01=B"));
        assert!(uri.payment_request_urls.is_empty());
        assert_eq!(uri.extra_param("r0"), Some("A"));
        assert_eq!(uri.extra_param("r01"), Some("B"));
    }

    #[test]
    fn test_parse_errors() {
        // bad scheme
        assert_eq!(
            parse_err(&format!("blimpcoin:{MAINNET_GOOD_ADDRESS}")),
            ParseError::Scheme("blimpcoin".to_owned()),
        );
        assert!(matches!(
            parse_err(&format!("MOTAOIN:{MAINNET_GOOD_ADDRESS}")),
            ParseError::Scheme(_),
        ));

        // bad syntax
        for s in [
            format!("motaoin|{MAINNET_GOOD_ADDRESS}"),
            format!("motaoin:{MAINNET_GOOD_ADDRESS}\\"),
            "motaoin:".to_owned(),
            "motaoin".to_owned(),
            good_uri("?"),
        ] {
            let err = parse_err(&s);
            assert!(matches!(err, ParseError::Syntax(_)), "{s}: {err:?}");
            assert!(err.to_string().contains("Bad URI syntax"));
        }
        assert_eq!(
            parse_err(&good_uri("?=foo")),
            ParseError::syntax("empty name"),
        );
        assert!(matches!(
            parse_err(&good_uri("?label=%FF")),
            ParseError::Syntax(_),
        ));

        // wrong network address
        let err = parse_err(&format!("motaoin:{MAINNET_BAD_ADDRESS}"));
        assert_eq!(
            err,
            ParseError::BadAddress {
                text: MAINNET_BAD_ADDRESS.to_owned(),
                source: address::Error::WrongVersion {
                    version: 111,
                    network: PARAMS.network,
                },
            },
        );
        assert!(err.to_string().contains("Bad address"));
        assert!(matches!(
            parse_err("motaoin:?address=aardvark"),
            ParseError::BadAddress { .. },
        ));

        // missing address
        assert_eq!(
            parse_err("motaoin:?amount=1&label=Hi"),
            ParseError::MissingAddress,
        );

        // bad amounts
        for suffix in ["?amount=", "?amount=12X4", "?amount=0.123456789"] {
            let err = parse_err(&good_uri(suffix));
            assert!(
                matches!(err, ParseError::AmountFormat { .. }),
                "{suffix}: {err:?}"
            );
            assert!(err.to_string().contains("amount"));
        }
        assert_eq!(
            parse_err(&good_uri("?amount=-1")),
            ParseError::AmountRange {
                text: "-1".to_owned(),
                source: amount::Error::Negative,
            },
        );
        assert_eq!(
            parse_err(&good_uri("?amount=2000000001")),
            ParseError::AmountRange {
                text: "2000000001".to_owned(),
                source: amount::Error::TooLarge,
            },
        );
    }

    #[test]
    fn test_parse_duplicates() {
        let dup = |key: &str| ParseError::DuplicateField(key.to_owned());

        // sneaky address overwrite attack, even with a garbage address
        let err = parse_err(&good_uri("?address=aardvark"));
        assert_eq!(err, dup("address"));
        assert!(err.to_string().contains("address"));
        assert_eq!(parse_err(&good_uri("?address=")), dup("address"));
        assert_eq!(
            parse_err(&good_uri(&format!("?address={MAINNET_GOOD_ADDRESS}"))),
            dup("address"),
        );
        assert_eq!(
            parse_err(&format!(
                "motaoin:?address={MAINNET_GOOD_ADDRESS}&ADDRESS=aardvark"
            )),
            dup("address"),
        );

        assert_eq!(parse_err(&good_uri("?amount=1&amount=2")), dup("amount"));
        assert_eq!(parse_err(&good_uri("?label=a&LABEL=b")), dup("label"));
        assert_eq!(
            parse_err(&good_uri("?message=a&message=a")),
            dup("message"),
        );
        assert_eq!(parse_err("motaoin:?r=a&r=b"), dup("r"));
        assert_eq!(parse_err(&good_uri("?foo=1&foo=2")), dup("foo"));

        // an empty value is as good as absent
        let uri = parse_ok(&good_uri("?label=&label=Hi"));
        assert_eq!(uri.label.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_serialize_json() {
        let uri = parse_ok(&good_uri("?amount=12.34&label=Hi&aardvark=true"));
        let actual = serde_json::to_value(&uri).unwrap();
        let expected = serde_json::json!({
            "address": MAINNET_GOOD_ADDRESS,
            "amount": 12_340_000,
            "label": "Hi",
            "message": null,
            "payment_request_urls": [],
            "extra_params": [["aardvark", "true"]],
        });
        assert_eq!(actual, expected);
    }

    fn non_empty_string() -> impl Strategy<Value = String> {
        any::<String>().prop_filter("empty", |s| !s.is_empty())
    }

    fn any_extra_key() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,8}".prop_filter("reserved", |key| {
            !matches!(key.as_str(), "address" | "amount" | "label" | "message")
                && helpers::payment_request_index(key).is_none()
        })
    }

    /// Any [`MotaUri`] that [`MotaUri::parse`] could produce.
    fn any_mota_uri() -> impl Strategy<Value = MotaUri> {
        (
            option::of(any_mainnet_address()),
            option::of(amount::arb::money_amount()),
            option::of(non_empty_string()),
            option::of(non_empty_string()),
            vec(non_empty_string(), 0..3),
            btree_map(any_extra_key(), non_empty_string(), 0..3),
        )
            .prop_filter("no address or URL", |(address, .., urls, _)| {
                address.is_some() || !urls.is_empty()
            })
            .prop_map(
                |(address, amount, label, message, urls, extras)| MotaUri {
                    address,
                    amount,
                    label,
                    message,
                    payment_request_urls: urls,
                    extra_params: extras.into_iter().collect(),
                },
            )
    }

    // roundtrip: MotaUri -> String -> MotaUri
    #[test]
    fn test_mota_uri_prop_roundtrip() {
        proptest!(|(uri in any_mota_uri())| {
            let actual = MotaUri::parse(PARAMS, &uri.to_uri_string(PARAMS));
            prop_assert_eq!(Ok(uri), actual);
        });
    }

    // roundtrip: build(..) -> String -> MotaUri
    #[test]
    fn test_build_prop_roundtrip() {
        proptest!(|(
            address in any_mainnet_address(),
            amount in option::of(amount::arb::money_amount()),
            label in option::of(any::<String>()),
            message in option::of(any::<String>()),
        )| {
            let s = build(
                PARAMS,
                &address,
                amount,
                label.as_deref(),
                message.as_deref(),
            );
            let uri = MotaUri::parse(PARAMS, &s).unwrap();

            prop_assert_eq!(uri.address, Some(address));
            prop_assert_eq!(uri.amount, amount);
            prop_assert_eq!(uri.label, label.filter(|s| !s.is_empty()));
            prop_assert_eq!(uri.message, message.filter(|s| !s.is_empty()));
            prop_assert!(uri.payment_request_urls.is_empty());
            prop_assert!(uri.extra_params.is_empty());
        });
    }

    // An `address` param after a body address is always a duplicate, whatever
    // it contains, even nothing.
    #[test]
    fn test_parse_prop_duplicate_address() {
        proptest!(|(
            address in any_mainnet_address(),
            other in any::<String>(),
        )| {
            let param = UriParam::encode("address", &other);
            let s = format!("motaoin:{address}?{param}");
            prop_assert_eq!(
                MotaUri::parse(PARAMS, &s),
                Err(ParseError::DuplicateField("address".to_owned())),
            );
        });
    }

    #[test]
    fn test_parse_prop_unknown_required() {
        proptest!(|(
            address in any_mainnet_address(),
            name in "[a-z0-9]{1,8}",
            value in "[a-zA-Z0-9]{0,8}",
        )| {
            let key = format!("req-{name}");
            let s = format!("motaoin:{address}?{key}={value}");
            prop_assert_eq!(
                MotaUri::parse(PARAMS, &s),
                Err(ParseError::UnsupportedRequiredField(key)),
            );
        });
    }

    // Garbage in shouldn't panic
    #[test]
    fn test_parse_prop_no_panic() {
        proptest!(|(s: String)| {
            let _ = MotaUri::parse(PARAMS, &s);
        });
        proptest!(|(s in "motaoin:[a-zA-Z0-9%&=?+./:_-]{0,40}")| {
            let _ = MotaUri::parse(PARAMS, &s);
        });
    }
}
