use std::{borrow::Cow, fmt};

use crate::{MAX_INPUT_LEN_KIB, ParseError};

/// A raw, tokenized URI. The body and params (both key and value) are kept in
/// their percent-encoded wire form; decoding is left to the interpreter. See
/// [URI syntax - RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986).
///
/// ex: `motaoin:PKf1...?label=Hello%20World&aardvark`
/// -> Uri {
///     scheme: "motaoin",
///     body: "PKf1...",
///     params: [("label", Some("Hello%20World")), ("aardvark", None)],
/// }
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Uri<'a> {
    pub scheme: &'a str,
    pub body: Cow<'a, str>,
    pub params: Vec<UriParam<'a>>,
}

impl<'a> Uri<'a> {
    /// These are the ASCII characters that we will percent-encode inside a URI
    /// query string key or value. We're somewhat conservative here and require
    /// all non-alphanumeric characters to be percent-encoded (with the
    /// exception of of a few control characters, designated in [RFC 3986]).
    ///
    /// Only used for encoding. We will decode all percent-encoded characters.
    ///
    /// [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.3
    pub(crate) const PERCENT_ENCODE_ASCII_SET: percent_encoding::AsciiSet =
        percent_encoding::NON_ALPHANUMERIC
            .remove(b'-')
            .remove(b'.')
            .remove(b'_')
            .remove(b'~');

    // syntax: `<scheme>:[//]<body>[?<key1>=<value1>&<key2>=<value2>&...]`
    pub fn parse(s: &'a str) -> Result<Self, ParseError> {
        if s.len() > MAX_INPUT_LEN_KIB * 1024 {
            return Err(ParseError::syntax(format!(
                "input is longer than {MAX_INPUT_LEN_KIB} KiB"
            )));
        }
        validate_chars(s)?;

        // parse scheme
        // ex: "motaoin:PKf1..." -> `scheme = "motaoin"`
        let (scheme, rest) = s
            .split_once(':')
            .ok_or_else(|| ParseError::syntax("missing ':' after scheme"))?;
        if scheme.is_empty() {
            return Err(ParseError::syntax("empty scheme"));
        }

        // Some wallets emit "motaoin://PKf1...". Tolerate it.
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        if rest.is_empty() {
            return Err(ParseError::syntax("nothing after scheme"));
        }

        // Only the first '?' separates the body from the query. Query values
        // (e.g. payment request URLs) may contain more of them.
        // ex: "motaoin:PKf1...?message=hello" -> `body = "PKf1..."`
        let (body, query) = match rest.split_once('?') {
            Some((body, query)) => (body, Some(query)),
            None => (rest, None),
        };

        // ex: "motaoin:PKf1...?message=hello%20world&amount=0.1"
        //     -> `params = [("message", "hello%20world"), ("amount", "0.1")]`
        let params = match query {
            None => Vec::new(),
            Some("") => return Err(ParseError::syntax("empty query after '?'")),
            Some(query) => query.split('&').map(UriParam::parse).collect(),
        };

        Ok(Self {
            scheme,
            body: Cow::Borrowed(body),
            params,
        })
    }
}

// "{scheme}:{body}?{key1}={value1}&{key2}={value2}&..."
impl fmt::Display for Uri<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self.scheme;
        let body = &self.body;

        write!(f, "{scheme}:{body}")?;

        let mut sep: char = '?';
        for param in &self.params {
            write!(f, "{sep}{param}")?;
            sep = '&';
        }
        Ok(())
    }
}

/// A single `<key>=<value>` URI parameter, still percent-encoded.
///
/// `value` is `None` if the raw pair had no `=` at all, e.g. `?aardvark`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UriParam<'a> {
    pub key: Cow<'a, str>,
    pub value: Option<Cow<'a, str>>,
}

impl<'a> UriParam<'a> {
    /// Split a raw pair on its first `=`, so `label=aardvark=zebra` has the
    /// value `aardvark=zebra`.
    pub fn parse(s: &'a str) -> Self {
        match s.split_once('=') {
            Some((key, value)) => Self {
                key: Cow::Borrowed(key),
                value: Some(Cow::Borrowed(value)),
            },
            None => Self {
                key: Cow::Borrowed(s),
                value: None,
            },
        }
    }

    /// Percent-encode a decoded key and value into a new param.
    pub fn encode(key: &str, value: &str) -> UriParam<'static> {
        let encode = |s: &str| {
            percent_encoding::utf8_percent_encode(
                s,
                &Uri::PERCENT_ENCODE_ASCII_SET,
            )
            .to_string()
        };
        UriParam {
            key: Cow::Owned(encode(key)),
            value: Some(Cow::Owned(encode(value))),
        }
    }
}

// "{key}={value}" or just "{key}"
impl fmt::Display for UriParam<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = &self.key;
        match &self.value {
            Some(value) => write!(f, "{key}={value}"),
            None => write!(f, "{key}"),
        }
    }
}

/// Whether `b` may appear anywhere in a raw URI: unreserved characters,
/// sub-delimiters, and `: @ / ? %` ([RFC 3986]).
///
/// [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#section-2
fn is_uri_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'@'
                | b'/'
                | b'?'
                | b'%'
        )
}

/// Reject characters outside the URI character set and malformed `%XX`
/// escapes.
fn validate_chars(s: &str) -> Result<(), ParseError> {
    let bytes = s.as_bytes();
    for (idx, &b) in bytes.iter().enumerate() {
        if !is_uri_char(b) {
            // Non-ASCII bytes don't print nicely on their own
            return Err(if b.is_ascii() {
                ParseError::syntax(format!(
                    "illegal character '{}' at index {idx}",
                    b.escape_ascii()
                ))
            } else {
                ParseError::syntax(format!(
                    "non-ASCII character at index {idx}"
                ))
            });
        }

        if b == b'%' {
            let is_escape = bytes
                .get(idx + 1..idx + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !is_escape {
                return Err(ParseError::syntax(format!(
                    "bad percent escape at index {idx}"
                )));
            }
        }
    }
    Ok(())
}
