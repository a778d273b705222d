use std::{borrow::Cow, str::FromStr};

use mota_common::{
    amount::{self, Amount, COIN_DECIMALS},
    network::NetworkParams,
};
use rust_decimal::Decimal;

use crate::ParseError;

/// A `u64` motoshi count has at most 20 digits, so any integer part longer
/// than this can't possibly be in range.
const MAX_INT_DIGITS: usize = 20;

/// Parse a raw (not percent-decoded) amount in coins, e.g. "12.34" =>
/// 12_340_000 motoshis.
///
/// The grammar is `[+-]?[0-9]*\.?[0-9]*` with at least one digit. Trailing
/// fractional zeros don't count towards precision, so "0.01000000" is one
/// cent. Negative amounts and amounts above `params.max_money` are out of
/// range.
pub(crate) fn parse_amount(
    params: &NetworkParams,
    raw: &str,
) -> Result<Amount, ParseError> {
    let format_err = |reason: &'static str| ParseError::AmountFormat {
        text: raw.to_owned(),
        reason,
    };
    let range_err = |source: amount::Error| ParseError::AmountRange {
        text: raw.to_owned(),
        source,
    };

    let (is_negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (int_part, frac_part) =
        unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !is_digits(int_part)
        || !is_digits(frac_part)
    {
        return Err(format_err("not a decimal number"));
    }

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.len() > COIN_DECIMALS as usize {
        return Err(format_err("too precise"));
    }

    let int_part = int_part.trim_start_matches('0');
    if int_part.len() > MAX_INT_DIGITS {
        return Err(range_err(amount::Error::TooLarge));
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    let coins = Decimal::from_str(&format!("{int_part}.{frac_part}"))
        .map_err(|_| format_err("not a decimal number"))?;

    // "-0" and "-0.000" are just zero
    if is_negative && !coins.is_zero() {
        return Err(range_err(amount::Error::Negative));
    }

    let amount = Amount::try_from_coins(coins).map_err(|err| match err {
        amount::Error::TooPrecise => format_err("too precise"),
        amount::Error::Negative | amount::Error::TooLarge => range_err(err),
    })?;

    if amount > params.max_money {
        return Err(range_err(amount::Error::TooLarge));
    }

    Ok(amount)
}

/// Decode a percent-encoded query key or value. As in HTML form decoding, a
/// literal `+` means a space; an encoded `%2B` is a real plus.
pub(crate) fn decode_component(
    raw: &str,
) -> Result<Cow<'_, str>, ParseError> {
    let not_utf8 =
        || ParseError::syntax(format!("'{raw}' is not valid UTF-8"));

    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        let decoded = percent_encoding::percent_decode_str(&spaced)
            .decode_utf8()
            .map_err(|_| not_utf8())?;
        Ok(Cow::Owned(decoded.into_owned()))
    } else {
        percent_encoding::percent_decode_str(raw)
            .decode_utf8()
            .map_err(|_| not_utf8())
    }
}

/// The index of a payment request URL key: "r" => 0, "r1" => 1, "r2" => 2, ...
///
/// Returns `None` for anything else, including "r0" and "r01".
pub(crate) fn payment_request_index(key: &str) -> Option<u32> {
    let suffix = key.strip_prefix('r')?;
    if suffix.is_empty() {
        return Some(0);
    }
    let is_digits = suffix.bytes().all(|b| b.is_ascii_digit());
    if !is_digits || suffix.starts_with('0') {
        return None;
    }
    u32::from_str(suffix).ok()
}

/// The key a payment request URL is stored under, the inverse of
/// [`payment_request_index`].
pub(crate) fn payment_request_key(idx: u32) -> Cow<'static, str> {
    match idx {
        0 => Cow::Borrowed("r"),
        _ => Cow::Owned(format!("r{idx}")),
    }
}
