//! A MotaCoin amount newtype which maintains some useful internal invariants
//! and provides conversions to and from whole-coin [`Decimal`] values.
//!
//! Internally an [`Amount`] is a [`u64`] count of motoshis, the smallest unit.
//! One MOTA is [`UNITS_PER_COIN`] motoshis, i.e. amounts have six decimal
//! places when expressed in coins.
//!
//! Note that we don't impl `TryFrom<Decimal>` or [`FromStr`] because we want
//! calling code to be explicit about what the input unit is.
//!
//! ### Parsing [`Amount`]s
//!
//! If an [`Amount`] needs to be parsed from a user-provided [`String`], use
//! `Decimal::from_str`, then call the appropriate [`Amount`] constructor.
//!
//! ```
//! # use mota_common::amount::Amount;
//! # use rust_decimal::Decimal;
//! # use std::str::FromStr;
//!
//! let coins_str = "12.34";
//! let coins_dec = Decimal::from_str(coins_str).expect("Not a number");
//! let amount = Amount::try_from_coins(coins_dec).expect("Invalid amount");
//! assert_eq!(amount.units(), 12_340_000);
//! ```
//!
//! ### [`Display`]ing [`Amount`]s
//!
//! [`Amount`]'s [`Display`] impl displays the motoshi value. If the value in
//! coins is desired, call [`Amount::coins`] and use the [`Decimal`]'s
//! [`Display`] impl instead.
//!
//! [`Display`]: std::fmt::Display
//! [`FromStr`]: std::str::FromStr

use std::fmt::{self, Display};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The number of motoshis in one MOTA.
pub const UNITS_PER_COIN: u64 = 1_000_000;

/// The number of decimal places an amount in coins may carry.
pub const COIN_DECIMALS: u32 = 6;

/// Errors that can occur when attempting to construct an [`Amount`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Amount is negative")]
    Negative,
    #[error("Amount is too large")]
    TooLarge,
    #[error("Amount has more than {COIN_DECIMALS} decimal places")]
    TooPrecise,
}

/// A MotaCoin amount, internally represented as a motoshi [`u64`], which
/// provides the following properties:
///
/// - The contained value is non-negative.
/// - Converting to coins and back never loses precision.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[derive(Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    /// An [`Amount`] of zero coins.
    pub const ZERO: Self = Self(0);

    /// The maximum supply of MotaCoin that can ever exist, two billion coins.
    /// Networks use this as their "max money" sanity check.
    pub const MAX_MOTACOIN_SUPPLY: Self = Self(2_000_000_000 * UNITS_PER_COIN);

    // --- Constructors --- //

    /// Construct an [`Amount`] from a motoshi [`u64`] value.
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Construct an [`Amount`] from a whole-coin [`Decimal`] value, e.g.
    /// `dec!(12.34)` => 12_340_000 motoshis.
    ///
    /// Trailing zeros don't count towards precision, so `dec!(0.01000000)`
    /// is fine, while `dec!(0.0000001)` is [`Error::TooPrecise`].
    pub fn try_from_coins(coins: Decimal) -> Result<Self, Error> {
        if coins.is_sign_negative() && !coins.is_zero() {
            return Err(Error::Negative);
        }
        let units = coins
            .checked_mul(Decimal::from(UNITS_PER_COIN))
            .ok_or(Error::TooLarge)?;
        Self::try_from_inner(units)
    }

    // --- Getters --- //

    /// Returns the [`Amount`] as a [`u64`] motoshi value.
    #[inline]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Returns the [`Amount`] as a whole-coin [`Decimal`] value without any
    /// trailing zeros, e.g. "12.34", "0.1", or "1000".
    #[inline]
    pub fn coins(&self) -> Decimal {
        (Decimal::from(self.0) / dec!(1_000_000)).normalize()
    }

    /// Checks all internal invariants for a motoshi [`Decimal`], returning
    /// [`Self`] if all were OK.
    fn try_from_inner(units: Decimal) -> Result<Self, Error> {
        if units.is_sign_negative() && !units.is_zero() {
            Err(Error::Negative)
        } else if !units.fract().is_zero() {
            Err(Error::TooPrecise)
        } else {
            units.to_u64().map(Self).ok_or(Error::TooLarge)
        }
    }
}

impl Display for Amount {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

// --- Tests and test infra --- //

#[cfg(any(test, feature = "test-utils"))]
mod arbitrary_impl {
    use proptest::{
        arbitrary::{Arbitrary, any},
        strategy::{BoxedStrategy, Strategy},
    };

    use super::*;

    impl Arbitrary for Amount {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;
        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            any::<u64>().prop_map(Amount::from_units).boxed()
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod arb {
    use proptest::strategy::Strategy;

    use super::*;

    /// An [`Amount`] no greater than [`Amount::MAX_MOTACOIN_SUPPLY`], i.e. any
    /// amount a network will actually accept.
    pub fn money_amount() -> impl Strategy<Value = Amount> {
        (0..=Amount::MAX_MOTACOIN_SUPPLY.units()).prop_map(Amount::from_units)
    }
}
