use crate::DuesError;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use std::{fmt, str::FromStr};

/// Fractional digits every amount is held to.
pub const SCALE: u32 = 4;

/// Largest amount in units of `10^-SCALE`, i.e. `99_999_999_999_999.9999`.
const MAX_UNITS: i64 = 999_999_999_999_999_999;

/// A validated, non-negative monetary amount with at most [`SCALE`]
/// fractional digits.
///
/// Only [`Money::split`] rounds: shares are rounded half to even at the
/// `10^-SCALE` unit. Addition, subtraction and comparison are exact.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn max() -> Self {
        Self(Decimal::new(MAX_UNITS, SCALE))
    }

    /// Parses plain decimal text such as `"12.50"`.
    ///
    /// Only digits with an optional fractional part of up to [`SCALE`] digits
    /// are accepted. Signs, exponents, `NaN`, infinities and out of range values
    /// are rejected with [`DuesError::InvalidAmount`].
    pub fn parse(input: &str) -> Result<Self, DuesError> {
        let invalid = || DuesError::InvalidAmount(input.to_string());
        let text = input.trim();
        let (whole, fraction) = text.split_once('.').unwrap_or((text, "0"));
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(whole) || !digits(fraction) || fraction.len() > SCALE as usize {
            return Err(invalid());
        }

        let amount = Decimal::from_str(text).map_err(|_| invalid())?;
        if amount > Self::max().0 {
            return Err(invalid());
        }
        Ok(Self(amount.normalize()))
    }

    /// Checks that `amount` is a valid share: non-negative, in range and
    /// without digits past [`SCALE`].
    pub fn from_decimal(amount: Decimal) -> Result<Self, DuesError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DuesError::NegativeShare(amount));
        }
        let amount = amount.normalize();
        if amount.scale() > SCALE {
            return Err(DuesError::InvalidAmount(amount.to_string()));
        }
        if amount > Self::max().0 {
            return Err(DuesError::Overflow);
        }
        Ok(Self(amount.abs()))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// The amount in units of `10^-SCALE`.
    fn units(self) -> u64 {
        // scale <= SCALE and amount <= max, so this is exact and fits
        (self.0 * Decimal::new(10_i64.pow(SCALE), 0))
            .to_u64()
            .unwrap_or_default()
    }

    /// One of `parts` equal shares, `None` when `parts` is zero.
    pub fn split(self, parts: u32) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        let units = self.units();
        let parts = u64::from(parts);
        let mut quotient = units / parts;
        let remainder = (units % parts) * 2;
        if remainder > parts || (remainder == parts && quotient % 2 == 1) {
            quotient += 1;
        }
        let quotient = i64::try_from(quotient).ok()?;
        Some(Self(Decimal::new(quotient, SCALE).normalize()))
    }

    fn bounded(amount: Option<Decimal>) -> Option<Self> {
        amount
            .filter(|amount| *amount <= Self::max().0)
            .map(|amount| Self(amount.normalize()))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Self::bounded(self.0.checked_add(rhs.0))
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        if rhs > self {
            return None;
        }
        Self::bounded(self.0.checked_sub(rhs.0))
    }

    pub fn checked_mul(self, count: u32) -> Option<Self> {
        Self::bounded(self.0.checked_mul(Decimal::from(count)))
    }
}

impl FromStr for Money {
    type Err = DuesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DuesError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(amount)
    }
}

/// Honours the format precision, rounding half to even.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => {
                let rounded = self
                    .0
                    .round_dp_with_strategy(precision as u32, RoundingStrategy::MidpointNearestEven);
                write!(f, "{:.*}", precision, rounded)
            }
            None => fmt::Display::fmt(&self.0, f),
        }
    }
}
