//! Fixed-point decimal type
//!
//! `Decimal` is the numeric type compiled contracts use for fractional
//! arithmetic. It is stored as a scaled integer: the logical value times
//! `10^DECIMAL_PLACES`. The integral domain is exactly the signed 128-bit
//! range, so widening an `int128` into a decimal can never fail.

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};
use once_cell::sync::Lazy;

/// Number of fractional decimal digits a `Decimal` carries.
pub const DECIMAL_PLACES: u32 = 10;

/// Scale factor applied to the raw representation (`10^DECIMAL_PLACES`).
pub const PRECISION_FACTOR: i128 = 10_000_000_000;

/// Smallest integral value a decimal may hold.
pub const DECIMAL_INTEGRAL_MIN: i128 = i128::MIN;

/// Largest integral value a decimal may hold.
pub const DECIMAL_INTEGRAL_MAX: i128 = i128::MAX;

static SCALE: Lazy<BigInt> = Lazy::new(|| BigInt::from(PRECISION_FACTOR));
static SCALE_MAG: Lazy<BigUint> = Lazy::new(|| BigUint::from(PRECISION_FACTOR as u128));

/// Big-integer image of [`DECIMAL_INTEGRAL_MIN`], for bound comparisons.
pub static INTEGRAL_MIN_BIG: Lazy<BigInt> = Lazy::new(|| BigInt::from(DECIMAL_INTEGRAL_MIN));

/// Big-integer image of [`DECIMAL_INTEGRAL_MAX`], for bound comparisons.
pub static INTEGRAL_MAX_BIG: Lazy<BigInt> = Lazy::new(|| BigInt::from(DECIMAL_INTEGRAL_MAX));

/// Fixed-point decimal value.
///
/// The raw representation is the logical value scaled by
/// [`PRECISION_FACTOR`]. Conversions from integral source types always
/// produce a zero fractional component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal {
    raw: BigInt,
}

impl Decimal {
    /// Encode a validated integral value as a decimal.
    ///
    /// Infallible: the caller has already established that `v` lies in
    /// `[DECIMAL_INTEGRAL_MIN, DECIMAL_INTEGRAL_MAX]`, and every value of
    /// that range is exactly representable with a zero fractional part.
    pub fn from_integral(v: i128) -> Self {
        Decimal {
            raw: BigInt::from(v) * &*SCALE,
        }
    }

    /// Build a decimal from an already-scaled raw representation.
    pub fn from_raw(raw: BigInt) -> Self {
        Decimal { raw }
    }

    /// The scaled raw representation.
    pub fn raw(&self) -> &BigInt {
        &self.raw
    }

    /// Recover the integral value, if the fractional component is zero and
    /// the quotient fits the integral domain.
    pub fn to_integral(&self) -> Option<i128> {
        if (&self.raw % &*SCALE).is_zero() {
            (&self.raw / &*SCALE).to_i128()
        } else {
            None
        }
    }

    /// Whether this decimal is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mag = self.raw.magnitude();
        let int_part = mag / &*SCALE_MAG;
        let frac_part = mag % &*SCALE_MAG;

        let frac_digits = frac_part.to_string();
        let mut frac = String::with_capacity(DECIMAL_PLACES as usize);
        for _ in 0..(DECIMAL_PLACES as usize - frac_digits.len()) {
            frac.push('0');
        }
        frac.push_str(&frac_digits);
        // Trim trailing zeros but keep at least one fractional digit.
        let trimmed = frac.trim_end_matches('0');
        let frac = if trimmed.is_empty() { "0" } else { trimmed };

        let sign = if self.raw.sign() == Sign::Minus { "-" } else { "" };
        write!(f, "{}{}.{}", sign, int_part, frac)
    }
}
