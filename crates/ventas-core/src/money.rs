//! # Money Module
//!
//! Provides the `Money` type for handling peso amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing line totals as floats drifts:                                  │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer centavos                                         │
//! │    $1.000,00 × 3 = 300000 centavos, IVA 19% = 57000 centavos           │
//! │    Every sum is exact; the only rounding happens once, in IVA          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The backend stores amounts as decimals. On the wire a `Money` is a
//! decimal string (`"3570.00"`); decoding also accepts JSON numbers.
//!
//! ## Usage
//! ```rust
//! use ventas_core::money::Money;
//!
//! let price = Money::from_pesos(1000);
//! let subtotal = price * 3;
//! assert_eq!(subtotal.cents(), 300_000);
//! assert_eq!(subtotal.to_string(), "$3.000");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Number of minor units in one peso.
const CENTS_PER_PESO: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a peso).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► LineItem.unit_price ──► LineItem.subtotal ──┐
///                                           LineItem.tax ────────┼──► Sale.total
///                                                                 │
///                              SaleRecord.total ◄── POST /ventas/ ┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// let price = Money::from_cents(123_450); // $1.234,50
    /// assert_eq!(price.cents(), 123_450);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * CENTS_PER_PESO)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion (truncated toward zero).
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / CENTS_PER_PESO
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_PESO).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates IVA for this amount, returning `None` if it does not fit.
    ///
    /// Rounds half away from zero to the nearest centavo. This is the only
    /// place in the sale math where rounding happens. Rates above 100% can
    /// push the result past `i64`, so the conversion is checked.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    /// use ventas_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_pesos(3000);
    /// let iva = subtotal.checked_tax(TaxRate::from_bps(1900)); // 19%
    /// assert_eq!(iva, Some(Money::from_pesos(570)));
    ///
    /// // $0,05 at 19% = 0.95 centavos -> 1 centavo
    /// assert_eq!(Money::from_cents(5).checked_tax(TaxRate::from_bps(1900)).map(|m| m.cents()), Some(1));
    ///
    /// // 250% of a huge amount
    /// assert_eq!(Money::from_cents(i64::MAX / 2).checked_tax(TaxRate::from_bps(25_000)), None);
    /// ```
    pub fn checked_tax(&self, rate: TaxRate) -> Option<Money> {
        // i128 so large subtotals times bps cannot overflow
        let product = self.0 as i128 * rate.bps() as i128;
        let half = if product < 0 { -5_000 } else { 5_000 };
        i64::try_from((product + half) / 10_000).ok().map(Money)
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// let unit = Money::from_pesos(500);
    /// assert_eq!(unit.checked_mul_quantity(2), Some(Money::from_pesos(1000)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Divides by a quantity, truncating toward zero.
    ///
    /// Used to show a unit price for stored detail lines, where only the
    /// line value is authoritative. Returns zero for a zero quantity.
    pub fn per_unit(&self, qty: i64) -> Money {
        if qty == 0 {
            return Money::zero();
        }
        Money(self.0 / qty)
    }

    /// Parses a decimal amount in pesos (`"1000"`, `"1000.5"`, `"-3.25"`).
    ///
    /// Digits beyond the second decimal are rounded half-up.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("1000.00").unwrap().cents(), 100_000);
    /// assert_eq!(Money::parse_decimal("0.125").unwrap().cents(), 13);
    /// assert!(Money::parse_decimal("12,50").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        parse_scaled(input, 2)
            .map(Money)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: format!("'{}' is not a decimal amount", input.trim()),
            })
    }

    /// Formats as the backend's decimal representation (`"3570.00"`).
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            self.pesos().abs(),
            self.cents_part()
        )
    }
}

/// Parses a signed decimal string into an integer scaled by `10^scale`.
///
/// Rounds half-up on the first digit past `scale`. Returns `None` for
/// anything that is not `[-+]digits[.digits]` or that overflows `i64`.
pub(crate) fn parse_scaled(input: &str, scale: u32) -> Option<i64> {
    let s = input.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (whole, fraction) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let factor = 10_i64.checked_pow(scale)?;
    let mut value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?
    };
    value = value.checked_mul(factor)?;

    let mut digits = fraction.bytes().map(|b| (b - b'0') as i64);
    let mut fractional = 0_i64;
    for _ in 0..scale {
        fractional = fractional * 10 + digits.next().unwrap_or(0);
    }
    if digits.next().is_some_and(|d| d >= 5) {
        fractional += 1;
    }
    value = value.checked_add(fractional)?;

    Some(if negative { -value } else { value })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// es-CO display: `.` groups thousands, `,` separates centavos, and
/// centavos are omitted when zero (`$3.570`, `$1.234,50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.pesos().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if self.cents_part() == 0 {
            write!(f, "{}${}", sign, grouped)
        } else {
            write!(f, "{}${},{:02}", sign, grouped, self.cents_part())
        }
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse_decimal(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(CENTS_PER_PESO)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("amount out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    // JSON numbers with a fraction arrive as f64; go through the shortest
    // decimal representation instead of multiplying the float.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        self.visit_str(&v.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
