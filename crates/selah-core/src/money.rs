//! # Money Module
//!
//! Provides the `Money` and `DiscountRate` types for handling monetary
//! values and discount percentages safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A receipt total that is off by a cent is a legal problem, not a        │
//! │  rounding curiosity.                                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "15.50" parses to 1550 cents; 2 × 1550 = 3100 cents, exactly.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Parsing Policy
//! The register accepts money and percentages as free text. Two entry points:
//! - [`Money::parse`] / [`DiscountRate::parse_percent`] return `Option` for
//!   callers that need to distinguish garbage input.
//! - [`Money::parse_or_zero`] absorbs garbage to `0.00`; the permissive
//!   default used for quantities, manual prices, and tendered amounts, where
//!   a malformed field must never take the register down.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: change can be negative before it becomes a shortfall
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for receipt snapshots
///
/// Every monetary value in the system flows through this type: catalog
/// prices, line subtotals, discounts, totals, tendered amounts, and change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use selah_core::money::Money;
    ///
    /// let price = Money::from_cents(1550); // $15.50
    /// assert_eq!(price.cents(), 1550);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (pesos/dollars).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion in cents (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use selah_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1550); // $15.50
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 3100);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Parses a decimal string ("15.50", "3", "-0.25") into Money.
    ///
    /// ## Rules
    /// - Optional leading sign
    /// - Cents are taken from the first two fraction digits; a third digit
    ///   of 5 or more rounds the cent up (integer math, no floats)
    /// - Anything else (empty, letters, thousands separators) → `None`
    ///
    /// ## Example
    /// ```rust
    /// use selah_core::money::Money;
    ///
    /// assert_eq!(Money::parse("15.50"), Some(Money::from_cents(1550)));
    /// assert_eq!(Money::parse("7"), Some(Money::from_cents(700)));
    /// assert_eq!(Money::parse("1.005"), Some(Money::from_cents(101)));
    /// assert_eq!(Money::parse("abc"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Money> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }

        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };

        let mut digits = frac.chars().map(|c| (c as u8 - b'0') as i64);
        let d1 = digits.next().unwrap_or(0);
        let d2 = digits.next().unwrap_or(0);
        let mut cents = whole.checked_mul(100)?.checked_add(d1 * 10 + d2)?;
        if digits.next().unwrap_or(0) >= 5 {
            cents += 1;
        }

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Parses a decimal string, absorbing malformed input to zero.
    ///
    /// This is the permissive entry point the register uses for manual
    /// prices and tendered amounts: bad input degrades, it never errors.
    #[inline]
    pub fn parse_or_zero(input: &str) -> Money {
        Money::parse(input).unwrap_or_default()
    }

    /// Plain decimal rendering without a currency symbol ("15.50").
    ///
    /// Round-trips through [`Money::parse`]; used where money is stored or
    /// exchanged as text.
    pub fn decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount percentage in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 3000 bps = 30%. Basis points keep
/// fractional percentages ("12.5") in exact integer arithmetic, the same way
/// cents do for money.
///
/// ## Business Ceiling
/// Store policy caps discounts at 30% ([`crate::MAX_DISCOUNT_BPS`]). The
/// ceiling is enforced by [`DiscountRate::clamp_to_ceiling`]; callers are
/// expected to overwrite their stored value with the clamped rate so that
/// every recomputation downstream sees the corrected figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parses a percentage string into a discount rate.
    ///
    /// ## Rules
    /// - A trailing `%` is stripped ("25%" and "25" are equivalent)
    /// - Fractional percentages are exact: "12.5" → 1250 bps
    /// - Malformed or negative input absorbs to zero; a bad discount field
    ///   must never block the sale form
    ///
    /// ## Example
    /// ```rust
    /// use selah_core::money::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::parse_percent("10").bps(), 1000);
    /// assert_eq!(DiscountRate::parse_percent("12.5%").bps(), 1250);
    /// assert_eq!(DiscountRate::parse_percent("garbage").bps(), 0);
    /// assert_eq!(DiscountRate::parse_percent("-5").bps(), 0);
    /// ```
    pub fn parse_percent(raw: &str) -> DiscountRate {
        let cleaned = raw.trim().trim_end_matches('%');
        match Money::parse(cleaned) {
            // Percent-with-two-decimals and cents share a scale: "12.5" parsed
            // as money is 1250 "cents", which is exactly 1250 bps.
            Some(m) if !m.is_negative() => {
                DiscountRate(u32::try_from(m.cents()).unwrap_or(u32::MAX))
            }
            _ => DiscountRate::zero(),
        }
    }

    /// Enforces the business ceiling.
    ///
    /// Returns the effective rate and whether clamping occurred. A rate over
    /// [`crate::MAX_DISCOUNT_BPS`] is replaced by the ceiling itself; the
    /// raw value is rejected, not scaled.
    pub fn clamp_to_ceiling(self) -> (DiscountRate, bool) {
        if self.0 > crate::MAX_DISCOUNT_BPS {
            (DiscountRate(crate::MAX_DISCOUNT_BPS), true)
        } else {
            (self, false)
        }
    }

    /// Calculates the discount amount on a subtotal.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount × bps + 5000) / 10000`.
    /// i128 intermediate prevents overflow on large subtotals.
    ///
    /// ## Example
    /// ```rust
    /// use selah_core::money::{DiscountRate, Money};
    ///
    /// let subtotal = Money::from_cents(3600); // $36.00
    /// let rate = DiscountRate::from_bps(1000); // 10%
    /// assert_eq!(rate.discount_amount(subtotal).cents(), 360); // $3.60
    /// ```
    pub fn discount_amount(&self, subtotal: Money) -> Money {
        let amount = (subtotal.cents() as i128 * self.0 as i128 + 5000) / 10000;
        Money::from_cents(amount as i64)
    }

    /// Applies the discount and returns the discounted total.
    ///
    /// `total = subtotal - discount_amount(subtotal)`, so the receipt's
    /// discount line and its total always reconcile to the cent.
    pub fn apply_to(&self, subtotal: Money) -> Money {
        subtotal - self.discount_amount(subtotal)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Displays the rate as a percentage with two decimals ("10.00%").
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1550);
        assert_eq!(money.cents(), 1550);
        assert_eq!(money.units(), 15);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1550)), "$15.50");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-1250)), "-$12.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(a.multiply_quantity(2).cents(), 2000);
    }

    #[test]
    fn test_parse_plain_and_fractional() {
        assert_eq!(Money::parse("15.50"), Some(Money::from_cents(1550)));
        assert_eq!(Money::parse("7"), Some(Money::from_cents(700)));
        assert_eq!(Money::parse("0.05"), Some(Money::from_cents(5)));
        assert_eq!(Money::parse(" 12.5 "), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse("12."), Some(Money::from_cents(1200)));
        assert_eq!(Money::parse(".50"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse("-5.25"), Some(Money::from_cents(-525)));
    }

    #[test]
    fn test_parse_rounds_third_fraction_digit() {
        assert_eq!(Money::parse("1.005"), Some(Money::from_cents(101)));
        assert_eq!(Money::parse("1.004"), Some(Money::from_cents(100)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("   "), None);
        assert_eq!(Money::parse("."), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("1,500"), None);
        assert_eq!(Money::parse("12.3.4"), None);
    }

    #[test]
    fn test_parse_or_zero_absorbs_garbage() {
        assert_eq!(Money::parse_or_zero("not a price"), Money::zero());
        assert_eq!(Money::parse_or_zero(""), Money::zero());
        assert_eq!(Money::parse_or_zero("5.00"), Money::from_cents(500));
    }

    #[test]
    fn test_decimal_string_round_trips() {
        for cents in [0, 5, 99, 100, 1550, -525] {
            let money = Money::from_cents(cents);
            assert_eq!(Money::parse(&money.decimal_string()), Some(money));
        }
        assert_eq!(Money::from_cents(1550).decimal_string(), "15.50");
    }

    #[test]
    fn test_discount_parse_percent() {
        assert_eq!(DiscountRate::parse_percent("10").bps(), 1000);
        assert_eq!(DiscountRate::parse_percent("10%").bps(), 1000);
        assert_eq!(DiscountRate::parse_percent(" 12.5% ").bps(), 1250);
        assert_eq!(DiscountRate::parse_percent("").bps(), 0);
        assert_eq!(DiscountRate::parse_percent("treinta").bps(), 0);
        assert_eq!(DiscountRate::parse_percent("-5").bps(), 0);
    }

    #[test]
    fn test_discount_ceiling() {
        let (rate, clamped) = DiscountRate::parse_percent("45").clamp_to_ceiling();
        assert_eq!(rate.bps(), crate::MAX_DISCOUNT_BPS);
        assert!(clamped);

        let (rate, clamped) = DiscountRate::parse_percent("30").clamp_to_ceiling();
        assert_eq!(rate.bps(), 3000);
        assert!(!clamped);
    }

    #[test]
    fn test_discount_application_is_exact() {
        // $100.00 at 10% → $90.00, not $89.999999
        let subtotal = Money::from_cents(10000);
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(rate.discount_amount(subtotal).cents(), 1000);
        assert_eq!(rate.apply_to(subtotal).cents(), 9000);
    }

    #[test]
    fn test_discount_display() {
        assert_eq!(format!("{}", DiscountRate::from_bps(1000)), "10.00%");
        assert_eq!(format!("{}", DiscountRate::from_bps(1250)), "12.50%");
        assert_eq!(format!("{}", DiscountRate::from_bps(5)), "0.05%");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
