//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A credit balance that drifts by a paisa per grant is a ledger bug.    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise for INR)                      │
//! │    ₹599.00 = 59900 paise, ₹1299.00 = 129900 paise                       │
//! │    Sums of line totals are exact.                                       │
//! │                                                                         │
//! │  Floats appear only inside the forecast math, and are rounded back     │
//! │  into Money at the boundary (see `forecast::forecast_revenue`).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tripus_core::money::Money;
//!
//! let price = Money::from_major_minor(599, 0); // ₹599.00
//! let line = price.multiply_quantity(2);       // ₹1198.00
//! assert_eq!(line.cents(), 119_800);
//! assert_eq!(line.to_string(), "₹1198.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// The field is called "cents" throughout the codebase; for an INR store
/// one cent is one paisa.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price_cents ──► CartItem.unit_price ──► CartItem.line_total    │
/// │                                                                         │
/// │  Cart.total ──┬──► Transaction.total ──► CSV export                     │
/// │               └──► CreditTransaction.amount ──► Customer.credit_balance │
/// │                                                                         │
/// │  SalesRecord.unit_price ──► daily revenue ──► ForecastPoint             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tripus_core::money::Money;
    ///
    /// let price = Money::from_cents(8000); // ₹80.00
    /// assert_eq!(price.cents(), 8000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -₹5.50, not -₹4.50
    ///
    /// ## Example
    /// ```rust
    /// use tripus_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(1299, 0).cents(), 129_900);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupee) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tripus_core::money::Money;
    ///
    /// let unit_price = Money::from_major_minor(599, 0);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_major_minor(1198, 0));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the value in major units as a float (for display and charts).
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Formats without a symbol, dropping `.00` for whole amounts.
    ///
    /// ## Example
    /// ```rust
    /// use tripus_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(2497, 0).plain(), "2497");
    /// assert_eq!(Money::from_cents(1050).plain(), "10.50");
    /// ```
    pub fn plain(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.minor() == 0 {
            format!("{}{}", sign, self.major().abs())
        } else {
            format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
        }
    }

    /// Like [`Money::plain`] but with thousands separators ("12,345").
    pub fn grouped(&self) -> String {
        let digits = self.major().abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
        if self.0 < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        if self.minor() != 0 {
            out.push_str(&format!(".{:02}", self.minor()));
        }
        out
    }
}

/// Display as INR (e.g., "₹10.99").
///
/// For locale-aware formatting use the app's `ConfigState::format_currency`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

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

/// Multiplication by i64 (for quantity calculations).
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
// Unit Tests
// =============================================================================
