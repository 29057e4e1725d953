//! # Money Arithmetic
//!
//! The pure numeric functions behind every invoice: line totals, subtotal,
//! tax, discount and grand total.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Invoices also need fractional quantities (2.5 hours × $80.00),        │
//! │  which rules out plain integer cents.                                  │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    Exact base-10 arithmetic, no rounding until display                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Layering
//! No currency rounding is applied here. Rounding to two fraction digits is
//! a presentation concern and happens only in [`format_currency`], which the
//! rendering layer uses.
//!
//! No validation is applied here either. Negative quantities, prices, tax
//! percentages or discounts are not rejected; callers constrain inputs via
//! the [`crate::validation`] module. The arithmetic stays mathematically
//! consistent regardless, including the zero floor on the grand total.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::LineItem;

// =============================================================================
// Line Total
// =============================================================================

/// Computes a line total: `quantity * unit_price`.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use invoice_core::money::line_total;
///
/// let total = line_total(Decimal::from(5), Decimal::from(100));
/// assert_eq!(total, Decimal::from(500));
///
/// // Fractional quantities stay exact
/// let total = line_total(Decimal::new(25, 1), Decimal::from(80)); // 2.5 × 80
/// assert_eq!(total, Decimal::from(200));
/// ```
#[inline]
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    quantity * unit_price
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// The computed totals of an invoice.
///
/// The discount is echoed back so a single value can be handed to the
/// rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of all line totals.
    #[ts(as = "String")]
    pub subtotal: Decimal,

    /// Tax on the subtotal (NOT on the discounted amount).
    #[ts(as = "String")]
    pub tax_amount: Decimal,

    /// Flat discount subtracted from the subtotal.
    #[ts(as = "String")]
    pub discount_amount: Decimal,

    /// `max(0, subtotal - discount + tax)`.
    #[ts(as = "String")]
    pub total: Decimal,
}

/// Computes the totals for a sequence of line items.
///
/// ## Rules
/// - `subtotal` sums every line total exactly once (order never matters)
/// - `tax_amount = subtotal * tax_percentage / 100`; tax is computed on the
///   subtotal only, the discount does not change the tax base
/// - `total = max(0, subtotal - discount_amount + tax_amount)` — the grand
///   total is floored at zero and can never go negative, even when the
///   discount exceeds subtotal plus tax
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use invoice_core::money::invoice_totals;
/// use invoice_core::types::LineItem;
///
/// let items = vec![LineItem::new("Consulting", Decimal::from(5), Decimal::from(100))];
/// let totals = invoice_totals(&items, Decimal::from(10), Decimal::from(50));
///
/// assert_eq!(totals.subtotal, Decimal::from(500));
/// assert_eq!(totals.tax_amount, Decimal::from(50));
/// assert_eq!(totals.total, Decimal::from(500)); // 500 - 50 + 50
/// ```
pub fn invoice_totals(
    line_items: &[LineItem],
    tax_percentage: Decimal,
    discount_amount: Decimal,
) -> InvoiceTotals {
    let subtotal: Decimal = line_items.iter().map(|item| item.total).sum();
    let tax_amount = subtotal * tax_percentage / Decimal::ONE_HUNDRED;
    let total = (subtotal - discount_amount + tax_amount).max(Decimal::ZERO);

    InvoiceTotals {
        subtotal,
        tax_amount,
        discount_amount,
        total,
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount for display: `"$1,234.50"`, `"€99.00"`, `"SEK 12.00"`.
///
/// This is the ONLY place currency rounding happens (two fraction digits,
/// banker's rounding). All arithmetic upstream is exact.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use invoice_core::money::format_currency;
///
/// assert_eq!(format_currency(Decimal::new(123450, 2), "USD"), "$1,234.50");
/// assert_eq!(format_currency(Decimal::from(99), "EUR"), "€99.00");
/// assert_eq!(format_currency(Decimal::from(12), "SEK"), "SEK 12.00");
/// ```
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    // Integral after round_dp(2), so the conversion is lossless.
    let cents_total = (rounded.abs() * Decimal::ONE_HUNDRED)
        .to_i128()
        .unwrap_or(0);
    let units = group_thousands(cents_total / 100);
    let cents = cents_total % 100;
    let sign = if negative { "-" } else { "" };

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{units}.{cents:02}"),
        None => format!("{sign}{} {units}.{cents:02}", currency.to_ascii_uppercase()),
    }
}

/// Symbols for the currencies the currency picker offers.
/// Anything else falls back to the ISO code as a prefix.
fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Inserts comma separators into a non-negative integer: 1234567 → "1,234,567".
fn group_thousands(n: i128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, unit_price: Decimal) -> LineItem {
        LineItem::new("Test item", quantity, unit_price)
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(dec!(5), dec!(100)), dec!(500));
        assert_eq!(line_total(dec!(2.5), dec!(80)), dec!(200));
        assert_eq!(line_total(dec!(0), dec!(99.99)), dec!(0));
        // No validation at this layer: negative inputs still multiply
        assert_eq!(line_total(dec!(-1), dec!(10)), dec!(-10));
    }

    #[test]
    fn test_consulting_scenario() {
        // [5 × 100] at tax 10%, discount 50 → 500 / 50 / 500
        let items = vec![item(dec!(5), dec!(100))];
        let totals = invoice_totals(&items, dec!(10), dec!(50));
        assert_eq!(totals.subtotal, dec!(500));
        assert_eq!(totals.tax_amount, dec!(50));
        assert_eq!(totals.discount_amount, dec!(50));
        assert_eq!(totals.total, dec!(500));
    }

    #[test]
    fn test_total_floored_at_zero() {
        // [3 × 75] at tax 0, discount 1000 → 225 / 0 / 0
        let items = vec![item(dec!(3), dec!(75))];
        let totals = invoice_totals(&items, dec!(0), dec!(1000));
        assert_eq!(totals.subtotal, dec!(225));
        assert_eq!(totals.tax_amount, dec!(0));
        assert_eq!(totals.total, dec!(0));
    }

    #[test]
    fn test_tax_base_is_subtotal_not_discounted_amount() {
        // tax must be 10% of 1000, not 10% of (1000 - 400)
        let items = vec![item(dec!(10), dec!(100))];
        let totals = invoice_totals(&items, dec!(10), dec!(400));
        assert_eq!(totals.tax_amount, dec!(100));
        assert_eq!(totals.total, dec!(700));
    }

    #[test]
    fn test_subtotal_is_permutation_invariant() {
        let a = item(dec!(1), dec!(19.99));
        let b = item(dec!(3), dec!(5));
        let c = item(dec!(2.5), dec!(80));

        let forward = invoice_totals(&[a.clone(), b.clone(), c.clone()], dec!(8.25), dec!(10));
        let reversed = invoice_totals(&[c, b, a], dec!(8.25), dec!(10));

        assert_eq!(forward.subtotal, reversed.subtotal);
        assert_eq!(forward.tax_amount, reversed.tax_amount);
        assert_eq!(forward.total, reversed.total);
    }

    #[test]
    fn test_empty_line_items_sum_to_zero() {
        let totals = invoice_totals(&[], dec!(10), dec!(0));
        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.tax_amount, dec!(0));
        assert_eq!(totals.total, dec!(0));
    }

    #[test]
    fn test_fractional_tax_stays_exact() {
        // 8.25% of 100 is exactly 8.25, no float drift
        let items = vec![item(dec!(1), dec!(100))];
        let totals = invoice_totals(&items, dec!(8.25), dec!(0));
        assert_eq!(totals.tax_amount, dec!(8.25));
        assert_eq!(totals.total, dec!(108.25));
    }

    #[test]
    fn test_negative_inputs_still_consistent() {
        // Callers constrain signs; the math itself never panics and the
        // grand total keeps its zero floor.
        let items = vec![item(dec!(-2), dec!(50))];
        let totals = invoice_totals(&items, dec!(10), dec!(0));
        assert_eq!(totals.subtotal, dec!(-100));
        assert_eq!(totals.tax_amount, dec!(-10));
        assert_eq!(totals.total, dec!(0));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.5), "USD"), "$1,234.50");
        assert_eq!(format_currency(dec!(0), "USD"), "$0.00");
        assert_eq!(format_currency(dec!(-5.5), "USD"), "-$5.50");
        assert_eq!(format_currency(dec!(99), "eur"), "€99.00");
        assert_eq!(format_currency(dec!(12), "SEK"), "SEK 12.00");
        assert_eq!(format_currency(dec!(1000000), "GBP"), "£1,000,000.00");
    }

    #[test]
    fn test_format_currency_rounds_only_at_display() {
        // 1/3 of a dollar carries many fraction digits internally;
        // display clamps to two
        let third = Decimal::from(1) / Decimal::from(3);
        assert_eq!(format_currency(third, "USD"), "$0.33");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
