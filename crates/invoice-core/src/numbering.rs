//! # Invoice Number Generation
//!
//! Human-readable invoice numbers in the two formats the app prints.
//!
//! ## Collision Policy
//! The dated style carries only a 3-digit random suffix, so two invoices
//! generated the same day can collide (~0.1% per pair) and no uniqueness
//! check is performed. A calling system that needs hard uniqueness should
//! key on [`Invoice::id`] (a UUID) instead, or supply its own number.
//! See DESIGN.md for the reasoning.
//!
//! [`Invoice::id`]: crate::types::Invoice

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The two invoice-number formats the app produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceNumberStyle {
    /// `INV-YYYYMMDD-NNN` - current date plus a zero-padded random suffix
    /// in `[0, 1000)`. Used by the chat flow.
    Dated,
    /// `INV-<epoch-millis>` - the simpler fallback used at finalization.
    Timestamp,
}

/// Generates an invoice number for the given moment.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use invoice_core::numbering::{generate, InvoiceNumberStyle};
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
///
/// let dated = generate(InvoiceNumberStyle::Dated, now);
/// assert!(dated.starts_with("INV-20260105-"));
///
/// let stamped = generate(InvoiceNumberStyle::Timestamp, now);
/// assert_eq!(stamped, format!("INV-{}", now.timestamp_millis()));
/// ```
pub fn generate(style: InvoiceNumberStyle, now: DateTime<Utc>) -> String {
    match style {
        InvoiceNumberStyle::Dated => {
            let suffix: u32 = rand::thread_rng().gen_range(0..1000);
            format!("INV-{}-{:03}", now.format("%Y%m%d"), suffix)
        }
        InvoiceNumberStyle::Timestamp => format!("INV-{}", now.timestamp_millis()),
    }
}
