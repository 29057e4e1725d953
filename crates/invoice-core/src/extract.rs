//! # Extraction Payload Normalizer
//!
//! Turns the loosely-typed JSON produced by the language-model extraction
//! endpoint into a well-typed [`DraftInvoice`].
//!
//! ## Boundary Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Untrusted → Trusted Boundary                         │
//! │                                                                         │
//! │  AI endpoint JSON ──► ExtractedInvoice (everything optional)           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                      normalize(payload, options)                        │
//! │                              │                                          │
//! │              ┌───────────────┴───────────────┐                          │
//! │              ▼                               ▼                          │
//! │      DraftInvoice (typed,            CoreError::Validation              │
//! │      defaults applied,               (missing party / empty items)      │
//! │      totals recomputed)                                                 │
//! │                                                                         │
//! │  Untyped data never travels past this module.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The model is asked for its own totals nowhere, and any it volunteers are
//! ignored: subtotal, tax and total are always recomputed here.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::numbering::InvoiceNumberStyle;
use crate::types::{DraftInvoice, LineItem};
use crate::{
    numbering, DEFAULT_CURRENCY, DEFAULT_FROM_EMAIL, DEFAULT_NOTES, DEFAULT_TO_EMAIL,
    EXTRACTION_DUE_DAYS,
};

// =============================================================================
// Extraction Response Shape
// =============================================================================

/// A party ("from" or "to") as extracted by the language model.
///
/// Both fields tolerate absence; `name` is validated by [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedParty {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One extracted billable row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[ts(as = "String")]
    pub quantity: Decimal,
    #[serde(default)]
    #[ts(as = "String")]
    pub unit_price: Decimal,
}

/// The already-parsed JSON the extraction endpoint returns.
///
/// Every field carries `#[serde(default)]` so a sparse model response
/// deserializes cleanly; missing REQUIRED data is then rejected by
/// [`normalize`] with a typed error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedInvoice {
    #[serde(default)]
    pub from: ExtractedParty,
    #[serde(default)]
    pub to: ExtractedParty,
    #[serde(default)]
    pub items: Vec<ExtractedItem>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub tax_percent: Option<Decimal>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Present in the wire shape; the draft tracks creation time itself, so
    /// this is carried but not mapped.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Normalization Options
// =============================================================================

/// Per-call-site knobs for normalization.
///
/// Normalization time is an explicit input so the whole pipeline stays a
/// pure function of its arguments (same payload + same options = same
/// draft, modulo generated ids).
///
/// Different call sites want different due-date windows (the chat flow
/// defaults to 14 days, finalization to 30, quick drafts to 10), so the
/// window is a parameter here rather than a single global default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// The moment "now" for due-date and invoice-number defaults.
    pub now: DateTime<Utc>,
    /// Days until the defaulted due date. 14 for the chat flow.
    pub due_in_days: i64,
    /// Style for a generated invoice number when the payload has none.
    pub number_style: InvoiceNumberStyle,
}

impl NormalizeOptions {
    /// The chat-flow defaults: due in 14 days, dated invoice numbers.
    pub fn new(now: DateTime<Utc>) -> Self {
        NormalizeOptions {
            now,
            due_in_days: EXTRACTION_DUE_DAYS,
            number_style: InvoiceNumberStyle::Dated,
        }
    }

    /// Overrides the due-date window.
    pub fn due_in_days(mut self, days: i64) -> Self {
        self.due_in_days = days;
        self
    }

    /// Overrides the invoice-number style.
    pub fn number_style(mut self, style: InvoiceNumberStyle) -> Self {
        self.number_style = style;
        self
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalizes an extraction payload into a [`DraftInvoice`].
///
/// ## Validation
/// - `from.name` and `to.name` must be present and non-blank, else
///   [`ValidationError::MissingParty`]
/// - `items` must be non-empty, else [`ValidationError::EmptyLineItems`]
///
/// ## Defaults (applied only when the payload field is absent or blank)
/// - `currency` ← `"USD"`
/// - `tax_percentage` ← `0`, `discount_amount` ← `0`
/// - `invoice_number` ← generated per `options.number_style`
/// - `due_date` ← `options.now + options.due_in_days`
/// - `notes` ← `"Payment due within 14 days"`
/// - party emails ← placeholder addresses, so the document renders even
///   when the transcript never mentioned an email
///
/// Totals are recomputed from the mapped line items; nothing the extraction
/// step claims about sums is trusted.
pub fn normalize(payload: &ExtractedInvoice, options: &NormalizeOptions) -> CoreResult<DraftInvoice> {
    let from_name = non_blank(payload.from.name.as_deref());
    let to_name = non_blank(payload.to.name.as_deref());
    let (from_name, to_name) = match (from_name, to_name) {
        (Some(from), Some(to)) => (from, to),
        _ => return Err(ValidationError::MissingParty.into()),
    };

    if payload.items.is_empty() {
        return Err(ValidationError::EmptyLineItems.into());
    }

    let line_items: Vec<LineItem> = payload
        .items
        .iter()
        .map(|item| LineItem::new(item.description.clone(), item.quantity, item.unit_price))
        .collect();

    let mut draft = DraftInvoice {
        id: None,
        invoice_number: Some(
            non_blank(payload.invoice_number.as_deref())
                .unwrap_or_else(|| numbering::generate(options.number_style, options.now)),
        ),
        from_name,
        from_email: non_blank(payload.from.email.as_deref())
            .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
        to_name,
        to_email: non_blank(payload.to.email.as_deref())
            .unwrap_or_else(|| DEFAULT_TO_EMAIL.to_string()),
        line_items,
        currency: non_blank(payload.currency.as_deref())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        tax_percentage: payload.tax_percent.unwrap_or(Decimal::ZERO),
        discount_amount: payload.discount.unwrap_or(Decimal::ZERO),
        subtotal: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        total: Decimal::ZERO,
        due_date: Some(
            payload
                .due_date
                .unwrap_or_else(|| options.now.date_naive() + Duration::days(options.due_in_days)),
        ),
        notes: Some(
            non_blank(payload.notes.as_deref()).unwrap_or_else(|| DEFAULT_NOTES.to_string()),
        ),
        created_at: None,
    };
    draft.recompute_totals();

    Ok(draft)
}

/// Trims and rejects blank strings, the "absent/falsy" test the defaulting
/// policy uses.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn options() -> NormalizeOptions {
        NormalizeOptions::new(Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap())
    }

    fn payload() -> ExtractedInvoice {
        ExtractedInvoice {
            from: ExtractedParty {
                name: Some("Acme Studio".to_string()),
                email: Some("billing@acme.test".to_string()),
            },
            to: ExtractedParty {
                name: Some("Globex".to_string()),
                email: None,
            },
            items: vec![ExtractedItem {
                description: "Consulting".to_string(),
                quantity: dec!(5),
                unit_price: dec!(100),
            }],
            ..ExtractedInvoice::default()
        }
    }

    #[test]
    fn test_normalize_happy_path() {
        let draft = normalize(&payload(), &options()).unwrap();

        assert_eq!(draft.from_name, "Acme Studio");
        assert_eq!(draft.to_name, "Globex");
        assert_eq!(draft.line_items.len(), 1);
        assert_eq!(draft.line_items[0].total, dec!(500));
        assert_eq!(draft.subtotal, dec!(500));
        assert_eq!(draft.total, dec!(500));
    }

    #[test]
    fn test_normalize_applies_defaults() {
        // Payload missing currency, taxPercent, discount, notes, dates
        let draft = normalize(&payload(), &options()).unwrap();

        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.tax_percentage, dec!(0));
        assert_eq!(draft.discount_amount, dec!(0));
        assert_eq!(draft.notes.as_deref(), Some("Payment due within 14 days"));
        assert_eq!(draft.to_email, "client@example.com");
        // Due 14 days after normalization time
        assert_eq!(
            draft.due_date,
            Some(NaiveDate::from_ymd_opt(2026, 1, 19).unwrap())
        );
        // Generated dated number: INV-YYYYMMDD-NNN
        let number = draft.invoice_number.unwrap();
        assert!(number.starts_with("INV-20260105-"));
    }

    #[test]
    fn test_normalize_keeps_payload_values_over_defaults() {
        let mut payload = payload();
        payload.currency = Some("EUR".to_string());
        payload.tax_percent = Some(dec!(19));
        payload.discount = Some(dec!(25));
        payload.invoice_number = Some("INV-CUSTOM-7".to_string());
        payload.due_date = NaiveDate::from_ymd_opt(2026, 3, 1);
        payload.notes = Some("Net 60".to_string());

        let draft = normalize(&payload, &options()).unwrap();

        assert_eq!(draft.currency, "EUR");
        assert_eq!(draft.tax_percentage, dec!(19));
        assert_eq!(draft.discount_amount, dec!(25));
        assert_eq!(draft.invoice_number.as_deref(), Some("INV-CUSTOM-7"));
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(draft.notes.as_deref(), Some("Net 60"));
        // Tax on subtotal only: 19% of 500, discount untouched by tax
        assert_eq!(draft.tax_amount, dec!(95));
        assert_eq!(draft.total, dec!(570));
    }

    #[test]
    fn test_normalize_rejects_missing_parties() {
        let mut missing_from = payload();
        missing_from.from.name = None;
        assert!(normalize(&missing_from, &options()).is_err());

        let mut blank_to = payload();
        blank_to.to.name = Some("   ".to_string());
        let err = normalize(&blank_to, &options()).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: missing sender or recipient");
    }

    #[test]
    fn test_normalize_rejects_empty_items() {
        let mut empty = payload();
        empty.items.clear();
        let err = normalize(&empty, &options()).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: invoice has no line items");
    }

    #[test]
    fn test_due_window_is_per_call_site() {
        let draft = normalize(&payload(), &options().due_in_days(30)).unwrap();
        assert_eq!(
            draft.due_date,
            Some(NaiveDate::from_ymd_opt(2026, 2, 4).unwrap())
        );
    }

    #[test]
    fn test_timestamp_number_style() {
        let opts = options().number_style(InvoiceNumberStyle::Timestamp);
        let draft = normalize(&payload(), &opts).unwrap();
        let number = draft.invoice_number.unwrap();
        let millis = opts.now.timestamp_millis();
        assert_eq!(number, format!("INV-{millis}"));
    }

    #[test]
    fn test_sparse_json_deserializes_cleanly() {
        // A model response missing every optional section must not be a
        // deserialization error; it becomes a typed validation error.
        let payload: ExtractedInvoice = serde_json::from_str("{}").unwrap();
        let err = normalize(&payload, &options()).unwrap_err();
        assert!(err.to_string().contains("missing sender or recipient"));
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let json = r#"{
            "from": { "name": "Acme Studio", "email": "billing@acme.test" },
            "to": { "name": "Globex" },
            "items": [
                { "description": "Logo design", "quantity": 1, "unitPrice": 450 },
                { "description": "Revisions", "quantity": 2.5, "unitPrice": 80 }
            ],
            "currency": "USD",
            "taxPercent": 8.25,
            "discount": 0,
            "invoiceNumber": "INV-1757000000000",
            "issueDate": "2026-01-05",
            "dueDate": "2026-01-19",
            "notes": "Thanks!"
        }"#;

        let payload: ExtractedInvoice = serde_json::from_str(json).unwrap();
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[1].quantity, dec!(2.5));
        assert_eq!(payload.tax_percent, Some(dec!(8.25)));

        let draft = normalize(&payload, &options()).unwrap();
        assert_eq!(draft.subtotal, dec!(650));
        assert_eq!(draft.tax_amount, dec!(53.625));
        assert_eq!(draft.total, dec!(703.625));
    }

    #[test]
    fn test_extraction_totals_are_never_trusted() {
        // Even if the model volunteered sums in notes or elsewhere, the
        // draft's totals come from the mapped items alone.
        let mut payload = payload();
        payload.items[0].quantity = dec!(3);
        payload.items[0].unit_price = dec!(75);

        let draft = normalize(&payload, &options()).unwrap();
        assert_eq!(draft.subtotal, dec!(225));
    }
}
