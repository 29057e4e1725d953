//! # Domain Types
//!
//! The invoice data model and its lifecycle operations.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Lifecycle                                 │
//! │                                                                         │
//! │  extraction payload ──► normalize ──► DraftInvoice                      │
//! │                                            │  ▲                         │
//! │                        add/update/remove   │  │  every edit recomputes  │
//! │                        set tax/discount ───┘  │  subtotal/tax/total     │
//! │                                               │                         │
//! │  DraftInvoice ──► finalize(now) ──► Invoice (immutable)                 │
//! │                                        │                                │
//! │  Invoice ──► with_payment_url ──► Invoice + paymentUrl                  │
//! │                                                                         │
//! │  No transition ever returns a finalized Invoice to Draft.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A finalized invoice has:
//! - `id`: UUID v4 - immutable, used for storage/sharing relations
//! - `invoice_number`: human-readable business id printed on the document
//!
//! ## Totals Are Never Trusted
//! `total` on a line item and `subtotal`/`tax_amount`/`total` on an invoice
//! are always recomputed from their inputs. There is no way to set them
//! directly through any operation in this module, which is what makes an
//! arithmetic inconsistency unrepresentable.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{self, InvoiceTotals};
use crate::numbering::{self, InvoiceNumberStyle};
use crate::validation;
use crate::{DEFAULT_CURRENCY, FINALIZE_DUE_DAYS};

// =============================================================================
// Line Item
// =============================================================================

/// One billable row: description, quantity, unit price, computed total.
///
/// ## Invariant
/// `total == quantity * unit_price`, always. The field is public for
/// serialization, but every operation in this crate recomputes it on
/// construction and on each patch; it is never accepted from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within an invoice (UUID v4).
    pub id: String,

    /// What is being billed ("Logo design", "Consulting").
    pub description: String,

    /// How many units. Fractional values are allowed (2.5 hours).
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Price per unit in the invoice currency.
    #[ts(as = "String")]
    pub unit_price: Decimal,

    /// `quantity * unit_price`. Recomputed on every mutation.
    #[ts(as = "String")]
    pub total: Decimal,
}

/// A partial update to a line item.
///
/// Deliberately has no `total` field: a patch can never override the
/// computed total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPatch {
    pub description: Option<String>,
    #[ts(as = "Option<String>")]
    pub quantity: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub unit_price: Option<Decimal>,
}

impl LineItem {
    /// Creates a line item with a fresh id and a computed total.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use invoice_core::types::LineItem;
    ///
    /// let item = LineItem::new("Consulting", Decimal::from(5), Decimal::from(100));
    /// assert_eq!(item.total, Decimal::from(500));
    /// ```
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            quantity,
            unit_price,
            total: money::line_total(quantity, unit_price),
        }
    }

    /// Applies a partial update, returning the patched item.
    ///
    /// The total is recomputed unconditionally, so a stale total can never
    /// survive a quantity or unit-price change.
    pub fn apply(&self, patch: LineItemPatch) -> LineItem {
        let quantity = patch.quantity.unwrap_or(self.quantity);
        let unit_price = patch.unit_price.unwrap_or(self.unit_price);

        LineItem {
            id: self.id.clone(),
            description: patch.description.unwrap_or_else(|| self.description.clone()),
            quantity,
            unit_price,
            total: money::line_total(quantity, unit_price),
        }
    }
}

// =============================================================================
// Draft Invoice
// =============================================================================

/// A partially populated, editable invoice.
///
/// Produced by normalizing an extraction payload (see [`crate::extract`]) or
/// built up by hand in the review form. The UI layer owns one of these as
/// its session state and calls the mutation methods below; each mutation
/// recomputes the cached totals.
///
/// `id`, `invoice_number`, `due_date` and `created_at` may still be absent
/// at this stage; [`DraftInvoice::finalize`] fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftInvoice {
    pub id: Option<String>,
    pub invoice_number: Option<String>,
    pub from_name: String,
    pub from_email: String,
    pub to_name: String,
    pub to_email: String,
    pub line_items: Vec<LineItem>,
    /// ISO-4217-like code ("USD", "EUR").
    pub currency: String,
    #[ts(as = "String")]
    pub tax_percentage: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    #[ts(as = "String")]
    pub subtotal: Decimal,
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[ts(as = "String")]
    pub total: Decimal,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for DraftInvoice {
    /// An empty draft: no parties, no items, USD, zero tax and discount.
    fn default() -> Self {
        DraftInvoice {
            id: None,
            invoice_number: None,
            from_name: String::new(),
            from_email: String::new(),
            to_name: String::new(),
            to_email: String::new(),
            line_items: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            tax_percentage: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            due_date: None,
            notes: None,
            created_at: None,
        }
    }
}

impl DraftInvoice {
    /// Appends a line item and recomputes totals.
    pub fn add_line_item(&mut self, item: LineItem) {
        self.line_items.push(item);
        self.recompute_totals();
    }

    /// Patches the line item with the given id and recomputes totals.
    ///
    /// ## Errors
    /// [`CoreError::LineItemNotFound`] if no item has that id (e.g., the
    /// review form held a stale id after a re-normalization).
    pub fn update_line_item(&mut self, id: &str, patch: LineItemPatch) -> CoreResult<()> {
        let item = self
            .line_items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CoreError::LineItemNotFound(id.to_string()))?;

        *item = item.apply(patch);
        self.recompute_totals();
        Ok(())
    }

    /// Removes the line item at `index`, preserving the relative order of
    /// the rest, and recomputes totals.
    ///
    /// Returns the removed item, or `None` when the index is out of range
    /// (the draft is left untouched).
    pub fn remove_line_item(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.line_items.len() {
            return None;
        }

        let removed = self.line_items.remove(index);
        self.recompute_totals();
        Some(removed)
    }

    /// Sets the tax percentage and recomputes totals.
    pub fn set_tax_percentage(&mut self, tax_percentage: Decimal) {
        self.tax_percentage = tax_percentage;
        self.recompute_totals();
    }

    /// Sets the flat discount amount and recomputes totals.
    pub fn set_discount_amount(&mut self, discount_amount: Decimal) {
        self.discount_amount = discount_amount;
        self.recompute_totals();
    }

    /// Sets the invoice currency.
    ///
    /// Amounts are not converted; the currency is a label on the numbers.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
        self.recompute_totals();
    }

    /// Recomputes `subtotal`, `tax_amount` and `total` from the current
    /// line items, tax percentage and discount.
    ///
    /// Every mutation method calls this; it is public so a caller that
    /// deserialized a draft from untrusted storage can re-establish the
    /// invariant in one step.
    pub fn recompute_totals(&mut self) {
        let totals = self.totals();
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
    }

    /// Computes the current totals without touching the draft.
    pub fn totals(&self) -> InvoiceTotals {
        money::invoice_totals(&self.line_items, self.tax_percentage, self.discount_amount)
    }

    /// Assembles a finalized, immutable [`Invoice`] from this draft.
    ///
    /// ## Requirements
    /// - `from_name` and `to_name` must be non-empty
    /// - `line_items` must be non-empty
    ///
    /// ## Filled-in defaults
    /// - `id`: fresh UUID v4 when absent
    /// - `invoice_number`: `INV-<epoch-millis>` when absent
    /// - `created_at`: `now` when absent
    /// - `due_date`: 30 days from `now` when absent
    ///
    /// Totals are recomputed from the current line items; totals cached on
    /// the draft are ignored, so finalizing twice without intervening edits
    /// yields identical subtotal, tax and total.
    pub fn finalize(&self, now: DateTime<Utc>) -> CoreResult<Invoice> {
        validation::validate_party_name("fromName", &self.from_name)?;
        validation::validate_party_name("toName", &self.to_name)?;
        if self.line_items.is_empty() {
            return Err(ValidationError::EmptyLineItems.into());
        }

        let totals = self.totals();

        Ok(Invoice {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            invoice_number: self
                .invoice_number
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| numbering::generate(InvoiceNumberStyle::Timestamp, now)),
            from_name: self.from_name.clone(),
            from_email: self.from_email.clone(),
            to_name: self.to_name.clone(),
            to_email: self.to_email.clone(),
            line_items: self.line_items.clone(),
            currency: self.currency.clone(),
            tax_percentage: self.tax_percentage,
            discount_amount: totals.discount_amount,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
            due_date: self
                .due_date
                .unwrap_or_else(|| now.date_naive() + Duration::days(FINALIZE_DUE_DAYS)),
            notes: self.notes.clone(),
            payment_url: None,
            created_at: self.created_at.unwrap_or(now),
        })
    }
}

// =============================================================================
// Finalized Invoice
// =============================================================================

/// A fully validated, immutable invoice, ready for document generation and
/// payment-link creation.
///
/// The only permitted change after finalization is attaching a payment URL
/// via [`Invoice::with_payment_url`]. Nothing transitions an `Invoice` back
/// into a [`DraftInvoice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    /// Human-readable business id printed on the document.
    pub invoice_number: String,
    pub from_name: String,
    pub from_email: String,
    pub to_name: String,
    pub to_email: String,
    pub line_items: Vec<LineItem>,
    pub currency: String,
    #[ts(as = "String")]
    pub tax_percentage: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    #[ts(as = "String")]
    pub subtotal: Decimal,
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[ts(as = "String")]
    pub total: Decimal,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    /// Set once a payment link has been created for this invoice.
    pub payment_url: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns a copy with the payment URL attached.
    ///
    /// The single permitted post-finalization transition; every other field
    /// is unchanged.
    pub fn with_payment_url(mut self, url: impl Into<String>) -> Invoice {
        self.payment_url = Some(url.into());
        self
    }

    /// Projects the payment-link request for this invoice.
    ///
    /// Only `total` and `currency` feed the payment call; the description
    /// and metadata are for the provider's dashboard.
    ///
    /// ## Errors
    /// [`CoreError::InvalidPaymentAmount`] when the total is not strictly
    /// positive (the provider rejects zero and negative amounts).
    pub fn payment_request(&self) -> CoreResult<PaymentRequest> {
        if self.total <= Decimal::ZERO {
            return Err(CoreError::InvalidPaymentAmount {
                reason: "total must be greater than zero".to_string(),
            });
        }

        let mut metadata = HashMap::new();
        metadata.insert("invoiceNumber".to_string(), self.invoice_number.clone());
        metadata.insert("invoiceId".to_string(), self.id.clone());

        Ok(PaymentRequest {
            amount: self.total,
            currency: self.currency.clone(),
            description: format!("Invoice {} for {}", self.invoice_number, self.to_name),
            metadata: Some(metadata),
        })
    }
}

// =============================================================================
// Payment Request
// =============================================================================

/// Input to the payment-link collaborator: amount, currency, description
/// and provider-visible metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Serialized as a JSON number; the payment endpoint type-checks it.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
