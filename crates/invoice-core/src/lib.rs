//! # invoice-core: Pure Business Logic for Invoice AI
//!
//! This crate is the **heart** of Invoice AI. It contains the invoice
//! computation and normalization engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice AI Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Chat UI (React Native)                   │   │
//! │  │   Chat ──► Review Form ──► PDF/Share ──► Payment Link           │   │
//! │  │   (owns the single mutable session: transcript + draft)         │   │
//! │  └──────────────┬────────────────────────────────┬─────────────────┘   │
//! │                 │                                │                      │
//! │  ┌──────────────▼──────────────────┐  ┌──────────▼─────────────────┐   │
//! │  │   ★ invoice-core (THIS CRATE) ★ │  │      invoice-client        │   │
//! │  │                                 │  │                            │   │
//! │  │  ┌───────┐ ┌───────┐ ┌───────┐  │  │  parse-invoice endpoint    │   │
//! │  │  │ money │ │extract│ │ types │  │  │  create-payment endpoint   │   │
//! │  │  │ totals│ │ norm- │ │ Draft │  │  │  (single-request calls)    │   │
//! │  │  │  tax  │ │ alize │ │ Final │  │  └────────────────────────────┘   │
//! │  │  └───────┘ └───────┘ └───────┘  │                                   │
//! │  │                                 │                                   │
//! │  │  NO I/O • NO NETWORK • PURE     │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, DraftInvoice, Invoice) and the
//!   draft-edit / finalize / attach-payment-URL lifecycle
//! - [`money`] - Line totals, invoice totals, display formatting
//! - [`extract`] - Normalizes the AI extraction payload into a draft
//! - [`numbering`] - Invoice-number generation
//! - [`validation`] - Non-negative and required-field checks
//! - [`format`] - Date helpers for the rendering layer
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is a function of its inputs; "now"
//!    is always passed in, never read from a clock
//! 2. **No I/O**: Network, file system and clock access are FORBIDDEN here
//! 3. **Totals Are Computed, Never Trusted**: subtotal, tax and total are
//!    recomputed on every mutation and at finalization
//! 4. **Explicit Errors**: All failures are typed and recoverable, never
//!    strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rust_decimal::Decimal;
//! use invoice_core::extract::{self, ExtractedInvoice, NormalizeOptions};
//!
//! let payload: ExtractedInvoice = serde_json::from_str(r#"{
//!     "from": { "name": "Acme Studio" },
//!     "to": { "name": "Globex" },
//!     "items": [{ "description": "Consulting", "quantity": 5, "unitPrice": 100 }],
//!     "taxPercent": 10,
//!     "discount": 50
//! }"#).unwrap();
//!
//! let now = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
//! let draft = extract::normalize(&payload, &NormalizeOptions::new(now)).unwrap();
//!
//! assert_eq!(draft.subtotal, Decimal::from(500));
//! assert_eq!(draft.total, Decimal::from(500)); // 500 - 50 + 50 tax
//!
//! let invoice = draft.finalize(now).unwrap();
//! assert_eq!(invoice.total, Decimal::from(500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod extract;
pub mod format;
pub mod money;
pub mod numbering;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use invoice_core::Invoice` instead of
// `use invoice_core::types::Invoice`

pub use error::{CoreError, CoreResult, ValidationError};
pub use extract::{ExtractedInvoice, ExtractedItem, ExtractedParty, NormalizeOptions};
pub use money::InvoiceTotals;
pub use numbering::InvoiceNumberStyle;
pub use types::{DraftInvoice, Invoice, LineItem, LineItemPatch, PaymentRequest};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when the extraction payload names none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Notes used when the extraction payload carries none.
pub const DEFAULT_NOTES: &str = "Payment due within 14 days";

/// Placeholder sender email so the document renders without one.
pub const DEFAULT_FROM_EMAIL: &str = "billing@yourcompany.com";

/// Placeholder recipient email so the document renders without one.
pub const DEFAULT_TO_EMAIL: &str = "client@example.com";

/// Default due window for drafts normalized from the chat flow.
///
/// Different call sites want different windows (quick drafts use 10 days,
/// finalization 30), so the window is a per-call-site parameter on
/// [`NormalizeOptions`]; this is merely the chat-flow default.
pub const EXTRACTION_DUE_DAYS: i64 = 14;

/// Due window applied at finalization when the draft has no due date.
pub const FINALIZE_DUE_DAYS: i64 = 30;
