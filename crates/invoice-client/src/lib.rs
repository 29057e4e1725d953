//! # invoice-client: Endpoint Client for Invoice AI
//!
//! Async, single-request clients for the two serverless collaborators the
//! chat flow consumes:
//!
//! - **Extraction** (`POST /api/parse-invoice`): transcript in, candidate
//!   invoice fields out. The response is untrusted and goes straight into
//!   [`invoice_core::extract::normalize`].
//! - **Payment link** (`POST /api/create-payment`): amount + currency +
//!   description in, hosted checkout URL out. The input comes from
//!   [`invoice_core::Invoice::payment_request`].
//!
//! Both collaborators are traits ([`ExtractionClient`], [`PaymentClient`])
//! with a live `reqwest` implementation and a mock, so the UI layer and the
//! tests can run without a network.
//!
//! Out of scope here and everywhere: retry policy, queueing, provider
//! internals. One call, one request.

pub mod config;
pub mod error;
pub mod extraction;
pub mod payment;

mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use extraction::{ExtractionClient, HttpExtractionClient, MockExtractionClient};
pub use payment::{HttpPaymentClient, MockPaymentClient, PaymentClient, PaymentLink};
