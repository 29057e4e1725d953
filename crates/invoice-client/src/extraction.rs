//! # Extraction Endpoint Client
//!
//! Consumes the text-to-structured-invoice endpoint: raw transcript in,
//! candidate invoice fields out.
//!
//! ## Flow
//! ```text
//! transcript ──► POST /api/parse-invoice ──► ExtractedInvoice (untrusted)
//!                                                    │
//!                       invoice_core::extract::normalize ──► DraftInvoice
//! ```
//!
//! The response is handed straight to the normalizer; this client never
//! interprets the payload.

use async_trait::async_trait;
use invoice_core::extract::{ExtractedInvoice, ExtractedItem, ExtractedParty};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::http::{build_client, post_json};
use crate::{ClientConfig, ClientError, ClientResult};

/// What the extraction endpoint expects in the request body.
#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    transcript: &'a str,
}

/// The text-to-structured-invoice collaborator.
///
/// A trait so the UI layer can be driven by the mock during development
/// and offline tests.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Sends a transcript and returns the candidate invoice fields.
    async fn parse(&self, transcript: &str) -> ClientResult<ExtractedInvoice>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// Live client for `POST /api/parse-invoice`.
#[derive(Debug, Clone)]
pub struct HttpExtractionClient {
    client: Client,
    base_url: String,
}

impl HttpExtractionClient {
    /// Builds a client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(HttpExtractionClient {
            client: build_client(config)?,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl ExtractionClient for HttpExtractionClient {
    async fn parse(&self, transcript: &str) -> ClientResult<ExtractedInvoice> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(ClientError::InvalidRequest(
                "transcript must not be empty".to_string(),
            ));
        }

        debug!(chars = transcript.len(), "requesting invoice extraction");
        post_json(
            &self.client,
            &self.base_url,
            "api/parse-invoice",
            &ParseRequest { transcript },
        )
        .await
    }
}

// =============================================================================
// Mock Implementation
// =============================================================================

/// Canned extraction for development and offline tests: one consulting-style
/// line item at the 8.25% sample tax rate, regardless of the transcript.
#[derive(Debug, Clone, Default)]
pub struct MockExtractionClient;

#[async_trait]
impl ExtractionClient for MockExtractionClient {
    async fn parse(&self, transcript: &str) -> ClientResult<ExtractedInvoice> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(ClientError::InvalidRequest(
                "transcript must not be empty".to_string(),
            ));
        }

        Ok(ExtractedInvoice {
            from: ExtractedParty {
                name: Some("Your Company".to_string()),
                email: Some("billing@yourcompany.com".to_string()),
            },
            to: ExtractedParty {
                name: Some("Client Name".to_string()),
                email: Some("client@example.com".to_string()),
            },
            items: vec![ExtractedItem {
                description: "Service provided".to_string(),
                quantity: Decimal::ONE,
                unit_price: Decimal::from(100),
            }],
            currency: Some("USD".to_string()),
            tax_percent: Some(Decimal::new(825, 2)), // 8.25%
            discount: Some(Decimal::ZERO),
            ..ExtractedInvoice::default()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use invoice_core::extract::{self, NormalizeOptions};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_parse_normalizes_cleanly() {
        let payload = MockExtractionClient
            .parse("invoice Client Name $100 for services")
            .await
            .unwrap();

        let now = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
        let draft = extract::normalize(&payload, &NormalizeOptions::new(now)).unwrap();

        assert_eq!(draft.to_name, "Client Name");
        assert_eq!(draft.subtotal, dec!(100));
        assert_eq!(draft.tax_amount, dec!(8.25));
        assert_eq!(draft.total, dec!(108.25));
    }

    #[tokio::test]
    async fn test_empty_transcript_is_rejected_locally() {
        let err = MockExtractionClient.parse("   ").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn test_parse_request_wire_shape() {
        let json = serde_json::to_value(ParseRequest {
            transcript: "bill Globex 5 hours at 100",
        })
        .unwrap();
        assert_eq!(json["transcript"], "bill Globex 5 hours at 100");
    }
}
