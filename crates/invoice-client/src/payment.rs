//! # Payment-Link Endpoint Client
//!
//! Consumes the payment-link collaborator: amount + currency + description
//! in, checkout URL out.
//!
//! Only `total` and `currency` from a finalized invoice feed this call;
//! [`invoice_core::Invoice::payment_request`] builds the input. The returned
//! URL is attached to the invoice with
//! [`invoice_core::Invoice::with_payment_url`] - the one permitted
//! post-finalization mutation.

use async_trait::async_trait;
use invoice_core::PaymentRequest;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::http::{build_client, post_json};
use crate::{ClientConfig, ClientError, ClientResult};

/// A created payment link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    /// The hosted checkout URL to attach to the invoice.
    pub url: String,
    /// Provider session id, when the endpoint reports one.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// The payment-link collaborator.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Creates a payment link for the given request.
    async fn create_payment_link(&self, request: &PaymentRequest) -> ClientResult<PaymentLink>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// Live client for `POST /api/create-payment`.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: Client,
    base_url: String,
}

impl HttpPaymentClient {
    /// Builds a client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(HttpPaymentClient {
            client: build_client(config)?,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl PaymentClient for HttpPaymentClient {
    async fn create_payment_link(&self, request: &PaymentRequest) -> ClientResult<PaymentLink> {
        let wire = validate_and_lowercase(request)?;

        debug!(amount = %wire.amount, currency = %wire.currency, "creating payment link");
        let link: PaymentLink = post_json(
            &self.client,
            &self.base_url,
            "api/create-payment",
            &wire,
        )
        .await?;

        if link.url.is_empty() {
            return Err(ClientError::InvalidResponse(
                "payment link response carried no url".to_string(),
            ));
        }
        Ok(link)
    }
}

/// The endpoint wants a strictly positive amount and a lowercased currency
/// code; reject the former locally and fix the latter up here so callers
/// can keep the display form ("USD").
fn validate_and_lowercase(request: &PaymentRequest) -> ClientResult<PaymentRequest> {
    if request.amount <= Decimal::ZERO {
        return Err(ClientError::InvalidRequest(
            "amount must be a positive number".to_string(),
        ));
    }

    Ok(PaymentRequest {
        currency: request.currency.to_lowercase(),
        ..request.clone()
    })
}

// =============================================================================
// Mock Implementation
// =============================================================================

/// Offline payment links for development: deterministic URL, no network.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentClient;

#[async_trait]
impl PaymentClient for MockPaymentClient {
    async fn create_payment_link(&self, request: &PaymentRequest) -> ClientResult<PaymentLink> {
        let wire = validate_and_lowercase(request)?;

        Ok(PaymentLink {
            url: format!(
                "https://checkout.example.test/pay/{}-{}",
                wire.currency, wire.amount
            ),
            session_id: Some("cs_test_mock".to_string()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: dec!(500),
            currency: "USD".to_string(),
            description: "Invoice INV-20260105-042 for Globex".to_string(),
            metadata: Some(HashMap::from([(
                "invoiceNumber".to_string(),
                "INV-20260105-042".to_string(),
            )])),
        }
    }

    #[tokio::test]
    async fn test_mock_creates_link() {
        let link = MockPaymentClient
            .create_payment_link(&request())
            .await
            .unwrap();
        assert!(link.url.starts_with("https://"));
        assert!(link.session_id.is_some());
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected_locally() {
        let mut zero = request();
        zero.amount = dec!(0);
        let err = MockPaymentClient
            .create_payment_link(&zero)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn test_currency_lowercased_on_the_wire() {
        let wire = validate_and_lowercase(&request()).unwrap();
        assert_eq!(wire.currency, "usd");
        // The rest of the request is untouched
        assert_eq!(wire.amount, dec!(500));
        assert_eq!(wire.description, request().description);
    }

    #[test]
    fn test_payment_link_wire_shape() {
        let link: PaymentLink = serde_json::from_str(
            r#"{ "url": "https://checkout.example/c/1", "sessionId": "cs_123" }"#,
        )
        .unwrap();
        assert_eq!(link.url, "https://checkout.example/c/1");
        assert_eq!(link.session_id.as_deref(), Some("cs_123"));

        // sessionId is optional
        let link: PaymentLink =
            serde_json::from_str(r#"{ "url": "https://checkout.example/c/2" }"#).unwrap();
        assert!(link.session_id.is_none());
    }
}
