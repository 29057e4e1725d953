//! End-to-end walk of the invoice pipeline against the mock collaborators:
//! transcript → extraction → normalize → edit → finalize → payment link.
//!
//! Run with:
//! ```sh
//! cargo run -p invoice-client --example invoice_flow
//! ```

use chrono::Utc;
use invoice_client::{ExtractionClient, MockExtractionClient, MockPaymentClient, PaymentClient};
use invoice_core::extract::{self, NormalizeOptions};
use invoice_core::money::format_currency;
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let transcript = "Invoice Client Name one hundred dollars for services rendered";
    tracing::info!(transcript, "parsing transcript");

    let payload = MockExtractionClient.parse(transcript).await?;
    let now = Utc::now();
    let mut draft = extract::normalize(&payload, &NormalizeOptions::new(now))?;
    tracing::info!(
        to = %draft.to_name,
        items = draft.line_items.len(),
        subtotal = %draft.subtotal,
        "draft normalized"
    );

    // Review stage: the user bumps the discount
    draft.set_discount_amount(Decimal::from(10));

    let invoice = draft.finalize(now)?;
    tracing::info!(
        number = %invoice.invoice_number,
        total = %format_currency(invoice.total, &invoice.currency),
        due = %invoice.due_date,
        "invoice finalized"
    );

    let link = MockPaymentClient
        .create_payment_link(&invoice.payment_request()?)
        .await?;
    let invoice = invoice.with_payment_url(link.url.as_str());
    tracing::info!(url = %invoice.payment_url.unwrap_or_default(), "payment link attached");

    Ok(())
}
