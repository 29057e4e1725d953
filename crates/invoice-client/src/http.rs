//! Shared request plumbing for the two endpoints.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::{ClientConfig, ClientError, ClientResult};

/// Builds the reqwest client from configuration.
pub(crate) fn build_client(config: &ClientConfig) -> ClientResult<Client> {
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// POSTs a JSON body and decodes a JSON response, mapping non-success
/// statuses to [`ClientError::Api`].
pub(crate) async fn post_json<T, B>(
    client: &Client,
    base_url: &str,
    path: &str,
    body: &B,
) -> ClientResult<T>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let url = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    let response = client.post(&url).json(body).send().await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text);
        warn!(%status, %path, "endpoint call failed");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

/// The endpoints report failures as `{"error": "...", "details": ...}`;
/// fall back to the raw body when the shape differs.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
