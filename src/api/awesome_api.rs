use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::RelayError;
use crate::types::{Quote, UpstreamQuote};

/// Stateless caller for the AwesomeAPI exchange-rate endpoint.
pub struct AwesomeApi;

impl AwesomeApi {
    /// Fetch the latest USD/BRL quote.
    ///
    /// `deadline` covers connecting, sending and reading the body. No retry.
    pub async fn fetch_usdbrl(
        client: &reqwest::Client,
        url: &Url,
        deadline: Duration,
    ) -> Result<Quote, RelayError> {
        debug!(url = %url, ?deadline, "requesting upstream quote");

        let resp = client
            .get(url.clone())
            .timeout(deadline)
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| warn!(status = ?e.status(), "upstream rejected quote request"))?;

        let envelope: UpstreamQuote = resp.json().await?;
        let quote = envelope.usdbrl;
        if quote.bid.trim().is_empty() {
            return Err(RelayError::MissingBid);
        }
        Ok(quote)
    }
}
