use axum::{Json, extract::State};
use tracing::{error, info, warn};

use crate::api::AwesomeApi;
use crate::error::RelayError;
use crate::router::RelayState;
use crate::types::Quote;

/// GET /cotacao -> fetches a fresh quote, records its bid, returns the quote.
///
/// The fetch and the insert run under separate deadlines; the quote is only
/// returned once the row is written.
pub async fn cotacao_handler(State(state): State<RelayState>) -> Result<Json<Quote>, RelayError> {
    let quote = AwesomeApi::fetch_usdbrl(&state.client, &state.upstream_url, state.fetch_timeout)
        .await
        .inspect_err(|e| log_failure("fetch", e))?;

    let id = state
        .storage
        .insert_bid(&quote.bid, state.persist_timeout)
        .await
        .inspect_err(|e| log_failure("persist", e))?;

    info!(id, bid = %quote.bid, "quote recorded");
    Ok(Json(quote))
}

fn log_failure(stage: &str, e: &RelayError) {
    if e.is_timeout() {
        warn!(stage, error = %e, "deadline exceeded");
    } else {
        error!(stage, error = %e, "quote request failed");
    }
}
