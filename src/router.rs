use axum::{Router, routing::get};
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::db::QuoteStorage;
use crate::error::RelayError;
use crate::handlers::cotacao::cotacao_handler;

/// State shared by every request. Holds no mutable data of its own.
#[derive(Clone)]
pub struct RelayState {
    pub client: reqwest::Client,
    pub storage: QuoteStorage,
    pub upstream_url: Url,
    pub fetch_timeout: Duration,
    pub persist_timeout: Duration,
}

impl RelayState {
    pub fn new(storage: QuoteStorage, cfg: &Config) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cotacao-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            storage,
            upstream_url: cfg.upstream_url.clone(),
            fetch_timeout: cfg.fetch_timeout(),
            persist_timeout: cfg.persist_timeout(),
        })
    }
}

pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/cotacao", get(cotacao_handler))
        .with_state(state)
}
