use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::RelayError;

/// Prefix for environment overrides, e.g. `COTACAO_LISTEN_ADDR`.
pub const ENV_PREFIX: &str = "COTACAO_";

pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";

/// Runtime configuration shared by the server and the client binaries.
///
/// Every field has a default, so an empty environment gives the stock
/// `localhost:8080/cotacao` setup backed by `cotacoes.db`. The relay itself
/// takes no configuration; the `COTACAO_*` overlay exists so tests and
/// deployments can point the binaries elsewhere. The `usdbrl` table name is
/// never configurable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub loglevel: String,

    // server side
    pub listen_addr: String,
    pub database_url: String,
    pub upstream_url: Url,
    pub fetch_timeout_ms: u64,
    pub persist_timeout_ms: u64,

    // client side
    pub server_url: Url,
    pub client_timeout_ms: u64,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            database_url: "sqlite:cotacoes.db".to_string(),
            upstream_url: Url::parse(DEFAULT_UPSTREAM_URL).expect("default upstream url is valid"),
            fetch_timeout_ms: 200,
            persist_timeout_ms: 10,
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default server url is valid"),
            client_timeout_ms: 300,
            output_path: PathBuf::from("cotacao.txt"),
        }
    }
}

impl Config {
    /// Defaults overlaid with `COTACAO_*` environment variables.
    pub fn load() -> Result<Self, RelayError> {
        Ok(Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_millis(self.client_timeout_ms)
    }
}
