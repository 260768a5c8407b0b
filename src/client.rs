//! Relay client: asks the local server for the current bid and keeps the
//! latest one in a text file.
//!
//! The output file is only touched after the server answered with a usable
//! bid, so a failed run leaves the previous file (or no file) behind.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::error::RelayError;
use crate::types::BidReply;

/// Label written in front of the bid in the output file.
pub const OUTPUT_LABEL: &str = "Dólar";

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RelayOutcome {
    pub bid: String,
    pub path: PathBuf,
    pub written_at: DateTime<Local>,
}

impl RelayOutcome {
    pub fn confirmation(&self) -> String {
        format!(
            "Success: Bid ({}) registered in {}",
            self.bid,
            self.written_at.format("%d/%m/%Y %H:%M:%S")
        )
    }
}

/// GET the bid from the local server. Non-success status is an error.
pub async fn fetch_bid(
    client: &reqwest::Client,
    url: &Url,
    deadline: Duration,
) -> Result<String, RelayError> {
    debug!(url = %url, ?deadline, "requesting bid from relay server");
    let reply: BidReply = client
        .get(url.clone())
        .timeout(deadline)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if reply.bid.trim().is_empty() {
        return Err(RelayError::MissingBid);
    }
    Ok(reply.bid)
}

/// Replace the contents of `path` with a single `Dólar: <bid>` line.
pub async fn write_bid(path: &Path, bid: &str) -> Result<(), RelayError> {
    tokio::fs::write(path, format_line(bid)).await?;
    Ok(())
}

pub fn format_line(bid: &str) -> String {
    format!("{OUTPUT_LABEL}: {bid}\n")
}

/// Fetch then write. Any failure stops the run before the file is touched.
pub async fn run(cfg: &Config) -> Result<RelayOutcome, RelayError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("cotacao-client/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let bid = fetch_bid(&client, &cfg.server_url, cfg.client_timeout()).await?;
    write_bid(&cfg.output_path, &bid).await?;
    info!(bid = %bid, path = %cfg.output_path.display(), "bid written");

    Ok(RelayOutcome {
        bid,
        path: cfg.output_path.clone(),
        written_at: Local::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn line_has_label_and_newline() {
        assert_eq!(format_line("5.25"), "Dólar: 5.25\n");
    }

    #[tokio::test]
    async fn write_overwrites_previous_bid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");

        write_bid(&path, "5.1000").await.unwrap();
        write_bid(&path, "5.25").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Dólar: 5.25\n");
    }

    #[tokio::test]
    async fn write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("cotacao.txt");

        let err = write_bid(&path, "5.25").await.unwrap_err();
        assert!(matches!(err, RelayError::Io(_)));
    }

    #[test]
    fn confirmation_mentions_bid_and_time() {
        let outcome = RelayOutcome {
            bid: "5.25".to_string(),
            path: PathBuf::from("cotacao.txt"),
            written_at: Local.with_ymd_and_hms(2024, 6, 14, 9, 5, 7).unwrap(),
        };
        assert_eq!(
            outcome.confirmation(),
            "Success: Bid (5.25) registered in 14/06/2024 09:05:07"
        );
    }
}
