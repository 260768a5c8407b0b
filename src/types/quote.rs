use serde::{Deserialize, Serialize};

/// USD/BRL reading as published by the rate API.
///
/// Every field is kept as the text the API sent; nothing is parsed as a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub var_bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

/// Envelope returned by `/json/last/USD-BRL`.
#[derive(Debug, Deserialize)]
pub struct UpstreamQuote {
    #[serde(rename = "USDBRL")]
    pub usdbrl: Quote,
}

/// The part of the `/cotacao` reply the relay client cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct BidReply {
    pub bid: String,
}
