pub mod quote;

pub use quote::{BidReply, Quote, UpstreamQuote};
