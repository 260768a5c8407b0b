pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod types;

pub use error::RelayError;
pub use types::Quote;
