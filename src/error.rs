use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};
use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RelayError {
    /// Network failure, deadline exceeded, non-success status or undecodable body.
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("missing bid in quote response")]
    MissingBid,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("persisting quote exceeded deadline of {0:?}")]
    PersistTimeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl RelayError {
    /// Whether the failure is a deadline expiry rather than a hard error.
    pub fn is_timeout(&self) -> bool {
        match self {
            RelayError::Reqwest(e) => e.is_timeout(),
            RelayError::PersistTimeout(_) => true,
            _ => false,
        }
    }
}

// The local endpoint is only consumed by the relay client, so the
// error text goes back verbatim.
impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn renders_plain_text_500() {
        let resp = RelayError::PersistTimeout(Duration::from_millis(10)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            "persisting quote exceeded deadline of 10ms"
        );
    }

    #[test]
    fn persist_timeout_counts_as_timeout() {
        assert!(RelayError::PersistTimeout(Duration::from_millis(10)).is_timeout());
        assert!(!RelayError::MissingBid.is_timeout());
    }
}
