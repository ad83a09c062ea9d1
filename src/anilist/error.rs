//! Error type for AniList requests

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AniListError {
    /// Connection, TLS or body read failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Messages from the GraphQL `errors` array
    #[error("graphql error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("response carried no data")]
    MissingData,

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AniListError {
    /// AniList answers unknown ids with a 404 plus a "Not Found." error
    pub fn is_not_found(&self) -> bool {
        match self {
            AniListError::Status { status, .. } => *status == reqwest::StatusCode::NOT_FOUND,
            AniListError::GraphQl(messages) => messages
                .iter()
                .any(|m| m.to_ascii_lowercase().starts_with("not found")),
            _ => false,
        }
    }
}
