use thiserror::Error;

/// Failure of one round trip to the Druid SQL endpoint.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Connection refused, DNS failure, transport timeout.
    #[error("an error occurred while making the request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("an error occurred while reading the response: {0}")]
    Read(#[source] reqwest::Error),
    /// The body is not a JSON array of task records.
    #[error("an error occurred while unmarshalling {body} (HTTP {status}): {source}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl QueryError {
    /// Short class name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Transport(_) => "transport",
            QueryError::Read(_) => "read",
            QueryError::Decode { .. } => "decode",
        }
    }
}
