use serde::Serialize;
use tracing::debug;

use super::error::QueryError;
use crate::config::ConfigV1;
use crate::models::TaskCountRecord;

/// Task counts grouped by type and status.
pub const TASK_STATS_SQL: &str =
    "SELECT type,status,count(*) AS total FROM sys.tasks GROUP BY type,status";

/// Longest slice of a Druid answer kept in a decode error.
pub const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Body of a Druid SQL request.
#[derive(Serialize)]
struct SqlQuery<'a> {
    query: &'a str,
}

/// Anything able to report the current task counts.
#[async_trait::async_trait]
pub trait TaskSource: Send + Sync {
    /// Where the counts come from, for logs.
    fn endpoint(&self) -> &str;
    async fn task_counts(&self) -> Result<Vec<TaskCountRecord>, QueryError>;
}

/// Queries Druid's SQL endpoint over HTTP. Holds no state besides the pooled client.
pub struct DruidQuerier {
    client: reqwest::Client,
    uri: String,
}

impl DruidQuerier {
    pub fn new(config: &ConfigV1) -> Self {
        Self::with_uri(config.druid_uri.clone())
    }

    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            uri: uri.into(),
        }
    }

    /// POSTs `sql` and decodes the full response body as task count records.
    ///
    /// The HTTP status is only reported: Druid answers errors with a JSON
    /// object, which fails to decode as a record array.
    pub async fn fetch(&self, sql: &str) -> Result<Vec<TaskCountRecord>, QueryError> {
        debug!(
            event_name = "druid.query.sent",
            event_domain = "druid",
            druid_uri = self.uri.as_str(),
            "sending Druid SQL query"
        );
        let response = self
            .client
            .post(&self.uri)
            .json(&SqlQuery { query: sql })
            .send()
            .await
            .map_err(QueryError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(QueryError::Read)?;

        let records: Vec<TaskCountRecord> =
            serde_json::from_slice(&body).map_err(|source| QueryError::Decode {
                status: status.as_u16(),
                body: error_body(&body),
                source,
            })?;

        debug!(
            event_name = "druid.query.decoded",
            event_domain = "druid",
            http_status = status.as_u16(),
            record_count = records.len(),
            "decoded Druid task counts"
        );
        Ok(records)
    }
}

/// Lossy UTF-8 view of `body`, cut to [`MAX_ERROR_BODY_BYTES`].
fn error_body(body: &[u8]) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return String::from_utf8_lossy(body).into_owned();
    }
    let mut text = String::from_utf8_lossy(&body[..MAX_ERROR_BODY_BYTES]).into_owned();
    text.push_str(&format!("... ({} bytes total)", body.len()));
    text
}

#[async_trait::async_trait]
impl TaskSource for DruidQuerier {
    fn endpoint(&self) -> &str {
        &self.uri
    }

    async fn task_counts(&self) -> Result<Vec<TaskCountRecord>, QueryError> {
        self.fetch(TASK_STATS_SQL).await
    }
}
