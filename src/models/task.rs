use serde::{Deserialize, Serialize};

/// One row of the `sys.tasks` aggregation: how many tasks of a type are in a status.
///
/// Druid answers with the column names used in the query (`type`, `status`,
/// `total`), so the lowercase names are accepted next to the capitalised ones.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskCountRecord {
    #[serde(rename = "Type", alias = "type")]
    pub task_type: String,
    #[serde(rename = "Status", alias = "status")]
    pub status: String,
    /// Missing totals decode as zero.
    #[serde(rename = "Total", alias = "total", default)]
    pub total: u64,
}

impl TaskCountRecord {
    pub fn new(task_type: impl Into<String>, status: impl Into<String>, total: u64) -> Self {
        Self {
            task_type: task_type.into(),
            status: status.into(),
            total,
        }
    }
}
