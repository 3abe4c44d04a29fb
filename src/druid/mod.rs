//! Client side of Druid's SQL API.
//!
//! The exporter issues a single aggregation over `sys.tasks` per scrape and
//! decodes the answer into [`TaskCountRecord`](crate::models::TaskCountRecord)s.

mod error;
mod querier;

pub use error::QueryError;
pub use querier::{DruidQuerier, TaskSource, TASK_STATS_SQL};
