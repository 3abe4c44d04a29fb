//! Prometheus exposition of the Druid task counts.
//!
//! The gauge descriptor is declared once; every scrape turns a fresh query
//! result into samples against it.

mod publisher;
mod tasks;

pub use publisher::{Publisher, ScrapeError};
pub use tasks::{TasksGauge, TASKS_METRIC_HELP, TASKS_METRIC_NAME};
