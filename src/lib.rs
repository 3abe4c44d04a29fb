//! Library exports for druid-tasks-exporter, shared between the binary and tests.

pub mod config;
pub mod druid;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod startup;
pub mod state;
pub mod utils;
