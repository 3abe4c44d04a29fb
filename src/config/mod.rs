// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::*;
pub use config::*;
pub use error::*;
pub use logging::*;
