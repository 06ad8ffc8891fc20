//! Shared utilities for the block-DAG ledger.

pub mod logging;

pub use logging::{init_logging, LogFormat};
