//! Concurrent proposer simulation.
//!
//! A fixed pool of proposer tasks extends one shared [`Dag`] for a fixed
//! wall-clock duration. Each proposal (read heaviest tip, build block, insert)
//! runs under a single exclusive lock; a broadcast signal stops every task and
//! the driver waits for all of them before returning.
//!
//! [`Dag`]: dagledger_ledger::Dag

pub mod config;
pub mod error;
pub mod proposer;
pub mod shutdown;
pub mod simulator;

pub use config::SimConfig;
pub use error::SimError;
pub use proposer::Proposer;
pub use shutdown::{termination_signal, ShutdownController};
pub use simulator::{ProposerTally, SharedDag, SimReport, Simulator};
