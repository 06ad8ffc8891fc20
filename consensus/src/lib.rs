//! Consensus over the block-DAG.
//!
//! Everything here is a query or rewrite over a [`Dag`](dagledger_ledger::Dag)
//! snapshot; nothing is persisted between calls. Callers sharing the DAG with
//! concurrent writers hold the same lock the writers use.
//!
//! ## Module overview
//!
//! - [`tips`]: branch heads and heaviest-tip selection.
//! - [`ancestry`]: ancestor-set traversal.
//! - [`finality`]: strict-majority finality over tip ancestor sets.
//! - [`pruning`]: discard every branch off the heaviest tip's history.

pub mod ancestry;
pub mod finality;
pub mod pruning;
pub mod tips;

pub use ancestry::ancestor_set;
pub use finality::{finalized, tip_support, TipSupport};
pub use pruning::{prune_branches, PruneOutcome};
pub use tips::{heaviest_tip, tips};
