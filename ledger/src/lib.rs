//! Block-DAG ledger store.
//!
//! Blocks may reference several parents. Every node in the DAG owns a
//! materialised UTXO snapshot as of that node, built by intersecting its
//! parents' snapshots and then applying the block's transactions in order.
//! Parent and child links are block IDs into a single ID-keyed table owned
//! by [`Dag`], so there are no reference cycles.

pub mod dag;
pub mod error;
pub mod utxo;

pub use dag::{Dag, DagSummary, LedgerNode};
pub use error::{LedgerError, UtxoError};
pub use utxo::{UtxoKey, UtxoSet};
