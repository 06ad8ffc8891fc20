//! Fundamental types for the block-DAG ledger.
//!
//! This crate defines the plain data shared across every other crate in the
//! workspace: block and transaction identifiers, UTXO-style transactions,
//! multi-parent blocks, and timestamps. It carries no behaviour beyond small
//! constructors and accessors.

pub mod block;
pub mod time;
pub mod transaction;

pub use block::{Block, BlockId};
pub use time::Timestamp;
pub use transaction::{Transaction, TxId, TxInput, TxOutput};
