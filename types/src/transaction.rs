//! UTXO-style transactions.
//!
//! Transactions are unauthenticated value transfers: inputs name previously
//! created outputs by `(transaction ID, output index)`, outputs assign a value
//! to a recipient. Nothing here checks ownership or signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a transaction; together with an output index it names a UTXO.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TxId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TxId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Reference to an output of an earlier transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInput {
    pub prev_tx: TxId,
    pub output_index: u32,
}

impl TxInput {
    pub fn new(prev_tx: impl Into<TxId>, output_index: u32) -> Self {
        Self {
            prev_tx: prev_tx.into(),
            output_index,
        }
    }
}

/// Newly created value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: u64,
    pub recipient: String,
}

impl TxOutput {
    pub fn new(value: u64, recipient: impl Into<String>) -> Self {
        Self {
            value,
            recipient: recipient.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    /// Outputs consumed, in order.
    pub inputs: Vec<TxInput>,
    /// Outputs produced; position in this list is the output index.
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    pub fn new(id: impl Into<TxId>, inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Self {
            id: id.into(),
            inputs,
            outputs,
        }
    }

    /// A transaction that creates value out of nothing.
    pub fn mint(id: impl Into<TxId>, outputs: Vec<TxOutput>) -> Self {
        Self::new(id, Vec::new(), outputs)
    }

    pub fn is_mint(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Sum of all produced output values (saturating).
    pub fn total_output(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.value))
    }
}
