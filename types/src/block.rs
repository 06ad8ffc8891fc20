//! Block and block identifier types for the DAG.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::Timestamp;
use crate::transaction::Transaction;

/// Identifies a block in the DAG.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A block may reference any number of parents; only genesis has none.
///
/// Once built, a block's identity and contents are never changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// Parent block IDs, in the order the proposer declared them.
    pub parents: Vec<BlockId>,
    /// Included transactions, applied in order.
    pub transactions: Vec<Transaction>,
    pub timestamp: Timestamp,
}

impl Block {
    pub fn new(
        id: impl Into<BlockId>,
        parents: Vec<BlockId>,
        transactions: Vec<Transaction>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            parents,
            transactions,
            timestamp,
        }
    }

    /// A parentless, empty block.
    pub fn genesis(id: impl Into<BlockId>, timestamp: Timestamp) -> Self {
        Self::new(id, Vec::new(), Vec::new(), timestamp)
    }

    pub fn is_genesis(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn tx_count(&self) -> u64 {
        self.transactions.len() as u64
    }
}
