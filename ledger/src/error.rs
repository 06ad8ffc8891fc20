use dagledger_types::{BlockId, TxId};
use thiserror::Error;

use crate::utxo::UtxoKey;

/// Failure while applying a single transaction to a UTXO set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UtxoError {
    #[error("input not found or already spent: {0}")]
    DoubleSpendOrUnknownInput(UtxoKey),

    #[error("duplicate output key: {0}")]
    DuplicateOutputKey(UtxoKey),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("genesis block {block} must have no parents")]
    GenesisHasParents { block: BlockId },

    #[error("parent {0} not found")]
    ParentNotFound(BlockId),

    #[error("block {block} has invalid tx {tx}: {source}")]
    InvalidBlockTransaction {
        block: BlockId,
        tx: TxId,
        #[source]
        source: UtxoError,
    },

    #[error("block {0} already exists")]
    DuplicateBlock(BlockId),
}
