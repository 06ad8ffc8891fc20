use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("ledger error: {0}")]
    Ledger(#[from] dagledger_ledger::LedgerError),

    #[error("config error: {0}")]
    Config(String),

    #[error("DAG has no genesis block")]
    NoGenesis,

    #[error("proposer task failed: {0}")]
    Join(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
