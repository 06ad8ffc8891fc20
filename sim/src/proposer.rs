//! A single block proposer.

use dagledger_consensus::heaviest_tip;
use dagledger_ledger::Dag;
use dagledger_types::{Block, BlockId, Timestamp, Transaction, TxOutput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::SimError;

/// Builds blocks that extend the heaviest tip with one minting transaction.
pub struct Proposer {
    index: usize,
    name: String,
    seq: u64,
    max_mint_value: u64,
    rng: StdRng,
}

impl Proposer {
    /// `seed` is the run's base seed; this proposer draws from `seed + index`.
    pub fn new(index: usize, seed: Option<u64>, max_mint_value: u64) -> Self {
        let rng = match seed {
            Some(base) => StdRng::seed_from_u64(base.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        };
        Self {
            index,
            name: format!("V{index}"),
            seq: 0,
            max_mint_value: max_mint_value.max(1),
            rng,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Recipient name of this proposer's minted outputs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extend the heaviest tip (genesis on an empty tip set) with a new block.
    ///
    /// The caller holds the DAG exclusively for the whole call, so the tip
    /// read here is still a tip when the block is inserted.
    pub fn propose(&mut self, dag: &mut Dag) -> Result<BlockId, SimError> {
        let parent = match heaviest_tip(dag) {
            Some(tip) => tip.id().clone(),
            None => dag.genesis_id().cloned().ok_or(SimError::NoGenesis)?,
        };

        let now = Timestamp::now();
        self.seq += 1;
        let suffix = format!("v{}-{}-{}", self.index, now.as_millis(), self.seq);

        let value = self.rng.gen_range(1..=self.max_mint_value);
        let tx = Transaction::mint(
            format!("tx-{suffix}"),
            vec![TxOutput::new(value, self.name.clone())],
        );
        let block = Block::new(format!("block-{suffix}"), vec![parent], vec![tx], now);

        let node = dag.add_block(block)?;
        Ok(node.id().clone())
    }

    /// Random pause drawn from `range_ms`.
    pub fn pause(&mut self, range_ms: RangeInclusive<u64>) -> Duration {
        if range_ms.is_empty() {
            return Duration::from_millis(*range_ms.start());
        }
        Duration::from_millis(self.rng.gen_range(range_ms))
    }
}
