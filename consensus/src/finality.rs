//! Heuristic finality: a block is final once a strict majority of the current
//! tips carry it in their history.
//!
//! Finality is re-derived from scratch on every call. A block can lose it
//! again when new tips appear that do not descend from it.

use dagledger_ledger::Dag;
use dagledger_types::BlockId;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::ancestry::ancestor_set;
use crate::tips::tips;

/// How many tips confirm each block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TipSupport {
    /// Number of tips counted.
    pub tips: usize,
    /// Block ID → number of tips whose ancestor set contains it.
    pub counts: BTreeMap<BlockId, usize>,
}

impl TipSupport {
    /// Strict majority: more than `tips / 2` (integer division).
    pub fn is_final(&self, id: &BlockId) -> bool {
        self.counts
            .get(id)
            .is_some_and(|&count| count > self.tips / 2)
    }

    /// All final block IDs, ascending.
    pub fn finalized(&self) -> Vec<BlockId> {
        self.counts
            .iter()
            .filter(|&(_, &count)| count > self.tips / 2)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

pub fn tip_support(dag: &Dag) -> TipSupport {
    let tips = tips(dag);
    let mut counts = BTreeMap::new();
    for tip in &tips {
        for id in ancestor_set(dag, tip) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    TipSupport {
        tips: tips.len(),
        counts,
    }
}

/// IDs contained in the ancestor sets of strictly more than half the tips,
/// ascending. Empty when the DAG has no tips.
pub fn finalized(dag: &Dag) -> Vec<BlockId> {
    tip_support(dag).finalized()
}
