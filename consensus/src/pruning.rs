//! Branch pruning: keep only the heaviest tip's history.
//!
//! Destructive and irreversible: competing branches are dropped even if they
//! could later have become heavier.

use dagledger_ledger::Dag;
use dagledger_types::BlockId;
use serde::Serialize;

use crate::ancestry::ancestor_set;
use crate::tips::heaviest_tip;

/// Result of a pruning pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PruneOutcome {
    /// The DAG had no tips.
    NothingToPrune,
    Pruned {
        /// Tip whose ancestor set was retained.
        kept_tip: BlockId,
        /// Removed block IDs, ascending.
        removed: Vec<BlockId>,
    },
}

impl PruneOutcome {
    pub fn removed_count(&self) -> usize {
        match self {
            Self::NothingToPrune => 0,
            Self::Pruned { removed, .. } => removed.len(),
        }
    }
}

/// Remove every node outside the heaviest tip's ancestor set.
///
/// The retained set is closed under parents, so the removed set is closed
/// under children and no survivor is left naming a removed parent. Survivors'
/// child lists are rewritten to drop removed nodes.
pub fn prune_branches(dag: &mut Dag) -> PruneOutcome {
    let Some(tip) = heaviest_tip(dag) else {
        tracing::info!("no tips to prune");
        return PruneOutcome::NothingToPrune;
    };

    let kept_tip = tip.id().clone();
    let keep = ancestor_set(dag, tip);
    let removed: Vec<BlockId> = dag.ids().filter(|id| !keep.contains(*id)).cloned().collect();

    for id in &removed {
        dag.remove(id);
    }

    tracing::info!(
        kept_tip = %kept_tip,
        kept = dag.len(),
        removed = removed.len(),
        "pruned branches"
    );
    PruneOutcome::Pruned { kept_tip, removed }
}
