//! Branch heads.

use dagledger_ledger::{Dag, LedgerNode};

/// All nodes without children, in ascending block ID order.
pub fn tips(dag: &Dag) -> Vec<&LedgerNode> {
    dag.nodes().filter(|n| n.is_tip()).collect()
}

/// The tip with the greatest cumulative weight.
///
/// Ties go to the lexicographically smallest block ID. `None` only when the
/// DAG is empty.
pub fn heaviest_tip(dag: &Dag) -> Option<&LedgerNode> {
    let mut heaviest: Option<&LedgerNode> = None;
    for tip in dag.nodes().filter(|n| n.is_tip()) {
        match heaviest {
            Some(best) if tip.weight() <= best.weight() => {}
            _ => heaviest = Some(tip),
        }
    }
    heaviest
}
