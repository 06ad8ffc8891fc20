use proptest::prelude::*;
use std::collections::HashSet;

use dagledger_consensus::{ancestor_set, finalized, heaviest_tip, prune_branches, tips, PruneOutcome};
use dagledger_ledger::{Dag, UtxoSet};
use dagledger_types::{Block, BlockId, Timestamp, Transaction, TxOutput};

/// Each entry adds one block: parent picks (indices into earlier blocks) and
/// a number of minting transactions.
fn shape_strategy() -> impl Strategy<Value = Vec<(Vec<usize>, usize)>> {
    prop::collection::vec((prop::collection::vec(0usize..64, 1..4), 0usize..3), 0..30)
}

fn build(shape: &[(Vec<usize>, usize)]) -> Dag {
    let mut dag = Dag::new();
    dag.add_genesis(Block::genesis("g", Timestamp::EPOCH), &UtxoSet::new())
        .unwrap();
    let mut ids = vec![BlockId::from("g")];

    for (n, (picks, mints)) in shape.iter().enumerate() {
        let mut parents = Vec::new();
        for pick in picks {
            let pid = ids[pick % ids.len()].clone();
            if !parents.contains(&pid) {
                parents.push(pid);
            }
        }
        let txs = (0..*mints)
            .map(|j| Transaction::mint(format!("t{n}-{j}"), vec![TxOutput::new(1, "m")]))
            .collect();
        let id = BlockId::new(format!("b{n:02}"));
        dag.add_block(Block::new(id.clone(), parents, txs, Timestamp::EPOCH))
            .unwrap();
        ids.push(id);
    }
    dag
}

fn all_ids(dag: &Dag) -> HashSet<BlockId> {
    dag.ids().cloned().collect()
}

proptest! {
    /// An ancestor set contains its node and every parent of every member.
    #[test]
    fn ancestor_sets_are_closed(shape in shape_strategy()) {
        let dag = build(&shape);
        for node in dag.nodes() {
            let set = ancestor_set(&dag, node);
            prop_assert!(set.contains(node.id()));
            for member in &set {
                for parent in dag.get(member).unwrap().parents() {
                    prop_assert!(set.contains(parent));
                }
            }
        }
    }

    /// Finalized is exactly the set of blocks in more than half the tips' histories.
    #[test]
    fn finality_is_strict_majority(shape in shape_strategy()) {
        let dag = build(&shape);
        let tip_sets: Vec<_> = tips(&dag).into_iter().map(|t| ancestor_set(&dag, t)).collect();
        let expected: HashSet<BlockId> = dag
            .ids()
            .filter(|id| 2 * tip_sets.iter().filter(|s| s.contains(*id)).count() > tip_sets.len())
            .cloned()
            .collect();
        let actual: HashSet<BlockId> = finalized(&dag).into_iter().collect();
        prop_assert_eq!(actual, expected);
    }

    /// The heaviest tip is a tip with maximum weight and the smallest ID among those.
    #[test]
    fn heaviest_tip_is_maximal(shape in shape_strategy()) {
        let dag = build(&shape);
        let best = heaviest_tip(&dag).unwrap();
        for tip in tips(&dag) {
            prop_assert!(tip.weight() <= best.weight());
            if tip.weight() == best.weight() {
                prop_assert!(best.id() <= tip.id());
            }
        }
    }

    /// Pruning keeps exactly the heaviest tip's history, leaves one tip, and
    /// a second pass changes nothing.
    #[test]
    fn pruning_is_idempotent(shape in shape_strategy()) {
        let mut dag = build(&shape);
        let tip = heaviest_tip(&dag).unwrap();
        let expected = ancestor_set(&dag, tip);

        prune_branches(&mut dag);
        prop_assert_eq!(all_ids(&dag), expected.clone());
        prop_assert_eq!(tips(&dag).len(), 1);
        for node in dag.nodes() {
            for child in node.children() {
                prop_assert!(dag.contains(child));
            }
        }

        let second = prune_branches(&mut dag);
        prop_assert!(
            matches!(second, PruneOutcome::Pruned { ref removed, .. } if removed.is_empty()),
            "second prune removed nodes: {:?}",
            second
        );
        prop_assert_eq!(all_ids(&dag), expected);
    }
}
