//! Ancestor-set traversal.

use dagledger_ledger::{Dag, LedgerNode};
use dagledger_types::BlockId;
use std::collections::HashSet;

/// IDs of every block reachable from `node` through parent links, `node` included.
///
/// Depth-first with an explicit stack and a visited set, so shared ancestors
/// reached along several paths are expanded once and deep histories do not
/// grow the call stack. Parents no longer in `dag` are recorded but not
/// expanded.
pub fn ancestor_set(dag: &Dag, node: &LedgerNode) -> HashSet<BlockId> {
    let mut seen = HashSet::new();
    let mut stack = vec![node.id().clone()];

    while let Some(id) = stack.pop() {
        if seen.contains(&id) {
            continue;
        }
        if let Some(current) = dag.get(&id) {
            stack.extend(
                current
                    .parents()
                    .iter()
                    .filter(|p| !seen.contains(*p))
                    .cloned(),
            );
        }
        seen.insert(id);
    }

    seen
}
