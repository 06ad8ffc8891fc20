//! Text renderings of the DAG for operators.

use dagledger_ledger::Dag;
use std::fmt::Write;

/// One line per block in ascending ID order: `id (genesis)` for parentless
/// blocks, otherwise `id -> [p1,p2]`.
pub fn ascii(dag: &Dag) -> String {
    let mut out = String::new();
    for node in dag.nodes() {
        if node.parents().is_empty() {
            let _ = writeln!(out, "{} (genesis)", node.id());
        } else {
            let parents: Vec<&str> = node.parents().iter().map(|p| p.as_str()).collect();
            let _ = writeln!(out, "{} -> [{}]", node.id(), parents.join(","));
        }
    }
    out
}

/// Graphviz description with one `parent -> child` edge per link.
pub fn dot(dag: &Dag) -> String {
    let mut out = String::from("digraph DAG {\n");
    out.push_str("  node [shape=box fontname=\"Monospace\"];\n");
    for node in dag.nodes() {
        for parent in node.parents() {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\";",
                escape(parent.as_str()),
                escape(node.id().as_str())
            );
        }
    }
    out.push_str("}\n");
    out
}

fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagledger_ledger::UtxoSet;
    use dagledger_types::{Block, BlockId, Timestamp};

    fn diamond() -> Dag {
        let mut dag = Dag::new();
        dag.add_genesis(Block::genesis("g", Timestamp::EPOCH), &UtxoSet::new())
            .unwrap();
        for (id, parents) in [("a", vec!["g"]), ("b", vec!["g"]), ("m", vec!["a", "b"])] {
            let parents = parents.into_iter().map(BlockId::from).collect();
            dag.add_block(Block::new(id, parents, Vec::new(), Timestamp::EPOCH))
                .unwrap();
        }
        dag
    }

    #[test]
    fn ascii_lists_blocks_by_id() {
        assert_eq!(
            ascii(&diamond()),
            "a -> [g]\nb -> [g]\ng (genesis)\nm -> [a,b]\n"
        );
    }

    #[test]
    fn dot_has_one_edge_per_link() {
        let out = dot(&diamond());
        assert!(out.starts_with("digraph DAG {\n"));
        assert!(out.ends_with("}\n"));
        assert_eq!(out.matches(" -> ").count(), 4);
        assert!(out.contains("  \"a\" -> \"m\";\n"));
        assert!(out.contains("  \"g\" -> \"b\";\n"));
    }

    #[test]
    fn dot_escapes_quotes() {
        assert_eq!(escape("we\"ird"), "we\\\"ird");
    }

    #[test]
    fn empty_dag_renders_empty() {
        assert_eq!(ascii(&Dag::new()), "");
        assert_eq!(dot(&Dag::new()).matches(" -> ").count(), 0);
    }
}
