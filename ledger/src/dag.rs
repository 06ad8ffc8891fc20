//! The DAG store, sole owner of every ledger node.
//!
//! Nodes live in one table keyed by block ID; parent and child links are ID
//! lists into that table. Iteration is in ascending block ID order.

use dagledger_types::{Block, BlockId};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::LedgerError;
use crate::utxo::UtxoSet;

/// A block plus its resolved links, cumulative weight and UTXO snapshot.
#[derive(Clone, Debug)]
pub struct LedgerNode {
    block: Block,
    parents: Vec<BlockId>,
    children: Vec<BlockId>,
    weight: u64,
    utxo: UtxoSet,
}

impl LedgerNode {
    pub fn id(&self) -> &BlockId {
        &self.block.id
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn parents(&self) -> &[BlockId] {
        &self.parents
    }

    /// Blocks that name this one as a parent, in attachment order.
    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    /// `max(parent weights) + transaction count`.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Spendable outputs as of this node, after its own transactions.
    pub fn utxo(&self) -> &UtxoSet {
        &self.utxo
    }

    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }
}

/// Headline numbers for a DAG.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DagSummary {
    pub blocks: usize,
    pub tips: usize,
    pub max_weight: u64,
}

#[derive(Debug, Default)]
pub struct Dag {
    nodes: BTreeMap<BlockId, LedgerNode>,
    genesis: Option<BlockId>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the DAG with a parentless block and its starting UTXO set.
    ///
    /// Weight is the block's transaction count; the snapshot is a clone of
    /// `initial_utxo` (the block's own transactions are not applied). Meant
    /// to be called once per store: a second call with the same ID replaces
    /// the node.
    pub fn add_genesis(&mut self, block: Block, initial_utxo: &UtxoSet) -> Result<(), LedgerError> {
        if !block.is_genesis() {
            return Err(LedgerError::GenesisHasParents { block: block.id });
        }

        let id = block.id.clone();
        let node = LedgerNode {
            weight: block.tx_count(),
            block,
            parents: Vec::new(),
            children: Vec::new(),
            utxo: initial_utxo.clone(),
        };
        tracing::debug!(block = %id, "genesis added");
        self.nodes.insert(id.clone(), node);
        self.genesis = Some(id);
        Ok(())
    }

    /// Validate `block` against its parents and link it into the DAG.
    ///
    /// The node's snapshot starts from the intersection of all parent
    /// snapshots (an output stays spendable only if every parent still holds
    /// it), then each transaction is applied in order. Any failure leaves the
    /// store exactly as it was.
    pub fn add_block(&mut self, block: Block) -> Result<&LedgerNode, LedgerError> {
        if self.nodes.contains_key(&block.id) {
            return Err(LedgerError::DuplicateBlock(block.id));
        }

        let mut parents = Vec::with_capacity(block.parents.len());
        for pid in &block.parents {
            let parent = self
                .nodes
                .get(pid)
                .ok_or_else(|| LedgerError::ParentNotFound(pid.clone()))?;
            parents.push(parent);
        }

        let mut utxo = match parents.split_first() {
            Some((first, rest)) => {
                let mut merged = first.utxo.clone();
                for parent in rest {
                    merged.retain_common(&parent.utxo);
                }
                merged
            }
            None => UtxoSet::new(),
        };

        for tx in &block.transactions {
            utxo.apply_tx(tx)
                .map_err(|source| LedgerError::InvalidBlockTransaction {
                    block: block.id.clone(),
                    tx: tx.id.clone(),
                    source,
                })?;
        }

        let weight = parents
            .iter()
            .map(|p| p.weight)
            .max()
            .unwrap_or(0)
            .saturating_add(block.tx_count());

        // validation done, nothing below can fail
        let id = block.id.clone();
        for pid in &block.parents {
            if let Some(parent) = self.nodes.get_mut(pid) {
                if !parent.children.contains(&id) {
                    parent.children.push(id.clone());
                }
            }
        }

        tracing::debug!(
            block = %id,
            parents = block.parents.len(),
            txs = block.transactions.len(),
            weight,
            "block added"
        );

        let node = LedgerNode {
            parents: block.parents.clone(),
            block,
            children: Vec::new(),
            weight,
            utxo,
        };
        let node: &LedgerNode = self.nodes.entry(id).or_insert(node);
        Ok(node)
    }

    /// Delete one node and drop it from each surviving parent's child list.
    ///
    /// Children of the removed node keep naming it as a parent, so callers
    /// remove whole descendant-closed sets (as pruning does).
    pub fn remove(&mut self, id: &BlockId) -> Option<LedgerNode> {
        let node = self.nodes.remove(id)?;
        for pid in &node.parents {
            if let Some(parent) = self.nodes.get_mut(pid) {
                parent.children.retain(|c| c != id);
            }
        }
        if self.genesis.as_ref() == Some(id) {
            self.genesis = None;
        }
        Some(node)
    }

    pub fn get(&self, id: &BlockId) -> Option<&LedgerNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.nodes.contains_key(id)
    }

    /// ID registered by the last [`Dag::add_genesis`], if it is still stored.
    pub fn genesis_id(&self) -> Option<&BlockId> {
        self.genesis.as_ref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.nodes.keys()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &LedgerNode> {
        self.nodes.values()
    }

    pub fn summary(&self) -> DagSummary {
        DagSummary {
            blocks: self.nodes.len(),
            tips: self.nodes.values().filter(|n| n.is_tip()).count(),
            max_weight: self.nodes.values().map(|n| n.weight).max().unwrap_or(0),
        }
    }
}
