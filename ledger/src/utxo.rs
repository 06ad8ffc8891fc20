//! Unspent transaction outputs.

use dagledger_types::{Transaction, TxId, TxOutput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::UtxoError;

/// Names one discrete output: the transaction that created it and its position.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtxoKey {
    pub tx_id: TxId,
    pub index: u32,
}

impl UtxoKey {
    pub fn new(tx_id: impl Into<TxId>, index: u32) -> Self {
        Self {
            tx_id: tx_id.into(),
            index,
        }
    }
}

impl fmt::Display for UtxoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_id, self.index)
    }
}

/// The spendable outputs as of one point in the DAG.
///
/// `Clone` is a deep copy; two sets never share state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtxoSet {
    outputs: HashMap<UtxoKey, TxOutput>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an output directly, bypassing transaction rules. Returns the
    /// output previously stored under `key`, if any.
    pub fn insert(&mut self, key: UtxoKey, output: TxOutput) -> Option<TxOutput> {
        self.outputs.insert(key, output)
    }

    pub fn get(&self, key: &UtxoKey) -> Option<&TxOutput> {
        self.outputs.get(key)
    }

    pub fn contains(&self, key: &UtxoKey) -> bool {
        self.outputs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UtxoKey, &TxOutput)> {
        self.outputs.iter()
    }

    /// Spend every input of `tx`, then create every output.
    ///
    /// Fails fast. On error the set is left partially mutated (inputs removed
    /// before the failing one stay removed), so callers that need atomicity
    /// apply against a scratch clone.
    pub fn apply_tx(&mut self, tx: &Transaction) -> Result<(), UtxoError> {
        for input in &tx.inputs {
            let key = UtxoKey::new(input.prev_tx.clone(), input.output_index);
            if self.outputs.remove(&key).is_none() {
                return Err(UtxoError::DoubleSpendOrUnknownInput(key));
            }
        }

        for (index, output) in tx.outputs.iter().enumerate() {
            let key = UtxoKey::new(tx.id.clone(), index as u32);
            if self.outputs.contains_key(&key) {
                // only reachable when two transactions share an ID
                return Err(UtxoError::DuplicateOutputKey(key));
            }
            self.outputs.insert(key, output.clone());
        }

        Ok(())
    }

    /// Drop every key that `other` does not also hold.
    pub fn retain_common(&mut self, other: &UtxoSet) {
        self.outputs.retain(|key, _| other.contains(key));
    }

    /// Sum of all unspent values (saturating).
    pub fn total_value(&self) -> u64 {
        self.outputs
            .values()
            .fold(0u64, |acc, o| acc.saturating_add(o.value))
    }

    /// Sum of unspent values addressed to `recipient` (saturating).
    pub fn balance_of(&self, recipient: &str) -> u64 {
        self.outputs
            .values()
            .filter(|o| o.recipient == recipient)
            .fold(0u64, |acc, o| acc.saturating_add(o.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagledger_types::TxInput;

    fn mint(id: &str, value: u64, to: &str) -> Transaction {
        Transaction::mint(id, vec![TxOutput::new(value, to)])
    }

    #[test]
    fn mint_into_empty_set() {
        let mut utxo = UtxoSet::new();
        utxo.apply_tx(&mint("t1", 10, "Alice")).unwrap();

        assert_eq!(utxo.len(), 1);
        let out = utxo.get(&UtxoKey::new("t1", 0)).expect("output present");
        assert_eq!(out.value, 10);
        assert_eq!(out.recipient, "Alice");
    }

    #[test]
    fn spending_twice_is_rejected() {
        let mut utxo = UtxoSet::new();
        utxo.insert(UtxoKey::new("t0", 0), TxOutput::new(5, "Bob"));

        let tx1 = Transaction::new("t1", vec![TxInput::new("t0", 0)], Vec::new());
        utxo.apply_tx(&tx1).unwrap();

        let tx2 = Transaction::new("t2", vec![TxInput::new("t0", 0)], Vec::new());
        assert_eq!(
            utxo.apply_tx(&tx2),
            Err(UtxoError::DoubleSpendOrUnknownInput(UtxoKey::new("t0", 0)))
        );
    }

    #[test]
    fn unknown_input_leaves_earlier_inputs_spent() {
        let mut utxo = UtxoSet::new();
        utxo.insert(UtxoKey::new("a", 0), TxOutput::new(1, "x"));
        utxo.insert(UtxoKey::new("b", 0), TxOutput::new(2, "y"));

        let tx = Transaction::new(
            "t",
            vec![TxInput::new("a", 0), TxInput::new("missing", 3)],
            vec![TxOutput::new(3, "z")],
        );
        let err = utxo.apply_tx(&tx).unwrap_err();
        assert_eq!(err, UtxoError::DoubleSpendOrUnknownInput(UtxoKey::new("missing", 3)));

        // partial mutation: "a" is gone, "b" untouched, no outputs created
        assert!(!utxo.contains(&UtxoKey::new("a", 0)));
        assert!(utxo.contains(&UtxoKey::new("b", 0)));
        assert!(!utxo.contains(&UtxoKey::new("t", 0)));
    }

    #[test]
    fn same_input_twice_in_one_tx_is_rejected() {
        let mut utxo = UtxoSet::new();
        utxo.insert(UtxoKey::new("a", 0), TxOutput::new(1, "x"));

        let tx = Transaction::new("t", vec![TxInput::new("a", 0), TxInput::new("a", 0)], Vec::new());
        assert!(matches!(
            utxo.apply_tx(&tx),
            Err(UtxoError::DoubleSpendOrUnknownInput(_))
        ));
    }

    #[test]
    fn duplicate_tx_id_is_rejected() {
        let mut utxo = UtxoSet::new();
        utxo.apply_tx(&mint("dup", 1, "x")).unwrap();
        assert_eq!(
            utxo.apply_tx(&mint("dup", 2, "y")),
            Err(UtxoError::DuplicateOutputKey(UtxoKey::new("dup", 0)))
        );
        assert_eq!(utxo.get(&UtxoKey::new("dup", 0)).unwrap().value, 1);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = UtxoSet::new();
        original.apply_tx(&mint("t1", 10, "Alice")).unwrap();
        let mut copy = original.clone();
        copy.apply_tx(&mint("t2", 5, "Bob")).unwrap();

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn retain_common_keeps_intersection() {
        let mut a = UtxoSet::new();
        let mut b = UtxoSet::new();
        a.insert(UtxoKey::new("x", 0), TxOutput::new(1, "p"));
        a.insert(UtxoKey::new("y", 0), TxOutput::new(2, "p"));
        b.insert(UtxoKey::new("y", 0), TxOutput::new(2, "p"));
        b.insert(UtxoKey::new("z", 0), TxOutput::new(3, "p"));

        a.retain_common(&b);
        assert_eq!(a.len(), 1);
        assert!(a.contains(&UtxoKey::new("y", 0)));
    }

    #[test]
    fn balances() {
        let mut utxo = UtxoSet::new();
        utxo.apply_tx(&Transaction::mint(
            "t",
            vec![TxOutput::new(3, "Alice"), TxOutput::new(4, "Bob"), TxOutput::new(5, "Alice")],
        ))
        .unwrap();
        assert_eq!(utxo.total_value(), 12);
        assert_eq!(utxo.balance_of("Alice"), 8);
        assert_eq!(utxo.balance_of("Carol"), 0);
    }
}
