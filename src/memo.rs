use std::collections::HashMap;

use crate::signal::Signal;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub gate: String,
    pub inputs: Vec<Signal>,
}

impl MemoKey {
    pub fn new(gate: impl Into<String>, inputs: Vec<Signal>) -> Self {
        MemoKey {
            gate: gate.into(),
            inputs,
        }
    }
}

/// Steady-state outputs of composite gates, keyed by input tuple.
///
/// Append-only: gate definitions never change once registered, so an entry
/// is never recomputed or invalidated.
#[derive(Clone, Debug, Default)]
pub struct MemoTable {
    entries: HashMap<MemoKey, Signal>,
    hits: u64,
    misses: u64,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&mut self, key: &MemoKey) -> Option<Signal> {
        let found = self.entries.get(key).copied();
        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    pub fn get(&self, key: &MemoKey) -> Option<Signal> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: MemoKey, value: Signal) -> Signal {
        *self.entries.entry(key).or_insert(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn entries_for(&self, gate: &str) -> usize {
        self.entries.keys().filter(|key| key.gate == gate).count()
    }
}
