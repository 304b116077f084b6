use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{CheckState, CompactHashMap, OptionKey};

/// Option key → tri-state map. Sparse: a missing key reads as `Unchecked`.
///
/// The map sits behind an `Arc`, so [`StateStore::snapshot`] is O(1) and a
/// snapshot taken before a propagation keeps its contents after the commit.
/// Only the propagator writes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStore {
    states: Arc<CompactHashMap<OptionKey, CheckState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored state, defaulting to `Unchecked`.
    pub fn get(&self, key: &OptionKey) -> CheckState {
        self.stored(key).unwrap_or_default()
    }

    /// Stored state without the default, for callers that care about absence.
    pub fn stored(&self, key: &OptionKey) -> Option<CheckState> {
        self.states.get(key).copied()
    }

    pub fn contains(&self, key: &OptionKey) -> bool {
        self.states.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, CheckState)> {
        self.states.iter().map(|(k, v)| (k, *v))
    }

    pub fn snapshot(&self) -> StateStore {
        self.clone()
    }

    pub(crate) fn begin(&self) -> StoreTxn {
        StoreTxn {
            base: self.snapshot(),
            overlay: CompactHashMap::default(),
            changes: Vec::new(),
        }
    }

    /// Commit staged writes. Copies the map only if a snapshot still shares it.
    pub(crate) fn commit(&mut self, txn: StoreTxn) -> ChangeSet {
        let StoreTxn { base, changes, .. } = txn;
        drop(base);
        if !changes.is_empty() {
            let states = Arc::make_mut(&mut self.states);
            for change in &changes {
                states.insert(change.key.clone(), change.state);
            }
        }
        ChangeSet { changes }
    }
}

/// Writes staged by one propagation.
///
/// Reads see this propagation's own writes first, then the store as it was
/// when the propagation began.
#[derive(Debug)]
pub(crate) struct StoreTxn {
    base: StateStore,
    overlay: CompactHashMap<OptionKey, CheckState>,
    changes: Vec<StateChange>,
}

impl StoreTxn {
    pub(crate) fn get(&self, key: &OptionKey) -> CheckState {
        self.overlay
            .get(key)
            .copied()
            .unwrap_or_else(|| self.base.get(key))
    }

    pub(crate) fn set(&mut self, key: OptionKey, state: CheckState) {
        if self.overlay.insert(key.clone(), state).is_some() {
            if let Some(change) = self.changes.iter_mut().find(|c| c.key == key) {
                change.state = state;
                return;
            }
        }
        self.changes.push(StateChange { key, state });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub key: OptionKey,
    pub state: CheckState,
}

/// Ordered writes made by a single propagation, for re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: Vec<StateChange>,
}

impl ChangeSet {
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateChange> {
        self.changes.iter()
    }

    pub fn get(&self, key: &OptionKey) -> Option<CheckState> {
        self.changes.iter().find(|c| &c.key == key).map(|c| c.state)
    }

    pub fn extend(&mut self, other: ChangeSet) {
        for change in other.changes {
            match self.changes.iter_mut().find(|c| c.key == change.key) {
                Some(existing) => existing.state = change.state,
                None => self.changes.push(change),
            }
        }
    }
}
