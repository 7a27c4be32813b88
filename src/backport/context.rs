//! Execution context shared by the passes of one chain run.

use crate::ast::NodeId;
use std::collections::{BTreeMap, BTreeSet};

/// Accumulating multimap from message key to node ids.
///
/// A rewrite pass records the ids of the calls it changed under a key; a later
/// pass in the same chain reads them back. Entries are only ever appended.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    messages: BTreeMap<String, BTreeSet<NodeId>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_message_in_set(&mut self, key: &str, id: NodeId) {
        self.messages.entry(key.to_string()).or_default().insert(id);
    }

    /// Ids recorded under `key`; empty when nothing was recorded
    pub fn message_set(&self, key: &str) -> BTreeSet<NodeId> {
        self.messages.get(key).cloned().unwrap_or_default()
    }

    pub fn contains(&self, key: &str, id: NodeId) -> bool {
        self.messages.get(key).map_or(false, |ids| ids.contains(&id))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
