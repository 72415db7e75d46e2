//! Undo stack of rendered node groups, one entry per played step.

use super::renderer::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub step: usize,
    pub nodes: Vec<NodeId>,
    /// Every message of the step has been rendered
    pub complete: bool,
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, still empty entry for `step`
    pub fn open(&mut self, step: usize) {
        self.entries.push(HistoryEntry {
            step,
            nodes: Vec::new(),
            complete: false,
        });
    }

    /// Record a node against the most recent entry
    pub fn record(&mut self, node: NodeId) {
        if let Some(entry) = self.entries.last_mut() {
            entry.nodes.push(node);
        }
    }

    pub fn complete_last(&mut self) {
        if let Some(entry) = self.entries.last_mut() {
            entry.complete = true;
        }
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded nodes across all entries
    pub fn node_count(&self) -> usize {
        self.entries.iter().map(|e| e.nodes.len()).sum()
    }
}
