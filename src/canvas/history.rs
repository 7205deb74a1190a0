//! Linear undo history over graph snapshots.
//!
//! Every committed mutation appends one immutable snapshot; undoing moves a
//! cursor back over them. Restores never route through `commit`, so there is
//! no re-entrancy to guard against: the editor applies a restored snapshot
//! directly and only mutating operations record history.

use tracing::debug;

use crate::model::Graph;

/// Ordered snapshot stack plus a cursor.
///
/// Invariant: the entry at the cursor equals the live graph immediately
/// after any committed mutation, and the stack is never empty.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Graph>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Graph) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Graph {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Records `graph` as the newest entry and returns `true`.
    ///
    /// Entries past the cursor are discarded first, the standard
    /// linear-undo discard-redo behavior. A graph structurally equal to the
    /// cursor entry is not recorded and `false` is returned, so
    /// presentation churn never produces spurious entries.
    pub fn commit(
        &mut self,
        graph: &Graph,
    ) -> bool {
        if Self::same(graph, self.current()) {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(graph.clone());
        self.cursor += 1;
        debug!(entries = self.entries.len(), cursor = self.cursor, "history commit");
        true
    }

    /// Moves the cursor back one entry and returns the snapshot to apply,
    /// or `None` at the first entry.
    pub fn undo(&mut self) -> Option<&Graph> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "history undo");
        Some(&self.entries[self.cursor])
    }

    /// Collapses the stack to a single entry.
    pub fn reset(
        &mut self,
        initial: Graph,
    ) {
        self.entries = vec![initial];
        self.cursor = 0;
        debug!("history reset");
    }

    // Deep structural comparison over the serialized form; serde_json
    // values compare key-order independently.
    fn same(
        a: &Graph,
        b: &Graph,
    ) -> bool {
        serde_json::to_value(a).ok() == serde_json::to_value(b).ok()
    }
}
