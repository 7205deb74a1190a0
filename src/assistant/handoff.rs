//! Session-local handoff between the generator flow and the editor.

/// Single-read slot for an AI-generated workflow definition.
///
/// The generator flow writes a JSON-encoded definition; the editor takes it
/// exactly once when it opens, clearing the slot. Session-scoped, never
/// persisted.
#[derive(Debug, Default)]
pub struct HandoffSlot {
    pending: Option<String>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a definition, replacing any unread one.
    pub fn put(
        &mut self,
        definition_json: impl Into<String>,
    ) {
        self.pending = Some(definition_json.into());
    }

    /// Reads and clears the slot.
    pub fn take(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
