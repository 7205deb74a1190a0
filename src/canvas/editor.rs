//! The workflow canvas editor.
//!
//! Owns the live graph, the undo history, the session node-id counter, and
//! the ephemeral selection. Every mutating operation commits exactly one
//! history entry; undo and reset restore a snapshot without recording one.

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    FlowcanvasError, Result,
    assistant::Proposal,
    canvas::History,
    model::{Edge, EdgeId, Graph, Node, NodeId, NodeKind, Position},
    registry,
};

/// One editing session over a single workflow graph.
///
/// Mutation is synchronous and single-owner: each operation runs to
/// completion inside one event handler, so no internal locking is needed.
pub struct CanvasEditor {
    graph: Graph,
    initial: Graph,
    history: History,
    /// Session-scoped id counter; monotonically increasing, never reused,
    /// rebased past the highest numeric id on load and reset.
    next_node_id: u64,
    selected: Option<NodeId>,
    /// Server-assigned workflow identity once saved.
    workflow_id: Option<String>,
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasEditor {
    /// Opens an editor over the default `start -> task -> end` graph.
    pub fn new() -> Self {
        Self::from_graph(Graph::starter())
    }

    /// Opens an editor over an existing graph. The canonical theme is
    /// re-applied and the id counter is rebased to `max numeric id + 1`.
    pub fn from_graph(mut graph: Graph) -> Self {
        graph.restyle();
        let next_node_id = graph.max_numeric_id() + 1;
        Self {
            initial: graph.clone(),
            history: History::new(graph.clone()),
            graph,
            next_node_id,
            selected: None,
            workflow_id: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn workflow_id(&self) -> Option<&str> {
        self.workflow_id.as_deref()
    }

    /// Binds this session to a server-assigned workflow id; subsequent
    /// saves update instead of create.
    pub fn bind_workflow(
        &mut self,
        id: impl Into<String>,
    ) {
        self.workflow_id = Some(id.into());
    }

    /// The node currently open in the configuration panel, looked up by id
    /// so it always reflects the latest data.
    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.graph.node(id))
    }

    pub fn select(
        &mut self,
        id: &str,
    ) -> Result<()> {
        if !self.graph.contains_node(id) {
            return Err(FlowcanvasError::Node(format!("node {id} not found")));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Clears the configuration panel reference, as when the canvas
    /// background is clicked.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Adds a node of `kind` at `position` with its registry default data
    /// and canonical style. Returns the fresh session-scoped id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        position: Position,
    ) -> NodeId {
        let id = self.next_node_id.to_string();
        self.next_node_id += 1;
        let node = registry::materialize(id.clone(), kind, position);
        debug!(node = %id, kind = %node.kind, "add node");
        self.graph.nodes.push(node);
        self.history.commit(&self.graph);
        id
    }

    /// Connects two nodes with a default-presentation edge. Self-loops and
    /// duplicate edges are accepted; missing endpoints are not, since this
    /// core has nothing downstream to prune dangling edges.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
    ) -> Result<EdgeId> {
        if !self.graph.contains_node(source) {
            return Err(FlowcanvasError::Edge(format!("source node {source} not found")));
        }
        if !self.graph.contains_node(target) {
            return Err(FlowcanvasError::Edge(format!("target node {target} not found")));
        }
        let edge = Edge::connect(source, target);
        let id = edge.id.clone();
        debug!(edge = %id, %source, %target, "connect");
        self.graph.edges.push(edge);
        self.history.commit(&self.graph);
        Ok(id)
    }

    /// Shallow-merges `patch` into a node's configuration payload. The
    /// selection is by id, so an open panel sees the merged data on its
    /// next read without a second lookup step.
    pub fn update_node_data(
        &mut self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<()> {
        let node = self.graph.node_mut(id).ok_or_else(|| FlowcanvasError::Node(format!("node {id} not found")))?;
        node.data = node.data.merged(&node.kind, patch);
        self.history.commit(&self.graph);
        Ok(())
    }

    /// Moves a node to a new canvas position (end of a drag).
    pub fn move_node(
        &mut self,
        id: &str,
        position: Position,
    ) -> Result<()> {
        let node = self.graph.node_mut(id).ok_or_else(|| FlowcanvasError::Node(format!("node {id} not found")))?;
        node.position = position;
        self.history.commit(&self.graph);
        Ok(())
    }

    /// Removes a node together with its incident edges. A selection
    /// pointing at it is cleared rather than left dangling.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<()> {
        self.graph.remove_node(id).ok_or_else(|| FlowcanvasError::Node(format!("node {id} not found")))?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        debug!(node = %id, "remove node");
        self.history.commit(&self.graph);
        Ok(())
    }

    pub fn remove_edge(
        &mut self,
        id: &str,
    ) -> Result<()> {
        self.graph.remove_edge(id).ok_or_else(|| FlowcanvasError::Edge(format!("edge {id} not found")))?;
        debug!(edge = %id, "remove edge");
        self.history.commit(&self.graph);
        Ok(())
    }

    /// Restores the previous snapshot. Fails when there is nothing left to
    /// undo. The selection is cleared: the selected node may not exist in
    /// the restored graph.
    pub fn undo(&mut self) -> Result<()> {
        let restored = self.history.undo().ok_or_else(|| FlowcanvasError::History("nothing left to undo".to_string()))?;
        self.graph = restored.clone();
        self.selected = None;
        Ok(())
    }

    /// Discards everything back to the graph this session opened with:
    /// single-entry history, selection cleared, id counter rebased
    /// deterministically from the initial graph.
    pub fn reset(&mut self) {
        self.graph = self.initial.clone();
        self.history.reset(self.initial.clone());
        self.next_node_id = self.initial.max_numeric_id() + 1;
        self.selected = None;
        debug!("canvas reset");
    }

    /// Commits an accepted assistant proposal as a single undoable entry.
    /// Rejected proposals carry the unchanged graph and record nothing.
    pub fn apply_proposal(
        &mut self,
        proposal: &Proposal,
    ) {
        if !proposal.accepted {
            return;
        }
        self.graph = proposal.graph.clone();
        // The assistant may have introduced numeric ids of its own.
        self.next_node_id = self.next_node_id.max(self.graph.max_numeric_id() + 1);
        if let Some(selected) = self.selected.as_deref()
            && !self.graph.contains_node(selected)
        {
            self.selected = None;
        }
        self.history.commit(&self.graph);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::model::NodeStyle;

    use super::*;

    fn patch(value: serde_json::Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_cursor_entry_tracks_live_graph() {
        let mut editor = CanvasEditor::new();
        let id = editor.add_node(NodeKind::Delay, Position::new(50.0, 50.0));
        assert_eq!(editor.history().current(), editor.graph());

        editor.connect(&id, "3").unwrap();
        assert_eq!(editor.history().current(), editor.graph());

        editor.update_node_data(&id, patch(json!({"duration": 30}))).unwrap();
        assert_eq!(editor.history().current(), editor.graph());

        editor.remove_node(&id).unwrap();
        assert_eq!(editor.history().current(), editor.graph());
    }

    #[test]
    fn test_add_and_connect_then_undo_restores_starter() {
        let mut editor = CanvasEditor::new();
        let original = editor.graph().clone();

        let id = editor.add_node(NodeKind::SendEmail, Position::new(100.0, 100.0));
        assert_eq!(id, "4");
        editor.connect(&id, "3").unwrap();

        assert_eq!(editor.graph().nodes.len(), 4);
        assert_eq!(editor.graph().edges.len(), 3);
        let added = editor.graph().node(&id).unwrap();
        assert_eq!(added.style, NodeStyle::for_kind(&NodeKind::SendEmail));

        editor.undo().unwrap();
        editor.undo().unwrap();
        assert_eq!(editor.graph(), &original);
    }

    #[test]
    fn test_k_undos_reverse_k_operations() {
        let mut editor = CanvasEditor::new();
        let before = editor.graph().clone();

        let a = editor.add_node(NodeKind::Delay, Position::new(10.0, 10.0));
        let b = editor.add_node(NodeKind::Condition, Position::new(20.0, 20.0));
        editor.connect(&a, &b).unwrap();

        for _ in 0..3 {
            editor.undo().unwrap();
        }
        assert_eq!(editor.graph(), &before);
    }

    #[test]
    fn test_update_label_then_undo_restores_original() {
        let mut editor = CanvasEditor::new();
        let original_label = editor.graph().node("2").unwrap().label().to_string();

        editor.update_node_data("2", patch(json!({"label": "Reviewed"}))).unwrap();
        assert_eq!(editor.graph().node("2").unwrap().label(), "Reviewed");

        editor.undo().unwrap();
        assert_eq!(editor.graph().node("2").unwrap().label(), original_label);
    }

    #[test]
    fn test_new_commit_after_undo_discards_redo() {
        let mut editor = CanvasEditor::new();
        editor.add_node(NodeKind::Delay, Position::default());
        editor.add_node(NodeKind::Condition, Position::default());
        assert_eq!(editor.history().len(), 3);

        editor.undo().unwrap();
        editor.add_node(NodeKind::SendEmail, Position::default());
        assert_eq!(editor.history().len(), 3);
        assert_eq!(editor.history().cursor(), 2);
        // the undone condition node is gone for good
        assert!(editor.graph().nodes.iter().all(|n| n.kind != NodeKind::Condition));
    }

    #[test]
    fn test_undo_past_beginning_reports_failure() {
        let mut editor = CanvasEditor::new();
        assert!(matches!(editor.undo(), Err(FlowcanvasError::History(_))));
    }

    #[test]
    fn test_reset_yields_single_entry_initial_history() {
        let mut editor = CanvasEditor::new();
        editor.add_node(NodeKind::Delay, Position::default());
        editor.add_node(NodeKind::SendEmail, Position::default());
        editor.select("2").unwrap();

        editor.reset();
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.graph(), &Graph::starter());
        assert!(editor.selected_node().is_none());
        // counter rebases deterministically
        assert_eq!(editor.add_node(NodeKind::Delay, Position::default()), "4");
    }

    #[test]
    fn test_node_ids_are_not_reused_after_delete() {
        let mut editor = CanvasEditor::new();
        let first = editor.add_node(NodeKind::Delay, Position::default());
        editor.remove_node(&first).unwrap();
        let second = editor.add_node(NodeKind::Delay, Position::default());
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_selected_node_clears_panel() {
        let mut editor = CanvasEditor::new();
        editor.select("2").unwrap();
        assert!(editor.selected_node().is_some());
        editor.remove_node("2").unwrap();
        assert!(editor.selected_node().is_none());
    }

    #[test]
    fn test_selection_reads_through_to_merged_data() {
        let mut editor = CanvasEditor::new();
        editor.select("2").unwrap();
        editor.update_node_data("2", patch(json!({"label": "Reviewed"}))).unwrap();
        assert_eq!(editor.selected_node().unwrap().label(), "Reviewed");
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut editor = CanvasEditor::new();
        editor.remove_node("2").unwrap();
        assert!(editor.graph().edges.is_empty());
    }

    #[test]
    fn test_self_loops_and_duplicates_are_accepted() {
        let mut editor = CanvasEditor::new();
        editor.connect("2", "2").unwrap();
        editor.connect("1", "2").unwrap();
        assert_eq!(editor.graph().edges.len(), 4);
    }

    #[test]
    fn test_connect_to_missing_node_fails() {
        let mut editor = CanvasEditor::new();
        assert!(matches!(editor.connect("1", "99"), Err(FlowcanvasError::Edge(_))));
        // the failed connect must not record history
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_move_to_same_position_records_nothing() {
        let mut editor = CanvasEditor::new();
        let position = editor.graph().node("2").unwrap().position;
        editor.move_node("2", position).unwrap();
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_loaded_graph_rebases_counter() {
        let mut graph = Graph::starter();
        graph.nodes.push(registry::materialize("17", NodeKind::Delay, Position::default()));
        let mut editor = CanvasEditor::from_graph(graph);
        assert_eq!(editor.add_node(NodeKind::Condition, Position::default()), "18");
    }
}
