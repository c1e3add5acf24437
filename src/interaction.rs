use egui::{CursorIcon, Pos2, Vec2};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::{
    editor::Editor,
    error::Rejection,
    events::{Event, PayloadVertexHoverEnter, PayloadVertexHoverLeave},
    handlers::Handlers,
};

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Shift,
    Ctrl,
    Meta,
    Other,
}

impl Key {
    fn is_control(self) -> bool {
        matches!(self, Self::Ctrl | Self::Meta)
    }
}

/// Input in widget local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove(Pos2),
    PointerDown(Pos2),
    PointerUp(Pos2),
    /// Pointer left the canvas.
    PointerLeave,
    /// Secondary click.
    ContextMenu(Pos2),
    KeyDown(Key),
    KeyUp(Key),
    /// New canvas size.
    Resize(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Vertex(NodeIndex),
    Edge(EdgeIndex),
}

/// Edit waiting for user text. Resolved with [`Editor::submit_edit`] or
/// [`Editor::cancel_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub target: EditTarget,
    pub prompt: String,
    pub input: String,
}

/// Pointer, keyboard and hover state of the editor.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub mouse_down: bool,

    pub ctrl_pressed: bool,
    /// Ctrl was held when the button went down.
    pub ctrl_dragged: bool,

    pub shift_pressed: bool,
    /// Shift was held when the button went down.
    pub shift_dragged: bool,

    /// Vertex under the pointer. Also the source of drags.
    pub hovered_vertex: Option<NodeIndex>,
    /// Edge under the pointer, only tracked while no vertex is hovered.
    pub hovered_edge: Option<EdgeIndex>,
    /// Vertex under the pointer during a ctrl drag.
    pub drag_target: Option<NodeIndex>,

    /// Line from the drag source to the pointer during a ctrl drag.
    pub rubber_band: Option<[Pos2; 2]>,

    pub cursor: CursorIcon,

    pub pending_edit: Option<EditRequest>,
}

impl InteractionState {
    pub(crate) fn forget_vertex(&mut self, idx: NodeIndex) {
        if self.hovered_vertex == Some(idx) {
            self.hovered_vertex = None;
            self.rubber_band = None;
        }
        if self.drag_target == Some(idx) {
            self.drag_target = None;
        }
        if self
            .pending_edit
            .as_ref()
            .is_some_and(|r| r.target == EditTarget::Vertex(idx))
        {
            self.pending_edit = None;
        }
    }

    pub(crate) fn forget_edge(&mut self, idx: EdgeIndex) {
        if self.hovered_edge == Some(idx) {
            self.hovered_edge = None;
        }
        if self
            .pending_edit
            .as_ref()
            .is_some_and(|r| r.target == EditTarget::Edge(idx))
        {
            self.pending_edit = None;
        }
    }

    /// Drops every reference to graph elements, keeping modifier keys and cursor.
    pub(crate) fn clear_targets(&mut self) {
        self.mouse_down = false;
        self.ctrl_dragged = false;
        self.shift_dragged = false;
        self.hovered_vertex = None;
        self.hovered_edge = None;
        self.drag_target = None;
        self.rubber_band = None;
        self.pending_edit = None;
    }
}

impl<V: Default, E: Default, H: Handlers<V, E>> Editor<V, E, H> {
    /// Feeds one input event through the state machine.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove(p) => self.pointer_move(p),
            InputEvent::PointerDown(p) => self.pointer_down(p),
            InputEvent::PointerUp(p) => self.pointer_up(p),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::ContextMenu(p) => {
                self.context_menu(p);
                self.state.mouse_down = false;
            }
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::Resize(size) => {
                self.graph.set_size(size);
                self.graph.request_redraw();
            }
        }
    }

    /// Runs the pending edit with the collected input.
    pub fn submit_edit(&mut self) -> Result<(), Rejection> {
        let Some(request) = self.state.pending_edit.take() else {
            return Err(Rejection::NotFound);
        };

        match request.target {
            EditTarget::Vertex(idx) => self.try_edit_vertex(idx, &request.input),
            EditTarget::Edge(idx) => self.try_edit_edge(idx, &request.input),
        }
    }

    /// Drops the pending edit without asking any handler.
    pub fn cancel_edit(&mut self) {
        self.state.pending_edit = None;
    }

    fn pointer_move(&mut self, p: Pos2) {
        if !self.state.mouse_down {
            self.check_hovered(p);
            return;
        }

        if self.state.ctrl_dragged && !self.state.shift_dragged {
            self.ctrl_drag_to(p);
        } else if self.state.shift_dragged {
            self.delete_at(p);
        } else {
            self.drag_to(p);
        }
    }

    fn pointer_down(&mut self, p: Pos2) {
        self.check_hovered(p);

        self.state.ctrl_dragged = self.state.ctrl_pressed;
        self.state.shift_dragged = self.state.shift_pressed;
        self.state.mouse_down = true;

        if self.state.shift_pressed {
            self.delete_at(p);
        } else if let Some(idx) = self.state.hovered_vertex {
            self.set_vertex_selected(idx, true);
        }
    }

    fn pointer_up(&mut self, p: Pos2) {
        if let Some(idx) = self.state.hovered_vertex {
            self.set_vertex_selected(idx, false);
        }

        self.state.ctrl_dragged = false;
        self.state.shift_dragged = false;
        self.state.mouse_down = false;

        self.release_drag();
        self.check_hovered(p);
    }

    /// Drops hover highlights. A drag in progress keeps its source and target.
    fn pointer_leave(&mut self) {
        if self.state.mouse_down {
            return;
        }

        if let Some(idx) = self.state.hovered_vertex.take() {
            self.set_vertex_hovered(idx, false);
            self.publish(Event::VertexHoverLeave(PayloadVertexHoverLeave { id: idx.index() }));
            self.graph.request_redraw();
        }
        if let Some(idx) = self.state.hovered_edge.take() {
            self.set_edge_hovered(idx, false);
            self.graph.request_redraw();
        }
    }

    /// Opens an edit for the element under `p`, or asks for a new vertex on empty space.
    fn context_menu(&mut self, p: Pos2) {
        if let Some((_, idx)) = self.graph.vertex_at_point(p, None) {
            self.open_edit(EditTarget::Vertex(idx));
            return;
        }
        if let Some((_, idx)) =
            self.graph
                .edge_at_point(p, self.settings.edge_hit_threshold, None)
        {
            self.open_edit(EditTarget::Edge(idx));
            return;
        }

        let _ = self.try_add_vertex(p);
    }

    fn open_edit(&mut self, target: EditTarget) {
        let prompt = match target {
            EditTarget::Vertex(_) => self.settings.vertex_edit_prompt.clone(),
            EditTarget::Edge(_) => self.settings.edge_edit_prompt.clone(),
        };

        self.state.pending_edit = Some(EditRequest {
            target,
            prompt,
            input: String::new(),
        });
        self.graph.request_redraw();
    }

    fn key_down(&mut self, key: Key) {
        if key == Key::Shift {
            self.state.shift_pressed = true;
            self.state.cursor = CursorIcon::NotAllowed;
        } else if key.is_control() {
            self.state.ctrl_pressed = true;
            self.state.cursor = CursorIcon::Crosshair;
        }
    }

    fn key_up(&mut self, key: Key) {
        if key.is_control() {
            self.state.ctrl_pressed = false;
            self.state.cursor = CursorIcon::Default;
        } else if key == Key::Shift {
            self.state.shift_pressed = false;
            self.state.cursor = CursorIcon::Default;
        }
    }

    fn drag_to(&mut self, p: Pos2) {
        if let Some(idx) = self.state.hovered_vertex {
            let _ = self.try_move_vertex(idx, p);
        }
    }

    fn ctrl_drag_to(&mut self, p: Pos2) {
        let Some(source) = self.state.hovered_vertex else {
            return;
        };
        let Some(center) = self.graph.vertex(source).map(|v| v.center()) else {
            return;
        };

        self.graph.request_redraw();
        self.state.rubber_band = Some([center, p]);

        let prev = self.state.drag_target;
        self.state.drag_target = self.update_hovered_vertex(prev, p, Some(source));
    }

    fn release_drag(&mut self) {
        if let Some(target) = self.state.drag_target.take() {
            if let Some(source) = self.state.hovered_vertex {
                let _ = self.try_add_edge(source, target);
            }
            self.set_vertex_hovered(target, false);
        }

        if self.state.rubber_band.take().is_some() {
            self.graph.request_redraw();
        }
    }

    /// Removes the vertex under `p`, or the edge under `p` when no vertex is there.
    fn delete_at(&mut self, p: Pos2) {
        if let Some((i, _)) = self.graph.vertex_at_point(p, None) {
            let _ = self.try_remove_vertex(i);
            return;
        }
        if let Some((i, _)) = self
            .graph
            .edge_at_point(p, self.settings.edge_hit_threshold, None)
        {
            let _ = self.try_remove_edge(i);
        }
    }

    fn check_hovered(&mut self, p: Pos2) {
        let prev = self.state.hovered_vertex;
        self.state.hovered_vertex = self.update_hovered_vertex(prev, p, None);

        if self.state.hovered_vertex.is_some() {
            if let Some(edge) = self.state.hovered_edge.take() {
                self.set_edge_hovered(edge, false);
                self.graph.request_redraw();
            }
        } else {
            self.update_hovered_edge(p);
        }
    }

    /// Recomputes the vertex under `p`. A newly hovered vertex moves to the front.
    fn update_hovered_vertex(
        &mut self,
        prev: Option<NodeIndex>,
        p: Pos2,
        except: Option<NodeIndex>,
    ) -> Option<NodeIndex> {
        let found = self.graph.vertex_at_point(p, except);
        let curr = found.map(|(_, idx)| idx);
        if curr == prev {
            return curr;
        }

        if let Some(prev) = prev {
            self.set_vertex_hovered(prev, false);
            self.publish(Event::VertexHoverLeave(PayloadVertexHoverLeave {
                id: prev.index(),
            }));
        }
        if let Some((i, idx)) = found {
            self.set_vertex_hovered(idx, true);
            self.graph.bring_vertex_to_front(i);
            self.publish(Event::VertexHoverEnter(PayloadVertexHoverEnter {
                id: idx.index(),
            }));
        }
        self.graph.request_redraw();

        curr
    }

    fn update_hovered_edge(&mut self, p: Pos2) {
        let prev = self.state.hovered_edge;
        let found = self
            .graph
            .edge_at_point(p, self.settings.edge_hit_threshold, None);
        let curr = found.map(|(_, idx)| idx);
        if curr == prev {
            return;
        }

        if let Some(prev) = prev {
            self.set_edge_hovered(prev, false);
        }
        if let Some((i, idx)) = found {
            self.set_edge_hovered(idx, true);
            self.graph.bring_edge_to_front(i);
        }
        self.state.hovered_edge = curr;
        self.graph.request_redraw();
    }

    fn set_vertex_hovered(&mut self, idx: NodeIndex, hovered: bool) {
        if let Some(v) = self.graph.vertex_mut(idx) {
            v.set_hovered(hovered);
        }
    }

    fn set_vertex_selected(&mut self, idx: NodeIndex, selected: bool) {
        if let Some(v) = self.graph.vertex_mut(idx) {
            v.set_selected(selected);
            self.graph.request_redraw();
        }
    }

    fn set_edge_hovered(&mut self, idx: EdgeIndex, hovered: bool) {
        if let Some(e) = self.graph.edge_mut(idx) {
            e.set_hovered(hovered);
        }
    }
}
