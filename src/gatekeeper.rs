//! Mutations requested by the user. Each one asks the host handler first and commits only
//! when the handler accepts, so a rejected action never leaves the graph half changed.

use egui::Pos2;
use log::debug;
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::{
    editor::Editor,
    elements::Vertex,
    error::Rejection,
    events::{
        Event, PayloadEdgeAdd, PayloadEdgeEdit, PayloadVertexAdd, PayloadVertexEdit,
        PayloadVertexMove,
    },
    handlers::{Handlers, Hook},
};

impl<V: Default, E: Default, H: Handlers<V, E>> Editor<V, E, H> {
    /// Asks `on_add_vertex` and adds a vertex at `pos` with the configured radius.
    pub fn try_add_vertex(&mut self, pos: Pos2) -> Result<NodeIndex, Rejection> {
        let result = self.add_vertex_checked(pos);
        self.report("add vertex", result)
    }

    /// Asks `on_add_edge` and connects `from` with `to`. Loops and parallel edges are refused
    /// before the handler is asked.
    pub fn try_add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<EdgeIndex, Rejection> {
        let result = self.add_edge_checked(from, to);
        self.report("add edge", result)
    }

    /// Asks `on_move_vertex` and moves the vertex. A replaced payload is stored as well.
    pub fn try_move_vertex(&mut self, idx: NodeIndex, pos: Pos2) -> Result<(), Rejection> {
        let result = self.move_vertex_checked(idx, pos);
        self.report("move vertex", result)
    }

    /// Asks `on_edit_vertex` with the user `input`. Keeping the payload still counts as an
    /// edit.
    pub fn try_edit_vertex(&mut self, idx: NodeIndex, input: &str) -> Result<(), Rejection> {
        let result = self.edit_vertex_checked(idx, input);
        self.report("edit vertex", result)
    }

    /// Asks `on_edit_edge` with the user `input`.
    pub fn try_edit_edge(&mut self, idx: EdgeIndex, input: &str) -> Result<(), Rejection> {
        let result = self.edit_edge_checked(idx, input);
        self.report("edit edge", result)
    }

    /// Asks `on_remove_vertex` and removes the vertex at order position `i` with its edges.
    pub fn try_remove_vertex(&mut self, i: usize) -> Result<(), Rejection> {
        let result = self.remove_vertex_checked(i);
        self.report("remove vertex", result)
    }

    /// Asks `on_remove_edge` and removes the edge at order position `i`.
    pub fn try_remove_edge(&mut self, i: usize) -> Result<(), Rejection> {
        let result = self.remove_edge_checked(i);
        self.report("remove edge", result)
    }

    fn add_vertex_checked(&mut self, pos: Pos2) -> Result<NodeIndex, Rejection> {
        let answer = self.handlers.on_add_vertex(pos);
        let payload = match self.decide(Hook::AddVertex, answer)? {
            Some(payload) => {
                self.vertex_check.observe(&payload);
                payload
            }
            None => V::default(),
        };

        let idx = self.graph.add_vertex(Vertex::with_radius(
            pos,
            self.settings.vertex_radius,
            payload,
        ));
        debug!("vertex {} added at {pos:?}", idx.index());
        self.publish(Event::VertexAdd(PayloadVertexAdd {
            id: idx.index(),
            pos: [pos.x, pos.y],
        }));

        Ok(idx)
    }

    fn add_edge_checked(&mut self, from: NodeIndex, to: NodeIndex) -> Result<EdgeIndex, Rejection> {
        if from == to {
            return Err(Rejection::SelfLoop);
        }
        let (Some(begin), Some(end)) = (self.graph.vertex(from), self.graph.vertex(to)) else {
            return Err(Rejection::NotFound);
        };
        if self.graph.edge_exists(from, to) {
            return Err(Rejection::EdgeExists);
        }

        let answer = self.handlers.on_add_edge(begin.payload(), end.payload());
        let payload = match self.decide(Hook::AddEdge, answer)? {
            Some(payload) => {
                self.edge_check.observe(&payload);
                payload
            }
            None => E::default(),
        };

        let idx = self
            .graph
            .add_edge(from, to, payload)
            .ok_or(Rejection::NotFound)?;
        debug!(
            "edge {} added between {} and {}",
            idx.index(),
            from.index(),
            to.index()
        );
        self.publish(Event::EdgeAdd(PayloadEdgeAdd {
            id: idx.index(),
            from: from.index(),
            to: to.index(),
        }));

        Ok(idx)
    }

    fn move_vertex_checked(&mut self, idx: NodeIndex, pos: Pos2) -> Result<(), Rejection> {
        let vertex = self.graph.vertex(idx).ok_or(Rejection::NotFound)?;

        let answer = self.handlers.on_move_vertex(vertex.payload(), pos);
        let replacement = self.decide(Hook::MoveVertex, answer)?;
        if let Some(payload) = &replacement {
            self.vertex_check.check(payload)?;
        }

        self.graph.move_vertex(idx, pos);
        if let Some(payload) = replacement {
            self.graph.set_vertex_payload(idx, payload);
        }
        self.publish(Event::VertexMove(PayloadVertexMove {
            id: idx.index(),
            pos: [pos.x, pos.y],
        }));

        Ok(())
    }

    fn edit_vertex_checked(&mut self, idx: NodeIndex, input: &str) -> Result<(), Rejection> {
        let vertex = self.graph.vertex(idx).ok_or(Rejection::NotFound)?;
        if input.is_empty() {
            return Err(Rejection::EmptyInput);
        }

        let answer = self.handlers.on_edit_vertex(vertex.payload(), input);
        match self.decide(Hook::EditVertex, answer)? {
            Some(payload) => {
                self.vertex_check.check(&payload)?;
                self.graph.set_vertex_payload(idx, payload);
            }
            None => self.graph.request_redraw(),
        }
        debug!("vertex {} edited", idx.index());
        self.publish(Event::VertexEdit(PayloadVertexEdit { id: idx.index() }));

        Ok(())
    }

    fn edit_edge_checked(&mut self, idx: EdgeIndex, input: &str) -> Result<(), Rejection> {
        let edge = self.graph.edge(idx).ok_or(Rejection::NotFound)?;
        if input.is_empty() {
            return Err(Rejection::EmptyInput);
        }

        let answer = self.handlers.on_edit_edge(edge.payload(), input);
        match self.decide(Hook::EditEdge, answer)? {
            Some(payload) => {
                self.edge_check.check(&payload)?;
                self.graph.set_edge_payload(idx, payload);
            }
            None => self.graph.request_redraw(),
        }
        debug!("edge {} edited", idx.index());
        self.publish(Event::EdgeEdit(PayloadEdgeEdit { id: idx.index() }));

        Ok(())
    }

    fn remove_vertex_checked(&mut self, i: usize) -> Result<(), Rejection> {
        let idx = *self.graph.vertex_order().get(i).ok_or(Rejection::NotFound)?;
        let vertex = self.graph.vertex(idx).ok_or(Rejection::NotFound)?;

        let answer = self.handlers.on_remove_vertex(vertex.payload());
        self.decide(Hook::RemoveVertex, answer)?;

        self.remove_vertex_committed(i, idx);
        Ok(())
    }

    fn remove_edge_checked(&mut self, i: usize) -> Result<(), Rejection> {
        let idx = *self.graph.edge_order().get(i).ok_or(Rejection::NotFound)?;
        let edge = self.graph.edge(idx).ok_or(Rejection::NotFound)?;

        let answer = self.handlers.on_remove_edge(edge.payload());
        self.decide(Hook::RemoveEdge, answer)?;

        self.remove_edge_committed(i);
        Ok(())
    }
}
