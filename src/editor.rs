use egui::Pos2;
use log::{debug, warn};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use rand::Rng;

use crate::{
    elements::Vertex,
    error::Rejection,
    events::{
        Event, EventSink, PayloadEdgeAdd, PayloadEdgeEdit, PayloadEdgeRemove, PayloadVertexAdd,
        PayloadVertexEdit, PayloadVertexMove, PayloadVertexRemove,
    },
    graph::Graph,
    handlers::{Callbacks, HandlerResult, Handlers, Hook, Verdict},
    interaction::{EditRequest, InteractionState},
    settings::SettingsEditor,
    validation::PayloadCheck,
};

/// Interactive graph editor.
///
/// Owns the graph, the host [`Handlers`] and the interaction state. User input goes through
/// [`Editor::handle`], which consults the handlers before anything is changed. The host may
/// also change the graph directly with the trusted methods ([`Editor::add_vertex`],
/// [`Editor::remove_edge`], ...) which skip the handler round trip.
///
/// ```
/// use egui::pos2;
/// use egui_graph_gui::{Callbacks, Editor, Verdict};
///
/// let mut editor = Editor::<String, u32>::new(
///     Callbacks::new().with_add_vertex(|pos| Ok(Verdict::Replace(format!("{}", pos.x)))),
/// )
/// .suppress_warnings();
///
/// let idx = editor.try_add_vertex(pos2(10., 10.)).unwrap();
/// assert_eq!(editor.graph().vertex(idx).unwrap().payload(), "10");
/// ```
pub struct Editor<V, E, H = Callbacks<V, E>> {
    pub(crate) graph: Graph<V, E>,
    pub(crate) handlers: H,
    pub(crate) settings: SettingsEditor,

    pub(crate) vertex_check: PayloadCheck<V>,
    pub(crate) edge_check: PayloadCheck<E>,

    pub(crate) state: InteractionState,

    suppress_warnings: bool,
    sink: Option<Box<dyn EventSink>>,
}

impl<V, E, H> Editor<V, E, H> {
    pub fn new(handlers: H) -> Self {
        Self {
            graph: Graph::new(),
            handlers,
            settings: SettingsEditor::default(),
            vertex_check: PayloadCheck::default(),
            edge_check: PayloadCheck::default(),
            state: InteractionState::default(),
            suppress_warnings: false,
            sink: None,
        }
    }

    pub fn with_settings(mut self, settings: SettingsEditor) -> Self {
        self.settings = settings;
        self
    }

    /// Check applied to vertex payloads produced by edits.
    pub fn with_vertex_check(mut self, check: PayloadCheck<V>) -> Self {
        self.vertex_check = check;
        self
    }

    /// Check applied to edge payloads produced by edits.
    pub fn with_edge_check(mut self, check: PayloadCheck<E>) -> Self {
        self.edge_check = check;
        self
    }

    /// Sets a sink which receives an [`Event`] for every committed change.
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Silences diagnostics about rejected actions and missing handlers.
    pub fn suppress_warnings(mut self) -> Self {
        self.suppress_warnings = true;
        self
    }

    pub fn graph(&self) -> &Graph<V, E> {
        &self.graph
    }

    pub fn settings(&self) -> &SettingsEditor {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsEditor {
        &mut self.settings
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn pending_edit(&self) -> Option<&EditRequest> {
        self.state.pending_edit.as_ref()
    }

    /// Gives access to the text of the pending edit.
    pub fn pending_edit_mut(&mut self) -> Option<&mut EditRequest> {
        self.state.pending_edit.as_mut()
    }

    /// Returns true if the graph changed since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        self.graph.take_redraw_request()
    }

    pub(crate) fn publish(&self, event: Event) {
        if let Some(sink) = &self.sink {
            sink.send(event);
        }
    }

    /// Logs the rejection and passes the result through.
    pub(crate) fn report<T>(&self, action: &str, result: Result<T, Rejection>) -> Result<T, Rejection> {
        if let Err(rejection) = &result {
            if !self.suppress_warnings {
                warn!("Unable to {action}. {rejection}");
            }
        }

        result
    }

    /// Turns a handler answer into the payload to commit. `None` keeps the default or current
    /// payload.
    pub(crate) fn decide<T>(&self, hook: Hook, answer: HandlerResult<T>) -> Result<Option<T>, Rejection> {
        match answer {
            Ok(Verdict::Veto) => Err(Rejection::Vetoed),
            Ok(Verdict::Keep) => Ok(None),
            Ok(Verdict::Replace(payload)) => Ok(Some(payload)),
            Ok(Verdict::Unhandled) => {
                self.warn_unhandled(hook);
                Ok(None)
            }
            Err(err) => Err(Rejection::Handler(err)),
        }
    }

    pub(crate) fn warn_unhandled(&self, hook: Hook) {
        if !self.suppress_warnings {
            warn!("No {} handler specified.", hook.name());
        }
    }

    /// Clears interaction references to a removed vertex.
    pub(crate) fn forget_vertex(&mut self, idx: NodeIndex) {
        self.state.forget_vertex(idx);
    }

    pub(crate) fn forget_edge(&mut self, idx: EdgeIndex) {
        self.state.forget_edge(idx);
    }

    fn random_position(&self, rng: &mut impl Rng) -> Pos2 {
        let size = self.graph.size();
        Pos2::new(
            (rng.random::<f32>() * size.x).floor(),
            (rng.random::<f32>() * size.y).floor(),
        )
    }
}

impl<V: Default, E: Default, H: Handlers<V, E>> Editor<V, E, H> {
    /// Replaces the graph with [`SettingsEditor::initial_vertices`] random vertices connected
    /// in a star.
    pub fn initialize(&mut self) {
        let n = self.settings.initial_vertices;
        self.initialize_with_rng(n, &mut rand::rng());
    }

    /// Clears the graph, asks the handlers for `n` vertices at random integer positions inside
    /// the canvas and connects the first accepted vertex with every other accepted one.
    pub fn initialize_with_rng(&mut self, n: usize, rng: &mut impl Rng) {
        self.graph.clear();
        self.state.clear_targets();

        let mut accepted = Vec::with_capacity(n);
        for _ in 0..n {
            let pos = self.random_position(rng);
            if let Ok(idx) = self.try_add_vertex(pos) {
                accepted.push(idx);
            }
        }

        if let Some((first, rest)) = accepted.split_first() {
            for other in rest {
                let _ = self.try_add_edge(*first, *other);
            }
        }

        self.graph.request_redraw();
        debug!(
            "initialized graph with {} vertices and {} edges",
            self.graph.vertex_count(),
            self.graph.edge_count()
        );
    }
}

/// Trusted mutations. Payloads identify elements by equality and no handler is asked, except
/// that removing a vertex still notifies `on_remove_edge` for each attached edge.
impl<V: PartialEq, E: PartialEq, H: Handlers<V, E>> Editor<V, E, H> {
    pub fn find_vertex_by_payload(&self, payload: &V) -> Option<NodeIndex> {
        self.graph.vertex_by_payload(payload).map(|(_, idx)| idx)
    }

    pub fn find_edge_by_payload(&self, payload: &E) -> Option<EdgeIndex> {
        self.graph.edge_by_payload(payload).map(|(_, idx)| idx)
    }

    pub fn find_edge_by_endpoint_payloads(&self, a: &V, b: &V) -> Option<EdgeIndex> {
        self.graph.edge_by_endpoint_payloads(a, b).map(|(_, idx)| idx)
    }

    /// Adds a vertex unless one with an equal payload exists. Without `pos` the vertex is
    /// placed at random inside the canvas.
    pub fn add_vertex(&mut self, payload: V, pos: Option<Pos2>) -> bool {
        if self.graph.vertex_by_payload(&payload).is_some() {
            return false;
        }

        let pos = pos.unwrap_or_else(|| self.random_position(&mut rand::rng()));
        let idx = self.graph.add_vertex(Vertex::with_radius(
            pos,
            self.settings.vertex_radius,
            payload,
        ));
        self.publish(Event::VertexAdd(PayloadVertexAdd {
            id: idx.index(),
            pos: [pos.x, pos.y],
        }));

        true
    }

    /// Connects the vertices carrying `from` and `to`. Fails if either is missing, both are the
    /// same vertex or they are already connected.
    pub fn add_edge(&mut self, from: &V, to: &V, payload: Option<E>) -> bool
    where
        E: Default,
    {
        let (Some((_, a)), Some((_, b))) =
            (self.graph.vertex_by_payload(from), self.graph.vertex_by_payload(to))
        else {
            return false;
        };
        if a == b || self.graph.edge_exists(a, b) {
            return false;
        }

        let Some(idx) = self.graph.add_edge(a, b, payload.unwrap_or_default()) else {
            return false;
        };
        self.publish(Event::EdgeAdd(PayloadEdgeAdd {
            id: idx.index(),
            from: a.index(),
            to: b.index(),
        }));

        true
    }

    pub fn remove_vertex(&mut self, payload: &V) -> bool {
        let Some((i, idx)) = self.graph.vertex_by_payload(payload) else {
            return false;
        };

        self.remove_vertex_committed(i, idx);
        true
    }

    pub fn remove_edge(&mut self, payload: &E) -> bool {
        let Some((i, _)) = self.graph.edge_by_payload(payload) else {
            return false;
        };

        self.remove_edge_committed(i);
        true
    }

    pub fn remove_edge_by_endpoints(&mut self, from: &V, to: &V) -> bool {
        let Some((i, _)) = self.graph.edge_by_endpoint_payloads(from, to) else {
            return false;
        };

        self.remove_edge_committed(i);
        true
    }

    pub fn move_vertex(&mut self, payload: &V, pos: Pos2) -> bool {
        let Some((_, idx)) = self.graph.vertex_by_payload(payload) else {
            return false;
        };

        self.graph.move_vertex(idx, pos);
        self.publish(Event::VertexMove(PayloadVertexMove {
            id: idx.index(),
            pos: [pos.x, pos.y],
        }));
        true
    }

    pub fn edit_vertex(&mut self, old: &V, new: V) -> bool {
        let Some((_, idx)) = self.graph.vertex_by_payload(old) else {
            return false;
        };

        self.graph.set_vertex_payload(idx, new);
        self.publish(Event::VertexEdit(PayloadVertexEdit { id: idx.index() }));
        true
    }

    pub fn edit_edge(&mut self, old: &E, new: E) -> bool {
        let Some((_, idx)) = self.graph.edge_by_payload(old) else {
            return false;
        };

        self.graph.set_edge_payload(idx, new);
        self.publish(Event::EdgeEdit(PayloadEdgeEdit { id: idx.index() }));
        true
    }

    pub fn edit_edge_by_endpoints(&mut self, from: &V, to: &V, new: E) -> bool {
        let Some((_, idx)) = self.graph.edge_by_endpoint_payloads(from, to) else {
            return false;
        };

        self.graph.set_edge_payload(idx, new);
        self.publish(Event::EdgeEdit(PayloadEdgeEdit { id: idx.index() }));
        true
    }
}

impl<V, E, H: Handlers<V, E>> Editor<V, E, H> {
    /// Removes the vertex at order position `i` with its edges. Every attached edge is
    /// reported to `on_remove_edge`, whose answer is ignored.
    pub(crate) fn remove_vertex_committed(&mut self, i: usize, idx: NodeIndex) {
        let suppress = self.suppress_warnings;
        let handlers = &mut self.handlers;
        let mut removed_edges = Vec::new();

        self.graph.remove_vertex_at(i, |e, payload| {
            if let Ok(Verdict::Unhandled) = handlers.on_remove_edge(payload) {
                if !suppress {
                    warn!("No {} handler specified.", Hook::RemoveEdge.name());
                }
            }
            removed_edges.push(e);
        });

        for e in removed_edges {
            self.forget_edge(e);
            self.publish(Event::EdgeRemove(PayloadEdgeRemove { id: e.index() }));
        }
        self.forget_vertex(idx);
        self.publish(Event::VertexRemove(PayloadVertexRemove { id: idx.index() }));
        debug!("vertex {} removed", idx.index());
    }

    pub(crate) fn remove_edge_committed(&mut self, i: usize) {
        if let Some((idx, _)) = self.graph.remove_edge_at(i) {
            self.forget_edge(idx);
            self.publish(Event::EdgeRemove(PayloadEdgeRemove { id: idx.index() }));
            debug!("edge {} removed", idx.index());
        }
    }
}
