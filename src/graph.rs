use egui::{Pos2, Vec2};
use petgraph::{
    stable_graph::{EdgeIndex, NodeIndex, StableGraph},
    Undirected,
};

use crate::{
    elements::{Edge, Vertex},
    geometry::segment_contains_point,
};

type StableGraphType<V, E> = StableGraph<Vertex<V>, Edge<E>, Undirected>;

/// Canvas size used for random placement until the widget reports the real one.
pub const DEFAULT_SIZE: Vec2 = Vec2::new(800., 600.);

/// Wrapper around [`petgraph::stable_graph::StableGraph`] which keeps vertices and edges in
/// explicit order.
///
/// Order matters for drawing and hit-testing only: the element at position 0 is drawn last
/// and hit first. Every mutating call leaves a redraw request behind which is consumed with
/// [`Graph::take_redraw_request`].
///
/// Mutations here are unchecked. Host callbacks are consulted one level up, in
/// [`crate::Editor`].
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    g: StableGraphType<V, E>,

    vertex_order: Vec<NodeIndex>,
    edge_order: Vec<EdgeIndex>,

    size: Vec2,
    redraw: bool,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E> {
    pub fn new() -> Self {
        Self {
            g: StableGraph::default(),
            vertex_order: Vec::new(),
            edge_order: Vec::new(),
            size: DEFAULT_SIZE,
            redraw: false,
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex<V>) -> NodeIndex {
        let idx = self.g.add_node(vertex);
        self.vertex_order.push(idx);
        self.redraw = true;

        idx
    }

    /// Adds edge between `begin` and `end` without checking for duplicates.
    ///
    /// Returns `None` if one of the endpoints does not exist.
    pub fn add_edge(&mut self, begin: NodeIndex, end: NodeIndex, payload: E) -> Option<EdgeIndex> {
        if !self.g.contains_node(begin) || !self.g.contains_node(end) {
            return None;
        }

        let idx = self.g.add_edge(begin, end, Edge::new(payload));
        self.edge_order.push(idx);
        self.redraw = true;

        Some(idx)
    }

    /// Removes the vertex at position `i` together with every edge attached to it.
    ///
    /// Attached edges are removed first, in edge order, and `notify` is called once for
    /// each of them. Returns the removed vertex and None if the position is out of range.
    pub fn remove_vertex_at(
        &mut self,
        i: usize,
        mut notify: impl FnMut(EdgeIndex, &E),
    ) -> Option<Vertex<V>> {
        let idx = *self.vertex_order.get(i)?;

        let attached = self
            .edge_order
            .iter()
            .copied()
            .filter(|e| {
                self.g
                    .edge_endpoints(*e)
                    .is_some_and(|(begin, end)| begin == idx || end == idx)
            })
            .collect::<Vec<_>>();

        self.edge_order.retain(|e| !attached.contains(e));
        for e in attached {
            if let Some(edge) = self.g.remove_edge(e) {
                notify(e, edge.payload());
            }
        }

        self.vertex_order.remove(i);
        self.redraw = true;

        self.g.remove_node(idx)
    }

    /// Removes the edge at position `i`. Returns removed edge and None if it does not exist.
    pub fn remove_edge_at(&mut self, i: usize) -> Option<(EdgeIndex, Edge<E>)> {
        if i >= self.edge_order.len() {
            return None;
        }

        let idx = self.edge_order.remove(i);
        self.redraw = true;

        self.g.remove_edge(idx).map(|e| (idx, e))
    }

    pub fn move_vertex(&mut self, idx: NodeIndex, pos: Pos2) -> bool {
        let Some(v) = self.g.node_weight_mut(idx) else {
            return false;
        };

        v.move_to(pos);
        self.redraw = true;
        true
    }

    pub fn set_vertex_payload(&mut self, idx: NodeIndex, payload: V) -> bool {
        let Some(v) = self.g.node_weight_mut(idx) else {
            return false;
        };

        v.set_payload(payload);
        self.redraw = true;
        true
    }

    pub fn set_edge_payload(&mut self, idx: EdgeIndex, payload: E) -> bool {
        let Some(e) = self.g.edge_weight_mut(idx) else {
            return false;
        };

        e.set_payload(payload);
        self.redraw = true;
        true
    }

    /// Finds the first vertex in order which contains `p`, skipping `except`.
    pub fn vertex_at_point(&self, p: Pos2, except: Option<NodeIndex>) -> Option<(usize, NodeIndex)> {
        self.vertex_order
            .iter()
            .enumerate()
            .find(|(_, idx)| {
                Some(**idx) != except && self.g.node_weight(**idx).is_some_and(|v| v.contains(p))
            })
            .map(|(i, idx)| (i, *idx))
    }

    /// Finds the first edge in order which passes within `threshold` of `p`, skipping `except`.
    pub fn edge_at_point(
        &self,
        p: Pos2,
        threshold: f32,
        except: Option<EdgeIndex>,
    ) -> Option<(usize, EdgeIndex)> {
        self.edge_order
            .iter()
            .enumerate()
            .find(|(_, idx)| {
                Some(**idx) != except
                    && self
                        .edge_segment(**idx)
                        .is_some_and(|(a, b)| segment_contains_point(a, b, p, threshold))
            })
            .map(|(i, idx)| (i, *idx))
    }

    /// Returns true if any edge connects `a` and `b`, in either orientation.
    pub fn edge_exists(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.edge_between(a, b).is_some()
    }

    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.edge_order.iter().copied().find(|e| {
            self.g.edge_endpoints(*e).is_some_and(|(begin, end)| {
                (begin == a && end == b) || (begin == b && end == a)
            })
        })
    }

    /// Moves the vertex at position `i` to the front of the order.
    pub fn bring_vertex_to_front(&mut self, i: usize) {
        if i < self.vertex_order.len() {
            let idx = self.vertex_order.remove(i);
            self.vertex_order.insert(0, idx);
        }
    }

    /// Moves the edge at position `i` to the front of the order.
    pub fn bring_edge_to_front(&mut self, i: usize) {
        if i < self.edge_order.len() {
            let idx = self.edge_order.remove(i);
            self.edge_order.insert(0, idx);
        }
    }

    /// Provides iterator over all vertices in order.
    pub fn vertices(&self) -> impl DoubleEndedIterator<Item = (NodeIndex, &Vertex<V>)> {
        self.vertex_order
            .iter()
            .filter_map(move |idx| self.g.node_weight(*idx).map(|v| (*idx, v)))
    }

    /// Provides iterator over all edges in order.
    pub fn edges(&self) -> impl DoubleEndedIterator<Item = (EdgeIndex, &Edge<E>)> {
        self.edge_order
            .iter()
            .filter_map(move |idx| self.g.edge_weight(*idx).map(|e| (*idx, e)))
    }

    pub fn vertex(&self, idx: NodeIndex) -> Option<&Vertex<V>> {
        self.g.node_weight(idx)
    }

    pub fn vertex_mut(&mut self, idx: NodeIndex) -> Option<&mut Vertex<V>> {
        self.g.node_weight_mut(idx)
    }

    pub fn edge(&self, idx: EdgeIndex) -> Option<&Edge<E>> {
        self.g.edge_weight(idx)
    }

    pub fn edge_mut(&mut self, idx: EdgeIndex) -> Option<&mut Edge<E>> {
        self.g.edge_weight_mut(idx)
    }

    /// Returns `(begin, end)` in the orientation the edge was created with.
    pub fn edge_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.g.edge_endpoints(idx)
    }

    /// Returns centers of the edge endpoints.
    pub fn edge_segment(&self, idx: EdgeIndex) -> Option<(Pos2, Pos2)> {
        let (begin, end) = self.g.edge_endpoints(idx)?;
        Some((self.g.node_weight(begin)?.center(), self.g.node_weight(end)?.center()))
    }

    pub fn edge_position(&self, idx: EdgeIndex) -> Option<usize> {
        self.edge_order.iter().position(|e| *e == idx)
    }

    pub fn vertex_order(&self) -> &[NodeIndex] {
        &self.vertex_order
    }

    pub fn edge_order(&self) -> &[EdgeIndex] {
        &self.edge_order
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub fn clear(&mut self) {
        self.g.clear();
        self.vertex_order.clear();
        self.edge_order.clear();
        self.redraw = true;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }

    /// Returns true if something changed since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

impl<V: PartialEq, E> Graph<V, E> {
    /// Finds the first vertex whose payload equals `payload`.
    pub fn vertex_by_payload(&self, payload: &V) -> Option<(usize, NodeIndex)> {
        self.vertex_order
            .iter()
            .enumerate()
            .find(|(_, idx)| self.g.node_weight(**idx).is_some_and(|v| v.payload() == payload))
            .map(|(i, idx)| (i, *idx))
    }

    /// Finds the edge between vertices carrying `a` and `b`, in either orientation.
    pub fn edge_by_endpoint_payloads(&self, a: &V, b: &V) -> Option<(usize, EdgeIndex)> {
        self.edge_order
            .iter()
            .enumerate()
            .find(|(_, idx)| {
                let Some((begin, end)) = self.g.edge_endpoints(**idx) else {
                    return false;
                };
                let (Some(begin), Some(end)) = (self.g.node_weight(begin), self.g.node_weight(end))
                else {
                    return false;
                };

                (begin.payload() == a && end.payload() == b)
                    || (begin.payload() == b && end.payload() == a)
            })
            .map(|(i, idx)| (i, *idx))
    }
}

impl<V, E: PartialEq> Graph<V, E> {
    /// Finds the first edge whose payload equals `payload`.
    pub fn edge_by_payload(&self, payload: &E) -> Option<(usize, EdgeIndex)> {
        self.edge_order
            .iter()
            .enumerate()
            .find(|(_, idx)| self.g.edge_weight(**idx).is_some_and(|e| e.payload() == payload))
            .map(|(i, idx)| (i, *idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn triangle() -> (Graph<&'static str, u32>, [NodeIndex; 3]) {
        let mut g = Graph::new();
        let a = g.add_vertex(Vertex::new(pos2(100., 100.), "a"));
        let b = g.add_vertex(Vertex::new(pos2(300., 100.), "b"));
        let c = g.add_vertex(Vertex::new(pos2(200., 300.), "c"));
        g.add_edge(a, b, 1).unwrap();
        g.add_edge(b, c, 2).unwrap();
        g.add_edge(c, a, 3).unwrap();

        (g, [a, b, c])
    }

    #[test]
    fn edge_exists_ignores_orientation() {
        let (g, [a, b, c]) = triangle();
        assert!(g.edge_exists(a, b));
        assert!(g.edge_exists(b, a));
        assert!(g.edge_exists(a, c));
        assert!(!g.edge_exists(a, a));
    }

    #[test]
    fn removing_vertex_cascades_and_notifies_each_edge_once() {
        let (mut g, [a, b, c]) = triangle();
        let mut notified = Vec::new();

        let removed = g.remove_vertex_at(0, |_, payload| notified.push(*payload));

        assert_eq!(*removed.unwrap().payload(), "a");
        assert_eq!(notified, vec![1, 3]);
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.edge_exists(b, c));
        assert!(g.vertex(a).is_none());
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let (mut g, _) = triangle();
        g.take_redraw_request();

        assert!(g.remove_vertex_at(5, |_, _| {}).is_none());
        assert!(g.remove_edge_at(5).is_none());
        assert!(!g.redraw_requested());
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn vertex_at_point_respects_order_and_exception() {
        let mut g: Graph<u8, ()> = Graph::new();
        let lower = g.add_vertex(Vertex::new(pos2(100., 100.), 1));
        let upper = g.add_vertex(Vertex::new(pos2(110., 100.), 2));

        assert_eq!(g.vertex_at_point(pos2(105., 100.), None), Some((0, lower)));
        assert_eq!(g.vertex_at_point(pos2(105., 100.), Some(lower)), Some((1, upper)));

        g.bring_vertex_to_front(1);
        assert_eq!(g.vertex_order(), &[upper, lower]);
        assert_eq!(g.vertex_at_point(pos2(105., 100.), None), Some((0, upper)));
        assert_eq!(g.vertex_at_point(pos2(500., 500.), None), None);
    }

    #[test]
    fn edge_at_point_hits_segment_between_centers() {
        let (mut g, [a, b, _]) = triangle();
        let ab = g.edge_between(a, b).unwrap();

        assert_eq!(g.edge_at_point(pos2(200., 102.), 5., None), Some((0, ab)));
        assert_eq!(g.edge_at_point(pos2(200., 102.), 5., Some(ab)), None);
        assert_eq!(g.edge_at_point(pos2(200., 200.), 5., None), None);

        g.bring_edge_to_front(2);
        assert_eq!(g.edge_position(ab), Some(1));
    }

    #[test]
    fn lookups_by_payload() {
        let (g, [a, b, _]) = triangle();

        assert_eq!(g.vertex_by_payload(&"b"), Some((1, b)));
        assert_eq!(g.vertex_by_payload(&"z"), None);

        let (i, e) = g.edge_by_endpoint_payloads(&"b", &"a").unwrap();
        assert_eq!(i, 0);
        assert_eq!(g.edge_endpoints(e), Some((a, b)));
        assert_eq!(g.edge_by_endpoint_payloads(&"a", &"b").map(|(_, e)| e), Some(e));
        assert_eq!(g.edge_by_payload(&3).map(|(i, _)| i), Some(2));
        assert_eq!(g.edge_by_payload(&42), None);
    }

    #[test]
    fn mutations_request_redraw() {
        let mut g: Graph<(), ()> = Graph::new();
        assert!(!g.take_redraw_request());

        let a = g.add_vertex(Vertex::new(pos2(0., 0.), ()));
        assert!(g.take_redraw_request());
        assert!(!g.take_redraw_request());

        assert!(g.move_vertex(a, pos2(10., 10.)));
        assert!(g.take_redraw_request());

        g.bring_vertex_to_front(0);
        assert!(!g.take_redraw_request());
    }

    #[test]
    fn add_edge_requires_endpoints() {
        let mut g: Graph<(), ()> = Graph::new();
        let a = g.add_vertex(Vertex::new(pos2(0., 0.), ()));
        let b = g.add_vertex(Vertex::new(pos2(50., 0.), ()));
        g.remove_vertex_at(1, |_, _| {});

        assert!(g.add_edge(a, b, ()).is_none());
        assert_eq!(g.edge_count(), 0);
    }
}
