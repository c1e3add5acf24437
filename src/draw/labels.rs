use std::fmt;

type FnDisplay<T> = Box<dyn Fn(&T) -> String>;

/// Turns payloads into the text drawn next to vertices and edges.
pub struct Labels<V, E> {
    pub vertex: FnDisplay<V>,
    pub edge: FnDisplay<E>,
}

impl<V, E> Labels<V, E> {
    pub fn new(
        vertex: impl Fn(&V) -> String + 'static,
        edge: impl Fn(&E) -> String + 'static,
    ) -> Self {
        Self {
            vertex: Box::new(vertex),
            edge: Box::new(edge),
        }
    }

    pub fn with_vertex(mut self, vertex: impl Fn(&V) -> String + 'static) -> Self {
        self.vertex = Box::new(vertex);
        self
    }

    pub fn with_edge(mut self, edge: impl Fn(&E) -> String + 'static) -> Self {
        self.edge = Box::new(edge);
        self
    }
}

impl<V: ToString + 'static, E: ToString + 'static> Default for Labels<V, E> {
    fn default() -> Self {
        Self::new(ToString::to_string, ToString::to_string)
    }
}

impl<V, E> fmt::Debug for Labels<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Labels").finish_non_exhaustive()
    }
}
