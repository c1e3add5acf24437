/// Stores properties of an edge. Endpoints live in the graph, which keeps the orientation
/// chosen when the edge was created.
#[derive(Clone, Debug)]
pub struct Edge<E> {
    /// Client data
    payload: E,

    hovered: bool,
}

impl<E> Edge<E> {
    pub fn new(payload: E) -> Self {
        Self {
            payload,
            hovered: false,
        }
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub(crate) fn set_payload(&mut self, payload: E) {
        self.payload = payload;
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }
}
