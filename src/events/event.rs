use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexAdd {
    pub id: usize,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexMove {
    pub id: usize,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexEdit {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexRemove {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexHoverEnter {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadVertexHoverLeave {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadEdgeAdd {
    pub id: usize,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadEdgeEdit {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadEdgeRemove {
    pub id: usize,
}

/// Committed change of the graph or of the hover state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    VertexAdd(PayloadVertexAdd),
    VertexMove(PayloadVertexMove),
    VertexEdit(PayloadVertexEdit),
    VertexRemove(PayloadVertexRemove),
    VertexHoverEnter(PayloadVertexHoverEnter),
    VertexHoverLeave(PayloadVertexHoverLeave),
    EdgeAdd(PayloadEdgeAdd),
    EdgeEdit(PayloadEdgeEdit),
    EdgeRemove(PayloadEdgeRemove),
}
