mod event;
mod sink;

pub use event::{
    Event, PayloadEdgeAdd, PayloadEdgeEdit, PayloadEdgeRemove, PayloadVertexAdd,
    PayloadVertexEdit, PayloadVertexHoverEnter, PayloadVertexHoverLeave, PayloadVertexMove,
    PayloadVertexRemove,
};

pub use sink::EventSink;
