mod edge;
mod vertex;

pub use self::edge::Edge;
pub use self::vertex::{Vertex, DEFAULT_RADIUS};
