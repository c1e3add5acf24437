//! Interactive editor for undirected simple graphs, drawn with egui.
//!
//! The user creates vertices with a secondary click on empty space, drags vertices around,
//! connects two vertices by dragging from one to the other with ctrl held, edits payloads with
//! a secondary click on a vertex or an edge and deletes elements with shift held. Every one of
//! those actions goes through the host's [`Handlers`] first, which may refuse it or supply the
//! payload to store.

mod draw;
mod editor;
mod elements;
mod error;
mod gatekeeper;
mod graph;
mod graph_view;
mod handlers;
mod interaction;
mod settings;
mod validation;

pub mod events;
pub mod geometry;

pub use self::draw::{edge_label_alpha, label_fits_inside, DrawContext, Drawer, Labels};
pub use self::editor::Editor;
pub use self::elements::{Edge, Vertex, DEFAULT_RADIUS};
pub use self::error::Rejection;
pub use self::graph::{Graph, DEFAULT_SIZE};
pub use self::graph_view::GraphView;
pub use self::handlers::{Callbacks, HandlerError, HandlerResult, Handlers, Hook, Verdict};
pub use self::interaction::{EditRequest, EditTarget, InputEvent, InteractionState, Key};
pub use self::settings::{SettingsEdgeStyle, SettingsEditor, SettingsStyle, SettingsVertexStyle};
pub use self::validation::PayloadCheck;

pub use petgraph::stable_graph::{EdgeIndex, NodeIndex};
