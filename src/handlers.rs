//! Host callbacks consulted before every structural change.
//!
//! Each hook answers with a [`Verdict`]:
//!
//! | Verdict | add | move | edit | remove |
//! |---------|-----|------|------|--------|
//! | `Veto` | rejected | rejected | rejected | rejected |
//! | `Keep` | default payload | position only | current payload | removed |
//! | `Replace(x)` | payload `x` | position and payload `x` | payload `x` | removed |
//! | `Unhandled` | like `Keep`, with a warning |||
//!
//! Returning `Err` is treated like a veto and the message ends up in the log.

use std::fmt;

use egui::Pos2;

/// Answer of a host callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T> {
    /// Do not perform the action.
    Veto,
    /// Perform the action with the default or current payload.
    Keep,
    /// Perform the action and store the provided payload.
    Replace(T),
    /// No callback is installed for this action.
    Unhandled,
}

impl<T> Verdict<T> {
    /// `true` accepts and `false` vetoes.
    pub fn from_bool(accept: bool) -> Self {
        if accept {
            Self::Keep
        } else {
            Self::Veto
        }
    }
}

impl<T> From<Option<T>> for Verdict<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Replace(v),
            None => Self::Keep,
        }
    }
}

/// Failure reported by a host callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError(String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for HandlerError {}

impl From<&str> for HandlerError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HandlerError {
    fn from(value: String) -> Self {
        Self(value)
    }
}

pub type HandlerResult<T> = Result<Verdict<T>, HandlerError>;

/// Names of the hooks, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    AddVertex,
    AddEdge,
    RemoveVertex,
    RemoveEdge,
    MoveVertex,
    EditVertex,
    EditEdge,
}

impl Hook {
    pub fn name(self) -> &'static str {
        match self {
            Self::AddVertex => "onaddvertex",
            Self::AddEdge => "onaddedge",
            Self::RemoveVertex => "onremovevertex",
            Self::RemoveEdge => "onremoveedge",
            Self::MoveVertex => "onmovevertex",
            Self::EditVertex => "oneditvertex",
            Self::EditEdge => "oneditedge",
        }
    }
}

/// Callbacks through which the host validates, vetoes or transforms mutations.
///
/// Every method defaults to [`Verdict::Unhandled`].
pub trait Handlers<V, E> {
    /// The user asked for a new vertex at `pos`.
    fn on_add_vertex(&mut self, pos: Pos2) -> HandlerResult<V> {
        let _ = pos;
        Ok(Verdict::Unhandled)
    }

    /// The user connected two vertices.
    fn on_add_edge(&mut self, from: &V, to: &V) -> HandlerResult<E> {
        let _ = (from, to);
        Ok(Verdict::Unhandled)
    }

    fn on_remove_vertex(&mut self, payload: &V) -> HandlerResult<()> {
        let _ = payload;
        Ok(Verdict::Unhandled)
    }

    /// Also called for every edge removed together with its vertex. In that case the result
    /// is ignored.
    fn on_remove_edge(&mut self, payload: &E) -> HandlerResult<()> {
        let _ = payload;
        Ok(Verdict::Unhandled)
    }

    fn on_move_vertex(&mut self, payload: &V, pos: Pos2) -> HandlerResult<V> {
        let _ = (payload, pos);
        Ok(Verdict::Unhandled)
    }

    /// `input` is the text the user typed, never empty.
    fn on_edit_vertex(&mut self, payload: &V, input: &str) -> HandlerResult<V> {
        let _ = (payload, input);
        Ok(Verdict::Unhandled)
    }

    /// `input` is the text the user typed, never empty.
    fn on_edit_edge(&mut self, payload: &E, input: &str) -> HandlerResult<E> {
        let _ = (payload, input);
        Ok(Verdict::Unhandled)
    }
}

impl<V, E> Handlers<V, E> for () {}

type AddVertexFn<V> = Box<dyn FnMut(Pos2) -> HandlerResult<V>>;
type AddEdgeFn<V, E> = Box<dyn FnMut(&V, &V) -> HandlerResult<E>>;
type RemoveFn<T> = Box<dyn FnMut(&T) -> HandlerResult<()>>;
type MoveVertexFn<V> = Box<dyn FnMut(&V, Pos2) -> HandlerResult<V>>;
type EditFn<T> = Box<dyn FnMut(&T, &str) -> HandlerResult<T>>;

/// Closure backed [`Handlers`]. Hooks which are not set stay [`Verdict::Unhandled`].
///
/// ```
/// use egui_graph_gui::{Callbacks, Verdict};
///
/// let callbacks = Callbacks::<String, u32>::new()
///     .with_add_vertex(|pos| Ok(Verdict::Replace(format!("{}:{}", pos.x, pos.y))))
///     .with_add_edge(|_, _| Ok(Verdict::Replace(1)));
/// ```
pub struct Callbacks<V, E> {
    add_vertex: Option<AddVertexFn<V>>,
    add_edge: Option<AddEdgeFn<V, E>>,
    remove_vertex: Option<RemoveFn<V>>,
    remove_edge: Option<RemoveFn<E>>,
    move_vertex: Option<MoveVertexFn<V>>,
    edit_vertex: Option<EditFn<V>>,
    edit_edge: Option<EditFn<E>>,
}

impl<V, E> Default for Callbacks<V, E> {
    fn default() -> Self {
        Self {
            add_vertex: None,
            add_edge: None,
            remove_vertex: None,
            remove_edge: None,
            move_vertex: None,
            edit_vertex: None,
            edit_edge: None,
        }
    }
}

impl<V, E> fmt::Debug for Callbacks<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("add_vertex", &self.add_vertex.is_some())
            .field("add_edge", &self.add_edge.is_some())
            .field("remove_vertex", &self.remove_vertex.is_some())
            .field("remove_edge", &self.remove_edge.is_some())
            .field("move_vertex", &self.move_vertex.is_some())
            .field("edit_vertex", &self.edit_vertex.is_some())
            .field("edit_edge", &self.edit_edge.is_some())
            .finish()
    }
}

impl<V, E> Callbacks<V, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_add_vertex(mut self, f: impl FnMut(Pos2) -> HandlerResult<V> + 'static) -> Self {
        self.add_vertex = Some(Box::new(f));
        self
    }

    pub fn with_add_edge(mut self, f: impl FnMut(&V, &V) -> HandlerResult<E> + 'static) -> Self {
        self.add_edge = Some(Box::new(f));
        self
    }

    pub fn with_remove_vertex(mut self, f: impl FnMut(&V) -> HandlerResult<()> + 'static) -> Self {
        self.remove_vertex = Some(Box::new(f));
        self
    }

    pub fn with_remove_edge(mut self, f: impl FnMut(&E) -> HandlerResult<()> + 'static) -> Self {
        self.remove_edge = Some(Box::new(f));
        self
    }

    pub fn with_move_vertex(mut self, f: impl FnMut(&V, Pos2) -> HandlerResult<V> + 'static) -> Self {
        self.move_vertex = Some(Box::new(f));
        self
    }

    pub fn with_edit_vertex(mut self, f: impl FnMut(&V, &str) -> HandlerResult<V> + 'static) -> Self {
        self.edit_vertex = Some(Box::new(f));
        self
    }

    pub fn with_edit_edge(mut self, f: impl FnMut(&E, &str) -> HandlerResult<E> + 'static) -> Self {
        self.edit_edge = Some(Box::new(f));
        self
    }
}

impl<V, E> Handlers<V, E> for Callbacks<V, E> {
    fn on_add_vertex(&mut self, pos: Pos2) -> HandlerResult<V> {
        self.add_vertex.as_mut().map_or(Ok(Verdict::Unhandled), |f| f(pos))
    }

    fn on_add_edge(&mut self, from: &V, to: &V) -> HandlerResult<E> {
        self.add_edge.as_mut().map_or(Ok(Verdict::Unhandled), |f| f(from, to))
    }

    fn on_remove_vertex(&mut self, payload: &V) -> HandlerResult<()> {
        self.remove_vertex.as_mut().map_or(Ok(Verdict::Unhandled), |f| f(payload))
    }

    fn on_remove_edge(&mut self, payload: &E) -> HandlerResult<()> {
        self.remove_edge.as_mut().map_or(Ok(Verdict::Unhandled), |f| f(payload))
    }

    fn on_move_vertex(&mut self, payload: &V, pos: Pos2) -> HandlerResult<V> {
        self.move_vertex.as_mut().map_or(Ok(Verdict::Unhandled), |f| f(payload, pos))
    }

    fn on_edit_vertex(&mut self, payload: &V, input: &str) -> HandlerResult<V> {
        self.edit_vertex.as_mut().map_or(Ok(Verdict::Unhandled), |f| f(payload, input))
    }

    fn on_edit_edge(&mut self, payload: &E, input: &str) -> HandlerResult<E> {
        self.edit_edge.as_mut().map_or(Ok(Verdict::Unhandled), |f| f(payload, input))
    }
}
