use std::fmt;

use crate::handlers::HandlerError;

/// Reason a requested mutation was not applied. The graph is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The handler answered with [`crate::Verdict::Veto`].
    Vetoed,
    /// The handler failed.
    Handler(HandlerError),
    /// The two vertices are already connected.
    EdgeExists,
    /// Both endpoints are the same vertex.
    SelfLoop,
    /// The user submitted an empty edit.
    EmptyInput,
    /// An edit produced a payload of another variant than the one inferred on the first add.
    TypeMismatch { expected: String },
    /// A custom payload check failed.
    Invalid(String),
    /// The referenced vertex or edge does not exist.
    NotFound,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vetoed => f.write_str("The handler refused the action."),
            Self::Handler(err) => write!(f, "The handler failed: {err}"),
            Self::EdgeExists => f.write_str("Edge already exists in graph."),
            Self::SelfLoop => f.write_str("Edge can not connect a vertex to itself."),
            Self::EmptyInput => f.write_str("No input was provided."),
            Self::TypeMismatch { expected } => {
                write!(f, "The input did not produce a result of {expected}.")
            }
            Self::Invalid(reason) => write!(f, "The input produced an invalid result: {reason}"),
            Self::NotFound => f.write_str("No such element in graph."),
        }
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HandlerError> for Rejection {
    fn from(value: HandlerError) -> Self {
        Self::Handler(value)
    }
}
