use std::{
    any::type_name,
    fmt,
    mem::{discriminant, Discriminant},
};

use crate::error::Rejection;

type Validator<T> = Box<dyn Fn(&T) -> Result<(), String>>;

/// Check applied to payloads produced by edit handlers.
///
/// [`PayloadCheck::infer_variant`] remembers the enum variant of the first payload an add
/// handler supplies and rejects later edits which produce another variant. For payload types
/// which are not enums every value shares one variant, so the check always passes.
pub enum PayloadCheck<T> {
    /// Accept everything.
    Any,
    /// Accept only the variant observed first. `None` until a payload was observed.
    SameVariant(Option<Discriminant<T>>),
    /// Accept what the validator accepts.
    Custom(Validator<T>),
}

impl<T> Default for PayloadCheck<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T> fmt::Debug for PayloadCheck<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::SameVariant(d) => f.debug_tuple("SameVariant").field(d).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T> PayloadCheck<T> {
    pub fn infer_variant() -> Self {
        Self::SameVariant(None)
    }

    pub fn custom(validator: impl Fn(&T) -> Result<(), String> + 'static) -> Self {
        Self::Custom(Box::new(validator))
    }

    /// Records the variant of `payload` if nothing was recorded yet.
    pub fn observe(&mut self, payload: &T) {
        if let Self::SameVariant(slot @ None) = self {
            *slot = Some(discriminant(payload));
        }
    }

    /// Returns the recorded variant, if any.
    pub fn inferred(&self) -> Option<Discriminant<T>> {
        match self {
            Self::SameVariant(d) => *d,
            _ => None,
        }
    }

    /// Forgets the recorded variant.
    pub fn reset(&mut self) {
        if let Self::SameVariant(slot) = self {
            *slot = None;
        }
    }

    pub fn check(&self, payload: &T) -> Result<(), Rejection> {
        match self {
            Self::Any | Self::SameVariant(None) => Ok(()),
            Self::SameVariant(Some(expected)) => {
                if discriminant(payload) == *expected {
                    Ok(())
                } else {
                    Err(Rejection::TypeMismatch {
                        expected: format!(
                            "the same {} variant as the first added payload",
                            short_type_name::<T>()
                        ),
                    })
                }
            }
            Self::Custom(validator) => validator(payload).map_err(Rejection::Invalid),
        }
    }
}

/// `type_name` without module paths, e.g. `Option<String>`.
fn short_type_name<T>() -> String {
    let full = type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);

    out
}
