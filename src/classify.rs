//! Value classification.
//!
//! Maps a runtime value to one of a closed set of [`ValueKind`]s. The set
//! of kinds is closed but the set of types is open: anything that is not
//! recognised as a leaf falls back to [`ValueKind::Composite`].

use std::borrow::Cow;
use std::time::{Instant, SystemTime};

use crate::inspect::{Inspect, Peel, Sequence};

/// The kind of a value, as far as assertion generation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Integer64,
    Integer32,
    Text,
    Boolean,
    Enumerated,
    /// Date/time values. Never asserted.
    Temporal,
    Sequence,
    Composite,
}

impl ValueKind {
    /// Whether a value of this kind is a leaf of the traversal.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ValueKind::Sequence | ValueKind::Composite)
    }

    /// Whether values of this kind are compared by value rather than by
    /// identity, and so never enter the visited set.
    ///
    /// Two unrelated accessors holding the same text or number must both be
    /// asserted. Booleans and temporal values are deliberately not exempt:
    /// they are tracked by identity like composites, so one `Rc<bool>`
    /// shared by two accessors is asserted only under the first path.
    pub fn is_dedup_exempt(self) -> bool {
        matches!(
            self,
            ValueKind::Text | ValueKind::Integer64 | ValueKind::Integer32 | ValueKind::Enumerated
        )
    }
}

/// An integral value together with the Rust type it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer {
    pub value: i128,
    pub type_name: &'static str,
}

/// A classified value with the payload needed to render it.
pub enum Classified<'a> {
    Null,
    Integer64(Integer),
    Integer32(Integer),
    Text(&'a str),
    Boolean(bool),
    Enumerated { type_name: String, variant: &'a str },
    Temporal,
    Sequence(&'a dyn Sequence),
    Composite,
}

impl Classified<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Classified::Null => ValueKind::Null,
            Classified::Integer64(_) => ValueKind::Integer64,
            Classified::Integer32(_) => ValueKind::Integer32,
            Classified::Text(_) => ValueKind::Text,
            Classified::Boolean(_) => ValueKind::Boolean,
            Classified::Enumerated { .. } => ValueKind::Enumerated,
            Classified::Temporal => ValueKind::Temporal,
            Classified::Sequence(_) => ValueKind::Sequence,
            Classified::Composite => ValueKind::Composite,
        }
    }
}

/// Classify a value, looking through wrappers.
///
/// A wrapper whose contents cannot be reached classifies as
/// [`ValueKind::Null`], which is how the traversal treats it too.
pub fn classify(value: &dyn Inspect) -> ValueKind {
    match value.peel() {
        Peel::Itself => classify_value(value).kind(),
        Peel::Absent | Peel::Failed(_) => ValueKind::Null,
        Peel::Present(inner) | Peel::Inner(inner) => classify(inner),
        Peel::Guarded(inner) => classify(&*inner),
    }
}

macro_rules! downcast_integer {
    ($any:expr, $($ty:ty),+) => {
        $(
            if let Some(value) = $any.downcast_ref::<$ty>() {
                return Some(Integer {
                    value: *value as i128,
                    type_name: stringify!($ty),
                });
            }
        )+
    };
}

fn integer64(value: &dyn Inspect) -> Option<Integer> {
    let any = value.as_any();
    downcast_integer!(any, i64, u64, isize, usize);
    None
}

fn integer32(value: &dyn Inspect) -> Option<Integer> {
    let any = value.as_any();
    downcast_integer!(any, i32, u32, i16, u16, i8, u8);
    None
}

fn text(value: &dyn Inspect) -> Option<&str> {
    let any = value.as_any();
    if let Some(text) = any.downcast_ref::<String>() {
        return Some(text.as_str());
    }
    if let Some(text) = any.downcast_ref::<&'static str>() {
        return Some(*text);
    }
    if let Some(text) = any.downcast_ref::<Cow<'static, str>>() {
        return Some(text.as_ref());
    }
    None
}

fn is_temporal(value: &dyn Inspect) -> bool {
    let any = value.as_any();
    any.is::<SystemTime>() || any.is::<Instant>() || value.is_temporal()
}

/// Classify a value that is not a wrapper (its [`Inspect::peel`] is
/// [`Peel::Itself`]).
///
/// Checked in precedence order; the first match wins.
pub fn classify_value(value: &dyn Inspect) -> Classified<'_> {
    if let Some(integer) = integer64(value) {
        return Classified::Integer64(integer);
    }
    if let Some(integer) = integer32(value) {
        return Classified::Integer32(integer);
    }
    if let Some(text) = text(value) {
        return Classified::Text(text);
    }
    if let Some(variant) = value.variant_name() {
        return Classified::Enumerated {
            type_name: value.type_name(),
            variant,
        };
    }
    if let Some(flag) = value.as_any().downcast_ref::<bool>() {
        return Classified::Boolean(*flag);
    }
    if is_temporal(value) {
        return Classified::Temporal;
    }
    if let Some(sequence) = value.as_sequence() {
        return Classified::Sequence(sequence);
    }
    Classified::Composite
}
