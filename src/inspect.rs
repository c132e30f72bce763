//! The introspection capability the traversal is written against.
//!
//! Rust has no runtime reflection, so every type that can appear in a
//! snapshot describes its own shape through [`Inspect`]: whether it is a
//! transparent wrapper, an enumerated constant, a sequence, a temporal
//! value, or a composite exposing named zero-argument [`Accessor`]s.
//! Scalars need no methods at all; the classifier recognises them by
//! downcasting.
//!
//! # Example
//!
//! ```
//! use assertify::{Accessor, Inspect};
//!
//! struct Person {
//!     name: String,
//!     nickname: Option<String>,
//! }
//!
//! impl Person {
//!     fn initials(&self) -> String {
//!         self.name.chars().take(1).collect()
//!     }
//! }
//!
//! impl Inspect for Person {
//!     fn accessors(&self) -> Vec<Accessor<'_>> {
//!         vec![
//!             Accessor::field("name", &self.name),
//!             Accessor::field("nickname", &self.nickname),
//!             Accessor::computed("initials", move || self.initials()),
//!         ]
//!     }
//! }
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::errors::AccessError;

/// Access to a value as [`Any`], for downcasting and [`TypeId`](std::any::TypeId).
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value whose observable state can be turned into assertions.
///
/// All methods have defaults, so an empty `impl Inspect for T {}` describes
/// a composite without accessors (it is asserted to exist and nothing
/// more).
pub trait Inspect: AsAny {
    /// Full type path, e.g. `shop::model::Order`.
    fn type_path(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runtime type name used in qualified paths, e.g. `Order`.
    fn type_name(&self) -> String {
        short_type_name(self.type_path())
    }

    /// How this value relates to the value it wraps, if any.
    fn peel(&self) -> Peel<'_> {
        Peel::Itself
    }

    /// The variant name, for enumerated constants.
    fn variant_name(&self) -> Option<&str> {
        None
    }

    /// Whether this is a date/time value. Temporal values are never asserted.
    fn is_temporal(&self) -> bool {
        false
    }

    /// The elements, for ordered indexable collections.
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        None
    }

    /// The zero-argument accessors of a composite, in declaration order.
    fn accessors(&self) -> Vec<Accessor<'_>> {
        Vec::new()
    }
}

/// The result of looking through a wrapper type.
pub enum Peel<'a> {
    /// Not a wrapper: classify the value itself.
    Itself,
    /// An empty optional.
    Absent,
    /// The contents of a non-empty optional.
    Present(&'a dyn Inspect),
    /// A smart pointer's pointee. Identity is the pointee's.
    Inner(&'a dyn Inspect),
    /// A borrow of interior-mutable contents, held for the whole subtree.
    Guarded(Ref<'a, dyn Inspect>),
    /// The contents could not be reached.
    Failed(AccessError),
}

impl fmt::Debug for Peel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peel::Itself => write!(f, "Itself"),
            Peel::Absent => write!(f, "Absent"),
            Peel::Present(inner) => write!(f, "Present({})", inner.type_name()),
            Peel::Inner(inner) => write!(f, "Inner({})", inner.type_name()),
            Peel::Guarded(inner) => write!(f, "Guarded({})", inner.type_name()),
            Peel::Failed(err) => write!(f, "Failed({})", err),
        }
    }
}

/// An ordered, indexable collection.
pub trait Sequence {
    fn len(&self) -> usize;

    fn element(&self, index: usize) -> Option<&dyn Inspect>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The value an accessor produced.
pub enum Held<'a> {
    /// A value that lives in the inspected graph.
    Borrowed(&'a dyn Inspect),
    /// A value computed by the accessor. It has no identity in the graph.
    Owned(Box<dyn Inspect>),
}

/// What reading an accessor yields.
pub type Reading<'a> = Result<Held<'a>, AccessError>;

/// One zero-argument read operation exposed by a composite.
pub struct Accessor<'a> {
    name: &'static str,
    declared: Option<&'static str>,
    read: Box<dyn FnOnce() -> Reading<'a> + 'a>,
}

impl<'a> Accessor<'a> {
    /// An accessor backed by an arbitrary read function.
    pub fn new(name: &'static str, read: impl FnOnce() -> Reading<'a> + 'a) -> Self {
        Self {
            name,
            declared: None,
            read: Box::new(read),
        }
    }

    /// An accessor returning a value stored in the graph.
    pub fn field<T: Inspect>(name: &'static str, value: &'a T) -> Self {
        Self::new(name, move || Ok(Held::Borrowed(value as &dyn Inspect)))
    }

    /// An accessor returning a freshly computed value.
    pub fn computed<T: Inspect>(name: &'static str, compute: impl FnOnce() -> T + 'a) -> Self {
        Self::new(name, move || {
            let value: Box<dyn Inspect> = Box::new(compute());
            Ok(Held::Owned(value))
        })
    }

    /// An accessor whose computation may fail. Failures are recovered as
    /// "no value" by the traversal.
    pub fn fallible<T, E>(name: &'static str, compute: impl FnOnce() -> Result<T, E> + 'a) -> Self
    where
        T: Inspect,
        E: fmt::Display,
    {
        Self::new(name, move || match compute() {
            Ok(value) => {
                let value: Box<dyn Inspect> = Box::new(value);
                Ok(Held::Owned(value))
            }
            Err(err) => Err(AccessError::Invocation(err.to_string())),
        })
    }

    /// Record the static type the accessor is declared to return, e.g.
    /// `"dyn Shape"`. Paths are qualified when the runtime type differs.
    pub fn declared_as(mut self, type_name: &'static str) -> Self {
        self.declared = Some(type_name);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declared_type(&self) -> Option<&'static str> {
        self.declared
    }

    /// Invoke the accessor.
    pub fn read(self) -> Reading<'a> {
        (self.read)()
    }
}

impl fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .finish()
    }
}

/// Strip module paths from a type path, including inside generic arguments.
///
/// `alloc::vec::Vec<shop::Line>` becomes `Vec<Line>`.
pub fn short_type_name(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut start = 0;
    for (idx, ch) in path.char_indices() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
            out.push_str(last_segment(&path[start..idx]));
            out.push(ch);
            start = idx + ch.len_utf8();
        }
    }
    out.push_str(last_segment(&path[start..]));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

fn as_inspect<T: Inspect>(value: &T) -> &(dyn Inspect + 'static) {
    value
}

macro_rules! impl_inspect_leaf {
    ($($ty:ty),* $(,)?) => {
        $(impl Inspect for $ty {})*
    };
}

impl_inspect_leaf!(
    i64,
    u64,
    isize,
    usize,
    i32,
    u32,
    i16,
    u16,
    i8,
    u8,
    bool,
    String,
    &'static str,
    Cow<'static, str>,
    SystemTime,
    Instant,
);

impl<T: Inspect> Inspect for Option<T> {
    fn peel(&self) -> Peel<'_> {
        match self {
            Some(value) => Peel::Present(value),
            None => Peel::Absent,
        }
    }
}

impl<T: Inspect> Inspect for Box<T> {
    fn peel(&self) -> Peel<'_> {
        Peel::Inner(&**self)
    }
}

impl<T: Inspect> Inspect for Rc<T> {
    fn peel(&self) -> Peel<'_> {
        Peel::Inner(&**self)
    }
}

impl<T: Inspect> Inspect for Arc<T> {
    fn peel(&self) -> Peel<'_> {
        Peel::Inner(&**self)
    }
}

impl<T: Inspect> Inspect for RefCell<T> {
    fn peel(&self) -> Peel<'_> {
        match self.try_borrow() {
            Ok(guard) => Peel::Guarded(Ref::map(guard, as_inspect::<T>)),
            Err(err) => Peel::Failed(AccessError::Invocation(err.to_string())),
        }
    }
}

impl<T: Inspect> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Inspect> {
        self.get(index).map(|value| value as &dyn Inspect)
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        Some(self)
    }
}

impl<T: Inspect> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Inspect> {
        self.get(index).map(|value| value as &dyn Inspect)
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        Some(self)
    }
}

impl<T: Inspect, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Option<&dyn Inspect> {
        self.get(index).map(|value| value as &dyn Inspect)
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        Some(self)
    }
}
