//! Macros for implementing [`Inspect`](crate::Inspect) and printing
//! assertions.

/// Implement [`Inspect`](crate::Inspect) for a struct whose accessors are
/// named after its fields.
///
/// Each listed field becomes an [`Accessor::field`](crate::Accessor::field)
/// in the order given. Fields that are not listed are not traversed.
///
/// # Example
///
/// ```
/// use assertify::inspect_struct;
///
/// struct Line {
///     sku: String,
///     quantity: u32,
/// }
///
/// inspect_struct!(Line { sku, quantity });
/// ```
#[macro_export]
macro_rules! inspect_struct {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Inspect for $ty {
            fn accessors(&self) -> ::std::vec::Vec<$crate::Accessor<'_>> {
                ::std::vec![
                    $($crate::Accessor::field(::std::stringify!($field), &self.$field)),*
                ]
            }
        }
    };
}

/// Implement [`Inspect`](crate::Inspect) for an enum whose values are
/// asserted by variant name.
///
/// Variants carrying data are matched too; their payload is not traversed.
///
/// # Example
///
/// ```
/// use assertify::{inspect_enum, Inspect};
///
/// enum Status {
///     Open,
///     Closed { reason: String },
/// }
///
/// inspect_enum!(Status { Open, Closed });
///
/// assert_eq!(Status::Open.variant_name(), Some("Open"));
/// ```
#[macro_export]
macro_rules! inspect_enum {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::Inspect for $ty {
            fn variant_name(&self) -> ::std::option::Option<&str> {
                ::std::option::Option::Some(match self {
                    $($ty::$variant { .. } => ::std::stringify!($variant),)*
                })
            }
        }
    };
}

/// Print the assertions for a value to standard output, naming the root
/// after the expression.
///
/// Evaluates to an [`AssertifyResult<()>`](crate::AssertifyResult). A
/// configured [`Generator`](crate::Generator) may be passed as a second
/// argument.
///
/// ```ignore
/// let order = load_order();
/// assertify!(order).unwrap();
/// assertify!(order, assertify::configure().include_null()).unwrap();
/// ```
#[macro_export]
macro_rules! assertify {
    ($value:expr) => {
        $crate::assertify!($value, $crate::configure())
    };
    ($value:expr, $generator:expr) => {
        $generator.print(&$value, ::std::stringify!($value))
    };
}
