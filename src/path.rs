//! Access-path expressions and literal syntax.
//!
//! [`PathBuilder`] extends the expression that re-obtains the current value
//! from the root, one accessor, index or unwrap at a time, and renders
//! the expected side of assertions. All syntax depends on the
//! [`Dialect`].

use std::fmt::Write;

use crate::classify::Classified;
use crate::config::Dialect;

/// Where a value was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The caller-supplied root. Its path is never qualified.
    Root,
    /// An accessor, with the static type it is declared to return, if known.
    Accessor { declared: Option<&'static str> },
    /// An element of a sequence.
    Element,
}

/// Builds path expressions and literals in one dialect.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder {
    dialect: Dialect,
}

impl PathBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn root(&self, name: &str) -> String {
        name.to_string()
    }

    /// Invoke a zero-argument accessor on `path`.
    pub fn invoke(&self, path: &str, accessor: &str) -> String {
        match self.dialect {
            Dialect::Rust => format!("{}.{}()", path, accessor),
            Dialect::JUnit => format!("{}.{}()", path, java_getter(accessor)),
        }
    }

    /// Index into the sequence at `path`.
    pub fn index(&self, path: &str, index: usize) -> String {
        match self.dialect {
            Dialect::Rust => format!("{}[{}]", path, index),
            Dialect::JUnit => format!("{}.get({})", path, index),
        }
    }

    /// The contents of the present optional at `path`.
    pub fn unwrap_present(&self, path: String) -> String {
        match self.dialect {
            Dialect::Rust => format!("{}.unwrap()", path),
            Dialect::JUnit => path,
        }
    }

    /// A borrow of the interior-mutable cell at `path`.
    pub fn borrow_cell(&self, path: String) -> String {
        match self.dialect {
            Dialect::Rust => format!("{}.borrow()", path),
            Dialect::JUnit => path,
        }
    }

    /// Qualify `path` with the runtime type of the present value it yields.
    ///
    /// JUnit casts every accessor result and element to its runtime type,
    /// with Rust scalars and sequences mapped to their boxed Java
    /// counterparts.
    /// Rust resolves methods statically, so a downcast is only needed when
    /// the accessor is declared to return some other (erased) type.
    pub fn qualify(&self, path: String, origin: Origin, runtime_type: &str) -> String {
        match (self.dialect, origin) {
            (_, Origin::Root) => path,
            (Dialect::JUnit, _) => format!("(({}) {})", java_type(runtime_type), path),
            (Dialect::Rust, Origin::Accessor { declared: Some(declared) })
                if declared != runtime_type =>
            {
                format!("{}.as_any().downcast_ref::<{}>().unwrap()", path, runtime_type)
            }
            (Dialect::Rust, _) => path,
        }
    }

    /// The size of the sequence at `path`.
    pub fn size(&self, path: &str) -> String {
        match self.dialect {
            Dialect::Rust => format!("{}.len()", path),
            Dialect::JUnit => format!("{}.size()", path),
        }
    }

    pub fn size_literal(&self, len: usize) -> String {
        len.to_string()
    }

    /// The literal reconstructing a terminal value, or `None` for kinds that
    /// are not asserted by value. Rust enumerated values render as a
    /// pattern matching the variant whatever its payload.
    pub fn literal(&self, value: &Classified<'_>) -> Option<String> {
        let literal = match (self.dialect, value) {
            (Dialect::Rust, Classified::Integer64(integer))
            | (Dialect::Rust, Classified::Integer32(integer)) => {
                format!("{}{}", integer.value, integer.type_name)
            }
            (Dialect::JUnit, Classified::Integer64(integer)) => {
                format!("Long.valueOf({}L)", integer.value)
            }
            (Dialect::JUnit, Classified::Integer32(integer)) => {
                format!("Integer.valueOf({})", integer.value)
            }
            (Dialect::Rust, Classified::Text(text)) => format!("{:?}", text),
            (Dialect::JUnit, Classified::Text(text)) => java_string_literal(text),
            (Dialect::Rust, Classified::Boolean(flag)) => flag.to_string(),
            (Dialect::JUnit, Classified::Boolean(true)) => "Boolean.TRUE".to_string(),
            (Dialect::JUnit, Classified::Boolean(false)) => "Boolean.FALSE".to_string(),
            (Dialect::Rust, Classified::Enumerated { type_name, variant }) => {
                format!("{}::{} {{ .. }}", type_name, variant)
            }
            (Dialect::JUnit, Classified::Enumerated { type_name, variant }) => {
                format!("{}.{}", type_name, variant)
            }
            _ => return None,
        };
        Some(literal)
    }
}

/// The Java type a value of the Rust type `runtime_type` is cast to.
fn java_type(runtime_type: &str) -> String {
    if let Some(element) = type_argument(runtime_type, "Vec<")
        .or_else(|| type_argument(runtime_type, "VecDeque<"))
    {
        return format!("List<{}>", java_type(element));
    }
    if let Some(element) = runtime_type
        .strip_prefix('[')
        .and_then(|rest| rest.rsplit_once(';'))
        .map(|(element, _)| element)
    {
        return format!("List<{}>", java_type(element));
    }
    let mapped = match runtime_type {
        "i64" | "u64" | "isize" | "usize" => "Long",
        "i32" | "u32" | "i16" | "u16" | "i8" | "u8" => "Integer",
        "String" | "&str" | "Cow<str>" => "String",
        "bool" => "Boolean",
        other => other,
    };
    mapped.to_string()
}

fn type_argument<'a>(type_name: &'a str, prefix: &str) -> Option<&'a str> {
    type_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix('>'))
}

/// `first_name` becomes `getFirstName`; names already in getter form are
/// kept.
fn java_getter(accessor: &str) -> String {
    let starts_getter = |prefix: &str| {
        accessor
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .map_or(false, |c| c.is_ascii_uppercase())
    };
    if starts_getter("get") || starts_getter("is") {
        return accessor.to_string();
    }

    let bare = accessor.strip_prefix("get_").unwrap_or(accessor);
    let mut getter = String::from("get");
    for part in bare.split('_').filter(|part| !part.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            getter.extend(first.to_uppercase());
            getter.push_str(chars.as_str());
        }
    }
    getter
}

fn java_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
