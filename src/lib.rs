#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/assertify/main/assets/assertify.svg",
    issue_tracker_base_url = "https://github.com/storyscript/assertify/issues/"
)]

//! Regression-test assertions from a snapshot of an object graph.
//!
//! Given a root value, `assertify` walks everything reachable from it
//! through zero-argument accessors and emits source code asserting the
//! current state: one equality assertion per integral, text, boolean and
//! enumerated value, one size assertion per sequence, and (optionally) one
//! nullity assertion per absent value. Paste the output into a test and any
//! later change to the observable state of the graph breaks it.
//!
//! ## Pieces
//!
//! - [`Inspect`] - How a type describes its shape ([`Accessor`]s, wrappers, sequences)
//! - [`classify`] - Maps a value to its [`ValueKind`]
//! - [`GeneratorConfig`] - Inclusion policy, loadable from TOML
//! - [`PathBuilder`] - Path expressions and literals per [`Dialect`]
//! - [`Generator`] - Runs the traversal and renders [`Assertions`]
//!
//! ## Example
//!
//! ```
//! use assertify::{inspect_struct, Dialect};
//!
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//!     tags: Vec<String>,
//! }
//!
//! inspect_struct!(Person { name, age, tags });
//!
//! let person = Person {
//!     name: "Ann".to_string(),
//!     age: None,
//!     tags: vec![],
//! };
//!
//! let code = assertify::configure().assertify(&person, "person").unwrap();
//! assert_eq!(code, "let _ = &person;\nassert_eq!(person.name(), \"Ann\");\n");
//!
//! let code = assertify::configure()
//!     .include_null()
//!     .with_dialect(Dialect::JUnit)
//!     .assertify(&person, "person")
//!     .unwrap();
//! assert!(code.contains("Assert.assertNull(person.getAge());"));
//! ```

#[macro_use]
mod macros;

mod classify;
mod config;
mod engine;
mod errors;
mod filter;
mod inspect;
mod output;
mod path;

use std::any::{Any, TypeId};
use std::io;

pub use classify::{classify, classify_value, Classified, Integer, ValueKind};
pub use config::{
    AccessorOrder, Dialect, GeneratorConfig, DEFAULT_MAX_DEPTH, DEFAULT_SKIPPED_NAMESPACES,
};
pub use errors::{AccessError, AssertifyError, AssertifyResult, ConfigError};
pub use filter::{is_denylisted, is_identifier_like, AccessorDescriptor, CLASS_IDENTITY_ACCESSORS};
pub use inspect::{short_type_name, Accessor, AsAny, Held, Inspect, Peel, Reading, Sequence};
pub use output::{AssertionLine, Assertions};
pub use path::{Origin, PathBuilder};

use engine::TraversalContext;

/// Start configuring a [`Generator`].
///
/// ```
/// let generator = assertify::configure().include_null().include_empty_lists();
/// assert!(generator.config().include_null);
/// ```
pub fn configure() -> Generator {
    Generator::new()
}

/// Generates assertions under one [`GeneratorConfig`].
///
/// Configuration methods consume and return the generator. Generation
/// methods borrow it, so a configured generator can be reused; every call
/// starts from fresh traversal state.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a nullity assertion for every absent value.
    pub fn include_null(mut self) -> Self {
        self.config.include_null = true;
        self
    }

    /// Emit a size assertion for empty sequences too.
    pub fn include_empty_lists(mut self) -> Self {
        self.config.include_empty_lists = true;
        self
    }

    /// Traverse identifier-like accessors (`id`, `get_id`).
    pub fn include_identifiers(mut self) -> Self {
        self.config.include_identifiers = true;
        self
    }

    /// Skip composites of type `T`.
    pub fn ignore<T: Any>(mut self) -> Self {
        self.config.ignored_types.insert(TypeId::of::<T>());
        self
    }

    /// Skip composites of any of the given types.
    pub fn ignore_types(mut self, types: impl IntoIterator<Item = TypeId>) -> Self {
        self.config.ignored_types.extend(types);
        self
    }

    /// Skip composites whose short name or full type path is `name`.
    pub fn ignore_type_named(mut self, name: impl Into<String>) -> Self {
        self.config.ignored_type_names.insert(name.into());
        self
    }

    /// Skip composites whose type path starts with `prefix`.
    pub fn skip_namespace(mut self, prefix: impl Into<String>) -> Self {
        self.config.skipped_namespaces.push(prefix.into());
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_accessor_order(mut self, order: AccessorOrder) -> Self {
        self.config.accessor_order = order;
        self
    }

    /// Replace the whole configuration, e.g. one loaded with
    /// [`GeneratorConfig::load`].
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Traverse `root` and collect the assertions. `name` is the variable
    /// the generated code refers to the root by.
    pub fn assertions(&self, root: &dyn Inspect, name: &str) -> AssertifyResult<Assertions> {
        let lines = TraversalContext::new(&self.config).run(root, name)?;
        log::debug!(
            "generated {} assertions for `{}` ({})",
            lines.len(),
            name,
            root.type_path()
        );
        Ok(Assertions::new(self.config.dialect, lines))
    }

    /// Traverse `root` and render the assertions, one statement per line.
    pub fn assertify(&self, root: &dyn Inspect, name: &str) -> AssertifyResult<String> {
        Ok(self.assertions(root, name)?.to_string())
    }

    /// Traverse `root` and write the rendered assertions to `out`.
    pub fn write_to(
        &self,
        root: &dyn Inspect,
        name: &str,
        out: &mut impl io::Write,
    ) -> AssertifyResult<()> {
        let assertions = self.assertions(root, name)?;
        write!(out, "{}", assertions)?;
        Ok(())
    }

    /// Traverse `root` and print the rendered assertions to standard output.
    pub fn print(&self, root: &dyn Inspect, name: &str) -> AssertifyResult<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(root, name, &mut lock)
    }
}
