//! Generator configuration.
//!
//! This module provides [`GeneratorConfig`], the inclusion policy for one
//! generator, and the enums selecting output syntax and accessor order.
//! A config is built once, either fluently through
//! [`Generator`](crate::Generator) or from a TOML file, and is read-only
//! while a traversal runs.
//!
//! ```toml
//! include_null = true
//! include_empty_lists = false
//! include_identifiers = false
//! ignored_type_names = ["AuditTrail"]
//! dialect = "junit"
//! max_depth = 64
//! accessor_order = "lexicographic"
//! ```

use std::any::TypeId;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::inspect::Inspect;

/// Default limit on nesting of composites and sequences.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Type-path prefixes whose composites are never descended into.
pub const DEFAULT_SKIPPED_NAMESPACES: &[&str] = &["std::", "core::", "alloc::"];

/// Syntax of the generated assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `assert_eq!(order.total(), 250u64);`
    ///
    /// Accessors are rendered as getters of the same name returning
    /// scalars by value, text as `&str` or `String`, optionals as
    /// `Option<T>` with `T: Copy` or `Option<&T>`, cells as the `RefCell`
    /// itself and sequences as slices or `Vec`s. Enum values are checked
    /// with `matches!`, so neither `PartialEq` nor the variant's payload
    /// is needed.
    Rust,
    /// `Assert.assertEquals(Long.valueOf(250L), ((Long) order.getTotal()));`
    #[serde(rename = "junit")]
    JUnit,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Rust
    }
}

/// Order in which a composite's accessors are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorOrder {
    /// The order returned by [`Inspect::accessors`].
    Declared,
    /// Sorted by accessor name.
    Lexicographic,
}

impl Default for AccessorOrder {
    fn default() -> Self {
        AccessorOrder::Declared
    }
}

/// Inclusion policy for one generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Emit a nullity assertion for accessors that produce no value.
    pub include_null: bool,
    /// Emit a size assertion for empty sequences.
    pub include_empty_lists: bool,
    /// Keep identifier-like accessors (`id`).
    pub include_identifiers: bool,
    /// Types whose composites are skipped entirely.
    #[serde(skip)]
    pub ignored_types: HashSet<TypeId>,
    /// Same as `ignored_types`, by short name or full type path.
    pub ignored_type_names: BTreeSet<String>,
    /// Type-path prefixes whose composites are skipped entirely.
    pub skipped_namespaces: Vec<String>,
    /// Syntax of the generated assertions.
    pub dialect: Dialect,
    /// Nesting limit; exceeding it fails the call.
    pub max_depth: usize,
    /// Order of accessor traversal.
    pub accessor_order: AccessorOrder,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_null: false,
            include_empty_lists: false,
            include_identifiers: false,
            ignored_types: HashSet::new(),
            ignored_type_names: BTreeSet::new(),
            skipped_namespaces: DEFAULT_SKIPPED_NAMESPACES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
            dialect: Dialect::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            accessor_order: AccessorOrder::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Whether the composite `value` must be skipped without enumerating
    /// its accessors.
    pub fn skips(&self, value: &dyn Inspect) -> bool {
        if self.ignored_types.contains(&value.as_any().type_id()) {
            return true;
        }

        let type_path = value.type_path();
        if self
            .skipped_namespaces
            .iter()
            .any(|prefix| type_path.starts_with(prefix.as_str()))
        {
            return true;
        }

        !self.ignored_type_names.is_empty()
            && (self.ignored_type_names.contains(type_path)
                || self.ignored_type_names.contains(&value.type_name()))
    }
}
