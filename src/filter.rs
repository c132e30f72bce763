//! Accessor filtering.
//!
//! Decides which of a composite's accessors take part in the traversal.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::config::GeneratorConfig;
use crate::inspect::Accessor;

/// Accessors exposing the type of a value rather than its state. Never
/// traversed under any configuration.
pub const CLASS_IDENTITY_ACCESSORS: &[&str] = &["type_id", "get_class"];

/// Framework and persistence plumbing that is never part of a value's
/// observable state.
static INFRASTRUCTURE_ACCESSORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "cache_key",
        "cache_key_attributes",
        "properties",
        "constraints",
        "data_type_constraints",
        "data_type_id",
        "property_type",
        "association_handler",
        "instance_id",
        "internal_date",
        "tech_version",
    ]
    .iter()
    .copied()
    .collect()
});

/// Whether an accessor name follows the identifier convention (`id`,
/// `get_id`). Identifier values are often generated and unstable across
/// runs.
pub fn is_identifier_like(name: &str) -> bool {
    let bare = name.strip_prefix("get_").unwrap_or(name);
    bare.eq_ignore_ascii_case("id")
}

/// Whether an accessor name is on the fixed denylist.
pub fn is_denylisted(name: &str) -> bool {
    let bare = name.strip_prefix("get_").unwrap_or(name);
    CLASS_IDENTITY_ACCESSORS.contains(&name) || INFRASTRUCTURE_ACCESSORS.contains(bare)
}

/// What the filter knows about one accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorDescriptor {
    pub name: &'static str,
    /// Short name of the composite type exposing the accessor.
    pub declaring_type: String,
    pub denylisted: bool,
    pub identifier: bool,
}

impl AccessorDescriptor {
    pub fn describe(declaring_type: &str, accessor: &Accessor<'_>) -> Self {
        let name = accessor.name();
        Self {
            name,
            declaring_type: declaring_type.to_string(),
            denylisted: is_denylisted(name),
            identifier: is_identifier_like(name),
        }
    }

    /// Whether the accessor is traversed under `config`.
    pub fn is_admitted(&self, config: &GeneratorConfig) -> bool {
        !self.denylisted && (!self.identifier || config.include_identifiers)
    }
}
