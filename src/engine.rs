//! The traversal engine.
//!
//! A depth-first, pre-order walk over an object graph that emits one
//! [`AssertionLine`] per observable terminal value.
//!
//! # Identity and the visited set
//!
//! Composite and sequence values (and the remaining non-exempt kinds) are
//! recorded by identity, an `(address, TypeId)` pair, the first time they
//! are reached. Reaching the same value again through another path yields
//! nothing for that subtree, which both breaks reference cycles and avoids
//! duplicate assertions for diamond-shaped graphs. The type is part of the
//! key because a struct and its first field share an address.
//!
//! Text, integral and enumerated values are never recorded: they are
//! compared by value, and two unrelated accessors holding the same string
//! must both be asserted. Zero-sized values have no address of their own
//! and are never recorded.
//!
//! Values computed by an accessor are kept alive until the traversal ends,
//! so their addresses cannot be reused by later computed values. That
//! lets a cycle closed through a computed accessor (an upgraded `Weak`
//! parent, say) terminate like any other.

use std::any::TypeId;
use std::collections::HashSet;
use std::mem;

use crate::classify::{classify_value, Classified};
use crate::config::{AccessorOrder, GeneratorConfig};
use crate::errors::{AccessError, AssertifyError, AssertifyResult};
use crate::filter::AccessorDescriptor;
use crate::inspect::{Held, Inspect, Peel};
use crate::output::AssertionLine;
use crate::path::{Origin, PathBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Identity {
    address: usize,
    type_id: TypeId,
}

impl Identity {
    /// `None` for zero-sized values, which all share one dangling address.
    fn of(value: &dyn Inspect) -> Option<Self> {
        if mem::size_of_val(value) == 0 {
            return None;
        }
        Some(Self {
            address: value as *const dyn Inspect as *const () as usize,
            type_id: value.as_any().type_id(),
        })
    }
}

/// State of one traversal. Created per call, never shared.
pub(crate) struct TraversalContext<'c> {
    config: &'c GeneratorConfig,
    paths: PathBuilder,
    visited: HashSet<Identity>,
    lines: Vec<AssertionLine>,
    depth: usize,
    /// Computed accessor results, kept alive for the whole traversal.
    retained: Vec<Box<dyn Inspect>>,
}

impl<'c> TraversalContext<'c> {
    pub(crate) fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            paths: PathBuilder::new(config.dialect),
            visited: HashSet::new(),
            lines: Vec::new(),
            depth: 0,
            retained: Vec::new(),
        }
    }

    /// Traverse `root`, named `name` in the generated code.
    pub(crate) fn run(mut self, root: &dyn Inspect, name: &str) -> AssertifyResult<Vec<AssertionLine>> {
        let path = self.paths.root(name);
        let optional = matches!(root.peel(), Peel::Absent | Peel::Present(_));
        self.lines.push(AssertionLine::NotNull {
            path: path.clone(),
            optional,
        });
        self.visit(root, path, Origin::Root)?;
        Ok(self.lines)
    }

    fn visit(&mut self, value: &dyn Inspect, path: String, origin: Origin) -> AssertifyResult<()> {
        match value.peel() {
            Peel::Itself => self.visit_resolved(value, path, origin),
            Peel::Absent => {
                self.visit_null(path);
                Ok(())
            }
            Peel::Present(inner) => {
                let path = self.paths.unwrap_present(path);
                self.visit(inner, path, origin)
            }
            Peel::Inner(inner) => self.visit(inner, path, origin),
            Peel::Guarded(inner) => {
                let path = self.paths.borrow_cell(path);
                self.visit(&*inner, path, origin)
            }
            Peel::Failed(err) => {
                self.recover(&path, err)?;
                self.visit_null(path);
                Ok(())
            }
        }
    }

    fn visit_resolved(&mut self, value: &dyn Inspect, path: String, origin: Origin) -> AssertifyResult<()> {
        let classified = classify_value(value);
        let kind = classified.kind();

        if !kind.is_dedup_exempt() {
            if let Some(identity) = Identity::of(value) {
                if !self.visited.insert(identity) {
                    log::trace!("already visited {} at `{}`", value.type_name(), path);
                    return Ok(());
                }
            }
        }

        let path = self.paths.qualify(path, origin, &value.type_name());

        match classified {
            Classified::Null => self.visit_null(path),
            Classified::Temporal => {}
            Classified::Sequence(sequence) => {
                self.enter(&path)?;
                let len = sequence.len();
                if len > 0 || self.config.include_empty_lists {
                    self.lines.push(AssertionLine::Equals {
                        expected: self.paths.size_literal(len),
                        actual: self.paths.size(&path),
                    });
                }
                for index in 0..len {
                    let element_path = self.paths.index(&path, index);
                    match sequence.element(index) {
                        Some(element) => self.visit(element, element_path, Origin::Element)?,
                        None => self.visit_null(element_path),
                    }
                }
                self.leave();
            }
            Classified::Composite => {
                self.enter(&path)?;
                self.visit_composite(value, &path)?;
                self.leave();
            }
            Classified::Enumerated { .. } => {
                if let Some(pattern) = self.paths.literal(&classified) {
                    self.lines.push(AssertionLine::Matches {
                        pattern,
                        actual: path,
                    });
                }
            }
            terminal => {
                if let Some(expected) = self.paths.literal(&terminal) {
                    self.lines.push(AssertionLine::Equals {
                        expected,
                        actual: path,
                    });
                }
            }
        }
        Ok(())
    }

    fn visit_composite(&mut self, value: &dyn Inspect, path: &str) -> AssertifyResult<()> {
        if self.config.skips(value) {
            log::debug!("skipping ignored type {} at `{}`", value.type_path(), path);
            return Ok(());
        }

        let declaring_type = value.type_name();
        let mut accessors = value.accessors();
        if self.config.accessor_order == AccessorOrder::Lexicographic {
            accessors.sort_by_key(|accessor| accessor.name());
        }

        for accessor in accessors {
            let descriptor = AccessorDescriptor::describe(&declaring_type, &accessor);
            if !descriptor.is_admitted(self.config) {
                continue;
            }

            let accessor_path = self.paths.invoke(path, descriptor.name);
            let origin = Origin::Accessor {
                declared: accessor.declared_type(),
            };
            match accessor.read() {
                Ok(Held::Borrowed(result)) => self.visit(result, accessor_path, origin)?,
                Ok(Held::Owned(result)) => {
                    let visited = self.visit(&*result, accessor_path, origin);
                    self.retained.push(result);
                    visited?;
                }
                Err(err) => {
                    self.recover(&accessor_path, err)?;
                    self.visit_null(accessor_path);
                }
            }
        }
        Ok(())
    }

    fn visit_null(&mut self, path: String) {
        if self.config.include_null {
            self.lines.push(AssertionLine::Null { path });
        }
    }

    /// Invocation failures count as "no value"; anything else is fatal.
    fn recover(&self, path: &str, err: AccessError) -> AssertifyResult<()> {
        match err {
            AccessError::Invocation(reason) => {
                log::debug!("accessor `{}` produced no value: {}", path, reason);
                Ok(())
            }
            AccessError::Introspection(reason) => Err(AssertifyError::Introspection {
                path: path.to_string(),
                reason,
            }),
        }
    }

    fn enter(&mut self, path: &str) -> AssertifyResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(AssertifyError::DepthExceeded {
                limit: self.config.max_depth,
                path: path.to_string(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::Accessor;

    struct Pair {
        left: String,
        right: String,
    }

    impl Inspect for Pair {
        fn accessors(&self) -> Vec<Accessor<'_>> {
            vec![
                Accessor::field("left", &self.left),
                Accessor::field("right", &self.right),
            ]
        }
    }

    struct Nested {
        pair: Pair,
    }

    impl Inspect for Nested {
        fn accessors(&self) -> Vec<Accessor<'_>> {
            vec![Accessor::field("pair", &self.pair)]
        }
    }

    fn run(config: &GeneratorConfig, root: &dyn Inspect) -> Vec<AssertionLine> {
        TraversalContext::new(config).run(root, "r").unwrap()
    }

    #[test]
    fn test_identity_distinguishes_first_field() {
        let nested = Nested {
            pair: Pair {
                left: "a".to_string(),
                right: "b".to_string(),
            },
        };
        let outer = Identity::of(&nested).unwrap();
        let inner = Identity::of(&nested.pair).unwrap();
        assert_eq!(outer.address, inner.address);
        assert_ne!(outer, inner);

        // Both levels are traversed even though they share an address
        let lines = run(&GeneratorConfig::default(), &nested);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_equal_text_values_are_both_asserted() {
        let pair = Pair {
            left: "X".to_string(),
            right: "X".to_string(),
        };
        let lines = run(&GeneratorConfig::default(), &pair);
        assert_eq!(
            lines[1..],
            [
                AssertionLine::Equals {
                    expected: "\"X\"".to_string(),
                    actual: "r.left()".to_string(),
                },
                AssertionLine::Equals {
                    expected: "\"X\"".to_string(),
                    actual: "r.right()".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_depth_is_restored_after_subtrees() {
        let nested = Nested {
            pair: Pair {
                left: "a".to_string(),
                right: "b".to_string(),
            },
        };
        let config = GeneratorConfig {
            max_depth: 2,
            ..Default::default()
        };
        let mut context = TraversalContext::new(&config);
        context.visit(&nested, "r".to_string(), Origin::Root).unwrap();
        assert_eq!(context.depth, 0);

        let config = GeneratorConfig {
            max_depth: 1,
            ..Default::default()
        };
        let err = TraversalContext::new(&config).run(&nested, "r").unwrap_err();
        match err {
            AssertifyError::DepthExceeded { limit, path } => {
                assert_eq!(limit, 1);
                assert_eq!(path, "r.pair()");
            }
            other => panic!("expected DepthExceeded, got {:?}", other),
        }
    }
}
