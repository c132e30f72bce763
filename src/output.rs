//! Generated assertions and their rendering.

use std::fmt;

use crate::config::Dialect;

/// One generated statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionLine {
    /// The root exists. `optional` is set when the root is an `Option`.
    NotNull { path: String, optional: bool },
    /// The value at `path` is absent.
    Null { path: String },
    /// The value at `actual` equals the literal `expected`.
    Equals { expected: String, actual: String },
    /// The enumerated value at `actual` is the variant named by `pattern`.
    Matches { pattern: String, actual: String },
}

impl AssertionLine {
    /// The path expression the statement asserts on.
    pub fn path(&self) -> &str {
        match self {
            AssertionLine::NotNull { path, .. } | AssertionLine::Null { path } => path,
            AssertionLine::Equals { actual, .. } | AssertionLine::Matches { actual, .. } => actual,
        }
    }

    /// Render as a single statement, without line terminator.
    pub fn render(&self, dialect: Dialect) -> String {
        match (dialect, self) {
            (Dialect::Rust, AssertionLine::NotNull { path, optional: true }) => {
                format!("assert!({}.is_some());", path)
            }
            // References cannot be null; the binding only checks the root is in scope.
            (Dialect::Rust, AssertionLine::NotNull { path, optional: false }) => {
                format!("let _ = &{};", path)
            }
            (Dialect::Rust, AssertionLine::Null { path }) => format!("assert!({}.is_none());", path),
            (Dialect::Rust, AssertionLine::Equals { expected, actual }) => {
                format!("assert_eq!({}, {});", actual, expected)
            }
            (Dialect::Rust, AssertionLine::Matches { pattern, actual }) => {
                format!("assert!(matches!({}, {}));", actual, pattern)
            }
            (Dialect::JUnit, AssertionLine::NotNull { path, .. }) => {
                format!("Assert.assertNotNull({});", path)
            }
            (Dialect::JUnit, AssertionLine::Null { path }) => format!("Assert.assertNull({});", path),
            (Dialect::JUnit, AssertionLine::Equals { expected, actual })
            | (Dialect::JUnit, AssertionLine::Matches { pattern: expected, actual }) => {
                format!("Assert.assertEquals({}, {});", expected, actual)
            }
        }
    }
}

/// The assertions generated for one root, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertions {
    dialect: Dialect,
    lines: Vec<AssertionLine>,
}

impl Assertions {
    pub fn new(dialect: Dialect, lines: Vec<AssertionLine>) -> Self {
        Self { dialect, lines }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn lines(&self) -> &[AssertionLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<AssertionLine> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any statement asserts on exactly `path`.
    pub fn mentions(&self, path: &str) -> bool {
        self.lines.iter().any(|line| line.path() == path)
    }
}

impl fmt::Display for Assertions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line.render(self.dialect))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<AssertionLine> {
        vec![
            AssertionLine::NotNull {
                path: "r".to_string(),
                optional: false,
            },
            AssertionLine::Equals {
                expected: "\"Ann\"".to_string(),
                actual: "r.name()".to_string(),
            },
            AssertionLine::Null {
                path: "r.age()".to_string(),
            },
        ]
    }

    #[test]
    fn test_render_variant_match() {
        let line = AssertionLine::Matches {
            pattern: "Status::Open { .. }".to_string(),
            actual: "r.status()".to_string(),
        };
        assert_eq!(
            line.render(Dialect::Rust),
            "assert!(matches!(r.status(), Status::Open { .. }));"
        );
        assert_eq!(line.path(), "r.status()");

        let line = AssertionLine::Matches {
            pattern: "Status.Open".to_string(),
            actual: "r.getStatus()".to_string(),
        };
        assert_eq!(
            line.render(Dialect::JUnit),
            "Assert.assertEquals(Status.Open, r.getStatus());"
        );
    }

    #[test]
    fn test_render_rust() {
        let assertions = Assertions::new(Dialect::Rust, sample());
        insta::assert_snapshot!(assertions.to_string(), @r###"
        let _ = &r;
        assert_eq!(r.name(), "Ann");
        assert!(r.age().is_none());
        "###);
    }

    #[test]
    fn test_render_junit() {
        let assertions = Assertions::new(Dialect::JUnit, sample());
        insta::assert_snapshot!(assertions.to_string(), @r###"
        Assert.assertNotNull(r);
        Assert.assertEquals("Ann", r.name());
        Assert.assertNull(r.age());
        "###);
    }

    #[test]
    fn test_optional_root() {
        let line = AssertionLine::NotNull {
            path: "maybe".to_string(),
            optional: true,
        };
        assert_eq!(line.render(Dialect::Rust), "assert!(maybe.is_some());");
        assert_eq!(line.render(Dialect::JUnit), "Assert.assertNotNull(maybe);");
    }

    #[test]
    fn test_mentions() {
        let assertions = Assertions::new(Dialect::Rust, sample());
        assert_eq!(assertions.len(), 3);
        assert!(assertions.mentions("r.age()"));
        assert!(!assertions.mentions("r.tags()"));
    }
}
