// Qualified Names
// Dotted identifier paths with package and segment decomposition

use std::fmt;
use std::str::FromStr;

use crate::error::NameError;

/// Words that can never be used as an identifier segment
pub(crate) const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

/// Check whether `segment` is a legal identifier
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&segment)
}

/// A dotted identifier path such as `java.util.Map.Entry`.
///
/// Always holds at least one segment, and every segment is a legal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Parse a dotted name, rejecting empty input and illegal segments
    pub fn parse(text: &str) -> Result<Self, NameError> {
        if text.trim().is_empty() {
            return Err(NameError::Empty);
        }
        Self::from_segments(text.split('.'))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(NameError::Empty);
        }

        if let Some(bad) = segments.iter().find(|s| !is_identifier(s)) {
            return Err(NameError::InvalidSegment {
                name: segments.join("."),
                segment: bad.clone(),
            });
        }

        Ok(Self { segments })
    }

    /// Build from segments the grammar has already validated
    pub(crate) fn from_trusted(segments: Vec<String>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The final segment
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// All segments except the final one. For a name denoting a top-level
    /// type this is its package; empty for a single-segment name.
    pub fn package_path(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// True iff the leading segments equal `package` segment by segment.
    /// `java.utilities.List` does not start with package `java.util`.
    pub fn starts_with_package(&self, package: &QualifiedName) -> bool {
        self.starts_with_segments(&package.segments)
    }

    pub fn starts_with_segments(&self, prefix: &[String]) -> bool {
        prefix.len() <= self.segments.len() && self.segments[..prefix.len()] == *prefix
    }

    /// Number of leading segments that look like package names, judged by the
    /// lower-case naming convention. Used when a bare string carries no other
    /// information about where the package ends.
    pub fn conventional_package_len(&self) -> usize {
        self.segments
            .iter()
            .take_while(|s| s.chars().next().is_some_and(char::is_lowercase))
            .count()
    }

    /// The first `len` segments, or `None` when `len` is zero or out of range
    pub fn prefix(&self, len: usize) -> Option<QualifiedName> {
        (len > 0 && len <= self.segments.len()).then(|| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// Everything but the final segment, `None` for a single-segment name
    pub fn parent(&self) -> Option<QualifiedName> {
        self.prefix(self.segments.len() - 1)
    }

    /// Append a segment: `a.b` + `C` = `a.b.C`
    pub fn child(&self, segment: &str) -> Result<QualifiedName, NameError> {
        if !is_identifier(segment) {
            return Err(NameError::InvalidSegment {
                name: format!("{}.{}", self, segment),
                segment: segment.to_string(),
            });
        }
        Ok(self.child_unchecked(segment))
    }

    pub(crate) fn child_unchecked(&self, segment: &str) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Concatenate two names: `a.b` + `C.D` = `a.b.C.D`
    pub fn join(&self, tail: &QualifiedName) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.extend(tail.segments.iter().cloned());
        Self { segments }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> QualifiedName {
        QualifiedName::parse(text).unwrap()
    }

    #[test]
    fn test_segments_and_simple_name() {
        let n = name("java.util.Map.Entry");
        assert_eq!(n.segments(), ["java", "util", "Map", "Entry"]);
        assert_eq!(n.simple_name(), "Entry");
        assert_eq!(n.segment_count(), 4);
        assert_eq!(n.to_string(), "java.util.Map.Entry");
    }

    #[test]
    fn test_package_path() {
        assert_eq!(name("java.util.List").package_path(), ["java", "util"]);
        assert!(name("List").package_path().is_empty());
    }

    #[test]
    fn test_starts_with_package_is_segment_wise() {
        let n = name("java.utilities.List");
        assert!(!n.starts_with_package(&name("java.util")));
        assert!(n.starts_with_package(&name("java.utilities")));
        assert!(n.starts_with_package(&name("java")));
        assert!(!name("java").starts_with_package(&name("java.util")));
    }

    #[test]
    fn test_conventional_package_len() {
        assert_eq!(name("a.A.B").conventional_package_len(), 1);
        assert_eq!(name("java.util.List").conventional_package_len(), 2);
        assert_eq!(name("List").conventional_package_len(), 0);
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(QualifiedName::parse(""), Err(NameError::Empty));
        assert_eq!(QualifiedName::parse("   "), Err(NameError::Empty));
        assert!(matches!(
            QualifiedName::parse("a..B"),
            Err(NameError::InvalidSegment { segment, .. }) if segment.is_empty()
        ));
        assert!(matches!(
            QualifiedName::parse("a.1b"),
            Err(NameError::InvalidSegment { segment, .. }) if segment == "1b"
        ));
        assert!(matches!(
            QualifiedName::parse("a.class"),
            Err(NameError::InvalidSegment { segment, .. }) if segment == "class"
        ));
        assert!(QualifiedName::parse("java.util.*").is_err());
    }

    #[test]
    fn test_prefix_parent_child() {
        let n = name("a.b.C");
        assert_eq!(n.prefix(2), Some(name("a.b")));
        assert_eq!(n.prefix(0), None);
        assert_eq!(n.prefix(4), None);
        assert_eq!(n.parent(), Some(name("a.b")));
        assert_eq!(name("a").parent(), None);
        assert_eq!(n.child("D").unwrap(), name("a.b.C.D"));
        assert!(n.child("D.E").is_err());
        assert_eq!(name("a.b").join(&name("C.D")), name("a.b.C.D"));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("$proxy"));
        assert!(is_identifier("_internal"));
        assert!(is_identifier("café"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("return"));
        assert!(!is_identifier(""));
    }
}
