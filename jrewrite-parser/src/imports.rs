// Import Resolution
// Whether an import brings a type into scope, and the canonical import order

use std::cmp::Ordering;
use std::sync::Arc;

use crate::ast::Import;
use crate::error::NameError;
use crate::name::QualifiedName;
use crate::types::ClassType;

impl Import {
    /// Does this import bring the type named by `query` into scope?
    ///
    /// - `import a.b.C;` matches exactly `a.b.C`, not its nested types.
    /// - `import a.b.*;` matches any type whose outermost enclosing type is
    ///   declared directly in package `a.b`, however deeply nested.
    /// - `import static a.b.C.m;` and `import static a.b.C.*;` match the
    ///   owning type `a.b.C` only.
    ///
    /// A bare string does not say where its package ends, so the package is
    /// taken to be the leading segments that start with a lower-case letter.
    pub fn is_from_type(&self, query: &str) -> Result<bool, NameError> {
        let query = QualifiedName::parse(query)?;
        let package_len = query.conventional_package_len();
        Ok(self.brings_into_scope(&query, package_len))
    }

    /// [`Import::is_from_type`] for a resolved type, using its recorded
    /// package boundary
    pub fn is_from_class(&self, class: &ClassType) -> bool {
        self.brings_into_scope(class.fully_qualified_name(), class.package_segments().len())
    }

    fn brings_into_scope(&self, query: &QualifiedName, package_len: usize) -> bool {
        match (self.is_static(), self.wildcard) {
            (false, false) => self.name == *query,
            (false, true) => {
                package_len < query.segment_count()
                    && query.segments()[..package_len] == *self.name.segments()
            }
            (true, false) => self.name.parent().as_ref() == Some(query),
            (true, true) => self.name == *query,
        }
    }

    /// The owning type of a static import, or the imported type otherwise.
    /// `None` for a package wildcard.
    pub fn type_name(&self) -> Option<QualifiedName> {
        match (self.is_static(), self.wildcard) {
            (false, false) | (true, true) => Some(self.name.clone()),
            (true, false) => self.name.parent(),
            (false, true) => None,
        }
    }

    /// The text imports are ordered by: `static a.b.C.*`, `a.b.C`
    pub fn full_text(&self) -> String {
        if self.is_static() {
            format!("static {}", self.path_text())
        } else {
            self.path_text()
        }
    }

    /// Canonical import order: plain lexicographic order of [`Import::full_text`]
    pub fn compare(&self, other: &Import) -> Ordering {
        self.full_text().cmp(&other.full_text())
    }
}

/// Sort imports into canonical order. Imports with equal text keep their
/// relative order.
pub fn sort_imports(imports: &mut [Arc<Import>]) {
    imports.sort_by(|a, b| a.compare(b));
}

/// Whether imports are already in canonical order
pub fn is_sorted(imports: &[Arc<Import>]) -> bool {
    imports
        .windows(2)
        .all(|pair| pair[0].compare(&pair[1]) != Ordering::Greater)
}
