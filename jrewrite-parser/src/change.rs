// Change Records
// Before and after versions of a unit, rendered as a git-style patch

use std::collections::BTreeSet;
use std::path::Path;

use similar::{ChangeTag, TextDiff};

use crate::ast::CompilationUnit;
use crate::printer::Print;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 3;

/// The result of rewriting one unit
#[derive(Debug, Clone)]
pub struct Change {
    /// `None` when the unit is being created
    original: Option<CompilationUnit>,
    /// `None` when the unit is being deleted
    fixed: Option<CompilationUnit>,
    visitors_that_made_changes: BTreeSet<String>,
}

impl Change {
    pub fn new<I, S>(
        original: Option<CompilationUnit>,
        fixed: Option<CompilationUnit>,
        visitors_that_made_changes: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            original,
            fixed,
            visitors_that_made_changes: visitors_that_made_changes
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }

    pub fn original(&self) -> Option<&CompilationUnit> {
        self.original.as_ref()
    }

    pub fn fixed(&self) -> Option<&CompilationUnit> {
        self.fixed.as_ref()
    }

    pub fn visitors_that_made_changes(&self) -> &BTreeSet<String> {
        &self.visitors_that_made_changes
    }

    /// Git-style patch between the printed original and fixed units
    pub fn diff(&self) -> String {
        self.diff_relative_to(None)
    }

    /// Like [`Change::diff`], with file paths made relative to `relative_to`
    pub fn diff_relative_to(&self, relative_to: Option<&Path>) -> String {
        let old_source = self.original.as_ref().map(Print::print).unwrap_or_default();
        let new_source = self.fixed.as_ref().map(Print::print).unwrap_or_default();
        if old_source == new_source {
            return String::new();
        }

        let path = self.display_path(relative_to);
        let diff = TextDiff::from_lines(&old_source, &new_source);

        let mut output = String::new();
        output.push_str(&format!("diff --git a/{path} b/{path}\n"));
        output.push_str(&format!("--- a/{path}\n"));
        output.push_str(&format!("+++ b/{path}\n"));

        for (idx, group) in diff.grouped_ops(CONTEXT_LINES).iter().enumerate() {
            let (Some(first), Some(last)) = (group.first(), group.last()) else {
                continue;
            };
            let old_range = first.old_range().start..last.old_range().end;
            let new_range = first.new_range().start..last.new_range().end;

            output.push_str(&format!(
                "@@ -{} +{} @@",
                hunk_range(old_range.start, old_range.len()),
                hunk_range(new_range.start, new_range.len()),
            ));
            if idx == 0 && !self.visitors_that_made_changes.is_empty() {
                let visitors: Vec<&str> = self
                    .visitors_that_made_changes
                    .iter()
                    .map(String::as_str)
                    .collect();
                output.push(' ');
                output.push_str(&visitors.join(", "));
            }
            output.push('\n');

            for op in group {
                for change in diff.iter_changes(op) {
                    let sign = match change.tag() {
                        ChangeTag::Delete => '-',
                        ChangeTag::Insert => '+',
                        ChangeTag::Equal => ' ',
                    };
                    output.push(sign);
                    output.push_str(change.value());
                    if !change.value().ends_with('\n') {
                        output.push_str("\n\\ No newline at end of file\n");
                    }
                }
            }
        }

        output
    }

    fn display_path(&self, relative_to: Option<&Path>) -> String {
        let source_path = self
            .fixed
            .as_ref()
            .or(self.original.as_ref())
            .and_then(|unit| unit.source_path.as_deref())
            .unwrap_or("partial");
        let path = Path::new(source_path);
        let path = relative_to
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path);
        path.display().to_string()
    }
}

/// `start,len` in 1-based unified diff notation
fn hunk_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}
