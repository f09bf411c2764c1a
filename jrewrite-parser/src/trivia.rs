// Formatting Trivia
// Verbatim whitespace and comments that precede a token

use std::fmt;

/// Whitespace and comments preceding a token, kept exactly as written.
///
/// Every token in the tree owns the trivia in front of it, so printing the
/// trivia followed by the token text for each token in source order
/// reproduces the original input byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Trivia {
    text: String,
}

impl Trivia {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// No whitespace at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single space, the default separator for synthesized tokens
    pub fn space() -> Self {
        Self::new(" ")
    }

    /// A line break followed by `width` columns of indentation
    pub fn newline_indent(width: usize, with_spaces: bool) -> Self {
        let fill = if with_spaces { ' ' } else { '\t' };
        let mut text = String::with_capacity(width + 1);
        text.push('\n');
        text.extend(std::iter::repeat(fill).take(width));
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the trivia contains at least one line break
    pub fn starts_new_line(&self) -> bool {
        self.text.contains('\n')
    }

    /// The whitespace following the last line break, i.e. the indentation of
    /// the token this trivia precedes. `None` when the token is not the first
    /// on its line.
    pub fn indentation(&self) -> Option<&str> {
        let start = self.text.rfind('\n')? + 1;
        let rest = &self.text[start..];
        let end = rest
            .char_indices()
            .find(|(_, c)| !(*c == ' ' || *c == '\t'))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// Width of [`Trivia::indentation`], zero when the token does not start a line
    pub fn indent_width(&self) -> usize {
        self.indentation().map(|indent| indent.chars().count()).unwrap_or(0)
    }

    /// Comments embedded in this trivia, in source order, including their delimiters
    pub fn comments(&self) -> Vec<&str> {
        let mut comments = Vec::new();
        let text = self.text.as_str();
        let mut i = 0;

        while i < text.len() {
            let rest = &text[i..];
            if rest.starts_with("//") {
                let end = rest.find('\n').unwrap_or(rest.len());
                comments.push(&rest[..end]);
                i += end;
            } else if rest.starts_with("/*") {
                let end = rest[2..].find("*/").map(|e| e + 4).unwrap_or(rest.len());
                comments.push(&rest[..end]);
                i += end;
            } else {
                i += rest.chars().next().map(char::len_utf8).unwrap_or(1);
            }
        }

        comments
    }

    pub fn has_comments(&self) -> bool {
        !self.comments().is_empty()
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Trivia {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_after_blank_lines() {
        let trivia = Trivia::new("\n\n    ");
        assert_eq!(trivia.indentation(), Some("    "));
        assert_eq!(trivia.indent_width(), 4);
        assert!(trivia.starts_new_line());
    }

    #[test]
    fn test_indentation_ignores_comment_text() {
        let trivia = Trivia::new("\n  // note\n\t\t");
        assert_eq!(trivia.indentation(), Some("\t\t"));
    }

    #[test]
    fn test_same_line_trivia_has_no_indentation() {
        assert_eq!(Trivia::space().indentation(), None);
        assert_eq!(Trivia::space().indent_width(), 0);
    }

    #[test]
    fn test_comments_are_extracted_in_order() {
        let trivia = Trivia::new(" /* block */\n  // line one\n  ");
        assert_eq!(trivia.comments(), vec!["/* block */", "// line one"]);
        assert!(trivia.has_comments());
        assert!(!Trivia::new("\n   ").has_comments());
    }

    #[test]
    fn test_newline_indent() {
        assert_eq!(Trivia::newline_indent(4, true).as_str(), "\n    ");
        assert_eq!(Trivia::newline_indent(2, false).as_str(), "\n\t\t");
    }
}
