// Parser Error Handling
// Error taxonomy with miette diagnostics for parse failures and invalid names

use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::parser::Rule;

/// A position in source text. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn from_offset(src: &str, offset: usize) -> Self {
        let offset = offset.min(src.len());
        let before = &src[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A qualified name or name query that is empty or contains an illegal segment
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Qualified name is empty")]
    #[diagnostic(code(jrewrite::name::empty))]
    Empty,

    #[error("Invalid segment `{segment}` in qualified name `{name}`")]
    #[diagnostic(
        code(jrewrite::name::invalid_segment),
        help("Segments must start with a letter, `_` or `$`, continue with letters, digits, `_` or `$`, and must not be reserved words")
    )]
    InvalidSegment { name: String, segment: String },
}

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Syntax error at {location}")]
    #[diagnostic(code(jrewrite::parse::syntax), help("Expected {expected}"))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        location: Location,
        message: String,
        expected: String,
    },

    #[error("Invalid {kind} literal `{found}` at {location}")]
    #[diagnostic(code(jrewrite::parse::invalid_literal))]
    InvalidLiteral {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid {kind} literal")]
        span: SourceSpan,
        location: Location,
        kind: &'static str,
        found: String,
    },

    #[error("Unexpected grammar rule at {location}: expected {expected}, found {found:?}")]
    #[diagnostic(
        code(jrewrite::parse::unexpected_rule),
        help("The grammar produced a shape the tree builder does not understand")
    )]
    UnexpectedRule {
        expected: String,
        found: Option<Rule>,
        location: Location,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Name(#[from] NameError),
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(
        error: pest::error::Error<Rule>,
        src: &str,
        source_path: Option<&str>,
    ) -> Self {
        let (start, len) = match error.location {
            pest::error::InputLocation::Pos(pos) => (pos, 0),
            pest::error::InputLocation::Span((start, end)) => (start, end - start),
        };

        let (message, expected) = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                let mut descriptions: Vec<&str> =
                    positives.iter().map(rule_to_user_friendly_description).collect();
                descriptions.dedup();
                let expected = match descriptions.as_slice() {
                    [] => "valid syntax".to_string(),
                    [only] => (*only).to_string(),
                    many => format!("one of: {}", many.join(", ")),
                };
                ("unexpected input".to_string(), expected)
            }
            pest::error::ErrorVariant::CustomError { message } => {
                (message.clone(), "valid syntax".to_string())
            }
        };

        ParseError::Syntax {
            src: named_source(src, source_path),
            span: SourceSpan::new(start.into(), len),
            location: Location::from_offset(src, start),
            message,
            expected,
        }
    }

    pub(crate) fn invalid_literal(
        src: &str,
        source_path: Option<&str>,
        start: usize,
        found: &str,
        kind: &'static str,
    ) -> Self {
        ParseError::InvalidLiteral {
            src: named_source(src, source_path),
            span: SourceSpan::new(start.into(), found.len()),
            location: Location::from_offset(src, start),
            kind,
            found: found.to_string(),
        }
    }

    /// Where the failure occurred, when it is tied to source text
    pub fn location(&self) -> Option<Location> {
        match self {
            ParseError::Syntax { location, .. }
            | ParseError::InvalidLiteral { location, .. }
            | ParseError::UnexpectedRule { location, .. } => Some(*location),
            ParseError::Name(_) => None,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

fn named_source(src: &str, source_path: Option<&str>) -> NamedSource<String> {
    NamedSource::new(source_path.unwrap_or("<source>"), src.to_string())
}

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> &'static str {
    match rule {
        Rule::compilation_unit => "a compilation unit",
        Rule::package_declaration => "a package declaration (package a.b;)",
        Rule::import_declaration => "an import declaration (import a.b.C;)",
        Rule::import_path => "an import path (like java.util.List or java.util.*)",
        Rule::qualified_name => "a qualified name (like java.util.List)",
        Rule::identifier => "an identifier",
        Rule::class_declaration => "a class or interface declaration",
        Rule::class_kind => "'class' or 'interface'",
        Rule::class_body => "a class body ({ ... })",
        Rule::method_declaration => "a method declaration",
        Rule::variable_declarations => "a variable declaration (like int x = 0;)",
        Rule::formal_parameters => "a parameter list",
        Rule::annotation => "an annotation (like @Override)",
        Rule::modifier_keyword => "a modifier (like public or static)",
        Rule::type_ref => "a type (like int or List<String>)",
        Rule::primitive_type => "a primitive type",
        Rule::type_arguments => "type arguments (like <String>)",
        Rule::block => "a block ({ ... })",
        Rule::return_statement => "a return statement",
        Rule::expression_statement => "an expression statement",
        Rule::expression => "an expression",
        Rule::arguments => "an argument list",
        Rule::integer_literal => "an integer literal",
        Rule::float_literal => "a floating point literal",
        Rule::string_literal => "a string literal",
        Rule::char_literal => "a character literal",
        Rule::semi => "';'",
        Rule::comma => "','",
        Rule::dot => "'.'",
        Rule::lparen => "'('",
        Rule::rparen => "')'",
        Rule::lbrace => "'{'",
        Rule::rbrace => "'}'",
        Rule::lbracket => "'['",
        Rule::rbracket => "']'",
        Rule::gt => "'>'",
        Rule::equals => "'='",
        Rule::EOI => "end of input",
        _ => "a language element",
    }
}
