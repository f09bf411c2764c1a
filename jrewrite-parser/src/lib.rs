// Java Rewrite Parser Library
// Lossless Java syntax trees with type attribution, import resolution and printing

pub mod ast;
pub mod attribution;
pub mod change;
pub mod error;
pub mod formatter;
pub mod imports;
pub mod name;
pub mod parser;
pub mod printer;
pub mod trivia;
pub mod types;

pub use ast::*;
pub use attribution::{Attributor, TypeIndex};
pub use change::Change;
pub use error::*;
pub use formatter::{Formatter, Indentation, ShiftRight};
pub use imports::{is_sorted, sort_imports};
pub use name::{is_identifier, QualifiedName};
pub use parser::{ErrorPolicy, JavaParser, ParserConfig, SourceFile, SourceText};
pub use printer::{Print, PrintMode, Printer};
pub use trivia::Trivia;
pub use types::{ClassType, JavaType, Primitive};

// Re-export parser rule for manual testing
pub use parser::Rule;

#[cfg(test)]
mod tests;

// Main parsing functions
pub fn parse_compilation_unit(input: &str) -> Result<CompilationUnit, ParseError> {
    JavaParser::new().parse(input)
}

pub fn parse_compilation_unit_with_source(
    input: &str,
    source_path: &str,
) -> Result<CompilationUnit, ParseError> {
    let mut units = JavaParser::new()
        .parse_with_dependencies(&[SourceFile::new(source_path, input)], &[] as &[&str])?;
    units.pop().ok_or_else(|| ParseError::UnexpectedRule {
        expected: "a compilation unit".to_string(),
        found: None,
        location: Location::from_offset(input, 0),
    })
}

/// Parse a standalone expression, e.g. to build a replacement subtree
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    parser::parse_expression_snippet(input)
}

/// Parse a standalone statement, e.g. to build a replacement subtree
pub fn parse_statement(input: &str) -> Result<Statement, ParseError> {
    parser::parse_statement_snippet(input)
}

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jrewrite_parser=info"));

    // A subscriber installed earlier (e.g. by another test) stays in place
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
