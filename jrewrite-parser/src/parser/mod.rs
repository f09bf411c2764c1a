// Java Parser
// Pest grammar binding, trivia-capturing tree builder and batch parsing

mod declarations;
mod expressions;
mod literals;
mod statements;
mod types;

use std::iter::Peekable;
use std::time::Instant;

use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::ast::{CompilationUnit, Expression, Statement};
use crate::attribution::{Attributor, TypeIndex};
use crate::error::{Location, ParseError, ParseResult};
use crate::trivia::Trivia;

#[derive(Parser)]
#[grammar = "java.pest"]
pub(crate) struct JavaGrammar;

/// What a batch does when a source fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// The first failure (in input order) aborts the batch
    #[default]
    FailFast,
    /// Failed dependencies are skipped with a warning
    KeepGoing,
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub error_policy: ErrorPolicy,
    /// Parse the sources of a batch on the rayon thread pool
    pub parallel: bool,
    /// Resolve simple names against the implicitly imported `java.lang`
    pub implicit_java_lang: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::FailFast,
            parallel: true,
            implicit_java_lang: true,
        }
    }
}

/// A source text, optionally tagged with the path it was read from
pub trait SourceText: Sync {
    fn text(&self) -> &str;

    fn path(&self) -> Option<&str> {
        None
    }
}

impl SourceText for &str {
    fn text(&self) -> &str {
        self
    }
}

impl SourceText for String {
    fn text(&self) -> &str {
        self
    }
}

/// A source text read from a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

impl SourceText for SourceFile {
    fn text(&self) -> &str {
        &self.text
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }
}

/// Parses source texts into attributed compilation units
#[derive(Debug, Clone, Default)]
pub struct JavaParser {
    config: ParserConfig,
}

impl JavaParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse and attribute a single unit
    pub fn parse(&self, source: &str) -> ParseResult<CompilationUnit> {
        let mut units = self.parse_with_dependencies(&[source], &[] as &[&str])?;
        units.pop().ok_or_else(|| ParseError::UnexpectedRule {
            expected: "a compilation unit".to_string(),
            found: None,
            location: Location::from_offset(source, 0),
        })
    }

    /// Parse a batch, failing on the first malformed primary source.
    ///
    /// `dependencies` are parsed only to resolve cross-file type references;
    /// they produce no output units. The result is in input order.
    pub fn parse_with_dependencies<S, D>(
        &self,
        sources: &[S],
        dependencies: &[D],
    ) -> ParseResult<Vec<CompilationUnit>>
    where
        S: SourceText,
        D: SourceText,
    {
        self.parse_each(sources, dependencies)?.into_iter().collect()
    }

    /// Parse a batch, reporting one result per primary source in input order
    pub fn parse_each<S, D>(
        &self,
        sources: &[S],
        dependencies: &[D],
    ) -> ParseResult<Vec<ParseResult<CompilationUnit>>>
    where
        S: SourceText,
        D: SourceText,
    {
        debug!(
            sources = sources.len(),
            dependencies = dependencies.len(),
            parallel = self.config.parallel,
            "parsing batch"
        );

        let dependency_units = self.parse_dependencies(dependencies)?;
        let primaries = self.parse_syntax_all(sources);

        let mut index = TypeIndex::new();
        for unit in primaries.iter().filter_map(|result| result.as_ref().ok()) {
            index.add_unit(unit);
        }
        for unit in &dependency_units {
            index.add_unit(unit);
        }
        debug!(types = index.len(), "built type index");

        let attributor = Attributor::new(&index, self.config.implicit_java_lang);
        let attribute = |result: ParseResult<CompilationUnit>| {
            result.map(|unit| attributor.attribute(unit))
        };

        let units = if self.config.parallel {
            primaries.into_par_iter().map(attribute).collect()
        } else {
            primaries.into_iter().map(attribute).collect()
        };
        Ok(units)
    }

    fn parse_dependencies<D: SourceText>(
        &self,
        dependencies: &[D],
    ) -> ParseResult<Vec<CompilationUnit>> {
        let results = self.parse_syntax_all(dependencies);
        match self.config.error_policy {
            ErrorPolicy::FailFast => results.into_iter().collect(),
            ErrorPolicy::KeepGoing => Ok(results
                .into_iter()
                .enumerate()
                .filter_map(|(i, result)| match result {
                    Ok(unit) => Some(unit),
                    Err(error) => {
                        warn!(dependency = i, %error, "skipping malformed dependency");
                        None
                    }
                })
                .collect()),
        }
    }

    fn parse_syntax_all<S: SourceText>(&self, sources: &[S]) -> Vec<ParseResult<CompilationUnit>> {
        let parse = |source: &S| {
            let started = Instant::now();
            let result = parse_syntax(source.text(), source.path());
            trace!(
                path = source.path().unwrap_or("<source>"),
                elapsed_us = started.elapsed().as_micros() as u64,
                ok = result.is_ok(),
                "parsed source"
            );
            result
        };

        if self.config.parallel {
            sources.par_iter().map(parse).collect()
        } else {
            sources.iter().map(parse).collect()
        }
    }
}

/// Build the syntax tree of one unit without semantic attribution
pub(crate) fn parse_syntax(input: &str, source_path: Option<&str>) -> ParseResult<CompilationUnit> {
    let mut pairs = JavaGrammar::parse(Rule::compilation_unit, input)
        .map_err(|e| ParseError::from_pest_error(e, input, source_path))?;
    let builder = TreeBuilder::new(input, source_path);
    let pair = builder.single(&mut pairs, Rule::compilation_unit)?;
    builder.compilation_unit(pair)
}

pub(crate) fn parse_expression_snippet(input: &str) -> ParseResult<Expression> {
    let mut pairs = JavaGrammar::parse(Rule::expression_snippet, input)
        .map_err(|e| ParseError::from_pest_error(e, input, None))?;
    let builder = TreeBuilder::new(input, None);
    let pair = builder.single(&mut pairs, Rule::expression_snippet)?;
    let mut cursor = Cursor::new(pair);
    let (prefix, expression) = cursor.expect(Rule::expression)?;
    builder.expression(prefix, expression)
}

pub(crate) fn parse_statement_snippet(input: &str) -> ParseResult<Statement> {
    let mut pairs = JavaGrammar::parse(Rule::statement_snippet, input)
        .map_err(|e| ParseError::from_pest_error(e, input, None))?;
    let builder = TreeBuilder::new(input, None);
    let pair = builder.single(&mut pairs, Rule::statement_snippet)?;
    let mut cursor = Cursor::new(pair);
    let (prefix, statement) = cursor.expect_any("a statement")?;
    builder.statement(prefix, statement)
}

/// Converts pest pairs into tree nodes. Every builder method receives the
/// trivia in front of its pair and returns a node owning it.
pub(crate) struct TreeBuilder<'i> {
    input: &'i str,
    source_path: Option<&'i str>,
}

impl<'i> TreeBuilder<'i> {
    pub(crate) fn new(input: &'i str, source_path: Option<&'i str>) -> Self {
        Self { input, source_path }
    }

    fn single(&self, pairs: &mut Pairs<'i, Rule>, rule: Rule) -> ParseResult<Pair<'i, Rule>> {
        match pairs.next() {
            Some(pair) if pair.as_rule() == rule => Ok(pair),
            other => Err(ParseError::UnexpectedRule {
                expected: format!("{:?}", rule),
                found: other.map(|p| p.as_rule()),
                location: Location::from_offset(self.input, 0),
            }),
        }
    }

    /// Trivia between two byte offsets of the input
    pub(crate) fn gap(&self, start: usize, end: usize) -> Trivia {
        Trivia::new(&self.input[start..end])
    }

    pub(crate) fn unexpected(&self, expected: &str, pair: &Pair<'i, Rule>) -> ParseError {
        ParseError::UnexpectedRule {
            expected: expected.to_string(),
            found: Some(pair.as_rule()),
            location: Location::from_offset(self.input, pair.as_span().start()),
        }
    }

    pub(crate) fn invalid_literal(&self, pair: &Pair<'i, Rule>, kind: &'static str) -> ParseError {
        ParseError::invalid_literal(
            self.input,
            self.source_path,
            pair.as_span().start(),
            pair.as_str(),
            kind,
        )
    }
}

/// End of the last token inside a pair.
///
/// A rule ending in an optional or repeated tail that did not match still
/// spans the trivia skipped before the attempt; that trivia belongs to
/// whatever follows the pair.
pub(crate) fn token_end(pair: &Pair<'_, Rule>) -> usize {
    pair.clone()
        .into_inner()
        .flatten()
        .last()
        .map_or_else(|| pair.as_span().end(), |leaf| leaf.as_span().end())
}

/// Walks the children of a pair, yielding each child with the trivia that
/// precedes it. The first child of a pair starts where the pair starts, so
/// its trivia is empty.
pub(crate) struct Cursor<'i> {
    input: &'i str,
    position: usize,
    pairs: Peekable<Pairs<'i, Rule>>,
}

impl<'i> Cursor<'i> {
    pub(crate) fn new(pair: Pair<'i, Rule>) -> Self {
        Self {
            input: pair.get_input(),
            position: pair.as_span().start(),
            pairs: pair.into_inner().peekable(),
        }
    }

    pub(crate) fn peek_rule(&mut self) -> Option<Rule> {
        self.pairs.peek().map(Pair::as_rule)
    }

    pub(crate) fn at(&mut self, rule: Rule) -> bool {
        self.peek_rule() == Some(rule)
    }

    pub(crate) fn next(&mut self) -> Option<(Trivia, Pair<'i, Rule>)> {
        let pair = self.pairs.next()?;
        let span = pair.as_span();
        let trivia = Trivia::new(&self.input[self.position..span.start()]);
        self.position = token_end(&pair);
        Some((trivia, pair))
    }

    pub(crate) fn next_if(&mut self, rule: Rule) -> Option<(Trivia, Pair<'i, Rule>)> {
        if self.at(rule) {
            self.next()
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, rule: Rule) -> ParseResult<(Trivia, Pair<'i, Rule>)> {
        match self.next_if(rule) {
            Some(next) => Ok(next),
            None => Err(self.mismatch(&format!("{:?}", rule))),
        }
    }

    pub(crate) fn expect_any(&mut self, expected: &str) -> ParseResult<(Trivia, Pair<'i, Rule>)> {
        match self.next() {
            Some(next) => Ok(next),
            None => Err(self.mismatch(expected)),
        }
    }

    /// Consume a punctuation or keyword token, keeping only its trivia
    pub(crate) fn token(&mut self, rule: Rule) -> ParseResult<Trivia> {
        self.expect(rule).map(|(trivia, _)| trivia)
    }

    fn mismatch(&mut self, expected: &str) -> ParseError {
        let found = self.peek_rule();
        let offset = self
            .pairs
            .peek()
            .map(|pair| pair.as_span().start())
            .unwrap_or(self.position);
        ParseError::UnexpectedRule {
            expected: expected.to_string(),
            found,
            location: Location::from_offset(self.input, offset),
        }
    }
}
