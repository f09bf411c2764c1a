// Indentation Discovery
// Infers the indentation style of a unit for statements synthesized into it

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ast::*;
use crate::trivia::Trivia;

/// Indentation used when a unit has no indented lines at all
const DEFAULT_INDENT: usize = 4;

/// Indentation discovered for some region of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indentation {
    /// Indent of the enclosing construct, in columns
    pub enclosing_indent: usize,
    /// Indent of one nesting level relative to the enclosing construct
    pub indent_to_use: usize,
    pub indented_with_spaces: bool,
}

/// Infers indentation from the trivia of an existing unit
#[derive(Debug)]
pub struct Formatter<'a> {
    unit: &'a CompilationUnit,
    whole_source: OnceCell<Indentation>,
}

impl<'a> Formatter<'a> {
    pub fn new(unit: &'a CompilationUnit) -> Self {
        Self {
            unit,
            whole_source: OnceCell::new(),
        }
    }

    /// The most common indentation among `statements` relative to
    /// `enclosing_indent`, falling back to that of the whole unit
    pub fn find_indent(&self, enclosing_indent: usize, statements: &[Arc<Statement>]) -> Indentation {
        let whole_source = self.whole_source_indent();

        let mut counter = IndentCounter::new(enclosing_indent);
        counter.statements(statements);

        Indentation {
            enclosing_indent,
            indent_to_use: counter
                .most_common()
                .unwrap_or(whole_source.indent_to_use),
            indented_with_spaces: if counter.total_lines() > 0 {
                counter.indented_with_spaces()
            } else {
                whole_source.indented_with_spaces
            },
        }
    }

    /// Prefix for a statement added to `block`: a line break and one level
    /// of indentation beyond the block
    pub fn format_in_block(&self, block: &Block) -> Trivia {
        let indentation = self.find_indent(block_indent(block), &block.statements);
        Trivia::newline_indent(
            indentation.enclosing_indent + indentation.indent_to_use,
            indentation.indented_with_spaces,
        )
    }

    /// How far a statement moving from `encloses_both` into `into` must be
    /// shifted right (negative for left)
    pub fn shift_right(&self, into: &Block, encloses_both: &Block) -> ShiftRight {
        let shift = block_indent(into) as isize - block_indent(encloses_both) as isize;
        ShiftRight {
            shift,
            with_spaces: self.whole_source_indent().indented_with_spaces,
        }
    }

    fn whole_source_indent(&self) -> Indentation {
        *self.whole_source.get_or_init(|| {
            let mut counter = IndentCounter::new(0);
            counter.unit(self.unit);
            Indentation {
                enclosing_indent: 0,
                indent_to_use: counter.most_common().unwrap_or(DEFAULT_INDENT),
                indented_with_spaces: counter.indented_with_spaces(),
            }
        })
    }
}

/// Re-indents line-leading trivia by a fixed number of columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRight {
    pub shift: isize,
    pub with_spaces: bool,
}

impl ShiftRight {
    pub fn apply(&self, trivia: &Trivia) -> Trivia {
        if self.shift == 0 || !trivia.starts_new_line() {
            return trivia.clone();
        }

        let fill = if self.with_spaces { ' ' } else { '\t' };
        let mut lines = trivia.as_str().split('\n');
        let mut out = String::with_capacity(trivia.as_str().len());
        if let Some(first) = lines.next() {
            out.push_str(first);
        }
        for line in lines {
            out.push('\n');
            if self.shift > 0 {
                out.extend(std::iter::repeat(fill).take(self.shift.unsigned_abs()));
                out.push_str(line);
            } else {
                let removable = line
                    .chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .take(self.shift.unsigned_abs())
                    .count();
                out.push_str(&line[removable..]);
            }
        }
        Trivia::new(out)
    }

    /// Shift the line-leading trivia of a statement and the statements and
    /// block ends nested in it
    pub fn apply_to_statement(&self, statement: &Statement) -> Statement {
        let shifted = match statement {
            Statement::Block(block) => Statement::Block(self.apply_to_block(block)),
            Statement::If(stmt) => Statement::If(If {
                then_part: Arc::new(self.apply_to_statement(&stmt.then_part)),
                else_part: stmt.else_part.as_ref().map(|else_part| Else {
                    prefix: self.apply(&else_part.prefix),
                    body: Arc::new(self.apply_to_statement(&else_part.body)),
                }),
                ..stmt.clone()
            }),
            Statement::While(stmt) => Statement::While(While {
                body: Arc::new(self.apply_to_statement(&stmt.body)),
                ..stmt.clone()
            }),
            other => other.clone(),
        };
        let prefix = self.apply(shifted.prefix());
        shifted.with_prefix(prefix)
    }

    fn apply_to_block(&self, block: &Block) -> Block {
        Block {
            prefix: block.prefix.clone(),
            statements: block
                .statements
                .iter()
                .map(|statement| Arc::new(self.apply_to_statement(statement)))
                .collect(),
            end: self.apply(&block.end),
        }
    }
}

/// Indent of the line a block closes on, judged by the trivia before `}`
fn block_indent(block: &Block) -> usize {
    block.end.indent_width()
}

/// Frequency of indents relative to the line of the enclosing construct
struct IndentCounter {
    enclosing_indent: usize,
    frequencies: BTreeMap<usize, usize>,
    lines_with_space_indents: usize,
    lines_with_tab_indents: usize,
}

impl IndentCounter {
    fn new(enclosing_indent: usize) -> Self {
        Self {
            enclosing_indent,
            frequencies: BTreeMap::new(),
            lines_with_space_indents: 0,
            lines_with_tab_indents: 0,
        }
    }

    /// Count one line-leading trivia; returns the indent of the token it
    /// precedes, or `enclosing` when that token does not start a line
    fn trivia(&mut self, trivia: &Trivia, enclosing: usize) -> usize {
        let Some(indent) = trivia.indentation() else {
            return enclosing;
        };

        let width = indent.chars().count();
        if width > enclosing {
            *self.frequencies.entry(width - enclosing).or_default() += 1;
        }

        let spaces = indent.chars().filter(|c| *c == ' ').count();
        if spaces >= width - spaces {
            self.lines_with_space_indents += 1;
        } else {
            self.lines_with_tab_indents += 1;
        }
        width
    }

    fn unit(&mut self, unit: &CompilationUnit) {
        for class in unit.classes() {
            self.class(class, self.enclosing_indent);
        }
    }

    fn class(&mut self, class: &ClassDeclaration, enclosing: usize) {
        let indent = self.trivia(&class.prefix, enclosing);
        for member in class.members() {
            match member {
                Member::Class(nested) => self.class(nested, indent),
                Member::Method(method) => {
                    let method_indent = self.trivia(&method.prefix, indent);
                    for statement in method.statements() {
                        self.statement(statement, method_indent);
                    }
                }
                Member::Field(_) | Member::Empty(_) => {
                    self.trivia(member.prefix(), indent);
                }
            }
        }
    }

    fn statements(&mut self, statements: &[Arc<Statement>]) {
        for statement in statements {
            self.statement(statement, self.enclosing_indent);
        }
    }

    fn statement(&mut self, statement: &Statement, enclosing: usize) {
        let indent = self.trivia(statement.prefix(), enclosing);
        match statement {
            Statement::Block(block) => {
                for nested in &block.statements {
                    self.statement(nested, indent);
                }
            }
            Statement::If(stmt) => {
                self.statement(&stmt.then_part, indent);
                if let Some(else_part) = &stmt.else_part {
                    self.statement(&else_part.body, indent);
                }
            }
            Statement::While(stmt) => self.statement(&stmt.body, indent),
            _ => {}
        }
    }

    /// Most frequent relative indent; ties go to the narrower indent
    fn most_common(&self) -> Option<usize> {
        self.frequencies
            .iter()
            .max_by(|(a_indent, a_count), (b_indent, b_count)| {
                a_count.cmp(b_count).then(b_indent.cmp(a_indent))
            })
            .map(|(indent, _)| *indent)
    }

    fn total_lines(&self) -> usize {
        self.lines_with_space_indents + self.lines_with_tab_indents
    }

    fn indented_with_spaces(&self) -> bool {
        self.lines_with_space_indents >= self.lines_with_tab_indents
    }
}
