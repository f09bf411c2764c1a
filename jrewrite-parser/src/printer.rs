// Tree Printer
// Verbatim and trimmed rendering of syntax trees back to source text

use std::fmt;

use crate::ast::*;
use crate::trivia::Trivia;

/// How a tree is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// Every token with the trivia recorded in front of it
    #[default]
    Verbatim,
    /// Without the node's own leading trivia, trailing terminator and
    /// trailing whitespace
    Trimmed,
}

/// Accumulates the text of a tree walk
#[derive(Debug)]
pub struct Printer {
    out: String,
    mode: PrintMode,
    /// Byte range of the last `;` and its trivia
    last_terminator: Option<(usize, usize)>,
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self {
            out: String::new(),
            mode,
            last_terminator: None,
        }
    }

    /// Write trivia. In trimmed mode, trivia before the first token is dropped.
    pub fn trivia(&mut self, trivia: &Trivia) {
        if self.mode == PrintMode::Trimmed && self.out.is_empty() {
            return;
        }
        self.out.push_str(trivia.as_str());
    }

    pub fn token(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Trivia followed by a token
    pub fn spaced(&mut self, trivia: &Trivia, text: &str) {
        self.trivia(trivia);
        self.token(text);
    }

    /// A statement or declaration terminating `;`
    pub fn terminator(&mut self, trivia: &Trivia) {
        let start = self.out.len();
        self.spaced(trivia, ";");
        self.last_terminator = Some((start, self.out.len()));
    }

    pub fn finish(mut self) -> String {
        if self.mode == PrintMode::Trimmed {
            if let Some((start, end)) = self.last_terminator {
                if end == self.out.len() {
                    self.out.truncate(start);
                }
            }
            let trimmed = self.out.trim_end().len();
            self.out.truncate(trimmed);
        }
        self.out
    }

    fn list<T: Print>(&mut self, elements: &[RightPadded<T>]) {
        let count = elements.len();
        for (i, padded) in elements.iter().enumerate() {
            padded.element.print_to(self);
            if i + 1 < count {
                self.spaced(&padded.after, ",");
            }
        }
    }

    fn container<T: Print>(&mut self, container: &Container<T>, open: &str, close: &str) {
        self.spaced(&container.before, open);
        self.list(&container.elements);
        self.spaced(&container.end, close);
    }

    fn modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            modifier.print_to(self);
        }
    }
}

/// Nodes that can be rendered back to source text
pub trait Print {
    fn print_to(&self, printer: &mut Printer);

    /// Exact source for parsed subtrees, default formatting for synthesized ones
    fn print(&self) -> String {
        self.print_with(PrintMode::Verbatim)
    }

    /// Minimal rendering for assertions and diffs
    fn print_trimmed(&self) -> String {
        self.print_with(PrintMode::Trimmed)
    }

    fn print_with(&self, mode: PrintMode) -> String {
        let mut printer = Printer::new(mode);
        self.print_to(&mut printer);
        printer.finish()
    }
}

impl<T: Print + ?Sized> Print for std::sync::Arc<T> {
    fn print_to(&self, printer: &mut Printer) {
        (**self).print_to(printer)
    }
}

impl Print for CompilationUnit {
    fn print_to(&self, p: &mut Printer) {
        if let Some(package) = &self.package {
            package.print_to(p);
        }
        for import in &self.imports {
            import.print_to(p);
        }
        for class in &self.classes {
            class.print_to(p);
        }
        p.trivia(&self.eof);
    }
}

impl Print for PackageDeclaration {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "package");
        p.spaced(&self.name_prefix, &self.name.to_string());
        p.terminator(&self.terminator);
    }
}

impl Print for Import {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "import");
        if let Some(static_prefix) = &self.static_prefix {
            p.spaced(static_prefix, "static");
        }
        p.spaced(&self.name_prefix, &self.path_text());
        p.terminator(&self.terminator);
    }
}

impl Print for Modifier {
    fn print_to(&self, p: &mut Printer) {
        match self {
            Modifier::Keyword { prefix, kind } => p.spaced(prefix, kind.keyword()),
            Modifier::Annotation(annotation) => annotation.print_to(p),
        }
    }
}

impl Print for Annotation {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "@");
        p.spaced(&self.name_prefix, &self.name.to_string());
        if let Some(arguments) = &self.arguments {
            p.container(arguments, "(", ")");
        }
    }
}

impl Print for Identifier {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, &self.name);
    }
}

impl Print for TypeList {
    fn print_to(&self, p: &mut Printer) {
        // The keyword is implied by the slot the list occupies
        p.list(&self.types);
    }
}

impl Print for ClassBody {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "{");
        for member in &self.members {
            member.print_to(p);
        }
        p.spaced(&self.end, "}");
    }
}

impl Print for ClassDeclaration {
    fn print_to(&self, p: &mut Printer) {
        p.trivia(&self.prefix);
        p.modifiers(&self.modifiers);
        p.spaced(&self.kind_prefix, self.kind.keyword());
        self.name.print_to(p);
        if let Some(extends) = &self.extends {
            p.spaced(&extends.prefix, "extends");
            extends.print_to(p);
        }
        if let Some(implements) = &self.implements {
            p.spaced(&implements.prefix, "implements");
            implements.print_to(p);
        }
        self.body.print_to(p);
    }
}

impl Print for Member {
    fn print_to(&self, p: &mut Printer) {
        match self {
            Member::Field(field) => field.print_to(p),
            Member::Method(method) => method.print_to(p),
            Member::Class(class) => class.print_to(p),
            Member::Empty(empty) => empty.print_to(p),
        }
    }
}

impl Print for MethodDeclaration {
    fn print_to(&self, p: &mut Printer) {
        p.trivia(&self.prefix);
        p.modifiers(&self.modifiers);
        if let Some(return_type) = &self.return_type {
            return_type.print_to(p);
        }
        self.name.print_to(p);
        p.container(&self.parameters, "(", ")");
        if let Some(throws) = &self.throws {
            p.spaced(&throws.prefix, "throws");
            throws.print_to(p);
        }
        match (&self.body, &self.terminator) {
            (Some(body), _) => body.print_to(p),
            (None, terminator) => p.terminator(terminator.as_ref().unwrap_or(&Trivia::empty())),
        }
    }
}

impl Print for VariableDeclarations {
    fn print_to(&self, p: &mut Printer) {
        p.trivia(&self.prefix);
        p.modifiers(&self.modifiers);
        self.type_expr.print_to(p);
        p.list(&self.variables);
        if let Some(terminator) = &self.terminator {
            p.terminator(terminator);
        }
    }
}

impl Print for NamedVariable {
    fn print_to(&self, p: &mut Printer) {
        p.trivia(&self.prefix);
        self.name.print_to(p);
        for dimension in &self.dimensions {
            dimension.print_to(p);
        }
        if let Some(initializer) = &self.initializer {
            p.spaced(&initializer.prefix, "=");
            initializer.value.print_to(p);
        }
    }
}

impl Print for Dimension {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "[");
        p.spaced(&self.inner, "]");
    }
}

impl Print for TypeTree {
    fn print_to(&self, p: &mut Printer) {
        p.trivia(&self.prefix);
        match &self.kind {
            TypeTreeKind::Primitive(primitive) => p.token(primitive.keyword()),
            TypeTreeKind::Named(name) => p.token(&name.to_string()),
            TypeTreeKind::Wildcard(bound) => {
                p.token("?");
                if let Some(bound) = bound {
                    p.spaced(&bound.prefix, bound.kind.keyword());
                    bound.bound.print_to(p);
                }
            }
        }
        if let Some(arguments) = &self.type_arguments {
            p.container(arguments, "<", ">");
        }
        for dimension in &self.dimensions {
            dimension.print_to(p);
        }
    }
}

impl Print for Block {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "{");
        for statement in &self.statements {
            statement.print_to(p);
        }
        p.spaced(&self.end, "}");
    }
}

impl Print for Statement {
    fn print_to(&self, p: &mut Printer) {
        match self {
            Statement::Block(block) => block.print_to(p),
            Statement::Return(ret) => ret.print_to(p),
            Statement::Throw(throw) => {
                p.spaced(&throw.prefix, "throw");
                throw.exception.print_to(p);
                p.terminator(&throw.terminator);
            }
            Statement::If(stmt) => {
                p.spaced(&stmt.prefix, "if");
                stmt.condition.print_to(p);
                stmt.then_part.print_to(p);
                if let Some(else_part) = &stmt.else_part {
                    p.spaced(&else_part.prefix, "else");
                    else_part.body.print_to(p);
                }
            }
            Statement::While(stmt) => {
                p.spaced(&stmt.prefix, "while");
                stmt.condition.print_to(p);
                stmt.body.print_to(p);
            }
            Statement::Empty(empty) => empty.print_to(p),
            Statement::VariableDeclarations(declarations) => declarations.print_to(p),
            Statement::Expression(stmt) => {
                p.trivia(&stmt.prefix);
                stmt.expression.print_to(p);
                p.terminator(&stmt.terminator);
            }
        }
    }
}

impl Print for Return {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "return");
        if let Some(expression) = &self.expression {
            expression.print_to(p);
        }
        p.terminator(&self.terminator);
    }
}

impl Print for ControlParentheses {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, "(");
        self.expression.print_to(p);
        p.spaced(&self.end, ")");
    }
}

impl Print for Empty {
    fn print_to(&self, p: &mut Printer) {
        p.terminator(&self.prefix);
    }
}

impl Print for Literal {
    fn print_to(&self, p: &mut Printer) {
        p.spaced(&self.prefix, &self.value_source);
    }
}

impl Print for Expression {
    fn print_to(&self, p: &mut Printer) {
        match self {
            Expression::Literal(literal) => literal.print_to(p),
            Expression::Identifier(identifier) => identifier.print_to(p),
            Expression::FieldAccess(access) => {
                p.trivia(&access.prefix);
                access.target.print_to(p);
                p.spaced(&access.dot_prefix, ".");
                access.name.print_to(p);
            }
            Expression::MethodInvocation(invocation) => {
                p.trivia(&invocation.prefix);
                if let Some(select) = &invocation.select {
                    select.target.print_to(p);
                    p.spaced(&select.dot_prefix, ".");
                }
                invocation.name.print_to(p);
                p.container(&invocation.arguments, "(", ")");
            }
            Expression::NewClass(new_class) => {
                p.spaced(&new_class.prefix, "new");
                new_class.class.print_to(p);
                p.container(&new_class.arguments, "(", ")");
                if let Some(body) = &new_class.body {
                    body.print_to(p);
                }
            }
            Expression::Binary(binary) => {
                p.trivia(&binary.prefix);
                binary.left.print_to(p);
                p.spaced(&binary.operator_prefix, binary.operator.symbol());
                binary.right.print_to(p);
            }
            Expression::Unary(unary) => {
                p.trivia(&unary.prefix);
                if unary.operator.is_postfix() {
                    unary.operand.print_to(p);
                    p.spaced(&unary.operator_prefix, unary.operator.symbol());
                } else {
                    p.token(unary.operator.symbol());
                    unary.operand.print_to(p);
                }
            }
            Expression::Assignment(assignment) => {
                p.trivia(&assignment.prefix);
                assignment.target.print_to(p);
                p.spaced(&assignment.operator_prefix, assignment.operator.symbol());
                assignment.value.print_to(p);
            }
            Expression::Conditional(conditional) => {
                p.trivia(&conditional.prefix);
                conditional.condition.print_to(p);
                p.spaced(&conditional.question_prefix, "?");
                conditional.then_part.print_to(p);
                p.spaced(&conditional.colon_prefix, ":");
                conditional.else_part.print_to(p);
            }
            Expression::Parentheses(parens) => {
                p.spaced(&parens.prefix, "(");
                parens.expression.print_to(p);
                p.spaced(&parens.end, ")");
            }
            Expression::This(this) => p.spaced(&this.prefix, "this"),
        }
    }
}

macro_rules! display_as_verbatim {
    ($($node:ty),* $(,)?) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.print())
                }
            }
        )*
    };
}

display_as_verbatim!(
    CompilationUnit,
    PackageDeclaration,
    Import,
    Annotation,
    ClassDeclaration,
    Member,
    MethodDeclaration,
    VariableDeclarations,
    NamedVariable,
    TypeTree,
    Block,
    Statement,
    Return,
    Literal,
    Expression,
);
