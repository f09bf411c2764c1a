// Java AST Definitions
// Immutable syntax tree nodes with per-token trivia and semantic types
//
// Every node owns the trivia in front of its first token (`prefix`) and the
// trivia in front of each of its interior tokens. A child whose first token
// is also its parent's first token carries an empty prefix. Children are held
// through `Arc`, so the `with_*` methods build a new parent that shares every
// untouched child with the original.

use std::sync::Arc;

use crate::name::QualifiedName;
use crate::trivia::Trivia;
use crate::types::{ClassType, JavaType, Primitive};

/// An element of a comma separated list, together with the trivia in front
/// of the comma that follows it (empty for the last element).
#[derive(Debug, Clone, PartialEq)]
pub struct RightPadded<T> {
    pub element: Arc<T>,
    pub after: Trivia,
}

impl<T> RightPadded<T> {
    pub fn new(element: T) -> Self {
        Self {
            element: Arc::new(element),
            after: Trivia::empty(),
        }
    }
}

/// A delimited, comma separated list such as `(a, b)` or `<K, V>`
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T> {
    /// Trivia before the opening delimiter
    pub before: Trivia,
    pub elements: Vec<RightPadded<T>>,
    /// Trivia before the closing delimiter
    pub end: Trivia,
}

impl<T> Container<T> {
    pub fn empty() -> Self {
        Self {
            before: Trivia::empty(),
            elements: Vec::new(),
            end: Trivia::empty(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().map(|padded| padded.element.as_ref())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Nodes whose first token carries leading trivia
pub trait Prefixed: Sized {
    fn prefix(&self) -> &Trivia;
    fn with_prefix(self, prefix: Trivia) -> Self;
}

impl<T: Prefixed> Container<T> {
    /// A synthesized list separated by `", "`
    pub fn of(elements: Vec<T>) -> Self {
        let elements = elements
            .into_iter()
            .enumerate()
            .map(|(i, element)| match i {
                0 => RightPadded::new(element),
                _ => RightPadded::new(element.with_prefix(Trivia::space())),
            })
            .collect();
        Self {
            before: Trivia::empty(),
            elements,
            end: Trivia::empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Compilation unit, package and imports
// ---------------------------------------------------------------------------

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub source_path: Option<String>,
    pub package: Option<Arc<PackageDeclaration>>,
    pub imports: Vec<Arc<Import>>,
    pub classes: Vec<Arc<ClassDeclaration>>,
    /// Trivia between the last token and the end of the file
    pub eof: Trivia,
}

impl CompilationUnit {
    pub fn imports(&self) -> &[Arc<Import>] {
        &self.imports
    }

    pub fn classes(&self) -> &[Arc<ClassDeclaration>] {
        &self.classes
    }

    pub fn package_name(&self) -> Option<&QualifiedName> {
        self.package.as_ref().map(|package| &package.name)
    }

    /// Find a top-level class by simple name
    pub fn class_named(&self, name: &str) -> Option<&ClassDeclaration> {
        self.classes
            .iter()
            .map(Arc::as_ref)
            .find(|class| class.name.name == name)
    }

    /// First statement of the first method of the first class that has a
    /// non-empty method body
    pub fn first_method_statement(&self) -> Option<&Statement> {
        self.classes
            .iter()
            .flat_map(|class| class.methods())
            .find_map(|method| method.statements().first())
            .map(Arc::as_ref)
    }

    pub fn with_imports(self, imports: Vec<Arc<Import>>) -> Self {
        Self { imports, ..self }
    }

    pub fn with_classes(self, classes: Vec<Arc<ClassDeclaration>>) -> Self {
        Self { classes, ..self }
    }

    pub fn with_package(self, package: Option<Arc<PackageDeclaration>>) -> Self {
        Self { package, ..self }
    }

    pub fn with_source_path(self, source_path: Option<String>) -> Self {
        Self {
            source_path,
            ..self
        }
    }
}

/// `package a.b;`
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDeclaration {
    pub prefix: Trivia,
    pub name_prefix: Trivia,
    pub name: QualifiedName,
    pub terminator: Trivia,
}

impl PackageDeclaration {
    pub fn build(name: QualifiedName) -> Self {
        Self {
            prefix: Trivia::empty(),
            name_prefix: Trivia::space(),
            name,
            terminator: Trivia::empty(),
        }
    }
}

/// `import [static] a.b.C[.*];`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub prefix: Trivia,
    /// Present iff this is a static import; the trivia before `static`
    pub static_prefix: Option<Trivia>,
    pub name_prefix: Trivia,
    /// Imported path, excluding any trailing `.*`
    pub name: QualifiedName,
    pub wildcard: bool,
    pub terminator: Trivia,
}

impl Import {
    /// Synthesize an import with default formatting
    pub fn build(name: QualifiedName, is_static: bool, wildcard: bool) -> Self {
        Self {
            prefix: Trivia::empty(),
            static_prefix: is_static.then(Trivia::space),
            name_prefix: Trivia::space(),
            name,
            wildcard,
            terminator: Trivia::empty(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.static_prefix.is_some()
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    /// The imported path as written, with `.*` when on demand
    pub fn path_text(&self) -> String {
        if self.wildcard {
            format!("{}.*", self.name)
        } else {
            self.name.to_string()
        }
    }

    pub fn with_name(self, name: QualifiedName) -> Self {
        Self { name, ..self }
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    Default,
}

impl ModifierKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "public" => ModifierKind::Public,
            "protected" => ModifierKind::Protected,
            "private" => ModifierKind::Private,
            "static" => ModifierKind::Static,
            "final" => ModifierKind::Final,
            "abstract" => ModifierKind::Abstract,
            "native" => ModifierKind::Native,
            "synchronized" => ModifierKind::Synchronized,
            "transient" => ModifierKind::Transient,
            "volatile" => ModifierKind::Volatile,
            "strictfp" => ModifierKind::Strictfp,
            "default" => ModifierKind::Default,
            _ => return None,
        };
        Some(kind)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Protected => "protected",
            ModifierKind::Private => "private",
            ModifierKind::Static => "static",
            ModifierKind::Final => "final",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Native => "native",
            ModifierKind::Synchronized => "synchronized",
            ModifierKind::Transient => "transient",
            ModifierKind::Volatile => "volatile",
            ModifierKind::Strictfp => "strictfp",
            ModifierKind::Default => "default",
        }
    }
}

/// `@Name` or `@Name(arguments)`
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub prefix: Trivia,
    pub name_prefix: Trivia,
    pub name: QualifiedName,
    pub arguments: Option<Container<Expression>>,
    pub java_type: Option<JavaType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Keyword { prefix: Trivia, kind: ModifierKind },
    Annotation(Annotation),
}

impl Modifier {
    pub fn keyword(kind: ModifierKind) -> Self {
        Modifier::Keyword {
            prefix: Trivia::empty(),
            kind,
        }
    }

    pub fn kind(&self) -> Option<ModifierKind> {
        match self {
            Modifier::Keyword { kind, .. } => Some(*kind),
            Modifier::Annotation(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
}

impl ClassKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
        }
    }
}

/// A name token: class, method or variable name, or a bare name expression
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub prefix: Trivia,
    pub name: String,
    pub java_type: Option<JavaType>,
}

impl Identifier {
    pub fn build(name: impl Into<String>) -> Self {
        Self {
            prefix: Trivia::empty(),
            name: name.into(),
            java_type: None,
        }
    }
}

/// `extends A, B` or `implements A, B` or `throws A, B`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeList {
    /// Trivia before the keyword
    pub prefix: Trivia,
    pub types: Vec<RightPadded<TypeTree>>,
}

impl TypeList {
    pub fn iter(&self) -> impl Iterator<Item = &TypeTree> {
        self.types.iter().map(|padded| padded.element.as_ref())
    }
}

/// `{ members }` of a class or of an anonymous class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    /// Trivia before `{`
    pub prefix: Trivia,
    pub members: Vec<Arc<Member>>,
    /// Trivia before `}`
    pub end: Trivia,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub prefix: Trivia,
    pub modifiers: Vec<Modifier>,
    pub kind_prefix: Trivia,
    pub kind: ClassKind,
    pub name: Identifier,
    pub extends: Option<TypeList>,
    pub implements: Option<TypeList>,
    pub body: ClassBody,
    pub java_type: Option<ClassType>,
}

impl ClassDeclaration {
    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers.iter().any(|m| m.kind() == Some(kind))
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.body.members.iter().map(Arc::as_ref)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.members().filter_map(|member| match member {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &VariableDeclarations> {
        self.members().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn nested_classes(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.members().filter_map(|member| match member {
            Member::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn method_named(&self, name: &str) -> Option<&MethodDeclaration> {
        self.methods().find(|method| method.name.name == name)
    }

    pub fn with_members(self, members: Vec<Arc<Member>>) -> Self {
        Self {
            body: ClassBody {
                members,
                ..self.body
            },
            ..self
        }
    }
}

/// A class body member
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(VariableDeclarations),
    Method(MethodDeclaration),
    Class(ClassDeclaration),
    /// A stray `;`
    Empty(Empty),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub prefix: Trivia,
    pub modifiers: Vec<Modifier>,
    /// Absent for constructors
    pub return_type: Option<TypeTree>,
    pub name: Identifier,
    pub parameters: Container<VariableDeclarations>,
    pub throws: Option<TypeList>,
    /// Absent for abstract and native methods
    pub body: Option<Arc<Block>>,
    /// Trivia before the `;` of a method without body
    pub terminator: Option<Trivia>,
}

impl MethodDeclaration {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn statements(&self) -> &[Arc<Statement>] {
        self.body
            .as_ref()
            .map(|body| body.statements.as_slice())
            .unwrap_or_default()
    }

    pub fn with_body(self, body: Option<Arc<Block>>) -> Self {
        let terminator = match body {
            Some(_) => None,
            None => Some(self.terminator.unwrap_or_default()),
        };
        Self {
            body,
            terminator,
            ..self
        }
    }
}

/// Fields, local variables and parameters: `final int a = 1, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarations {
    pub prefix: Trivia,
    pub modifiers: Vec<Modifier>,
    pub type_expr: TypeTree,
    pub variables: Vec<RightPadded<NamedVariable>>,
    /// Trivia before `;`, absent for parameters
    pub terminator: Option<Trivia>,
}

impl VariableDeclarations {
    pub fn variables(&self) -> impl Iterator<Item = &NamedVariable> {
        self.variables.iter().map(|padded| padded.element.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedVariable {
    pub prefix: Trivia,
    pub name: Identifier,
    pub dimensions: Vec<Dimension>,
    pub initializer: Option<Initializer>,
    pub java_type: Option<JavaType>,
}

/// `= value`
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    /// Trivia before `=`
    pub prefix: Trivia,
    pub value: Arc<Expression>,
}

// ---------------------------------------------------------------------------
// Type trees
// ---------------------------------------------------------------------------

/// `[]`
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub prefix: Trivia,
    pub inner: Trivia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Extends,
    Super,
}

impl BoundKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            BoundKind::Extends => "extends",
            BoundKind::Super => "super",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WildcardBound {
    pub prefix: Trivia,
    pub kind: BoundKind,
    pub bound: Arc<TypeTree>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeTreeKind {
    Primitive(Primitive),
    Named(QualifiedName),
    /// `?`, `? extends T`, `? super T`
    Wildcard(Option<WildcardBound>),
}

/// A type as written in source: `int`, `java.util.List<String>[]`, `?`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTree {
    pub prefix: Trivia,
    pub kind: TypeTreeKind,
    pub type_arguments: Option<Container<TypeTree>>,
    pub dimensions: Vec<Dimension>,
    pub java_type: Option<JavaType>,
}

impl TypeTree {
    pub fn primitive(primitive: Primitive) -> Self {
        Self {
            prefix: Trivia::empty(),
            kind: TypeTreeKind::Primitive(primitive),
            type_arguments: None,
            dimensions: Vec::new(),
            java_type: Some(JavaType::Primitive(primitive)),
        }
    }

    pub fn named(name: QualifiedName) -> Self {
        Self {
            prefix: Trivia::empty(),
            kind: TypeTreeKind::Named(name),
            type_arguments: None,
            dimensions: Vec::new(),
            java_type: None,
        }
    }

    /// The written name of a named type
    pub fn name(&self) -> Option<&QualifiedName> {
        match &self.kind {
            TypeTreeKind::Named(name) => Some(name),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub prefix: Trivia,
    pub statements: Vec<Arc<Statement>>,
    /// Trivia before `}`
    pub end: Trivia,
}

impl Block {
    pub fn build(statements: Vec<Arc<Statement>>) -> Self {
        Self {
            prefix: Trivia::space(),
            statements,
            end: Trivia::empty(),
        }
    }

    pub fn with_statements(self, statements: Vec<Arc<Statement>>) -> Self {
        Self { statements, ..self }
    }

    /// Replace the statement at `index`, sharing every other statement
    pub fn with_statement(self, index: usize, statement: Statement) -> Self {
        let mut statements = self.statements;
        if let Some(slot) = statements.get_mut(index) {
            *slot = Arc::new(statement);
        }
        Self { statements, ..self }
    }
}

/// `return;` or `return expression;`
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub prefix: Trivia,
    /// Absent for a void return
    pub expression: Option<Arc<Expression>>,
    pub terminator: Trivia,
}

impl Return {
    pub fn build(expression: Option<Expression>) -> Self {
        Self {
            prefix: Trivia::empty(),
            expression: expression.map(|e| Arc::new(e.with_prefix(Trivia::space()))),
            terminator: Trivia::empty(),
        }
    }

    /// Replace the returned expression. One without leading trivia gets a
    /// single space after the keyword.
    pub fn with_expression(self, expression: Option<Arc<Expression>>) -> Self {
        let expression = expression.map(|e| {
            if e.prefix().is_empty() {
                Arc::new((*e).clone().with_prefix(Trivia::space()))
            } else {
                e
            }
        });
        Self { expression, ..self }
    }
}

/// `throw expression;`
#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    pub prefix: Trivia,
    pub exception: Arc<Expression>,
    pub terminator: Trivia,
}

/// `( expression )` around an `if` or `while` condition
#[derive(Debug, Clone, PartialEq)]
pub struct ControlParentheses {
    pub prefix: Trivia,
    pub expression: Arc<Expression>,
    pub end: Trivia,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub prefix: Trivia,
    pub condition: ControlParentheses,
    pub then_part: Arc<Statement>,
    pub else_part: Option<Else>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Else {
    pub prefix: Trivia,
    pub body: Arc<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub prefix: Trivia,
    pub condition: ControlParentheses,
    pub body: Arc<Statement>,
}

/// `;` as a statement or class member
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Empty {
    pub prefix: Trivia,
}

/// An expression evaluated for its effect: `call();`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub prefix: Trivia,
    pub expression: Arc<Expression>,
    pub terminator: Trivia,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    Return(Return),
    Throw(Throw),
    If(If),
    While(While),
    Empty(Empty),
    VariableDeclarations(VariableDeclarations),
    Expression(ExpressionStatement),
}

impl Statement {
    pub fn as_return(&self) -> Option<&Return> {
        match self {
            Statement::Return(ret) => Some(ret),
            _ => None,
        }
    }
}

impl Prefixed for Statement {
    fn prefix(&self) -> &Trivia {
        match self {
            Statement::Block(s) => &s.prefix,
            Statement::Return(s) => &s.prefix,
            Statement::Throw(s) => &s.prefix,
            Statement::If(s) => &s.prefix,
            Statement::While(s) => &s.prefix,
            Statement::Empty(s) => &s.prefix,
            Statement::VariableDeclarations(s) => &s.prefix,
            Statement::Expression(s) => &s.prefix,
        }
    }

    fn with_prefix(self, prefix: Trivia) -> Self {
        match self {
            Statement::Block(s) => Statement::Block(Block { prefix, ..s }),
            Statement::Return(s) => Statement::Return(Return { prefix, ..s }),
            Statement::Throw(s) => Statement::Throw(Throw { prefix, ..s }),
            Statement::If(s) => Statement::If(If { prefix, ..s }),
            Statement::While(s) => Statement::While(While { prefix, ..s }),
            Statement::Empty(_) => Statement::Empty(Empty { prefix }),
            Statement::VariableDeclarations(s) => {
                Statement::VariableDeclarations(VariableDeclarations { prefix, ..s })
            }
            Statement::Expression(s) => Statement::Expression(ExpressionStatement { prefix, ..s }),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Semantic value of a literal
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Char(char),
    String(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub prefix: Trivia,
    pub value: LiteralValue,
    /// The literal exactly as written, printed verbatim
    pub value_source: String,
    pub java_type: Primitive,
}

impl Literal {
    pub fn int(value: i32) -> Self {
        Self {
            prefix: Trivia::empty(),
            value: LiteralValue::Int(value.into()),
            value_source: value.to_string(),
            java_type: Primitive::Int,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            prefix: Trivia::empty(),
            value: LiteralValue::Boolean(value),
            value_source: value.to_string(),
            java_type: Primitive::Boolean,
        }
    }

    pub fn null() -> Self {
        Self {
            prefix: Trivia::empty(),
            value: LiteralValue::Null,
            value_source: "null".to_string(),
            java_type: Primitive::Null,
        }
    }

    /// A string literal, escaping the value as needed
    pub fn string(value: &str) -> Self {
        let mut source = String::with_capacity(value.len() + 2);
        source.push('"');
        for c in value.chars() {
            match c {
                '"' => source.push_str("\\\""),
                '\\' => source.push_str("\\\\"),
                '\n' => source.push_str("\\n"),
                '\r' => source.push_str("\\r"),
                '\t' => source.push_str("\\t"),
                c => source.push(c),
            }
        }
        source.push('"');
        Self {
            prefix: Trivia::empty(),
            value: LiteralValue::String(value.to_string()),
            value_source: source,
            java_type: Primitive::String,
        }
    }
}

/// `target.name`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    pub prefix: Trivia,
    pub target: Arc<Expression>,
    pub dot_prefix: Trivia,
    pub name: Identifier,
    pub java_type: Option<JavaType>,
}

/// `target.` in front of a method name
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub target: Arc<Expression>,
    pub dot_prefix: Trivia,
}

/// `[target.]name(arguments)`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocation {
    pub prefix: Trivia,
    pub select: Option<Select>,
    pub name: Identifier,
    pub arguments: Container<Expression>,
    pub java_type: Option<JavaType>,
}

/// `new Type(arguments) [{ body }]`
#[derive(Debug, Clone, PartialEq)]
pub struct NewClass {
    pub prefix: Trivia,
    pub class: TypeTree,
    pub arguments: Container<Expression>,
    pub body: Option<ClassBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::UnsignedShiftRight => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub prefix: Trivia,
    pub left: Arc<Expression>,
    pub operator_prefix: Trivia,
    pub operator: BinaryOperator,
    pub right: Arc<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Positive,
    Negative,
    Complement,
    Not,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => "++",
            UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => "--",
            UnaryOperator::Positive => "+",
            UnaryOperator::Negative => "-",
            UnaryOperator::Complement => "~",
            UnaryOperator::Not => "!",
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(
            self,
            UnaryOperator::PostIncrement | UnaryOperator::PostDecrement
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub prefix: Trivia,
    pub operator: UnaryOperator,
    /// Trivia before a postfix operator; unused for prefix operators
    pub operator_prefix: Trivia,
    pub operand: Arc<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    UnsignedShiftRightAssign,
}

impl AssignmentOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let operator = match symbol {
            "=" => AssignmentOperator::Assign,
            "+=" => AssignmentOperator::AddAssign,
            "-=" => AssignmentOperator::SubtractAssign,
            "*=" => AssignmentOperator::MultiplyAssign,
            "/=" => AssignmentOperator::DivideAssign,
            "%=" => AssignmentOperator::ModuloAssign,
            "&=" => AssignmentOperator::BitAndAssign,
            "|=" => AssignmentOperator::BitOrAssign,
            "^=" => AssignmentOperator::BitXorAssign,
            "<<=" => AssignmentOperator::ShiftLeftAssign,
            ">>=" => AssignmentOperator::ShiftRightAssign,
            ">>>=" => AssignmentOperator::UnsignedShiftRightAssign,
            _ => return None,
        };
        Some(operator)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubtractAssign => "-=",
            AssignmentOperator::MultiplyAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::ModuloAssign => "%=",
            AssignmentOperator::BitAndAssign => "&=",
            AssignmentOperator::BitOrAssign => "|=",
            AssignmentOperator::BitXorAssign => "^=",
            AssignmentOperator::ShiftLeftAssign => "<<=",
            AssignmentOperator::ShiftRightAssign => ">>=",
            AssignmentOperator::UnsignedShiftRightAssign => ">>>=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub prefix: Trivia,
    pub target: Arc<Expression>,
    pub operator_prefix: Trivia,
    pub operator: AssignmentOperator,
    pub value: Arc<Expression>,
}

/// `condition ? then_part : else_part`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub prefix: Trivia,
    pub condition: Arc<Expression>,
    pub question_prefix: Trivia,
    pub then_part: Arc<Expression>,
    pub colon_prefix: Trivia,
    pub else_part: Arc<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parentheses {
    pub prefix: Trivia,
    pub expression: Arc<Expression>,
    pub end: Trivia,
}

#[derive(Debug, Clone, PartialEq)]
pub struct This {
    pub prefix: Trivia,
    pub java_type: Option<JavaType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Identifier(Identifier),
    FieldAccess(FieldAccess),
    MethodInvocation(MethodInvocation),
    NewClass(NewClass),
    Binary(Binary),
    Unary(Unary),
    Assignment(Assignment),
    Conditional(Conditional),
    Parentheses(Parentheses),
    This(This),
}

impl Expression {
    /// The semantic type attached to this expression, when known
    pub fn java_type(&self) -> Option<JavaType> {
        match self {
            Expression::Literal(literal) => Some(JavaType::Primitive(literal.java_type)),
            Expression::Identifier(identifier) => identifier.java_type.clone(),
            Expression::FieldAccess(access) => access.java_type.clone(),
            Expression::MethodInvocation(invocation) => invocation.java_type.clone(),
            Expression::NewClass(new_class) => new_class.class.java_type.clone(),
            Expression::Parentheses(parens) => parens.expression.java_type(),
            Expression::This(this) => this.java_type.clone(),
            Expression::Binary(_)
            | Expression::Unary(_)
            | Expression::Assignment(_)
            | Expression::Conditional(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expression::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl Prefixed for Expression {
    fn prefix(&self) -> &Trivia {
        match self {
            Expression::Literal(e) => &e.prefix,
            Expression::Identifier(e) => &e.prefix,
            Expression::FieldAccess(e) => &e.prefix,
            Expression::MethodInvocation(e) => &e.prefix,
            Expression::NewClass(e) => &e.prefix,
            Expression::Binary(e) => &e.prefix,
            Expression::Unary(e) => &e.prefix,
            Expression::Assignment(e) => &e.prefix,
            Expression::Conditional(e) => &e.prefix,
            Expression::Parentheses(e) => &e.prefix,
            Expression::This(e) => &e.prefix,
        }
    }

    fn with_prefix(self, prefix: Trivia) -> Self {
        match self {
            Expression::Literal(e) => Expression::Literal(Literal { prefix, ..e }),
            Expression::Identifier(e) => Expression::Identifier(Identifier { prefix, ..e }),
            Expression::FieldAccess(e) => Expression::FieldAccess(FieldAccess { prefix, ..e }),
            Expression::MethodInvocation(e) => {
                Expression::MethodInvocation(MethodInvocation { prefix, ..e })
            }
            Expression::NewClass(e) => Expression::NewClass(NewClass { prefix, ..e }),
            Expression::Binary(e) => Expression::Binary(Binary { prefix, ..e }),
            Expression::Unary(e) => Expression::Unary(Unary { prefix, ..e }),
            Expression::Assignment(e) => Expression::Assignment(Assignment { prefix, ..e }),
            Expression::Conditional(e) => Expression::Conditional(Conditional { prefix, ..e }),
            Expression::Parentheses(e) => Expression::Parentheses(Parentheses { prefix, ..e }),
            Expression::This(e) => Expression::This(This { prefix, ..e }),
        }
    }
}

impl Prefixed for Import {
    fn prefix(&self) -> &Trivia {
        &self.prefix
    }

    fn with_prefix(self, prefix: Trivia) -> Self {
        Self { prefix, ..self }
    }
}

impl Prefixed for ClassDeclaration {
    fn prefix(&self) -> &Trivia {
        &self.prefix
    }

    fn with_prefix(self, prefix: Trivia) -> Self {
        Self { prefix, ..self }
    }
}

impl Prefixed for TypeTree {
    fn prefix(&self) -> &Trivia {
        &self.prefix
    }

    fn with_prefix(self, prefix: Trivia) -> Self {
        Self { prefix, ..self }
    }
}

impl Prefixed for VariableDeclarations {
    fn prefix(&self) -> &Trivia {
        &self.prefix
    }

    fn with_prefix(self, prefix: Trivia) -> Self {
        Self { prefix, ..self }
    }
}

impl Prefixed for Member {
    fn prefix(&self) -> &Trivia {
        match self {
            Member::Field(m) => &m.prefix,
            Member::Method(m) => &m.prefix,
            Member::Class(m) => &m.prefix,
            Member::Empty(m) => &m.prefix,
        }
    }

    fn with_prefix(self, prefix: Trivia) -> Self {
        match self {
            Member::Field(m) => Member::Field(VariableDeclarations { prefix, ..m }),
            Member::Method(m) => Member::Method(MethodDeclaration { prefix, ..m }),
            Member::Class(m) => Member::Class(ClassDeclaration { prefix, ..m }),
            Member::Empty(_) => Member::Empty(Empty { prefix }),
        }
    }
}
