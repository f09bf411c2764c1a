// Type Attribution
// Cross-unit type index and the pass that attaches semantic types to trees
//
// Units never point into one another. A reference to a type declared in
// another unit is resolved by name against the read-only `TypeIndex`.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::ast::*;
use crate::name::QualifiedName;
use crate::types::{ClassType, JavaType};

/// Simple names of `java.lang` types visible without an import
const JAVA_LANG_TYPES: &[&str] = &[
    "AutoCloseable",
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassCastException",
    "CloneNotSupportedException",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "IllegalArgumentException",
    "IllegalStateException",
    "IndexOutOfBoundsException",
    "Integer",
    "InterruptedException",
    "Iterable",
    "Long",
    "Math",
    "NullPointerException",
    "Number",
    "Object",
    "Override",
    "Runnable",
    "RuntimeException",
    "SafeVarargs",
    "Short",
    "String",
    "StringBuilder",
    "SuppressWarnings",
    "System",
    "Thread",
    "Throwable",
    "UnsupportedOperationException",
    "Void",
];

/// Every class declared by a set of units, keyed by fully qualified name
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    types: IndexMap<QualifiedName, ClassType>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a CompilationUnit>) -> Self {
        let mut index = Self::new();
        for unit in units {
            index.add_unit(unit);
        }
        index
    }

    /// Record every class of `unit`, nested classes included
    pub fn add_unit(&mut self, unit: &CompilationUnit) {
        let package = unit.package_name();
        for class in unit.classes() {
            let class_type = ClassType::top_level(package, &class.name.name);
            self.add_class(class, class_type);
        }
    }

    fn add_class(&mut self, class: &ClassDeclaration, class_type: ClassType) {
        for nested in class.nested_classes() {
            self.add_class(nested, class_type.nested(&nested.name.name));
        }
        self.insert(class_type);
    }

    pub fn insert(&mut self, class_type: ClassType) {
        self.types
            .insert(class_type.fully_qualified_name().clone(), class_type);
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&ClassType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Declared types in the order they were indexed
    pub fn iter(&self) -> impl Iterator<Item = &ClassType> {
        self.types.values()
    }
}

/// Attaches semantic types to the nodes of a unit
#[derive(Debug, Clone, Copy)]
pub struct Attributor<'a> {
    index: &'a TypeIndex,
    implicit_java_lang: bool,
}

impl<'a> Attributor<'a> {
    pub fn new(index: &'a TypeIndex, implicit_java_lang: bool) -> Self {
        Self {
            index,
            implicit_java_lang,
        }
    }

    /// Rebuild `unit` with types attached. Unresolvable references stay
    /// untyped; attribution never fails.
    pub fn attribute(&self, unit: CompilationUnit) -> CompilationUnit {
        let classes = {
            let scope = self.unit_scope(&unit);
            unit.classes
                .iter()
                .map(|class| Arc::new(scope.class(class)))
                .collect()
        };
        unit.with_classes(classes)
    }

    /// Resolve a type name as written inside `unit`, outside any class
    pub fn resolve_in(&self, unit: &CompilationUnit, name: &QualifiedName) -> Option<ClassType> {
        self.unit_scope(unit).resolve(name)
    }

    fn unit_scope<'u>(&self, unit: &'u CompilationUnit) -> Scope<'u>
    where
        'a: 'u,
    {
        Scope {
            index: self.index,
            implicit_java_lang: self.implicit_java_lang,
            package: unit.package_name().cloned(),
            imports: &unit.imports,
            enclosing: Vec::new(),
        }
    }
}

/// Names visible at one point of a unit
struct Scope<'a> {
    index: &'a TypeIndex,
    implicit_java_lang: bool,
    package: Option<QualifiedName>,
    imports: &'a [Arc<Import>],
    /// Enclosing classes, outermost first
    enclosing: Vec<ClassType>,
}

impl<'a> Scope<'a> {
    fn enter(&self, class_type: ClassType) -> Scope<'a> {
        let mut enclosing = self.enclosing.clone();
        enclosing.push(class_type);
        Scope {
            index: self.index,
            implicit_java_lang: self.implicit_java_lang,
            package: self.package.clone(),
            imports: self.imports,
            enclosing,
        }
    }

    /// Resolve a dotted type reference. The head is looked up as a simple
    /// name; remaining segments are nested types of it. Failing that, the
    /// reference is taken as fully qualified.
    fn resolve(&self, name: &QualifiedName) -> Option<ClassType> {
        let (head, rest) = name.segments().split_first()?;
        if let Some(resolved) = self.resolve_simple(head) {
            return Some(nest(resolved, rest));
        }

        for len in (1..=name.segment_count()).rev() {
            let known = name.prefix(len).and_then(|prefix| self.index.get(&prefix).cloned());
            if let Some(known) = known {
                return Some(nest(known, &name.segments()[len..]));
            }
        }

        let package_len = name.conventional_package_len();
        if package_len > 0 && package_len < name.segment_count() {
            return Some(ClassType::from_convention(name.clone()));
        }

        trace!(name = %name, "unresolved type reference");
        None
    }

    fn resolve_simple(&self, simple: &str) -> Option<ClassType> {
        // Member types of enclosing classes, innermost first
        for owner in self.enclosing.iter().rev() {
            if owner.simple_name() == simple {
                return Some(owner.clone());
            }
            let nested = owner.nested(simple);
            if self.index.contains(nested.fully_qualified_name()) {
                return Some(nested);
            }
        }

        // Types of this unit and of its package
        let local = ClassType::top_level(self.package.as_ref(), simple);
        if self.index.contains(local.fully_qualified_name()) {
            return Some(local);
        }

        for import in self.imports.iter().filter(|i| !i.is_wildcard()) {
            if import.name.simple_name() != simple {
                continue;
            }
            if let Some(known) = self.index.get(&import.name) {
                return Some(known.clone());
            }
            if !import.is_static() {
                return Some(ClassType::from_convention(import.name.clone()));
            }
        }

        for import in self.imports.iter().filter(|i| i.is_wildcard()) {
            let candidate = import.name.child_unchecked(simple);
            if let Some(known) = self.index.get(&candidate) {
                return Some(known.clone());
            }
        }

        if self.implicit_java_lang {
            let java_lang = QualifiedName::from_trusted(vec!["java".into(), "lang".into()]);
            let candidate = ClassType::top_level(Some(&java_lang), simple);
            if JAVA_LANG_TYPES.contains(&simple)
                || self.index.contains(candidate.fully_qualified_name())
            {
                return Some(candidate);
            }
        }

        None
    }

    fn class(&self, class: &ClassDeclaration) -> ClassDeclaration {
        let class_type = match self.enclosing.last() {
            Some(owner) => owner.nested(&class.name.name),
            None => ClassType::top_level(self.package.as_ref(), &class.name.name),
        };
        let inner = self.enter(class_type.clone());

        ClassDeclaration {
            prefix: class.prefix.clone(),
            modifiers: self.modifiers(&class.modifiers),
            kind_prefix: class.kind_prefix.clone(),
            kind: class.kind,
            name: Identifier {
                java_type: Some(JavaType::Class(class_type.clone())),
                ..class.name.clone()
            },
            extends: class.extends.as_ref().map(|list| self.type_list(list)),
            implements: class.implements.as_ref().map(|list| self.type_list(list)),
            body: inner.class_body(&class.body),
            java_type: Some(class_type),
        }
    }

    fn class_body(&self, body: &ClassBody) -> ClassBody {
        ClassBody {
            prefix: body.prefix.clone(),
            members: body
                .members
                .iter()
                .map(|member| Arc::new(self.member(member)))
                .collect(),
            end: body.end.clone(),
        }
    }

    fn member(&self, member: &Member) -> Member {
        match member {
            Member::Field(field) => Member::Field(self.variable_declarations(field)),
            Member::Method(method) => Member::Method(self.method(method)),
            Member::Class(class) => Member::Class(self.class(class)),
            Member::Empty(empty) => Member::Empty(empty.clone()),
        }
    }

    fn method(&self, method: &MethodDeclaration) -> MethodDeclaration {
        MethodDeclaration {
            prefix: method.prefix.clone(),
            modifiers: self.modifiers(&method.modifiers),
            return_type: method.return_type.as_ref().map(|t| self.type_tree(t)),
            name: method.name.clone(),
            parameters: map_container(&method.parameters, |p| self.variable_declarations(p)),
            throws: method.throws.as_ref().map(|list| self.type_list(list)),
            body: method.body.as_ref().map(|body| Arc::new(self.block(body))),
            terminator: method.terminator.clone(),
        }
    }

    fn modifiers(&self, modifiers: &[Modifier]) -> Vec<Modifier> {
        modifiers
            .iter()
            .map(|modifier| match modifier {
                Modifier::Annotation(annotation) => Modifier::Annotation(Annotation {
                    arguments: annotation
                        .arguments
                        .as_ref()
                        .map(|args| map_container(args, |e| self.expression(e))),
                    java_type: self.resolve(&annotation.name).map(JavaType::Class),
                    ..annotation.clone()
                }),
                keyword => keyword.clone(),
            })
            .collect()
    }

    fn type_list(&self, list: &TypeList) -> TypeList {
        TypeList {
            prefix: list.prefix.clone(),
            types: map_padded(&list.types, |t| self.type_tree(t)),
        }
    }

    fn type_tree(&self, tree: &TypeTree) -> TypeTree {
        let type_arguments = tree
            .type_arguments
            .as_ref()
            .map(|args| map_container(args, |t| self.type_tree(t)));

        let (kind, java_type) = match &tree.kind {
            TypeTreeKind::Primitive(primitive) => {
                (tree.kind.clone(), Some(JavaType::Primitive(*primitive)))
            }
            TypeTreeKind::Named(name) => {
                let java_type = self.resolve(name).map(|class| {
                    let arguments = type_arguments
                        .as_ref()
                        .filter(|args| !args.is_empty())
                        .and_then(|args| {
                            args.iter()
                                .map(|t| t.java_type.clone())
                                .collect::<Option<Vec<_>>>()
                        });
                    match arguments {
                        Some(arguments) => JavaType::Parameterized { class, arguments },
                        None => JavaType::Class(class),
                    }
                });
                (tree.kind.clone(), java_type)
            }
            TypeTreeKind::Wildcard(bound) => {
                let bound = bound.as_ref().map(|bound| WildcardBound {
                    prefix: bound.prefix.clone(),
                    kind: bound.kind,
                    bound: Arc::new(self.type_tree(&bound.bound)),
                });
                (TypeTreeKind::Wildcard(bound), None)
            }
        };

        TypeTree {
            prefix: tree.prefix.clone(),
            kind,
            type_arguments,
            dimensions: tree.dimensions.clone(),
            java_type: java_type.map(|t| t.array_of(tree.dimensions.len())),
        }
    }

    fn variable_declarations(&self, declarations: &VariableDeclarations) -> VariableDeclarations {
        let type_expr = self.type_tree(&declarations.type_expr);
        let variables = map_padded(&declarations.variables, |variable| NamedVariable {
            prefix: variable.prefix.clone(),
            name: variable.name.clone(),
            dimensions: variable.dimensions.clone(),
            initializer: variable.initializer.as_ref().map(|init| Initializer {
                prefix: init.prefix.clone(),
                value: Arc::new(self.expression(&init.value)),
            }),
            java_type: type_expr
                .java_type
                .clone()
                .map(|t| t.array_of(variable.dimensions.len())),
        });

        VariableDeclarations {
            prefix: declarations.prefix.clone(),
            modifiers: self.modifiers(&declarations.modifiers),
            type_expr,
            variables,
            terminator: declarations.terminator.clone(),
        }
    }

    fn block(&self, block: &Block) -> Block {
        Block {
            prefix: block.prefix.clone(),
            statements: block
                .statements
                .iter()
                .map(|statement| Arc::new(self.statement(statement)))
                .collect(),
            end: block.end.clone(),
        }
    }

    fn statement(&self, statement: &Statement) -> Statement {
        match statement {
            Statement::Block(block) => Statement::Block(self.block(block)),
            Statement::Return(ret) => Statement::Return(Return {
                expression: ret.expression.as_ref().map(|e| Arc::new(self.expression(e))),
                ..ret.clone()
            }),
            Statement::Throw(throw) => Statement::Throw(Throw {
                exception: Arc::new(self.expression(&throw.exception)),
                ..throw.clone()
            }),
            Statement::If(stmt) => Statement::If(If {
                prefix: stmt.prefix.clone(),
                condition: self.control_parentheses(&stmt.condition),
                then_part: Arc::new(self.statement(&stmt.then_part)),
                else_part: stmt.else_part.as_ref().map(|else_part| Else {
                    prefix: else_part.prefix.clone(),
                    body: Arc::new(self.statement(&else_part.body)),
                }),
            }),
            Statement::While(stmt) => Statement::While(While {
                prefix: stmt.prefix.clone(),
                condition: self.control_parentheses(&stmt.condition),
                body: Arc::new(self.statement(&stmt.body)),
            }),
            Statement::Empty(empty) => Statement::Empty(empty.clone()),
            Statement::VariableDeclarations(declarations) => {
                Statement::VariableDeclarations(self.variable_declarations(declarations))
            }
            Statement::Expression(stmt) => Statement::Expression(ExpressionStatement {
                expression: Arc::new(self.expression(&stmt.expression)),
                ..stmt.clone()
            }),
        }
    }

    fn control_parentheses(&self, parens: &ControlParentheses) -> ControlParentheses {
        ControlParentheses {
            expression: Arc::new(self.expression(&parens.expression)),
            ..parens.clone()
        }
    }

    fn expression(&self, expression: &Expression) -> Expression {
        match expression {
            Expression::Literal(literal) => Expression::Literal(literal.clone()),
            Expression::Identifier(identifier) => Expression::Identifier(Identifier {
                java_type: self.type_reference(expression),
                ..identifier.clone()
            }),
            Expression::FieldAccess(access) => Expression::FieldAccess(FieldAccess {
                prefix: access.prefix.clone(),
                target: Arc::new(self.expression(&access.target)),
                dot_prefix: access.dot_prefix.clone(),
                name: access.name.clone(),
                java_type: self.type_reference(expression),
            }),
            Expression::MethodInvocation(invocation) => {
                Expression::MethodInvocation(MethodInvocation {
                    prefix: invocation.prefix.clone(),
                    select: invocation.select.as_ref().map(|select| Select {
                        target: Arc::new(self.expression(&select.target)),
                        dot_prefix: select.dot_prefix.clone(),
                    }),
                    name: invocation.name.clone(),
                    arguments: map_container(&invocation.arguments, |e| self.expression(e)),
                    java_type: invocation.java_type.clone(),
                })
            }
            Expression::NewClass(new_class) => Expression::NewClass(NewClass {
                prefix: new_class.prefix.clone(),
                class: self.type_tree(&new_class.class),
                arguments: map_container(&new_class.arguments, |e| self.expression(e)),
                body: new_class.body.as_ref().map(|body| self.class_body(body)),
            }),
            Expression::Binary(binary) => Expression::Binary(Binary {
                left: Arc::new(self.expression(&binary.left)),
                right: Arc::new(self.expression(&binary.right)),
                ..binary.clone()
            }),
            Expression::Unary(unary) => Expression::Unary(Unary {
                operand: Arc::new(self.expression(&unary.operand)),
                ..unary.clone()
            }),
            Expression::Assignment(assignment) => Expression::Assignment(Assignment {
                target: Arc::new(self.expression(&assignment.target)),
                value: Arc::new(self.expression(&assignment.value)),
                ..assignment.clone()
            }),
            Expression::Conditional(conditional) => Expression::Conditional(Conditional {
                condition: Arc::new(self.expression(&conditional.condition)),
                then_part: Arc::new(self.expression(&conditional.then_part)),
                else_part: Arc::new(self.expression(&conditional.else_part)),
                ..conditional.clone()
            }),
            Expression::Parentheses(parens) => Expression::Parentheses(Parentheses {
                expression: Arc::new(self.expression(&parens.expression)),
                ..parens.clone()
            }),
            Expression::This(this) => Expression::This(This {
                prefix: this.prefix.clone(),
                java_type: self.enclosing.last().cloned().map(JavaType::Class),
            }),
        }
    }

    /// The type named by an identifier or a dotted chain of identifiers
    /// such as `A.B`, judged by the upper-case naming convention of its
    /// final segment
    fn type_reference(&self, expression: &Expression) -> Option<JavaType> {
        let name = chain_name(expression)?;
        if !name.simple_name().starts_with(char::is_uppercase) {
            return None;
        }
        self.resolve(&name).map(JavaType::Class)
    }
}

fn nest(class_type: ClassType, nested: &[String]) -> ClassType {
    nested
        .iter()
        .fold(class_type, |owner, simple| owner.nested(simple))
}

fn chain_name(expression: &Expression) -> Option<QualifiedName> {
    match expression {
        Expression::Identifier(identifier) => {
            Some(QualifiedName::from_trusted(vec![identifier.name.clone()]))
        }
        Expression::FieldAccess(access) => {
            chain_name(&access.target).map(|target| target.child_unchecked(&access.name.name))
        }
        _ => None,
    }
}

fn map_padded<T, F>(elements: &[RightPadded<T>], f: F) -> Vec<RightPadded<T>>
where
    F: Fn(&T) -> T,
{
    elements
        .iter()
        .map(|padded| RightPadded {
            element: Arc::new(f(&padded.element)),
            after: padded.after.clone(),
        })
        .collect()
}

fn map_container<T, F>(container: &Container<T>, f: F) -> Container<T>
where
    F: Fn(&T) -> T,
{
    Container {
        before: container.before.clone(),
        elements: map_padded(&container.elements, f),
        end: container.end.clone(),
    }
}
