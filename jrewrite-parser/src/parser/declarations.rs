// Declaration parsing module
// Compilation units, package and import declarations, classes and members

use std::sync::Arc;

use pest::iterators::Pair;

use super::{Cursor, Rule, TreeBuilder};
use crate::ast::*;
use crate::error::*;
use crate::name::QualifiedName;
use crate::trivia::Trivia;

impl<'i> TreeBuilder<'i> {
    pub(crate) fn compilation_unit(&self, pair: Pair<'i, Rule>) -> ParseResult<CompilationUnit> {
        let mut cursor = Cursor::new(pair);

        let package = match cursor.next_if(Rule::package_declaration) {
            Some((prefix, pair)) => Some(Arc::new(self.package_declaration(prefix, pair)?)),
            None => None,
        };

        let mut imports = Vec::new();
        while let Some((prefix, pair)) = cursor.next_if(Rule::import_declaration) {
            imports.push(Arc::new(self.import(prefix, pair)?));
        }

        let mut classes = Vec::new();
        while let Some((prefix, pair)) = cursor.next_if(Rule::class_declaration) {
            classes.push(Arc::new(self.class_declaration(prefix, pair)?));
        }

        let eof = cursor.token(Rule::EOI)?;

        Ok(CompilationUnit {
            source_path: self.source_path.map(str::to_string),
            package,
            imports,
            classes,
            eof,
        })
    }

    fn package_declaration(
        &self,
        prefix: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<PackageDeclaration> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::kw_package)?;
        let (name_prefix, name) = cursor.expect(Rule::qualified_name)?;
        let terminator = cursor.token(Rule::semi)?;

        Ok(PackageDeclaration {
            prefix,
            name_prefix,
            name: self.qualified_name(name),
            terminator,
        })
    }

    pub(crate) fn import(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Import> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::kw_import)?;
        let static_prefix = cursor.next_if(Rule::kw_static).map(|(trivia, _)| trivia);
        let (name_prefix, path) = cursor.expect(Rule::import_path)?;
        let terminator = cursor.token(Rule::semi)?;

        let mut segments = Vec::new();
        let mut wildcard = false;
        for part in path.into_inner() {
            match part.as_rule() {
                Rule::identifier => segments.push(part.as_str().to_string()),
                Rule::wildcard => wildcard = true,
                _ => return Err(self.unexpected("an import path segment", &part)),
            }
        }

        Ok(Import {
            prefix,
            static_prefix,
            name_prefix,
            name: QualifiedName::from_trusted(segments),
            wildcard,
            terminator,
        })
    }

    /// Names matched by the grammar are always valid identifiers
    pub(crate) fn qualified_name(&self, pair: Pair<'i, Rule>) -> QualifiedName {
        QualifiedName::from_trusted(
            pair.into_inner()
                .filter(|part| part.as_rule() == Rule::identifier)
                .map(|part| part.as_str().to_string())
                .collect(),
        )
    }

    pub(crate) fn identifier(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> Identifier {
        Identifier {
            prefix,
            name: pair.as_str().to_string(),
            java_type: None,
        }
    }

    pub(crate) fn modifiers(&self, cursor: &mut Cursor<'i>) -> ParseResult<Vec<Modifier>> {
        let mut modifiers = Vec::new();
        loop {
            match cursor.peek_rule() {
                Some(Rule::modifier_keyword) => {
                    let (prefix, pair) = cursor.expect(Rule::modifier_keyword)?;
                    let kind = ModifierKind::from_keyword(pair.as_str())
                        .ok_or_else(|| self.unexpected("a modifier keyword", &pair))?;
                    modifiers.push(Modifier::Keyword { prefix, kind });
                }
                Some(Rule::annotation) => {
                    let (prefix, pair) = cursor.expect(Rule::annotation)?;
                    modifiers.push(Modifier::Annotation(self.annotation(prefix, pair)?));
                }
                _ => return Ok(modifiers),
            }
        }
    }

    fn annotation(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Annotation> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::at)?;
        let (name_prefix, name) = cursor.expect(Rule::qualified_name)?;
        let arguments = match cursor.next_if(Rule::arguments) {
            Some((before, pair)) => Some(self.arguments(before, pair)?),
            None => None,
        };

        Ok(Annotation {
            prefix,
            name_prefix,
            name: self.qualified_name(name),
            arguments,
            java_type: None,
        })
    }

    pub(crate) fn class_declaration(
        &self,
        prefix: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<ClassDeclaration> {
        let mut cursor = Cursor::new(pair);
        let modifiers = self.modifiers(&mut cursor)?;

        let (kind_prefix, kind) = cursor.expect(Rule::class_kind)?;
        let kind = match kind.as_str() {
            "interface" => ClassKind::Interface,
            _ => ClassKind::Class,
        };

        let (name_prefix, name) = cursor.expect(Rule::identifier)?;

        let extends = match cursor.next_if(Rule::extends_clause) {
            Some((prefix, pair)) => Some(self.type_list(prefix, pair)?),
            None => None,
        };
        let implements = match cursor.next_if(Rule::implements_clause) {
            Some((prefix, pair)) => Some(self.type_list(prefix, pair)?),
            None => None,
        };

        let (body_prefix, body) = cursor.expect(Rule::class_body)?;

        Ok(ClassDeclaration {
            prefix,
            modifiers,
            kind_prefix,
            kind,
            name: self.identifier(name_prefix, name),
            extends,
            implements,
            body: self.class_body(body_prefix, body)?,
            java_type: None,
        })
    }

    /// `extends`, `implements` and `throws` clauses
    fn type_list(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<TypeList> {
        let mut cursor = Cursor::new(pair);
        cursor.expect_any("a clause keyword")?;

        let mut types = Vec::new();
        while let Some((type_prefix, pair)) = cursor.next_if(Rule::type_ref) {
            let element = Arc::new(self.type_ref(type_prefix, pair)?);
            let after = cursor.next_if(Rule::comma).map(|(t, _)| t).unwrap_or_default();
            types.push(RightPadded { element, after });
        }

        Ok(TypeList { prefix, types })
    }

    pub(crate) fn class_body(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<ClassBody> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::lbrace)?;

        let mut members = Vec::new();
        while !cursor.at(Rule::rbrace) {
            let (member_prefix, pair) = cursor.expect_any("a class member")?;
            members.push(Arc::new(self.member(member_prefix, pair)?));
        }
        let end = cursor.token(Rule::rbrace)?;

        Ok(ClassBody {
            prefix,
            members,
            end,
        })
    }

    fn member(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Member> {
        let member = match pair.as_rule() {
            Rule::class_declaration => Member::Class(self.class_declaration(prefix, pair)?),
            Rule::method_declaration => Member::Method(self.method_declaration(prefix, pair)?),
            Rule::variable_declarations => {
                Member::Field(self.variable_declarations(prefix, pair)?)
            }
            Rule::semi => Member::Empty(Empty { prefix }),
            _ => return Err(self.unexpected("a class member", &pair)),
        };
        Ok(member)
    }

    fn method_declaration(
        &self,
        prefix: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<MethodDeclaration> {
        let mut cursor = Cursor::new(pair);
        let modifiers = self.modifiers(&mut cursor)?;

        let return_type = match cursor.next_if(Rule::type_ref) {
            Some((type_prefix, pair)) => Some(self.type_ref(type_prefix, pair)?),
            None => None,
        };
        let (name_prefix, name) = cursor.expect(Rule::identifier)?;

        let (parameters_prefix, parameters) = cursor.expect(Rule::formal_parameters)?;
        let parameters = self.formal_parameters(parameters_prefix, parameters)?;

        let throws = match cursor.next_if(Rule::throws_clause) {
            Some((throws_prefix, pair)) => Some(self.type_list(throws_prefix, pair)?),
            None => None,
        };

        let (body, terminator) = match cursor.next_if(Rule::block) {
            Some((block_prefix, pair)) => (Some(Arc::new(self.block(block_prefix, pair)?)), None),
            None => (None, Some(cursor.token(Rule::semi)?)),
        };

        Ok(MethodDeclaration {
            prefix,
            modifiers,
            return_type,
            name: self.identifier(name_prefix, name),
            parameters,
            throws,
            body,
            terminator,
        })
    }

    fn formal_parameters(
        &self,
        before: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<Container<VariableDeclarations>> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::lparen)?;

        let mut elements = Vec::new();
        while let Some((prefix, pair)) = cursor.next_if(Rule::formal_parameter) {
            let element = Arc::new(self.formal_parameter(prefix, pair)?);
            let after = cursor.next_if(Rule::comma).map(|(t, _)| t).unwrap_or_default();
            elements.push(RightPadded { element, after });
        }
        let end = cursor.token(Rule::rparen)?;

        Ok(Container {
            before,
            elements,
            end,
        })
    }

    fn formal_parameter(
        &self,
        prefix: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<VariableDeclarations> {
        let mut cursor = Cursor::new(pair);
        let modifiers = self.modifiers(&mut cursor)?;
        let (type_prefix, type_expr) = cursor.expect(Rule::type_ref)?;
        let type_expr = self.type_ref(type_prefix, type_expr)?;
        let (variable_prefix, variable) = cursor.expect(Rule::variable_declarator)?;
        let variable = self.variable_declarator(variable_prefix, variable)?;

        Ok(VariableDeclarations {
            prefix,
            modifiers,
            type_expr,
            variables: vec![RightPadded::new(variable)],
            terminator: None,
        })
    }

    pub(crate) fn variable_declarations(
        &self,
        prefix: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<VariableDeclarations> {
        let mut cursor = Cursor::new(pair);
        let modifiers = self.modifiers(&mut cursor)?;
        let (type_prefix, type_expr) = cursor.expect(Rule::type_ref)?;
        let type_expr = self.type_ref(type_prefix, type_expr)?;

        let mut variables = Vec::new();
        while let Some((variable_prefix, pair)) = cursor.next_if(Rule::variable_declarator) {
            let element = Arc::new(self.variable_declarator(variable_prefix, pair)?);
            let after = cursor.next_if(Rule::comma).map(|(t, _)| t).unwrap_or_default();
            variables.push(RightPadded { element, after });
        }
        let terminator = cursor.token(Rule::semi)?;

        Ok(VariableDeclarations {
            prefix,
            modifiers,
            type_expr,
            variables,
            terminator: Some(terminator),
        })
    }

    fn variable_declarator(
        &self,
        prefix: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<NamedVariable> {
        let mut cursor = Cursor::new(pair);
        let (name_prefix, name) = cursor.expect(Rule::identifier)?;
        let dimensions = self.dimensions(&mut cursor)?;

        let initializer = match cursor.next_if(Rule::equals) {
            Some((equals_prefix, _)) => {
                let (value_prefix, value) = cursor.expect(Rule::expression)?;
                Some(Initializer {
                    prefix: equals_prefix,
                    value: Arc::new(self.expression(value_prefix, value)?),
                })
            }
            None => None,
        };

        Ok(NamedVariable {
            prefix,
            name: self.identifier(name_prefix, name),
            dimensions,
            initializer,
            java_type: None,
        })
    }
}
