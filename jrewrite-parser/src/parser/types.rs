// Type parsing module
// Primitive and class types, type arguments, wildcards and array dimensions

use std::sync::Arc;

use pest::iterators::Pair;

use super::{Cursor, Rule, TreeBuilder};
use crate::ast::*;
use crate::error::*;
use crate::trivia::Trivia;
use crate::types::{JavaType, Primitive};

impl<'i> TreeBuilder<'i> {
    /// Parse a type as written. Primitive types are attributed immediately;
    /// class types are left for the attribution pass.
    pub(crate) fn type_ref(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<TypeTree> {
        let mut cursor = Cursor::new(pair);
        let (_, head) = cursor.expect_any("a type")?;

        let (kind, type_arguments, java_type) = match head.as_rule() {
            Rule::primitive_type => {
                let primitive = Primitive::from_keyword(head.as_str())
                    .ok_or_else(|| self.unexpected("a primitive type", &head))?;
                (
                    TypeTreeKind::Primitive(primitive),
                    None,
                    Some(JavaType::Primitive(primitive)),
                )
            }
            Rule::qualified_name => {
                let name = self.qualified_name(head);
                let type_arguments = match cursor.next_if(Rule::type_arguments) {
                    Some((before, pair)) => Some(self.type_arguments(before, pair)?),
                    None => None,
                };
                (TypeTreeKind::Named(name), type_arguments, None)
            }
            _ => return Err(self.unexpected("a type", &head)),
        };

        let dimensions = self.dimensions(&mut cursor)?;
        let java_type = java_type.map(|t| t.array_of(dimensions.len()));

        Ok(TypeTree {
            prefix,
            kind,
            type_arguments,
            dimensions,
            java_type,
        })
    }

    /// `<A, B>`, or `<>` for the diamond
    fn type_arguments(&self, before: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Container<TypeTree>> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::lt)?;

        let mut elements = Vec::new();
        while !cursor.at(Rule::gt) {
            let (prefix, pair) = cursor.expect_any("a type argument")?;
            let element = match pair.as_rule() {
                Rule::type_ref => self.type_ref(prefix, pair)?,
                Rule::wildcard_type => self.wildcard_type(prefix, pair)?,
                _ => return Err(self.unexpected("a type argument", &pair)),
            };
            let after = cursor.next_if(Rule::comma).map(|(t, _)| t).unwrap_or_default();
            elements.push(RightPadded {
                element: Arc::new(element),
                after,
            });
        }
        let end = cursor.token(Rule::gt)?;

        Ok(Container {
            before,
            elements,
            end,
        })
    }

    fn wildcard_type(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<TypeTree> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::question)?;

        let bound = match cursor.next_if(Rule::wildcard_bound) {
            Some((bound_prefix, keyword)) => {
                let kind = match keyword.as_str() {
                    "super" => BoundKind::Super,
                    _ => BoundKind::Extends,
                };
                let (type_prefix, bound) = cursor.expect(Rule::type_ref)?;
                Some(WildcardBound {
                    prefix: bound_prefix,
                    kind,
                    bound: Arc::new(self.type_ref(type_prefix, bound)?),
                })
            }
            None => None,
        };

        Ok(TypeTree {
            prefix,
            kind: TypeTreeKind::Wildcard(bound),
            type_arguments: None,
            dimensions: Vec::new(),
            java_type: None,
        })
    }

    /// Zero or more `[]` following a type or variable name
    pub(crate) fn dimensions(&self, cursor: &mut Cursor<'i>) -> ParseResult<Vec<Dimension>> {
        let mut dimensions = Vec::new();
        while let Some((prefix, pair)) = cursor.next_if(Rule::dimension) {
            let mut inner = Cursor::new(pair);
            inner.token(Rule::lbracket)?;
            let close = inner.token(Rule::rbracket)?;
            dimensions.push(Dimension {
                prefix,
                inner: close,
            });
        }
        Ok(dimensions)
    }
}
