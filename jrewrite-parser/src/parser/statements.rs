// Statement parsing module
// Blocks, control flow, return and throw, local variables and expression statements

use std::sync::Arc;

use pest::iterators::Pair;

use super::{Cursor, Rule, TreeBuilder};
use crate::ast::*;
use crate::error::*;
use crate::trivia::Trivia;

impl<'i> TreeBuilder<'i> {
    pub(crate) fn block(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Block> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::lbrace)?;

        let mut statements = Vec::new();
        while !cursor.at(Rule::rbrace) {
            let (statement_prefix, pair) = cursor.expect_any("a statement")?;
            statements.push(Arc::new(self.statement(statement_prefix, pair)?));
        }
        let end = cursor.token(Rule::rbrace)?;

        Ok(Block {
            prefix,
            statements,
            end,
        })
    }

    pub(crate) fn statement(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Statement> {
        let statement = match pair.as_rule() {
            Rule::block => Statement::Block(self.block(prefix, pair)?),
            Rule::return_statement => Statement::Return(self.return_statement(prefix, pair)?),
            Rule::throw_statement => Statement::Throw(self.throw_statement(prefix, pair)?),
            Rule::if_statement => Statement::If(self.if_statement(prefix, pair)?),
            Rule::while_statement => Statement::While(self.while_statement(prefix, pair)?),
            Rule::empty_statement => Statement::Empty(Empty { prefix }),
            Rule::variable_declarations => {
                Statement::VariableDeclarations(self.variable_declarations(prefix, pair)?)
            }
            Rule::expression_statement => {
                let mut cursor = Cursor::new(pair);
                let (expression_prefix, expression) = cursor.expect(Rule::expression)?;
                let expression = self.expression(expression_prefix, expression)?;
                Statement::Expression(ExpressionStatement {
                    prefix,
                    expression: Arc::new(expression),
                    terminator: cursor.token(Rule::semi)?,
                })
            }
            _ => return Err(self.unexpected("a statement", &pair)),
        };
        Ok(statement)
    }

    fn return_statement(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Return> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::kw_return)?;

        let expression = match cursor.next_if(Rule::expression) {
            Some((expression_prefix, pair)) => {
                Some(Arc::new(self.expression(expression_prefix, pair)?))
            }
            None => None,
        };

        Ok(Return {
            prefix,
            expression,
            terminator: cursor.token(Rule::semi)?,
        })
    }

    fn throw_statement(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Throw> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::kw_throw)?;
        let (exception_prefix, exception) = cursor.expect(Rule::expression)?;

        Ok(Throw {
            prefix,
            exception: Arc::new(self.expression(exception_prefix, exception)?),
            terminator: cursor.token(Rule::semi)?,
        })
    }

    fn if_statement(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<If> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::kw_if)?;
        let condition = self.control_parentheses(&mut cursor)?;
        let (then_prefix, then_part) = cursor.expect_any("a statement")?;
        let then_part = Arc::new(self.statement(then_prefix, then_part)?);

        let else_part = match cursor.next_if(Rule::else_clause) {
            Some((else_prefix, pair)) => {
                let mut inner = Cursor::new(pair);
                inner.token(Rule::kw_else)?;
                let (body_prefix, body) = inner.expect_any("a statement")?;
                Some(Else {
                    prefix: else_prefix,
                    body: Arc::new(self.statement(body_prefix, body)?),
                })
            }
            None => None,
        };

        Ok(If {
            prefix,
            condition,
            then_part,
            else_part,
        })
    }

    fn while_statement(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<While> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::kw_while)?;
        let condition = self.control_parentheses(&mut cursor)?;
        let (body_prefix, body) = cursor.expect_any("a statement")?;

        Ok(While {
            prefix,
            condition,
            body: Arc::new(self.statement(body_prefix, body)?),
        })
    }

    fn control_parentheses(&self, cursor: &mut Cursor<'i>) -> ParseResult<ControlParentheses> {
        let (prefix, pair) = cursor.expect(Rule::par_expression)?;
        let mut inner = Cursor::new(pair);
        inner.token(Rule::lparen)?;
        let (expression_prefix, expression) = inner.expect(Rule::expression)?;
        let expression = self.expression(expression_prefix, expression)?;

        Ok(ControlParentheses {
            prefix,
            expression: Arc::new(expression),
            end: inner.token(Rule::rparen)?,
        })
    }
}
