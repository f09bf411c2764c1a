// Expression parsing module
// Handles operator precedence, unary and postfix forms, selectors and primaries

use std::sync::Arc;

use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};

use super::{token_end, Cursor, Rule, TreeBuilder};
use crate::ast::*;
use crate::error::*;
use crate::trivia::Trivia;

/// An expression together with the byte range it was parsed from, so the
/// trivia around binary operators can be recovered
struct Located {
    expression: Expression,
    start: usize,
    end: usize,
}

impl<'i> TreeBuilder<'i> {
    /// Binary operator precedence parser
    /// Precedence levels from lowest to highest, following Java
    fn pratt_parser() -> PrattParser<Rule> {
        PrattParser::new()
            .op(Op::infix(Rule::op_or, Assoc::Left))
            .op(Op::infix(Rule::op_and, Assoc::Left))
            .op(Op::infix(Rule::op_bit_or, Assoc::Left))
            .op(Op::infix(Rule::op_bit_xor, Assoc::Left))
            .op(Op::infix(Rule::op_bit_and, Assoc::Left))
            .op(Op::infix(Rule::op_eq, Assoc::Left) | Op::infix(Rule::op_ne, Assoc::Left))
            .op(Op::infix(Rule::op_lt, Assoc::Left)
                | Op::infix(Rule::op_gt, Assoc::Left)
                | Op::infix(Rule::op_le, Assoc::Left)
                | Op::infix(Rule::op_ge, Assoc::Left))
            .op(Op::infix(Rule::op_shl, Assoc::Left)
                | Op::infix(Rule::op_shr, Assoc::Left)
                | Op::infix(Rule::op_ushr, Assoc::Left))
            .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_sub, Assoc::Left))
            .op(Op::infix(Rule::op_mul, Assoc::Left)
                | Op::infix(Rule::op_div, Assoc::Left)
                | Op::infix(Rule::op_mod, Assoc::Left))
    }

    fn binary_operator(&self, op: &Pair<'i, Rule>) -> ParseResult<BinaryOperator> {
        let operator = match op.as_rule() {
            Rule::op_or => BinaryOperator::Or,
            Rule::op_and => BinaryOperator::And,
            Rule::op_bit_or => BinaryOperator::BitOr,
            Rule::op_bit_xor => BinaryOperator::BitXor,
            Rule::op_bit_and => BinaryOperator::BitAnd,
            Rule::op_eq => BinaryOperator::Equal,
            Rule::op_ne => BinaryOperator::NotEqual,
            Rule::op_lt => BinaryOperator::LessThan,
            Rule::op_le => BinaryOperator::LessThanOrEqual,
            Rule::op_gt => BinaryOperator::GreaterThan,
            Rule::op_ge => BinaryOperator::GreaterThanOrEqual,
            Rule::op_shl => BinaryOperator::ShiftLeft,
            Rule::op_shr => BinaryOperator::ShiftRight,
            Rule::op_ushr => BinaryOperator::UnsignedShiftRight,
            Rule::op_add => BinaryOperator::Add,
            Rule::op_sub => BinaryOperator::Subtract,
            Rule::op_mul => BinaryOperator::Multiply,
            Rule::op_div => BinaryOperator::Divide,
            Rule::op_mod => BinaryOperator::Modulo,
            _ => return Err(self.unexpected("a binary operator", op)),
        };
        Ok(operator)
    }

    /// Parse an `expression` pair, giving the result `prefix`
    pub(crate) fn expression(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let mut cursor = Cursor::new(pair);
        let (_, inner) = cursor.expect_any("an expression")?;
        let expression = match inner.as_rule() {
            Rule::assignment => self.assignment(inner)?,
            Rule::conditional_expression => self.conditional(inner)?,
            _ => return Err(self.unexpected("an expression", &inner)),
        };
        Ok(expression.with_prefix(prefix))
    }

    fn assignment(&self, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let mut cursor = Cursor::new(pair);
        let (_, target) = cursor.expect(Rule::unary_expression)?;
        let target = self.unary(target)?;
        let (operator_prefix, operator) = cursor.expect(Rule::assignment_operator)?;
        let operator = AssignmentOperator::from_symbol(operator.as_str())
            .ok_or_else(|| self.unexpected("an assignment operator", &operator))?;
        let (value_prefix, value) = cursor.expect(Rule::expression)?;

        Ok(Expression::Assignment(Assignment {
            prefix: Trivia::empty(),
            target: Arc::new(target),
            operator_prefix,
            operator,
            value: Arc::new(self.expression(value_prefix, value)?),
        }))
    }

    fn conditional(&self, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let mut cursor = Cursor::new(pair);
        let (_, condition) = cursor.expect(Rule::binary_expression)?;
        let condition = self.binary(condition)?;

        let Some((question_prefix, _)) = cursor.next_if(Rule::question) else {
            return Ok(condition);
        };
        let (then_prefix, then_part) = cursor.expect(Rule::expression)?;
        let then_part = self.expression(then_prefix, then_part)?;
        let colon_prefix = cursor.token(Rule::colon)?;
        let (else_prefix, else_part) = cursor.expect(Rule::expression)?;
        let else_part = self.expression(else_prefix, else_part)?;

        Ok(Expression::Conditional(Conditional {
            prefix: Trivia::empty(),
            condition: Arc::new(condition),
            question_prefix,
            then_part: Arc::new(then_part),
            colon_prefix,
            else_part: Arc::new(else_part),
        }))
    }

    /// Parse a chain of binary operators using precedence climbing
    fn binary(&self, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let located = self.binary_operands(pair.into_inner())?;
        Ok(located.expression)
    }

    fn binary_operands(&self, pairs: Pairs<'i, Rule>) -> ParseResult<Located> {
        Self::pratt_parser()
            .map_primary(|pair| {
                let start = pair.as_span().start();
                let end = token_end(&pair);
                Ok(Located {
                    expression: self.unary(pair)?,
                    start,
                    end,
                })
            })
            .map_infix(
                |left: ParseResult<Located>, op: Pair<'i, Rule>, right: ParseResult<Located>| {
                    let left = left?;
                    let right = right?;
                    let operator = self.binary_operator(&op)?;
                    let op_span = op.as_span();

                    let right_prefix = self.gap(op_span.end(), right.start);
                    Ok(Located {
                        expression: Expression::Binary(Binary {
                            prefix: Trivia::empty(),
                            left: Arc::new(left.expression),
                            operator_prefix: self.gap(left.end, op_span.start()),
                            operator,
                            right: Arc::new(right.expression.with_prefix(right_prefix)),
                        }),
                        start: left.start,
                        end: right.end,
                    })
                },
            )
            .parse(pairs)
    }

    fn unary(&self, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let mut cursor = Cursor::new(pair);

        if let Some((_, operator)) = cursor.next_if(Rule::prefix_operator) {
            let operator = match operator.as_str() {
                "++" => UnaryOperator::PreIncrement,
                "--" => UnaryOperator::PreDecrement,
                "!" => UnaryOperator::Not,
                "~" => UnaryOperator::Complement,
                "+" => UnaryOperator::Positive,
                "-" => UnaryOperator::Negative,
                _ => return Err(self.unexpected("a prefix operator", &operator)),
            };
            let (operand_prefix, operand) = cursor.expect(Rule::unary_expression)?;
            let operand = self.unary(operand)?.with_prefix(operand_prefix);
            return Ok(Expression::Unary(Unary {
                prefix: Trivia::empty(),
                operator,
                operator_prefix: Trivia::empty(),
                operand: Arc::new(operand),
            }));
        }

        let (_, operand) = cursor.expect(Rule::postfix_expression)?;
        let operand = self.postfix(operand)?;

        match cursor.next_if(Rule::postfix_operator) {
            Some((operator_prefix, operator)) => {
                let operator = match operator.as_str() {
                    "++" => UnaryOperator::PostIncrement,
                    _ => UnaryOperator::PostDecrement,
                };
                Ok(Expression::Unary(Unary {
                    prefix: Trivia::empty(),
                    operator,
                    operator_prefix,
                    operand: Arc::new(operand),
                }))
            }
            None => Ok(operand),
        }
    }

    /// A primary followed by field and method selectors
    fn postfix(&self, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let mut cursor = Cursor::new(pair);
        let (_, primary) = cursor.expect_any("a primary expression")?;
        let mut expression = self.primary(primary)?;

        while let Some((dot_prefix, selector)) = cursor.next() {
            let rule = selector.as_rule();
            let mut inner = Cursor::new(selector);
            inner.token(Rule::dot)?;
            let (name_prefix, name) = inner.expect(Rule::identifier)?;
            let name = self.identifier(name_prefix, name);

            expression = match rule {
                Rule::method_selector => {
                    let (before, arguments) = inner.expect(Rule::arguments)?;
                    Expression::MethodInvocation(MethodInvocation {
                        prefix: Trivia::empty(),
                        select: Some(Select {
                            target: Arc::new(expression),
                            dot_prefix,
                        }),
                        name,
                        arguments: self.arguments(before, arguments)?,
                        java_type: None,
                    })
                }
                _ => Expression::FieldAccess(FieldAccess {
                    prefix: Trivia::empty(),
                    target: Arc::new(expression),
                    dot_prefix,
                    name,
                    java_type: None,
                }),
            };
        }

        Ok(expression)
    }

    fn primary(&self, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let expression = match pair.as_rule() {
            Rule::integer_literal
            | Rule::float_literal
            | Rule::char_literal
            | Rule::string_literal
            | Rule::boolean_literal
            | Rule::null_literal => Expression::Literal(self.literal(Trivia::empty(), pair)?),
            Rule::this_expression => Expression::This(This {
                prefix: Trivia::empty(),
                java_type: None,
            }),
            Rule::identifier => Expression::Identifier(self.identifier(Trivia::empty(), pair)),
            Rule::method_call => {
                let mut cursor = Cursor::new(pair);
                let (_, name) = cursor.expect(Rule::identifier)?;
                let (before, arguments) = cursor.expect(Rule::arguments)?;
                Expression::MethodInvocation(MethodInvocation {
                    prefix: Trivia::empty(),
                    select: None,
                    name: self.identifier(Trivia::empty(), name),
                    arguments: self.arguments(before, arguments)?,
                    java_type: None,
                })
            }
            Rule::new_class => self.new_class(pair)?,
            Rule::parenthesized => {
                let mut cursor = Cursor::new(pair);
                cursor.token(Rule::lparen)?;
                let (inner_prefix, inner) = cursor.expect(Rule::expression)?;
                let inner = self.expression(inner_prefix, inner)?;
                Expression::Parentheses(Parentheses {
                    prefix: Trivia::empty(),
                    expression: Arc::new(inner),
                    end: cursor.token(Rule::rparen)?,
                })
            }
            _ => return Err(self.unexpected("a primary expression", &pair)),
        };
        Ok(expression)
    }

    fn new_class(&self, pair: Pair<'i, Rule>) -> ParseResult<Expression> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::kw_new)?;
        let (class_prefix, class) = cursor.expect(Rule::type_ref)?;
        let class = self.type_ref(class_prefix, class)?;
        let (before, arguments) = cursor.expect(Rule::arguments)?;
        let arguments = self.arguments(before, arguments)?;
        let body = match cursor.next_if(Rule::class_body) {
            Some((body_prefix, body)) => Some(self.class_body(body_prefix, body)?),
            None => None,
        };

        Ok(Expression::NewClass(NewClass {
            prefix: Trivia::empty(),
            class,
            arguments,
            body,
        }))
    }

    /// `(a, b)` of a method invocation, `new` or annotation
    pub(crate) fn arguments(
        &self,
        before: Trivia,
        pair: Pair<'i, Rule>,
    ) -> ParseResult<Container<Expression>> {
        let mut cursor = Cursor::new(pair);
        cursor.token(Rule::lparen)?;

        let mut elements = Vec::new();
        while let Some((prefix, pair)) = cursor.next_if(Rule::expression) {
            let element = Arc::new(self.expression(prefix, pair)?);
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
}
