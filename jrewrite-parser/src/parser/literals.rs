// Literal parsing functions for the Java parser
// Handles integer, floating point, character, string, boolean and null literals

use pest::iterators::Pair;

use super::{Rule, TreeBuilder};
use crate::ast::*;
use crate::error::*;
use crate::trivia::Trivia;
use crate::types::Primitive;

impl<'i> TreeBuilder<'i> {
    /// Parse a literal, keeping its source text for verbatim printing
    pub(crate) fn literal(&self, prefix: Trivia, pair: Pair<'i, Rule>) -> ParseResult<Literal> {
        let text = pair.as_str();
        let (value, java_type) = match pair.as_rule() {
            Rule::integer_literal => self.parse_integer(&pair)?,
            Rule::float_literal => self.parse_float(&pair)?,
            Rule::char_literal => {
                let value = unescape(&text[1..text.len() - 1])
                    .ok_or_else(|| self.invalid_literal(&pair, "character"))?;
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => (LiteralValue::Char(c), Primitive::Char),
                    _ => return Err(self.invalid_literal(&pair, "character")),
                }
            }
            Rule::string_literal => {
                let value = unescape(&text[1..text.len() - 1])
                    .ok_or_else(|| self.invalid_literal(&pair, "string"))?;
                (LiteralValue::String(value), Primitive::String)
            }
            Rule::boolean_literal => (LiteralValue::Boolean(text == "true"), Primitive::Boolean),
            Rule::null_literal => (LiteralValue::Null, Primitive::Null),
            _ => return Err(self.unexpected("a literal", &pair)),
        };

        Ok(Literal {
            prefix,
            value,
            value_source: text.to_string(),
            java_type,
        })
    }

    fn parse_integer(&self, pair: &Pair<'i, Rule>) -> ParseResult<(LiteralValue, Primitive)> {
        let text = pair.as_str();
        let is_long = text.ends_with(['l', 'L']);
        let digits: String = text
            .trim_end_matches(['l', 'L'])
            .chars()
            .filter(|c| *c != '_')
            .collect();

        let (radix, digits) = if let Some(hex) = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            (16, hex)
        } else if let Some(binary) = digits
            .strip_prefix("0b")
            .or_else(|| digits.strip_prefix("0B"))
        {
            (2, binary)
        } else if digits.len() > 1 && digits.starts_with('0') {
            (8, &digits[1..])
        } else {
            (10, digits.as_str())
        };

        let invalid = || self.invalid_literal(pair, "integer");
        let magnitude = u64::from_str_radix(digits, radix).map_err(|_| invalid())?;

        // Decimal literals may reach one past the signed maximum so that the
        // most negative value can be written; other radixes cover the full
        // unsigned range of the type.
        if is_long {
            let value = match radix {
                10 if magnitude <= i64::MAX as u64 + 1 => magnitude as i64,
                10 => return Err(invalid()),
                _ => magnitude as i64,
            };
            Ok((LiteralValue::Long(value), Primitive::Long))
        } else {
            let value = match radix {
                10 if magnitude <= i32::MAX as u64 + 1 => magnitude as i64,
                10 => return Err(invalid()),
                _ if magnitude <= u32::MAX as u64 => i64::from(magnitude as u32 as i32),
                _ => return Err(invalid()),
            };
            Ok((LiteralValue::Int(value), Primitive::Int))
        }
    }

    fn parse_float(&self, pair: &Pair<'i, Rule>) -> ParseResult<(LiteralValue, Primitive)> {
        let text = pair.as_str();
        let is_float = text.ends_with(['f', 'F']);
        let number = text.trim_end_matches(['f', 'F', 'd', 'D']);
        let value = number
            .parse::<f64>()
            .map_err(|_| self.invalid_literal(pair, "floating point"))?;

        if is_float {
            Ok((LiteralValue::Float(value), Primitive::Float))
        } else {
            Ok((LiteralValue::Double(value), Primitive::Double))
        }
    }
}

/// Resolve escape sequences, or `None` when an escape is malformed
pub(crate) fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next()? {
            'b' => out.push('\u{0008}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'f' => out.push('\u{000C}'),
            'r' => out.push('\r'),
            's' => out.push(' '),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            first @ '0'..='7' => {
                // Octal escapes are at most three digits and at most \377
                let max_digits = if first <= '3' { 3 } else { 2 };
                let mut code = first.to_digit(8)?;
                for _ in 1..max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }

    Some(out)
}
