//! Arithmetic evaluator for hit point and experience text inputs.
//!
//! Players can type either a plain number or a small expression like
//! `"10+5"` into the HP and XP fields. This is a recursive-descent
//! evaluator restricted to integers, `+ - * /`, unary minus, and
//! parentheses; [`evaluate_lenient`] adds the graceful-degradation tiers
//! the input fields rely on.

use thiserror::Error;

/// Error type for expression parsing and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected trailing input: {0}")]
    TrailingInput(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
}

/// Evaluate an arithmetic expression to an integer.
pub fn evaluate(input: &str) -> Result<i64, ExprError> {
    let mut parser = Parser::new(input);
    let value = parser.expression()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(ExprError::TrailingInput(parser.rest().to_string()));
    }
    Ok(value)
}

/// Evaluate with graceful degradation: expression parse, then plain
/// integer parse, then 0. Never fails; always returns a finite integer.
pub fn evaluate_lenient(input: &str) -> i64 {
    match evaluate(input) {
        Ok(value) => value,
        Err(_) => input.trim().parse().unwrap_or(0),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn expression(&mut self) -> Result<i64, ExprError> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_add(rhs).ok_or(ExprError::Overflow)?;
                }
                Some('-') => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_sub(rhs).ok_or(ExprError::Overflow)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<i64, ExprError> {
        let mut value = self.factor()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    value = value.checked_mul(rhs).ok_or(ExprError::Overflow)?;
                }
                Some('/') => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    if rhs == 0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    value = value.checked_div(rhs).ok_or(ExprError::Overflow)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<i64, ExprError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ExprError::UnexpectedEnd),
            Some('-') => {
                self.pos += 1;
                let value = self.factor()?;
                value.checked_neg().ok_or(ExprError::Overflow)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                self.skip_whitespace();
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        Ok(value)
                    }
                    Some(ch) => Err(ExprError::UnexpectedChar(ch)),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.number(),
            Some(ch) => Err(ExprError::UnexpectedChar(ch)),
        }
    }

    fn number(&mut self) -> Result<i64, ExprError> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.pos += 1;
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| ExprError::Overflow)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.pos += self.peek().map_or(0, char::len_utf8);
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }
}
