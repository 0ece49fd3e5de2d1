//! Recursive-descent evaluator for `+ - * /`, unary sign and parentheses.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := ('+' | '-') factor | number | '(' expression ')'
//! number     := digit+ ('.' digit+)?
//! ```
//!
//! Division by zero is plain IEEE-754 division and yields infinity or NaN.
//! Parentheses may nest at most [`MAX_DEPTH`] levels.

use crate::error::ParseError;

/// Evaluates `expression`, failing if any input is left unconsumed.
pub fn evaluate(expression: &str) -> Result<f64, ParseError> {
    let mut parser = Parser::new(expression);
    let value = parser.expression()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(ch) => Err(ParseError::TrailingInput {
            ch,
            pos: parser.pos,
        }),
    }
}

/// Deepest parenthesis nesting accepted before giving up.
pub const MAX_DEPTH: usize = 256;

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.bump();
        }
    }

    /// Skips whitespace and consumes `wanted` if it is next.
    fn eat(&mut self, wanted: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(wanted) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expression(&mut self) -> Result<f64, ParseError> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, ParseError> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                value /= self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> Result<f64, ParseError> {
        // Sign runs are folded iteratively so long chains cannot exhaust the stack.
        let mut negate = false;
        loop {
            if self.eat('-') {
                negate = !negate;
            } else if !self.eat('+') {
                break;
            }
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let open_pos = self.pos;
        if self.eat('(') {
            if self.depth >= MAX_DEPTH {
                return Err(ParseError::TooDeep { pos: open_pos });
            }
            self.depth += 1;
            let value = self.expression()?;
            self.depth -= 1;
            if !self.eat(')') {
                return Err(ParseError::UnclosedParen { open_pos });
            }
            return Ok(value);
        }

        match self.peek() {
            Some(ch) if ch.is_ascii_digit() => self.number(),
            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos: self.pos }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        self.digits();
        if self.peek() == Some('.') {
            self.bump();
            if self.digits() == 0 {
                return Err(ParseError::MalformedNumber { pos: start });
            }
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| ParseError::MalformedNumber { pos: start })
    }

    fn digits(&mut self) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.bump();
            count += 1;
        }
        count
    }
}
