//! Recursive-descent parser for IDS expressions.
//!
//! Grammar:
//!
//! ```text
//! IDS  := Leaf | Operator Operand{arity(Operator)}
//! Leaf := Char | Char '(' Char ')' | '[' Char ']' | '[' Char '(' Char ')' ']'
//! ```
//!
//! Single pass, left to right, no backtracking. Whitespace between tokens is
//! skipped. The bracketed leaf forms accept the canonical serialized
//! notation, so parsing a serialized tree and re-serializing it yields the
//! identical string. Trailing input after a complete expression is ignored.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::operator::Operator;
use crate::domain::tree::{IdsNode, Leaf};

pub struct IdsParser {
    chars: Vec<char>,
    pos: usize,
}

/// Parse one IDS expression from `input`.
pub fn parse_ids(input: &str) -> DomainResult<IdsNode> {
    IdsParser::new(input).parse()
}

impl IdsParser {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn parse(mut self) -> DomainResult<IdsNode> {
        self.parse_node()
    }

    fn parse_node(&mut self) -> DomainResult<IdsNode> {
        self.skip_whitespace();
        let c = self.peek()?;

        if Operator::is_symbol(c) {
            let operator = Operator::from_symbol(c)?;
            self.advance();
            let mut operands = Vec::with_capacity(operator.arity());
            for _ in 0..operator.arity() {
                self.skip_whitespace();
                operands.push(self.parse_node()?);
            }
            return IdsNode::composite(operator, operands);
        }

        if c == '[' {
            self.advance();
            let leaf = self.parse_shape()?;
            match self.peek()? {
                ']' => {
                    self.advance();
                    Ok(IdsNode::leaf(leaf))
                }
                other => Err(DomainError::UnexpectedCharacter {
                    character: other,
                    position: self.pos,
                }),
            }
        } else {
            let leaf = self.parse_shape()?;
            Ok(IdsNode::leaf(leaf))
        }
    }

    /// `Char` optionally followed by `'(' Char ')'`.
    fn parse_shape(&mut self) -> DomainResult<Leaf> {
        let base = self.peek()?;
        if is_reserved(base) {
            return Err(DomainError::UnexpectedCharacter {
                character: base,
                position: self.pos,
            });
        }
        self.advance();

        if self.peek_opt() != Some('(') {
            return Ok(Leaf::new(base));
        }
        self.advance();

        let annotation = self.peek()?;
        if is_reserved(annotation) {
            return Err(DomainError::MalformedAnnotation {
                position: self.pos,
                reason: format!("reserved character '{}'", annotation),
            });
        }
        self.advance();

        match self.peek()? {
            ')' => {
                self.advance();
                Ok(Leaf::annotated(base, annotation))
            }
            other => Err(DomainError::MalformedAnnotation {
                position: self.pos,
                reason: format!("expected ')', found '{}'", other),
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_opt().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn peek(&self) -> DomainResult<char> {
        self.peek_opt().ok_or(DomainError::UnexpectedEnd {
            position: self.pos,
        })
    }

    fn peek_opt(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

fn is_reserved(c: char) -> bool {
    Operator::is_symbol(c) || matches!(c, '(' | ')' | '[' | ']')
}
