//! Expressions, by precedence climbing.
//!
//! [`Parser::expr`] parses one primary term and then keeps folding in binary
//! operators whose precedence is at least the current minimum, parsing each
//! right operand with the minimum raised past the operator's own precedence.
//! Every binary operator in the table is left-associative, so `a - b - c`
//! groups as `(a - b) - c`.
//!
//! ```raw
//! primary ::=
//!       '(' expr ')'
//!     | '+' expr
//!     | '-' expr
//!     | '!' expr
//!     | IDENT
//!     | INTEGER
//! ```

use crate::{
    ast::{Node, NodeKind},
    error::Error,
    lexer::token::{Operator, TokenKind},
};

use super::{Parser, TokenSource};

impl<S: TokenSource> Parser<S> {
    /// Parses an expression whose binary operators all bind at least as
    /// tightly as `min_precedence`.
    pub(super) fn expr(&mut self, min_precedence: u8) -> Result<Node, Error> {
        let mut lhs = self.primary()?;

        while let Some(op) = self
            .current
            .kind
            .operator()
            .filter(|op| op.is_binary() && op.precedence >= min_precedence)
        {
            self.advance()?;
            let rhs = self.expr(op.right_precedence())?;
            lhs = Node::binary(op.node, lhs, rhs);
        }

        Ok(lhs)
    }

    /// Parses `'(' expr ')'`.
    pub(super) fn paren_expr(&mut self) -> Result<Node, Error> {
        self.expect("paren_expr", TokenKind::LeftParen)?;
        let node = self.expr(0)?;
        self.expect("paren_expr", TokenKind::RightParen)?;
        Ok(node)
    }

    /// Parses a primary term.
    fn primary(&mut self) -> Result<Node, Error> {
        match self.current.kind {
            TokenKind::LeftParen => self.paren_expr(),
            TokenKind::Add => {
                // unary plus is the identity
                self.advance()?;
                self.expr(Operator::ADD.precedence)
            }
            TokenKind::Subtract | TokenKind::Negate => self.prefix(Operator::NEGATE),
            TokenKind::Not => self.prefix(Operator::NOT),
            TokenKind::Identifier => {
                let token = self.advance()?;
                Ok(Node::leaf(NodeKind::Ident, token.text))
            }
            TokenKind::Integer => {
                let token = self.advance()?;
                Ok(Node::leaf(NodeKind::Integer, token.text))
            }
            kind => Err(self.error(format!("Expecting a primary, found: {kind}"))),
        }
    }

    /// Parses the operand of a prefix operator and wraps it.
    fn prefix(&mut self, op: Operator) -> Result<Node, Error> {
        self.advance()?;
        let operand = self.expr(op.precedence)?;
        Ok(Node::unary(op.node, operand))
    }
}
