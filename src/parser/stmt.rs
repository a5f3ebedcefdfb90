//! Statements.
//!
//! Every variable-arity construct is folded into binary nodes:
//!
//! - a block or `print` argument list becomes a left-leaning chain of
//!   [`NodeKind::Sequence`] nodes;
//! - `if (c) a else b` becomes `If(c, If(a, b))`, with the inner right child
//!   absent when there is no `else`.

use tracing::trace;

use crate::{
    ast::{Link, Node, NodeKind},
    error::Error,
    lexer::token::TokenKind,
};

use super::{Parser, TokenSource};

impl<S: TokenSource> Parser<S> {
    /// Parses a single statement.
    ///
    /// Returns [`None`] for statements that produce no node: a lone `;`, an
    /// empty block, or the end of input.
    pub(super) fn statement(&mut self) -> Result<Link, Error> {
        let line = self.current.line;
        let node = match self.current.kind {
            TokenKind::If => self.conditional()?,
            TokenKind::While => self.r#while()?,
            TokenKind::Print => self.print()?,
            TokenKind::Putc => self.putc()?,
            TokenKind::Identifier => self.assign()?,
            TokenKind::LeftBrace => return self.block(),
            TokenKind::Semicolon => {
                self.advance()?;
                return Ok(None);
            }
            TokenKind::EndOfInput => return Ok(None),
            kind => {
                return Err(self.error(format!("expecting start of statement, found '{kind}'")))
            }
        };

        trace!(kind = ?node.kind(), line, "parsed statement");
        Ok(Some(Box::new(node)))
    }

    /// Parses `'if' paren_expr stmt [ 'else' stmt ]`.
    fn conditional(&mut self) -> Result<Node, Error> {
        self.expect("if", TokenKind::If)?;
        let cond = self.paren_expr()?;
        let then_branch = self.statement()?;

        let else_branch = if self.at(TokenKind::Else) {
            self.advance()?;
            self.statement()?
        } else {
            None
        };

        Ok(Node::conditional(cond, then_branch, else_branch))
    }

    /// Parses `'while' paren_expr stmt`.
    fn r#while(&mut self) -> Result<Node, Error> {
        self.expect("while", TokenKind::While)?;
        let cond = self.paren_expr()?;
        let body = self.statement()?;
        Ok(Node::interior(NodeKind::While, Some(Box::new(cond)), body))
    }

    /// Parses `'print' '(' print_arg { ',' print_arg } ')' ';'`.
    fn print(&mut self) -> Result<Node, Error> {
        self.expect("print", TokenKind::Print)?;
        self.expect("print", TokenKind::LeftParen)?;

        let mut chain = Node::sequence(None, Some(Box::new(self.print_arg()?)));
        while self.at(TokenKind::Comma) {
            self.advance()?;
            let arg = self.print_arg()?;
            chain = Node::sequence(Some(Box::new(chain)), Some(Box::new(arg)));
        }

        self.expect("print", TokenKind::RightParen)?;
        self.expect("print", TokenKind::Semicolon)?;
        Ok(chain)
    }

    /// Parses `print_arg ::= STRING | expr`.
    fn print_arg(&mut self) -> Result<Node, Error> {
        if self.at(TokenKind::String) {
            let token = self.advance()?;
            return Ok(Node::unary(
                NodeKind::Prts,
                Node::leaf(NodeKind::String, token.text),
            ));
        }

        Ok(Node::unary(NodeKind::Prti, self.expr(0)?))
    }

    /// Parses `'putc' paren_expr ';'`.
    fn putc(&mut self) -> Result<Node, Error> {
        self.expect("putc", TokenKind::Putc)?;
        let value = self.paren_expr()?;
        self.expect("putc", TokenKind::Semicolon)?;
        Ok(Node::unary(NodeKind::Prtc, value))
    }

    /// Parses `IDENT '=' expr ';'`.
    fn assign(&mut self) -> Result<Node, Error> {
        let name = self.expect("assign", TokenKind::Identifier)?;
        self.expect("assign", TokenKind::Assign)?;
        let value = self.expr(0)?;
        self.expect("assign", TokenKind::Semicolon)?;
        Ok(Node::binary(
            NodeKind::Assign,
            Node::leaf(NodeKind::Ident, name.text),
            value,
        ))
    }

    /// Parses `'{' { stmt } '}'`.
    fn block(&mut self) -> Result<Link, Error> {
        self.expect("block", TokenKind::LeftBrace)?;

        let mut chain = None;
        while !self.at(TokenKind::RightBrace) && !self.at(TokenKind::EndOfInput) {
            let statement = self.statement()?;
            chain = Some(Box::new(Node::sequence(chain, statement)));
        }

        self.expect("block", TokenKind::RightBrace)?;
        Ok(chain)
    }
}
