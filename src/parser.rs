//! A recursive-descent parser producing [`Ast`]s.
//!
//! # Grammar
//! Statements are parsed by recursive descent, dispatching on the current
//! token (see [`stmt`]); expressions are parsed by precedence climbing over
//! the operator table in [`TokenKind::operator`] (see [`expr`]).
//!
//! ```raw
//! program ::= { stmt }
//!
//! stmt ::=
//!       'if' paren_expr stmt [ 'else' stmt ]
//!     | 'print' '(' print_arg { ',' print_arg } ')' ';'
//!     | 'putc' paren_expr ';'
//!     | 'while' paren_expr stmt
//!     | IDENT '=' expr ';'
//!     | '{' { stmt } '}'
//!     | ';'
//!
//! print_arg ::= STRING | expr
//! paren_expr ::= '(' expr ')'
//! ```
//!
//! The parser pulls one token at a time from a [`TokenSource`], so it runs
//! equally well over a live [`Lexer`] or an already materialised token list.

use tracing::debug;

use crate::{
    ast::{Ast, Link, Node},
    error::{Error, SyntaxError},
    lexer::{
        token::{Token, TokenKind},
        Lexer,
    },
};

pub mod expr;
pub mod stmt;

/// A supplier of tokens for the [`Parser`].
pub trait TokenSource {
    /// Pulls the next token, or returns [`None`] if the source has run dry
    /// without producing [`TokenKind::EndOfInput`].
    fn pull(&mut self) -> Result<Option<Token>, Error>;
}

impl TokenSource for Lexer<'_> {
    fn pull(&mut self) -> Result<Option<Token>, Error> {
        Ok(Some(self.next_token()?))
    }
}

impl<I> TokenSource for I
where
    I: Iterator<Item = Token>,
{
    fn pull(&mut self) -> Result<Option<Token>, Error> {
        Ok(self.next())
    }
}

/// A parser over a single token source.
#[derive(Debug)]
pub struct Parser<S> {
    /// Where tokens come from.
    source: S,
    /// The token under consideration.
    current: Token,
}

impl<S: TokenSource> Parser<S> {
    /// Constructs a [`Parser`], pulling the first token from `source`.
    pub fn new(mut source: S) -> Result<Self, Error> {
        let current = source
            .pull()?
            .unwrap_or_else(|| Token::spelled(TokenKind::EndOfInput, 1, 1));
        Ok(Self { source, current })
    }

    /// Consumes `self`, parsing statements until [`TokenKind::EndOfInput`].
    ///
    /// Each statement is appended to a left-leaning [`Sequence`] chain, whose
    /// last link becomes the root. A program with no statements has no root.
    ///
    /// [`Sequence`]: crate::ast::NodeKind::Sequence
    pub fn parse(mut self) -> Result<Ast, Error> {
        let mut root: Link = None;
        let mut count = 0usize;

        while self.current.kind != TokenKind::EndOfInput {
            let statement = self.statement()?;
            root = Some(Box::new(Node::sequence(root, statement)));
            count += 1;
        }

        debug!(statements = count, "finished parsing");
        Ok(Ast::new(root))
    }

    /// Moves to the next token, returning the one just left behind.
    ///
    /// A source that runs dry is treated as ending at the last token seen.
    fn advance(&mut self) -> Result<Token, Error> {
        let next = match self.source.pull()? {
            Some(token) => token,
            None => Token::spelled(TokenKind::EndOfInput, self.current.line, self.current.column),
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Returns `true` if the current token is of the given kind.
    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it is of the given kind, and fails otherwise.
    ///
    /// `context` names the production doing the expecting.
    fn expect(&mut self, context: &str, kind: TokenKind) -> Result<Token, Error> {
        if self.at(kind) {
            return self.advance();
        }

        Err(self.error(format!(
            "{context}: Expecting '{kind}', found '{}'",
            self.current.kind
        )))
    }

    /// Builds a [`SyntaxError`] located at the current token.
    fn error(&self, message: String) -> Error {
        SyntaxError::at(self.current.line, self.current.column, message).into()
    }
}

/// Lexes and parses `source` in one pass.
pub fn parse(source: &str) -> Result<Ast, Error> {
    Parser::new(Lexer::new(source))?.parse()
}
