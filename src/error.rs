//! The two fatal error kinds of the front end.
//!
//! Neither the lexer nor the parser ever recovers from an error: the first
//! [`LexError`] or [`SyntaxError`] aborts the run and is propagated to the
//! caller unchanged.

use std::fmt::Display;

use thiserror::Error;

/// A 1-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// The line number, starting at 1.
    pub line: usize,
    /// The column number, starting at 1 and counted in characters.
    pub column: usize,
}

impl Location {
    /// Constructs a new [`Location`].
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Renders `message`, suffixed with `location` when it is known.
fn render(
    f: &mut std::fmt::Formatter<'_>,
    message: &str,
    location: Option<Location>,
) -> std::fmt::Result {
    match location {
        Some(Location { line, column }) => write!(f, "{message} in line {line}, pos {column}"),
        None => write!(f, "{message}"),
    }
}

/// An error raised while turning text into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct LexError {
    /// A description of what went wrong.
    pub message: String,
    /// Where it went wrong, or [`None`] if the error has no meaningful position.
    pub location: Option<Location>,
}

impl LexError {
    /// Constructs a [`LexError`] at the given position.
    pub fn at(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Some(Location::new(line, column)),
        }
    }

    /// Constructs a positionless [`LexError`].
    pub fn positionless(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(f, &self.message, self.location)
    }
}

/// An error raised while building an [`Ast`](crate::ast::Ast) from tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// A description of what went wrong.
    pub message: String,
    /// The position of the offending token.
    pub location: Option<Location>,
}

impl SyntaxError {
    /// Constructs a [`SyntaxError`] at the given position.
    pub fn at(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Some(Location::new(line, column)),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(f, &self.message, self.location)
    }
}

/// Any error the front end can produce.
///
/// A parser pulling tokens from a live [`Lexer`](crate::lexer::Lexer) can
/// observe either kind, so this is what the parsing entry points return.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lexical error.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A grammatical error.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// Returns the position attached to the underlying error, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Lex(err) => err.location,
            Error::Syntax(err) => err.location,
        }
    }
}
