//! Operators, punctuation, and comments.
//!
//! Two-character operators are tried before their one-character prefixes,
//! so `<=` wins over `<` whenever the `=` is present. `&` and `|` only exist
//! doubled, and `-` is absent entirely because its meaning depends on the
//! surrounding tokens (see [`Lexer`](super::Lexer)).

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until},
    character::complete::char,
    combinator::{recognize, value},
    sequence::{delimited, preceded},
    Parser,
};

use super::{token::TokenKind, LexResult};

/// Parses any operator or punctuation symbol other than `-`.
pub fn symbol(input: &str) -> LexResult<'_, TokenKind> {
    alt((operator, glyph)).parse(input)
}

/// Parses an operator symbol other than `-`.
pub fn operator(input: &str) -> LexResult<'_, TokenKind> {
    alt((
        value(TokenKind::LessEqual, tag("<=")),
        value(TokenKind::GreaterEqual, tag(">=")),
        value(TokenKind::Equal, tag("==")),
        value(TokenKind::NotEqual, tag("!=")),
        value(TokenKind::And, tag("&&")),
        value(TokenKind::Or, tag("||")),
        value(TokenKind::Less, char('<')),
        value(TokenKind::Greater, char('>')),
        value(TokenKind::Assign, char('=')),
        value(TokenKind::Not, char('!')),
        value(TokenKind::Multiply, char('*')),
        value(TokenKind::Divide, char('/')),
        value(TokenKind::Mod, char('%')),
        value(TokenKind::Add, char('+')),
    ))
    .parse(input)
}

/// Parses a punctuation symbol.
pub fn glyph(input: &str) -> LexResult<'_, TokenKind> {
    alt((
        value(TokenKind::LeftParen, char('(')),
        value(TokenKind::RightParen, char(')')),
        value(TokenKind::LeftBrace, char('{')),
        value(TokenKind::RightBrace, char('}')),
        value(TokenKind::Semicolon, char(';')),
        value(TokenKind::Comma, char(',')),
    ))
    .parse(input)
}

/// Parses a comment, returning its full text.
///
/// Line comments (`//` or `#`) stop before the newline, which is then
/// consumed as ordinary whitespace.
pub fn comment(input: &str) -> LexResult<'_, &str> {
    alt((line_comment, block_comment)).parse(input)
}

/// Parses a `//` or `#` comment.
fn line_comment(input: &str) -> LexResult<'_, &str> {
    recognize(preceded(alt((tag("//"), tag("#"))), take_till(|c: char| c == '\n'))).parse(input)
}

/// Parses a `/* ... */` comment.
fn block_comment(input: &str) -> LexResult<'_, &str> {
    recognize(delimited(tag("/*"), take_until("*/"), tag("*/"))).parse(input)
}
