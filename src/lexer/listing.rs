//! Reading token listings back into [`Tokens`].
//!
//! A listing is the text produced by the [`Display`](std::fmt::Display)
//! implementation of [`Tokens`]: one `line column kind [value]` record per
//! line. Reading it back lets the parser run over a previously lexed
//! program without its source text.

use std::{borrow::Cow, str::FromStr};

use nom::{
    bytes::complete::take_while1,
    character::complete::{digit1, space0, space1},
    combinator::{map_res, rest},
    error::{context, convert_error, VerboseError},
    sequence::{preceded, tuple},
    Finish, Parser,
};

use crate::error::LexError;

use super::{
    token::{Token, TokenKind, Tokens},
    LexResult,
};

/// The fixed leading fields of a listing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Record<'src> {
    /// The line the token was found on.
    line: usize,
    /// The column the token was found at.
    column: usize,
    /// The listing name of the token kind.
    kind: &'src str,
    /// Everything after the kind name.
    value: &'src str,
}

/// Parses one listing record.
fn record(input: &str) -> LexResult<'_, Record<'_>> {
    tuple((
        preceded(
            space0,
            context("expected a line number", map_res(digit1, usize::from_str)),
        ),
        preceded(
            space1,
            context("expected a column number", map_res(digit1, usize::from_str)),
        ),
        preceded(
            space1,
            context(
                "expected a token kind",
                take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            ),
        ),
        rest,
    ))
    .parse(input)
    .map(|(tail, (line, column, kind, value))| {
        (
            tail,
            Record {
                line,
                column,
                kind,
                value,
            },
        )
    })
}

/// Extracts the text between the first and last `"` in `value`.
fn quoted(value: &str) -> Option<&str> {
    let start = value.find('"')?;
    let end = value.rfind('"')?;
    (start < end).then(|| &value[start + 1..end])
}

/// Reconstructs the [`Token`] described by a single listing line.
///
/// `number` is the 1-based line of the listing itself, used in errors.
fn token(input: &str, number: usize) -> Result<Token, LexError> {
    let malformed = |detail: String| {
        LexError::positionless(format!("malformed token listing at line {number}: {detail}"))
    };

    let (_, record) = record(input)
        .finish()
        .map_err(|err: VerboseError<&str>| malformed(convert_error(input, err)))?;

    let kind = TokenKind::from_name(record.kind)
        .ok_or_else(|| malformed(format!("unknown token kind '{}'", record.kind)))?;

    let text = match kind {
        TokenKind::String => quoted(record.value)
            .ok_or_else(|| malformed("expected a double-quoted string value".to_string()))?,
        TokenKind::Integer | TokenKind::Identifier => match record.value.trim() {
            "" => return Err(malformed(format!("missing value for {kind}"))),
            value => value,
        },
        _ => kind.spelling().unwrap_or_default(),
    };

    Ok(Token::new(kind, text, record.line, record.column))
}

/// Returns `true` if `line` begins a `String` record whose closing quote
/// lies on a later line.
fn is_open_string(line: &str) -> bool {
    matches!(
        record(line),
        Ok((_, rec)) if rec.kind == TokenKind::String.name() && rec.value.matches('"').count() < 2
    )
}

/// Reads a token listing, skipping blank lines.
///
/// A string literal containing a newline is printed across several lines,
/// so a `String` record runs on until its closing quote.
pub fn parse_listing(input: &str) -> Result<Tokens, LexError> {
    let mut tokens = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }

        let mut text = Cow::Borrowed(line);
        while is_open_string(&text) {
            let Some((_, next)) = lines.next() else {
                break;
            };
            text = Cow::Owned(format!("{text}\n{next}"));
        }

        tokens.push(token(&text, index + 1)?);
    }

    Ok(Tokens::from(tokens))
}

impl Tokens {
    /// Reads a [`Tokens`] list back from its listing text.
    pub fn from_listing(listing: &str) -> Result<Self, LexError> {
        parse_listing(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_record_parser() {
        let (tail, rec) = record("    1      6 Integer           65").unwrap();
        assert!(tail.is_empty());
        assert_eq!((rec.line, rec.column, rec.kind), (1, 6, "Integer"));
        assert_eq!(rec.value.trim(), "65");

        assert!(record("one 2 Comma").is_err());
        assert!(record("1 2").is_err());
    }

    #[test]
    fn check_listing_values() {
        let listing = "\
    1      1 Identifier      count
    1      7 Op_assign
    1      9 Integer            1
    2      7 String          \"count is:  \"
    2     20 Keyword_while
    3      1 End_of_input   ";

        let tokens = parse_listing(listing).unwrap();
        dbg!(&tokens);

        assert_eq!(
            tokens.as_slice(),
            &[
                Token::new(TokenKind::Identifier, "count", 1, 1),
                Token::new(TokenKind::Assign, "=", 1, 7),
                Token::new(TokenKind::Integer, "1", 1, 9),
                Token::new(TokenKind::String, "count is:  ", 2, 7),
                Token::new(TokenKind::While, "while", 2, 20),
                Token::new(TokenKind::EndOfInput, "", 3, 1),
            ]
        );
    }

    #[test]
    fn strings_may_contain_quotes_and_spaces() {
        let tokens = parse_listing("1 1 String \"say \"hi\"  \"").unwrap();
        assert_eq!(tokens.as_slice()[0].text, "say \"hi\"  ");
    }

    #[test]
    fn listing_round_trips_through_display() {
        let tokens = Tokens::try_from("x = 'A' - -2; print(\"a  b\", x);").unwrap();
        let listing = tokens.to_string();
        assert_eq!(Tokens::from_listing(&listing).unwrap(), tokens);
    }

    #[test]
    fn string_records_may_span_lines() {
        let listing = "    1      7 String          \"two\n\nlines\"\n    3      7 Semicolon";
        let tokens = parse_listing(listing).unwrap();
        dbg!(&tokens);

        assert_eq!(
            tokens.as_slice(),
            &[
                Token::new(TokenKind::String, "two\n\nlines", 1, 7),
                Token::new(TokenKind::Semicolon, ";", 3, 7),
            ]
        );

        let tokens = Tokens::try_from("print(\"two\nlines\");").unwrap();
        assert_eq!(Tokens::from_listing(&tokens.to_string()).unwrap(), tokens);
    }

    #[test]
    fn unclosed_string_records_are_errors() {
        let err = parse_listing("1 1 String \"never closed\n2 1 Semicolon").unwrap_err();
        assert!(err.message.contains("double-quoted"));
    }

    #[test]
    fn bad_listings_are_positionless_errors() {
        let err = parse_listing("1 1 Semicolon\n\n3 1 Op_power").unwrap_err();
        assert_eq!(err.location, None);
        assert_eq!(
            err.message,
            "malformed token listing at line 3: unknown token kind 'Op_power'"
        );

        let err = parse_listing("1 1 String unquoted").unwrap_err();
        assert!(err.message.contains("double-quoted"));

        let err = parse_listing("1 1 Integer").unwrap_err();
        assert_eq!(
            err.message,
            "malformed token listing at line 1: missing value for Integer"
        );

        let err = parse_listing("x 1 Comma").unwrap_err();
        assert!(err.message.starts_with("malformed token listing at line 1:"));
    }
}
