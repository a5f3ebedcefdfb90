//! String literals.

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    sequence::delimited,
    Parser,
};

use super::LexResult;

/// Parses a double-quoted string literal, returning the text between the quotes.
///
/// There are no escape sequences: everything up to the next `"` is taken
/// verbatim, newlines included.
pub fn string(input: &str) -> LexResult<'_, &str> {
    delimited(char('"'), take_till(|c: char| c == '"'), char('"')).parse(input)
}
