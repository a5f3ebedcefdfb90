//! Integer and character literals.

use nom::{
    character::complete::{anychar, char, digit1},
    sequence::delimited,
    Parser,
};

use super::LexResult;

/// Recognises a run of decimal digits.
///
/// The digits are kept as text; no range checking is done at this stage.
pub fn digits(input: &str) -> LexResult<'_, &str> {
    digit1(input)
}

/// Parses a quoted character literal such as `'A'`, returning the character.
pub fn char_literal(input: &str) -> LexResult<'_, char> {
    delimited(char('\''), anychar, char('\'')).parse(input)
}
