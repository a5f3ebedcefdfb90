//! Identifiers and keywords.

use nom::{
    bytes::complete::take_while,
    character::complete::satisfy,
    combinator::recognize,
    sequence::pair,
    Parser,
};

use super::LexResult;

/// Returns `true` if `c` may begin a word.
fn is_word_head(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns `true` if `c` may continue a word.
fn is_word_tail(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Recognises a word: a latin letter or underscore followed by any run of
/// latin letters, arabic numerals, and underscores.
///
/// Whether the word is a keyword is decided by the caller.
pub fn word(input: &str) -> LexResult<'_, &str> {
    recognize(pair(satisfy(is_word_head), take_while(is_word_tail))).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_parser_is_correct() {
        assert!(word("Var_name trailing").is_ok_and(|res| res == (" trailing", "Var_name")));
        assert!(word("_leading").is_ok_and(|res| res == ("", "_leading")));
        assert!(word("x1=2").is_ok_and(|res| res == ("=2", "x1")));
        assert!(word("9lives").is_err());
        assert!(word("").is_err());
    }
}
