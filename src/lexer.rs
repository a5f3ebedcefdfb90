//! A pull-based lexer for Tiny source text.
//!
//! The [`Lexer`] hands out one [`Token`] per call to [`Lexer::next_token`],
//! tracking the line and column of every token it produces. The individual
//! lexical shapes (words, numbers, strings, symbols, comments) are recognised
//! by small [`nom`] parsers in the submodules; this module owns the cursor,
//! the position bookkeeping, and the decisions that depend on context.

use nom::{bytes::complete::take_while, error::VerboseError, IResult, Parser};
use tracing::{debug, trace};

use crate::error::{LexError, Location};

use token::{Token, TokenKind, Tokens};

pub mod int;
pub mod listing;
pub mod string;
pub mod symbol;
pub mod token;
pub mod word;

/// The general return type for [`crate::lexer`] parsers.
pub type LexResult<'src, O> = IResult<&'src str, O, VerboseError<&'src str>>;

/// A lexer over a single source text.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    /// The unconsumed tail of the source.
    rest: &'src str,
    /// The line of the next character.
    line: usize,
    /// The column of the next character.
    column: usize,
    /// The kind of the most recently produced token.
    previous: Option<TokenKind>,
}

impl<'src> Lexer<'src> {
    /// Constructs a [`Lexer`] positioned at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            line: 1,
            column: 1,
            previous: None,
        }
    }

    /// Returns the position of the next unconsumed character.
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Produces the next token.
    ///
    /// Once [`TokenKind::EndOfInput`] has been returned the caller should
    /// stop; further calls keep returning it.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan()?;
        trace!(
            kind = %token.kind,
            text = %token.text,
            line = token.line,
            column = token.column,
            "lexed token"
        );
        self.previous = Some(token.kind);
        Ok(token)
    }

    /// Consumes `self`, lexing every remaining token up to and including
    /// [`TokenKind::EndOfInput`].
    pub fn tokenize(mut self) -> Result<Tokens, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                break;
            }
        }

        debug!(count = tokens.len(), "finished lexing");
        Ok(Tokens::from(tokens))
    }

    /// Skips whitespace and comments, then lexes exactly one token.
    fn scan(&mut self) -> Result<Token, LexError> {
        loop {
            self.skip_whitespace();
            let (line, column) = (self.line, self.column);

            let Some(head) = self.peek() else {
                return Ok(Token::spelled(TokenKind::EndOfInput, line, column));
            };

            // comments are transparent, so go around again after one
            if self.eat(symbol::comment).is_some() {
                continue;
            }
            if self.rest.starts_with("/*") {
                return Err(LexError::at(line, column, "unterminated comment"));
            }

            return match head {
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let (text, _) = self.expect(word::word, line, column)?;
                    let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
                    Ok(Token::new(kind, text, line, column))
                }
                c if c.is_ascii_digit() => {
                    let (text, _) = self.expect(int::digits, line, column)?;
                    Ok(Token::new(TokenKind::Integer, text, line, column))
                }
                '\'' => self.char_literal(line, column),
                '"' => match self.eat(string::string) {
                    Some((_, text)) => Ok(Token::new(TokenKind::String, text, line, column)),
                    None => Err(LexError::at(line, column, "unterminated string literal")),
                },
                '-' => Ok(self.minus(line, column)),
                _ => match self.eat(symbol::symbol) {
                    Some((text, kind)) => Ok(Token::new(kind, text, line, column)),
                    None => Err(self.unrecognized(head, line, column)),
                },
            };
        }
    }

    /// Lexes a character literal, desugaring it to an integer token holding
    /// its character code.
    fn char_literal(&mut self, line: usize, column: usize) -> Result<Token, LexError> {
        if self.rest.starts_with("''") {
            return Err(LexError::at(line, column, "empty character literal"));
        }

        match self.eat(int::char_literal) {
            Some((_, c)) => Ok(Token::new(
                TokenKind::Integer,
                u32::from(c).to_string(),
                line,
                column,
            )),
            None => Err(LexError::at(line, column, "unterminated character literal")),
        }
    }

    /// Lexes a `-`, deciding between subtraction and negation.
    ///
    /// After an operand the `-` is always binary. Otherwise any whitespace
    /// after it is skipped, and it is a negation only if a digit follows.
    fn minus(&mut self, line: usize, column: usize) -> Token {
        self.bump(1);

        let after_operand = self.previous.is_some_and(TokenKind::ends_operand);
        if after_operand {
            return Token::spelled(TokenKind::Subtract, line, column);
        }

        self.skip_whitespace();
        let kind = match self.peek() {
            Some(c) if c.is_ascii_digit() => TokenKind::Negate,
            _ => TokenKind::Subtract,
        };
        Token::spelled(kind, line, column)
    }

    /// Builds the error for a character that starts no token.
    fn unrecognized(&self, head: char, line: usize, column: usize) -> LexError {
        match head {
            '&' | '|' => LexError::at(
                line,
                column,
                format!("malformed operator '{head}', expecting '{head}{head}'"),
            ),
            _ => LexError::at(
                line,
                column,
                format!("unrecognized character: ({}) '{head}'", u32::from(head)),
            ),
        }
    }

    /// Consumes a (possibly empty) run of whitespace.
    fn skip_whitespace(&mut self) {
        let _ = self.eat(take_while(char::is_whitespace));
    }

    /// Returns the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Runs `parser` at the cursor, consuming its input on success.
    ///
    /// Returns the consumed text alongside the parser's output.
    fn eat<O, P>(&mut self, mut parser: P) -> Option<(&'src str, O)>
    where
        P: Parser<&'src str, O, VerboseError<&'src str>>,
    {
        let (tail, output) = parser.parse(self.rest).ok()?;
        let consumed = self.rest.len() - tail.len();
        Some((self.bump(consumed), output))
    }

    /// Like [`Lexer::eat`], but treats a failure as an error at the given position.
    fn expect<O, P>(
        &mut self,
        parser: P,
        line: usize,
        column: usize,
    ) -> Result<(&'src str, O), LexError>
    where
        P: Parser<&'src str, O, VerboseError<&'src str>>,
    {
        match self.eat(parser) {
            Some(result) => Ok(result),
            None => {
                let head = self.peek().unwrap_or('\0');
                Err(self.unrecognized(head, line, column))
            }
        }
    }

    /// Consumes `len` bytes, advancing the line and column counters.
    fn bump(&mut self, len: usize) -> &'src str {
        let (taken, rest) = self.rest.split_at(len);
        for c in taken.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.rest = rest;
        taken
    }
}

/// Lexes the whole of `source` into a [`Tokens`] list.
pub fn tokenize(source: &str) -> Result<Tokens, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    use TokenKind::*;

    /// Lexes `source` and returns only the token kinds.
    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().kinds()
    }

    #[test]
    fn check_small_example_program() {
        let source = r#"
        count = 1;
        while (count < 10) {
            print("count is: ", count, "\n");
            count = count + 1;
        }
        "#;

        let tokens = match tokenize(source) {
            Ok(tokens) => tokens,
            Err(error) => panic!("{error}"),
        };

        dbg!(&tokens);
        assert_eq!(tokens.len(), 28);
        assert_eq!(tokens.as_slice().last().unwrap().kind, EndOfInput);
    }

    #[test]
    fn empty_source_is_only_end_of_input() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.as_slice(), &[Token::new(EndOfInput, "", 1, 1)]);

        let tokens = tokenize("  \n\t ").unwrap();
        assert_eq!(tokens.as_slice(), &[Token::new(EndOfInput, "", 2, 3)]);
    }

    #[test]
    fn check_putc_statement() {
        let tokens = tokenize("putc(65);").unwrap();
        assert_eq!(
            tokens.as_slice(),
            &[
                Token::new(Putc, "putc", 1, 1),
                Token::new(LeftParen, "(", 1, 5),
                Token::new(Integer, "65", 1, 6),
                Token::new(RightParen, ")", 1, 8),
                Token::new(Semicolon, ";", 1, 9),
                Token::new(EndOfInput, "", 1, 10),
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers_are_distinguished() {
        assert_eq!(
            kinds("if else while print putc iffy _tmp x1"),
            vec![If, Else, While, Print, Putc, Identifier, Identifier, Identifier, EndOfInput]
        );

        let tokens = tokenize("_under_score9").unwrap();
        assert_eq!(tokens.as_slice()[0].text, "_under_score9");
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("a = 1;\n  b\t= 22;").unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 3), (1, 5), (1, 6), (2, 3), (2, 5), (2, 7), (2, 9), (2, 10)]
        );
    }

    #[test]
    fn check_two_character_operators() {
        assert_eq!(
            kinds("<= < >= > == = != ! && ||"),
            vec![
                LessEqual,
                Less,
                GreaterEqual,
                Greater,
                Equal,
                Assign,
                NotEqual,
                Not,
                And,
                Or,
                EndOfInput
            ]
        );

        let tokens = tokenize("a<=b").unwrap();
        assert_eq!(tokens.as_slice()[1].text, "<=");
        let tokens = tokenize("a<b").unwrap();
        assert_eq!(tokens.as_slice()[1].text, "<");
    }

    #[test]
    fn lone_ampersand_and_pipe_are_errors() {
        let err = tokenize("a & b").unwrap_err();
        assert_eq!(err.location, Some(Location::new(1, 3)));
        assert_eq!(err.to_string(), "malformed operator '&', expecting '&&' in line 1, pos 3");

        let err = tokenize("a |b").unwrap_err();
        assert_eq!(err.location, Some(Location::new(1, 3)));
    }

    #[test]
    fn check_minus_disambiguation() {
        assert_eq!(kinds("x - 1"), vec![Identifier, Subtract, Integer, EndOfInput]);
        assert_eq!(kinds("x-1"), vec![Identifier, Subtract, Integer, EndOfInput]);
        assert_eq!(
            kinds("x = -1;"),
            vec![Identifier, Assign, Negate, Integer, Semicolon, EndOfInput]
        );
        assert_eq!(
            kinds("x = -\n   1;"),
            vec![Identifier, Assign, Negate, Integer, Semicolon, EndOfInput]
        );
        assert_eq!(
            kinds("x = -y;"),
            vec![Identifier, Assign, Subtract, Identifier, Semicolon, EndOfInput]
        );
        assert_eq!(
            kinds("(1) - 2"),
            vec![LeftParen, Integer, RightParen, Subtract, Integer, EndOfInput]
        );
    }

    #[test]
    fn minus_after_an_operand_subtracts_even_when_a_digit_follows_a_newline() {
        assert_eq!(
            kinds("x -\n   1"),
            vec![Identifier, Subtract, Integer, EndOfInput]
        );

        let ast = crate::parser::parse("y = x -\n   1;").unwrap();
        assert_eq!(
            ast.to_string(),
            "Sequence\n;\nAssign\nIdentifier y\nSubtract\nIdentifier x\nInteger 1\n"
        );
    }

    #[test]
    fn negation_keeps_the_minus_position_and_tracks_newlines() {
        let tokens = tokenize("x = -\n   1;").unwrap();
        let minus = &tokens.as_slice()[2];
        assert_eq!((minus.kind, minus.text.as_str()), (Negate, "-"));
        assert_eq!((minus.line, minus.column), (1, 5));

        let one = &tokens.as_slice()[3];
        assert_eq!((one.line, one.column), (2, 4));
    }

    #[test]
    fn character_literals_become_integers() {
        let tokens = tokenize("'A' ' ' 'z'").unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();
        assert_eq!(
            texts,
            vec![(Integer, "65"), (Integer, "32"), (Integer, "122"), (EndOfInput, "")]
        );
    }

    #[test]
    fn bad_character_literals_are_errors() {
        let err = tokenize("x = 'ab';").unwrap_err();
        assert_eq!(err.message, "unterminated character literal");
        assert_eq!(err.location, Some(Location::new(1, 5)));

        let err = tokenize("''").unwrap_err();
        assert_eq!(err.message, "empty character literal");

        let err = tokenize("'a").unwrap_err();
        assert_eq!(err.message, "unterminated character literal");
    }

    #[test]
    fn check_string_literals() {
        let tokens = tokenize(r#"print("Hello, World!\n", "");"#).unwrap();
        let strings: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == String)
            .map(|t| (t.text.as_str(), t.column))
            .collect();
        assert_eq!(strings, vec![(r"Hello, World!\n", 7), ("", 26)]);
    }

    #[test]
    fn unterminated_string_reports_the_opening_quote() {
        let err = tokenize("x = 1;\nprint(\"abc").unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.location, Some(Location::new(2, 7)));
    }

    #[test]
    fn comments_are_transparent() {
        let source = "/* header\n   comment */ x // trailing\n# hash line\n= 1; /**/";
        let tokens = tokenize(source).unwrap();
        let summary: Vec<_> = tokens.iter().map(|t| (t.kind, t.line, t.column)).collect();
        assert_eq!(
            summary,
            vec![
                (Identifier, 2, 15),
                (Assign, 4, 1),
                (Integer, 4, 3),
                (Semicolon, 4, 4),
                (EndOfInput, 4, 10),
            ]
        );
    }

    #[test]
    fn division_is_not_a_comment() {
        assert_eq!(
            kinds("a / b % c * d"),
            vec![Identifier, Divide, Identifier, Mod, Identifier, Multiply, Identifier, EndOfInput]
        );
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let err = tokenize("x; /* never closed").unwrap_err();
        assert_eq!(err.message, "unterminated comment");
        assert_eq!(err.location, Some(Location::new(1, 4)));
    }

    #[test]
    fn unknown_characters_are_errors() {
        let err = tokenize("x = 1;\n  @").unwrap_err();
        assert_eq!(err.to_string(), "unrecognized character: (64) '@' in line 2, pos 3");
    }

    #[test]
    fn next_token_pulls_one_token_at_a_time() {
        let mut lexer = Lexer::new("a;");
        assert_eq!(lexer.next_token().unwrap().kind, Identifier);
        assert_eq!(lexer.location(), Location::new(1, 2));
        assert_eq!(lexer.next_token().unwrap().kind, Semicolon);
        assert_eq!(lexer.next_token().unwrap().kind, EndOfInput);
    }
}
