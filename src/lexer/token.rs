//! Tokens, token kinds, and the operator table.
//!
//! # Text Format
//! Every [`Token`] renders as a single fixed-width line of the form
//!
//! ```raw
//! <line:5>  <column:5> <kind:-15>[value]
//! ```
//!
//! where the value is only appended for [`TokenKind::Integer`] (right-aligned
//! in four columns), [`TokenKind::Identifier`] (bare) and [`TokenKind::String`]
//! (double-quoted). A full [`Tokens`] listing is one such line per token,
//! ending with [`TokenKind::EndOfInput`].

use std::fmt::Display;

use crate::{ast::NodeKind, error::LexError};

use super::Lexer;

/// The closed set of lexical categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The end of the source text.
    EndOfInput,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Mod,
    /// `+`
    Add,
    /// Binary `-`.
    Subtract,
    /// Unary `-`.
    Negate,
    /// `!`
    Not,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `=`
    Assign,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `print`
    Print,
    /// `putc`
    Putc,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// A variable name.
    Identifier,
    /// An integer literal (character literals are desugared into these).
    Integer,
    /// A string literal.
    String,
}

/// The binding direction of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` groups as `(a op b) op c`.
    Left,
    /// `a op b op c` groups as `a op (b op c)`.
    Right,
}

/// The number of operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A prefix operator.
    Unary,
    /// An infix operator.
    Binary,
}

/// The static metadata attached to an operator token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    /// Higher values bind tighter.
    pub precedence: u8,
    /// How chains of this operator group.
    pub associativity: Associativity,
    /// Whether this is a prefix or an infix operator.
    pub arity: Arity,
    /// The kind of node this operator produces.
    pub node: NodeKind,
}

impl Operator {
    /// Binary `+`, whose precedence also governs unary `+`.
    pub const ADD: Operator = Operator::binary(12, NodeKind::Add);
    /// Unary `-`.
    pub const NEGATE: Operator = Operator::unary(14, NodeKind::Negate);
    /// Unary `!`.
    pub const NOT: Operator = Operator::unary(14, NodeKind::Not);

    /// Constructs a left-associative binary [`Operator`].
    const fn binary(precedence: u8, node: NodeKind) -> Self {
        Self {
            precedence,
            associativity: Associativity::Left,
            arity: Arity::Binary,
            node,
        }
    }

    /// Constructs a unary [`Operator`].
    const fn unary(precedence: u8, node: NodeKind) -> Self {
        Self {
            precedence,
            associativity: Associativity::Right,
            arity: Arity::Unary,
            node,
        }
    }

    /// Returns `true` if this is an infix operator.
    pub const fn is_binary(&self) -> bool {
        matches!(self.arity, Arity::Binary)
    }

    /// Returns the minimum precedence with which to parse the right operand.
    pub const fn right_precedence(&self) -> u8 {
        match self.associativity {
            Associativity::Left => self.precedence + 1,
            Associativity::Right => self.precedence,
        }
    }
}

sa::const_assert!(Operator::NEGATE.precedence > Operator::ADD.precedence);
sa::const_assert_eq!(Operator::NEGATE.precedence, Operator::NOT.precedence);

/// Every token kind, in declaration order.
pub const TOKEN_KINDS: [TokenKind; 31] = [
    TokenKind::EndOfInput,
    TokenKind::Multiply,
    TokenKind::Divide,
    TokenKind::Mod,
    TokenKind::Add,
    TokenKind::Subtract,
    TokenKind::Negate,
    TokenKind::Not,
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Equal,
    TokenKind::NotEqual,
    TokenKind::Assign,
    TokenKind::And,
    TokenKind::Or,
    TokenKind::If,
    TokenKind::Else,
    TokenKind::While,
    TokenKind::Print,
    TokenKind::Putc,
    TokenKind::LeftParen,
    TokenKind::RightParen,
    TokenKind::LeftBrace,
    TokenKind::RightBrace,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::Identifier,
    TokenKind::Integer,
    TokenKind::String,
];

/// The reserved words, mapped to their token kinds.
const KEYWORDS: [(&str, TokenKind); 5] = [
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("print", TokenKind::Print),
    ("putc", TokenKind::Putc),
    ("while", TokenKind::While),
];

impl TokenKind {
    /// Returns the name used for this kind in token listings.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "End_of_input",
            TokenKind::Multiply => "Op_multiply",
            TokenKind::Divide => "Op_divide",
            TokenKind::Mod => "Op_mod",
            TokenKind::Add => "Op_add",
            TokenKind::Subtract => "Op_subtract",
            TokenKind::Negate => "Op_negate",
            TokenKind::Not => "Op_not",
            TokenKind::Less => "Op_less",
            TokenKind::LessEqual => "Op_lessequal",
            TokenKind::Greater => "Op_greater",
            TokenKind::GreaterEqual => "Op_greaterequal",
            TokenKind::Equal => "Op_equal",
            TokenKind::NotEqual => "Op_notequal",
            TokenKind::Assign => "Op_assign",
            TokenKind::And => "Op_and",
            TokenKind::Or => "Op_or",
            TokenKind::If => "Keyword_if",
            TokenKind::Else => "Keyword_else",
            TokenKind::While => "Keyword_while",
            TokenKind::Print => "Keyword_print",
            TokenKind::Putc => "Keyword_putc",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Comma => "Comma",
            TokenKind::Identifier => "Identifier",
            TokenKind::Integer => "Integer",
            TokenKind::String => "String",
        }
    }

    /// Looks up a kind by its listing name.
    pub fn from_name(name: &str) -> Option<Self> {
        TOKEN_KINDS.into_iter().find(|kind| kind.name() == name)
    }

    /// Looks up the keyword spelled `word`, if there is one.
    pub fn keyword(word: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find_map(|&(spelling, kind)| (spelling == word).then_some(kind))
    }

    /// Returns the fixed spelling of this kind, or [`None`] for the
    /// kinds whose text varies (identifiers and literals).
    pub const fn spelling(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::EndOfInput => "",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Mod => "%",
            TokenKind::Add => "+",
            TokenKind::Subtract | TokenKind::Negate => "-",
            TokenKind::Not => "!",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::Assign => "=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Print => "print",
            TokenKind::Putc => "putc",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Identifier | TokenKind::Integer | TokenKind::String => return None,
        })
    }

    /// Returns the operator metadata for this kind, if it is an operator.
    ///
    /// This table is the only place precedence is defined; the expression
    /// parser consults nothing else.
    pub const fn operator(self) -> Option<Operator> {
        Some(match self {
            TokenKind::Multiply => Operator::binary(13, NodeKind::Mul),
            TokenKind::Divide => Operator::binary(13, NodeKind::Div),
            TokenKind::Mod => Operator::binary(13, NodeKind::Mod),
            TokenKind::Add => Operator::ADD,
            TokenKind::Subtract => Operator::binary(12, NodeKind::Sub),
            TokenKind::Less => Operator::binary(10, NodeKind::Lss),
            TokenKind::LessEqual => Operator::binary(10, NodeKind::Leq),
            TokenKind::Greater => Operator::binary(10, NodeKind::Gtr),
            TokenKind::GreaterEqual => Operator::binary(10, NodeKind::Geq),
            TokenKind::Equal => Operator::binary(9, NodeKind::Eql),
            TokenKind::NotEqual => Operator::binary(9, NodeKind::Neq),
            TokenKind::And => Operator::binary(5, NodeKind::And),
            TokenKind::Or => Operator::binary(4, NodeKind::Or),
            TokenKind::Negate => Operator::NEGATE,
            TokenKind::Not => Operator::NOT,
            _ => return None,
        })
    }

    /// Returns `true` if a token of this kind can end an operand, which
    /// makes a following `-` a subtraction.
    pub const fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Integer | TokenKind::String | TokenKind::RightParen
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad rather than write so that width specifiers apply
        f.pad(self.name())
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical category.
    pub kind: TokenKind,
    /// The literal text (for character literals, their decimal code).
    pub text: String,
    /// The 1-based line of the first character.
    pub line: usize,
    /// The 1-based column of the first character.
    pub column: usize,
}

impl Token {
    /// Constructs a new [`Token`].
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Constructs a [`Token`] whose text is the fixed spelling of `kind`.
    pub fn spelled(kind: TokenKind, line: usize, column: usize) -> Self {
        Self::new(kind, kind.spelling().unwrap_or_default(), line, column)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:5}  {:5} {:<15}", self.line, self.column, self.kind)?;
        match self.kind {
            TokenKind::Integer => write!(f, "  {:>4}", self.text),
            TokenKind::Identifier => write!(f, " {}", self.text),
            TokenKind::String => write!(f, " \"{}\"", self.text),
            _ => Ok(()),
        }
    }
}

/// An owned, ordered sequence of [`Token`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens(Vec<Token>);

impl Tokens {
    /// Returns the underlying tokens as a slice.
    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    /// Returns the kinds of the tokens, in order.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.0.iter().map(|token| token.kind).collect()
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(value: Vec<Token>) -> Self {
        Self(value)
    }
}

impl IntoIterator for Tokens {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<&str> for Tokens {
    type Error = LexError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Lexer::new(value).tokenize()
    }
}

impl Display for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, token) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lines_are_fixed_width() {
        let token = Token::new(TokenKind::Integer, "65", 1, 6);
        assert_eq!(token.to_string(), "    1      6 Integer            65");

        let token = Token::new(TokenKind::Identifier, "count", 12, 3);
        assert_eq!(token.to_string(), "   12      3 Identifier      count");

        let token = Token::new(TokenKind::String, "Hello, World!\\n", 4, 7);
        assert_eq!(
            token.to_string(),
            "    4      7 String          \"Hello, World!\\n\""
        );

        let token = Token::spelled(TokenKind::EndOfInput, 2, 1);
        assert_eq!(token.to_string(), "    2      1 End_of_input   ");
    }

    #[test]
    fn check_kind_names_round_trip() {
        for kind in TOKEN_KINDS {
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("Op_power"), None);
    }

    #[test]
    fn check_keyword_table() {
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("putc"), Some(TokenKind::Putc));
        assert_eq!(TokenKind::keyword("While"), None);
        assert_eq!(TokenKind::keyword("printf"), None);
    }

    #[test]
    fn check_operator_table() {
        let binary = TOKEN_KINDS
            .into_iter()
            .filter_map(TokenKind::operator)
            .filter(Operator::is_binary);

        // no binary operator in the grammar is right-associative
        for op in binary {
            assert_eq!(op.associativity, Associativity::Left);
            assert_eq!(op.right_precedence(), op.precedence + 1);
        }

        let prec = |kind: TokenKind| kind.operator().unwrap().precedence;
        assert!(prec(TokenKind::Multiply) > prec(TokenKind::Add));
        assert!(prec(TokenKind::Less) > prec(TokenKind::Equal));
        assert!(prec(TokenKind::And) > prec(TokenKind::Or));
        assert_eq!(TokenKind::Negate.operator().unwrap().arity, Arity::Unary);
        assert_eq!(TokenKind::Assign.operator(), None);
    }

    #[test]
    fn check_tokens_display() {
        let tokens = Tokens::from(vec![
            Token::spelled(TokenKind::Semicolon, 1, 1),
            Token::spelled(TokenKind::EndOfInput, 1, 2),
        ]);
        assert_eq!(
            tokens.to_string(),
            "    1      1 Semicolon      \n    1      2 End_of_input   "
        );
    }
}
