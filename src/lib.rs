//! A front end for the Tiny imperative language.
//!
//! Source text is turned into [`Tokens`](lexer::token::Tokens) by the
//! [`Lexer`](lexer::Lexer), and tokens into an [`Ast`](ast::Ast) by the
//! [`Parser`](parser::Parser). Both stages have a fixed text form (the token
//! listing and the AST dump) so that each can be checked on its own.
//!
//! ```
//! let ast: tinyc::ast::Ast = "putc(65);".parse().unwrap();
//! assert_eq!(ast.to_string(), "Sequence\n;\nPrtc\nInteger 65\n;\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

extern crate static_assertions as sa;

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{Error, LexError, Location, SyntaxError};
