//! The command-line interface for `tinyc`.
//!
//! Usage (as with any other [`argh`] interface) involves first invoking [`argh::from_env()`], and
//! then processing the resulting data (in this case an instance of [`Cli`]).

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use argh::FromArgs;
use tracing::{debug, Level};

use tinyc::{
    ast::Ast,
    lexer::{token::Tokens, tokenize},
};

/// A lexer and parser for the Tiny programming language.
#[derive(Debug, Clone, FromArgs)]
pub struct Cli {
    /// log progress to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// log every token and statement to stderr
    #[argh(switch)]
    trace: bool,

    #[argh(subcommand)]
    cmd: CliSubCommand,
}

impl Cli {
    /// Installs a stderr subscriber at the level requested by the switches.
    pub fn init_logging(&self) {
        let level = match (self.trace, self.verbose) {
            (true, _) => Level::TRACE,
            (false, true) => Level::DEBUG,
            (false, false) => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Consumes `self` and processes the given subcommand.
    pub fn handle(self) -> anyhow::Result<()> {
        match self.cmd {
            CliSubCommand::Lex(args) => args.run(),
            CliSubCommand::Parse(args) => args.run(),
        }
    }
}

/// The set of the distinct subcommands available to be passed to the [`Cli`].
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand)]
enum CliSubCommand {
    Lex(Lex),
    Parse(Parse),
}

/// Lexes a source file and prints its token listing.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "lex")]
struct Lex {
    /// a path to a source file
    #[argh(positional)]
    file: PathBuf,
}

impl Lex {
    /// Consumes `self` and prints the listing of the given file.
    fn run(self) -> anyhow::Result<()> {
        let source = read(&self.file)?;
        let tokens = tokenize(&source)?;
        debug!(file = %self.file.display(), tokens = tokens.len(), "lexed");
        println!("{tokens}");
        Ok(())
    }
}

/// Parses a source file (or a token listing) and prints its AST dump.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "parse")]
struct Parse {
    /// treat the input as a token listing produced by `lex`
    #[argh(switch, short = 'l')]
    listing: bool,

    /// a path to a source file or token listing
    #[argh(positional)]
    file: PathBuf,
}

impl Parse {
    /// Consumes `self` and prints the dump of the given file.
    fn run(self) -> anyhow::Result<()> {
        let input = read(&self.file)?;
        let ast = match self.listing {
            true => Ast::try_from(Tokens::from_listing(&input)?)?,
            false => input.parse::<Ast>()?,
        };
        debug!(
            file = %self.file.display(),
            statements = ast.statements().len(),
            "parsed"
        );
        print!("{ast}");
        Ok(())
    }
}

/// Reads the whole of `path` into a string.
fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}
