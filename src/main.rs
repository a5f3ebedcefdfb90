//! The `tinyc` command-line driver.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::process::ExitCode;

use cli::Cli;

mod cli;

fn main() -> ExitCode {
    better_panic::install();

    let cli: Cli = argh::from_env();
    cli.init_logging();

    match cli.handle() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
