use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use crate::{
    command::{Outcome, Shell},
    config::Config,
    executable::{PathFinder, Runner},
    prompt::{ConsolePrompter, Prompter},
    tokenize::{tokenize, SPECIAL_CHARS, WORD_SEPARATORS},
};

mod command;
mod config;
mod executable;
mod history;
mod prompt;
mod tokenize;

const INTERACTIVE_PROMPT: &str = "burrow> ";

/// Environment variable holding the log filter, e.g. `BURROW_LOG=debug`.
const LOG_ENV: &str = "BURROW_LOG";

#[derive(FromArgs)]
/// A small interactive command interpreter.
struct Args {
    /// history log location, defaults to ~/.burrow_history
    #[argh(option)]
    history_file: Option<PathBuf>,

    /// log debug events to standard error
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    init_logging(args.verbose);

    let config = Config::from_env(args.history_file);
    let shell = Shell::new(config, PathFinder::new(), Runner::new());

    let interactive = io::stdout().is_terminal();
    let mut prompter = ConsolePrompter::new(io::stdin().lock(), io::stdout());

    loop {
        if interactive {
            prompter.prompt(INTERACTIVE_PROMPT)?;
        }

        let Some(line) = prompter.read()? else {
            break;
        };

        let tokens = tokenize(&line, WORD_SEPARATORS, SPECIAL_CHARS);

        if let Outcome::Exit(code) = shell.dispatch(&tokens, &mut io::stdout(), &mut io::stderr())? {
            std::process::exit(code);
        }
    }

    return Ok(());
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| return EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
