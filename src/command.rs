use std::{io, io::Write, path::Path};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::Config,
    executable::{exit_code, ExecutableError, ExecutablePathFinder, ExecutableRunner},
    history::{History, BANG},
};

#[derive(Debug, PartialEq)]
pub enum Command {
    /// Record the line, then recall the history entry it names.
    Bang,
    Exit,
    Cd,
    Pwd,
    History,
    External,
}

impl From<&str> for Command {
    fn from(program: &str) -> Self {
        if program.contains(BANG) {
            return Command::Bang;
        }

        match program {
            "exit" => return Command::Exit,
            "cd" => return Command::Cd,
            "pwd" => return Command::Pwd,
            "history" => return Command::History,
            _ => return Command::External,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue,
    Exit(i32),
}

#[derive(Error, Debug)]
pub enum BuiltinError {
    #[error("exit: too many arguments")]
    TooManyArguments,

    #[error("exit: {0}: numeric argument required")]
    NumericArgumentRequired(String),

    #[error("cd: HOME not set")]
    HomeNotSet,

    #[error("cd: {0}")]
    ChangeHome(#[source] io::Error),

    #[error("cd: {0}: No such file or directory")]
    NoSuchDirectory(String),

    #[error("pwd: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Routes one tokenized command line to a builtin or an external program.
pub struct Shell<F: ExecutablePathFinder, R: ExecutableRunner> {
    config: Config,
    history: History,
    finder: F,
    runner: R,
}

impl<F: ExecutablePathFinder, R: ExecutableRunner> Shell<F, R> {
    pub fn new(config: Config, finder: F, runner: R) -> Self {
        let history = History::new(config.history_file.clone());
        debug!(history = %history.path().display(), "shell ready");

        return Shell {
            config,
            history,
            finder,
            runner,
        };
    }

    /// Runs one command line. Failures of the command itself are reported on
    /// `stderr` and never end the shell; the `Err` case is reserved for
    /// output that can no longer be written.
    pub fn dispatch(
        &self,
        tokens: &[String],
        stdout: &mut impl Write,
        stderr: &mut impl Write,
    ) -> anyhow::Result<Outcome> {
        let [program, args @ ..] = tokens else {
            return Ok(Outcome::Continue);
        };

        let command = Command::from(program.as_str());
        debug!(?command, %program, "dispatching");

        match command {
            Command::Bang => self.run_bang(tokens, stdout, stderr)?,
            Command::Exit => match parse_exit_code(args) {
                Ok(code) => {
                    info!(code, "exit requested");
                    return Ok(Outcome::Exit(code));
                }
                Err(error) => writeln!(stderr, "{}", error)?,
            },
            Command::Cd => {
                if let Err(error) = change_directory(args, self.config.home.as_deref()) {
                    writeln!(stderr, "{}", error)?;
                }
            }
            Command::Pwd => match std::env::current_dir() {
                Ok(dir) => writeln!(stdout, "current directory is '{}'", dir.display())?,
                Err(error) => writeln!(stderr, "{}", BuiltinError::CurrentDir(error))?,
            },
            Command::History => {
                if let Err(error) = self.history.list(stdout) {
                    writeln!(stderr, "history: {}", error)?;
                }
            }
            Command::External => self.run_external(program, tokens, stdout, stderr)?,
        }

        return Ok(Outcome::Continue);
    }

    fn run_bang(
        &self,
        tokens: &[String],
        stdout: &mut impl Write,
        stderr: &mut impl Write,
    ) -> anyhow::Result<()> {
        if let Err(error) = self.history.record(tokens) {
            writeln!(stderr, "history: {}", error)?;
            return Ok(());
        }

        if let Err(error) = self.history.recall(&tokens.join(" "), stdout) {
            writeln!(stderr, "history: {}", error)?;
        }

        return Ok(());
    }

    fn run_external(
        &self,
        program: &str,
        tokens: &[String],
        stdout: &mut impl Write,
        stderr: &mut impl Write,
    ) -> anyhow::Result<()> {
        let Some(path) = self
            .finder
            .find_executable_path(program, &self.config.search_paths)
        else {
            debug!(%program, "not resolved");
            writeln!(stderr, "{}", ExecutableError::CommandNotFound(program.to_string()))?;
            return Ok(());
        };

        debug!(%program, path = %path.display(), "resolved");

        // The child writes straight to the inherited descriptors.
        stdout.flush()?;
        stderr.flush()?;

        match self
            .runner
            .execute(&path, tokens, &self.config.environment)
        {
            Ok(status) => {
                writeln!(stdout, "{} exit status = {}", path.display(), exit_code(status))?;
            }
            Err(error) => writeln!(stderr, "{}", error)?,
        }

        return Ok(());
    }
}

/// `exit [code]`, defaulting to 0.
fn parse_exit_code(args: &[String]) -> Result<i32, BuiltinError> {
    match args {
        [] => return Ok(0),
        [code] => {
            return code
                .parse::<i32>()
                .map_err(|_| return BuiltinError::NumericArgumentRequired(code.to_string()));
        }
        _ => return Err(BuiltinError::TooManyArguments),
    }
}

/// `cd [dir]`; arguments after the first are ignored.
fn change_directory(args: &[String], home: Option<&Path>) -> Result<(), BuiltinError> {
    let Some(target) = args.first() else {
        let home = home.ok_or(BuiltinError::HomeNotSet)?;
        return std::env::set_current_dir(home).map_err(BuiltinError::ChangeHome);
    };

    return std::env::set_current_dir(target)
        .map_err(|_| return BuiltinError::NoSuchDirectory(target.to_string()));
}
