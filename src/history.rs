use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, trace};

/// Marks a history recall directive.
pub const BANG: char = '!';

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("empty history file")]
    Empty,

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Output(#[from] io::Error),
}

/// Append-only command log, one space-joined command per line.
///
/// The file is opened for each operation and closed right after, so nothing
/// is cached between commands.
pub struct History {
    path: PathBuf,
}

impl History {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        return History { path: path.into() };
    }

    pub fn path(&self) -> &Path {
        return &self.path;
    }

    pub fn record(&self, tokens: &[String]) -> Result<(), HistoryError> {
        let line = format!("{}\n", tokens.join(" "));

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| return self.io_error(source))?;

        // Whole record in a single write.
        file.write_all(line.as_bytes())
            .map_err(|source| return self.io_error(source))?;

        debug!(path = %self.path.display(), entry = line.trim_end(), "recorded");
        return Ok(());
    }

    /// Every record, oldest first.
    pub fn entries(&self) -> Result<Vec<String>, HistoryError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                return HistoryError::Empty;
            }

            return self.io_error(source);
        })?;

        trace!(path = %self.path.display(), bytes = contents.len(), "read history");
        return Ok(contents.lines().map(|line| return line.to_string()).collect());
    }

    /// Writes every record as `<index>: <command>`.
    pub fn list(&self, writer: &mut impl Write) -> Result<(), HistoryError> {
        for (index, entry) in self.entries()?.iter().enumerate() {
            writeln!(writer, "{}: {}", index, entry)?;
        }

        return Ok(());
    }

    /// Writes the record named by `directive` and returns it. Prints
    /// nothing when the directive carries no index or the index is past the
    /// end of the log.
    pub fn recall(
        &self,
        directive: &str,
        writer: &mut impl Write,
    ) -> Result<Option<String>, HistoryError> {
        let Some(index) = recall_index(directive) else {
            debug!(directive, "no history index in directive");
            return Ok(None);
        };

        let entry = self.entries()?.into_iter().nth(index);

        if let Some(entry) = &entry {
            writeln!(writer, "{}", entry)?;
        }

        return Ok(entry);
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        return HistoryError::Io {
            path: self.path.clone(),
            source,
        };
    }
}

/// The decimal number right after the first `!` of `directive`, ignoring
/// whitespace in between.
pub fn recall_index(directive: &str) -> Option<usize> {
    let (_, after_bang) = directive.split_once(BANG)?;

    let digits: String = after_bang
        .trim_start()
        .chars()
        .take_while(|c| return c.is_ascii_digit())
        .collect();

    return digits.parse().ok();
}
