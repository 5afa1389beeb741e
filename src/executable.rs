use std::{
    ffi::OsString,
    io,
    os::unix::process::{CommandExt, ExitStatusExt},
    path::{Path, PathBuf},
    process::ExitStatus,
};

use nix::{
    fcntl::AtFlags,
    unistd::{faccessat, AccessFlags},
};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum ExecutableError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("spawn: {0}")]
    Spawn(#[source] io::Error),

    #[error("waitpid: {0}")]
    Wait(#[source] io::Error),
}

/// Whether `path` names a regular file the effective user may execute.
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };

    return metadata.is_file()
        && faccessat(None, path, AccessFlags::X_OK, AtFlags::AT_EACCESS).is_ok();
}

/// Exit code of a finished process; `128 + signal` when it was killed.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    if let Some(signal) = status.signal() {
        return 128 + signal;
    }

    return -1;
}

pub trait ExecutablePathFinder {
    /// Names containing `/` are checked as given; anything else is looked up
    /// in `search_paths`, first match wins.
    fn find_executable_path(&self, name: &str, search_paths: &[PathBuf]) -> Option<PathBuf> {
        if name.contains('/') {
            let path = PathBuf::from(name);
            trace!(path = %path.display(), "checking direct path");

            if is_executable(&path) {
                return Some(path);
            }

            return None;
        }

        for dir in search_paths {
            let full_path = dir.join(name);
            trace!(candidate = %full_path.display(), "checking search path");

            if is_executable(&full_path) {
                return Some(full_path);
            }
        }

        return None;
    }
}

pub trait ExecutableRunner {
    /// Spawns `path` with `argv` (its first element becomes the program's
    /// `argv[0]`) and exactly `environment`, then waits for it to finish.
    fn execute(
        &self,
        path: &Path,
        argv: &[String],
        environment: &[(OsString, OsString)],
    ) -> Result<ExitStatus, ExecutableError> {
        let mut command = std::process::Command::new(path);

        if let Some((arg0, args)) = argv.split_first() {
            command.arg0(arg0).args(args);
        }

        command
            .env_clear()
            .envs(environment.iter().map(|(name, value)| return (name, value)));

        let mut child = command.spawn().map_err(ExecutableError::Spawn)?;
        debug!(pid = child.id(), path = %path.display(), "spawned");

        let status = child.wait().map_err(ExecutableError::Wait)?;
        debug!(?status, "process finished");

        return Ok(status);
    }
}

pub struct PathFinder {}

impl ExecutablePathFinder for PathFinder {}

impl PathFinder {
    pub fn new() -> Self {
        return Self {};
    }
}

pub struct Runner {}

impl ExecutableRunner for Runner {}

impl Runner {
    pub fn new() -> Self {
        return Self {};
    }
}
