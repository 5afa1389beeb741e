use std::{env, ffi::OsString, path::PathBuf};

use tracing::{debug, warn};

use crate::tokenize::tokenize;

/// Search path used when `PATH` is unset.
pub const DEFAULT_PATH: &str = "/bin:/usr/bin";

pub const HISTORY_FILE_NAME: &str = ".burrow_history";

/// Everything the interpreter would otherwise read from the process
/// environment. Built once at startup and never changed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directories searched for programs, in order.
    pub search_paths: Vec<PathBuf>,
    /// Target of a bare `cd`.
    pub home: Option<PathBuf>,
    /// Passed unmodified to every spawned program.
    pub environment: Vec<(OsString, OsString)>,
    pub history_file: PathBuf,
}

impl Config {
    pub fn from_env(history_file: Option<PathBuf>) -> Self {
        let path_list = env::var_os("PATH")
            .map(|path| return path.to_string_lossy().into_owned())
            .unwrap_or_else(|| return DEFAULT_PATH.to_string());

        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir);

        return Config::new(&path_list, home, env::vars_os().collect(), history_file);
    }

    pub fn new(
        path_list: &str,
        home: Option<PathBuf>,
        environment: Vec<(OsString, OsString)>,
        history_file: Option<PathBuf>,
    ) -> Self {
        let search_paths: Vec<PathBuf> = tokenize(path_list, ":", "")
            .into_iter()
            .map(PathBuf::from)
            .collect();

        let history_file = history_file.unwrap_or_else(|| match &home {
            Some(home) => return home.join(HISTORY_FILE_NAME),
            None => {
                warn!("no home directory, keeping history in the working directory");

                // Absolute, so a later `cd` does not move the log.
                return env::current_dir()
                    .map(|dir| return dir.join(HISTORY_FILE_NAME))
                    .unwrap_or_else(|_| return PathBuf::from(HISTORY_FILE_NAME));
            }
        });

        debug!(
            ?search_paths,
            ?home,
            history_file = %history_file.display(),
            "configuration loaded"
        );

        return Config {
            search_paths,
            home,
            environment,
            history_file,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn splits_search_path_in_order() {
        let config = Config::new("/usr/local/bin::/bin:/usr/bin", None, Vec::new(), None);

        assert_eq!(
            config.search_paths,
            vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/bin"),
                PathBuf::from("/usr/bin")
            ]
        );
    }

    #[test]
    fn history_file_under_home() {
        let config = Config::new(DEFAULT_PATH, Some(PathBuf::from("/home/user")), Vec::new(), None);

        assert_eq!(
            config.history_file,
            PathBuf::from("/home/user/.burrow_history")
        );
    }

    #[test]
    fn history_file_override() {
        let config = Config::new(
            DEFAULT_PATH,
            Some(PathBuf::from("/home/user")),
            Vec::new(),
            Some(PathBuf::from("/tmp/log")),
        );

        assert_eq!(config.history_file, PathBuf::from("/tmp/log"));
    }

    #[test]
    #[serial]
    fn history_file_without_home() {
        let cwd = env::current_dir().unwrap();
        let config = Config::new(DEFAULT_PATH, None, Vec::new(), None);

        assert!(config.history_file.is_absolute());
        assert_eq!(config.history_file, cwd.join(HISTORY_FILE_NAME));
    }

    #[test]
    fn reads_process_environment() {
        let config = Config::from_env(None);

        assert!(!config.search_paths.is_empty());
        assert!(config
            .environment
            .iter()
            .any(|(name, _)| return name == "PATH"));
    }
}
