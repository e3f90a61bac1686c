//! # Config Loader
//!
//! Loads `tasks.toml` into a [`TasksConfig`]. A missing file in the default location means
//! "use the defaults"; an explicitly requested file must exist.
use crate::{constants::CONFIG_FILENAME, models::TasksConfig};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised while loading or writing `tasks.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested file is missing.
    #[error("Configuration file '{}' does not exist.", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read.
    #[error("Could not read configuration file '{}': {source}", .path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown fields.
    #[error("Failed to parse '{}': {source}", .path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The TOML error, with line and column.
        #[source]
        source: toml::de::Error,
    },
    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize configuration to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// `init` refuses to overwrite an existing file.
    #[error("A configuration file already exists at '{}'.", .0.display())]
    AlreadyExists(PathBuf),
    /// The new file could not be written.
    #[error("Could not write configuration file '{}': {source}", .path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A loaded configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration, or the defaults.
    pub config: TasksConfig,
    /// The file that was read, or the default location when none existed.
    pub path: PathBuf,
}

/// Returns the default configuration path inside `dir`.
pub fn default_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILENAME)
}

/// Loads the configuration.
///
/// * `explicit` - A path given by the user. It must exist.
/// * `fallback_dir` - Where to look for `tasks.toml` when no explicit path is given.
pub fn load(explicit: Option<&Path>, fallback_dir: &Path) -> Result<LoadedConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (default_config_path(fallback_dir), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            log::debug!(
                "No configuration at '{}', using defaults.",
                path.display()
            );
            return Ok(LoadedConfig {
                config: TasksConfig::default(),
                path,
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(ConfigError::NotFound(path)),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = parse(&content, &path)?;
    log::debug!("Loaded configuration from '{}'", path.display());
    Ok(LoadedConfig { config, path })
}

/// Parses TOML content; `path` is only used for error messages.
pub fn parse(content: &str, path: &Path) -> Result<TasksConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `config` to `path`, refusing to overwrite an existing file.
pub fn write_new(config: &TasksConfig, path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let loaded = load(None, dir.path()).unwrap();

        assert_eq!(loaded.config, TasksConfig::default());
        assert_eq!(loaded.path, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("custom.toml");

        let result = load(Some(&missing), dir.path());

        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == missing));
    }

    #[test]
    fn test_explicit_file_is_parsed() {
        // --- Setup ---
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[project]\nproject_name = \"svc\"\noutput_dir = \"out\"\n")
            .unwrap();
        file.flush().unwrap();

        // --- Execute ---
        let loaded = load(Some(file.path()), Path::new(".")).unwrap();

        // --- Assert ---
        assert_eq!(loaded.path, file.path());
        assert_eq!(loaded.config.project.project_name, "svc");
        assert_eq!(loaded.config.project.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = parse("[project\n", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_write_new_round_trips_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_config_path(dir.path());

        write_new(&TasksConfig::default(), &path).unwrap();
        assert!(path.is_file());
        let loaded = load(None, dir.path()).unwrap();
        assert_eq!(loaded.config, TasksConfig::default());

        let again = write_new(&TasksConfig::default(), &path);
        assert!(matches!(again, Err(ConfigError::AlreadyExists(_))));
    }
}
