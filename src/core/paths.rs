// src/core/paths.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while expanding a user-supplied path.
#[derive(Error, Debug)]
pub enum PathError {
    /// A referenced variable is undefined, or the home directory is unknown.
    #[error("Failed to expand path '{path}': {reason}")]
    Expansion {
        /// The path as written by the user.
        path: String,
        /// Why the expansion failed.
        reason: String,
    },
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
///
/// Commands are spawned without a shell, so nothing else would perform this expansion.
pub fn expand_user_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        path: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Like [`expand_user_path`] but returns the lossy string form needed for argument lists.
pub fn expand_user_path_arg(template: &str) -> Result<String, PathError> {
    expand_user_path(template).map(|path| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths_are_untouched() {
        assert_eq!(
            expand_user_path("/etc/keys/id_rsa").unwrap(),
            PathBuf::from("/etc/keys/id_rsa")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_tilde_is_expanded_to_home() {
        let Ok(home) = std::env::var("HOME") else {
            return;
        };
        assert_eq!(
            expand_user_path("~/.ssh/id_rsa").unwrap(),
            PathBuf::from(home).join(".ssh/id_rsa")
        );
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let result = expand_user_path("$GITOPS_TASKS_SURELY_UNDEFINED_VAR/id_rsa");
        assert!(matches!(result, Err(PathError::Expansion { .. })));
    }
}
