// src/system/shell.rs

use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while building a shell line.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The value contains a NUL byte, which no shell argument can carry.
    #[error("Value '{0}' cannot be safely quoted for the shell (it contains a NUL byte).")]
    Unquotable(String),
    /// `cmd` has no quoting that neutralizes every metacharacter, so such values are refused.
    #[error("Value '{0}' contains characters that cannot be passed through cmd; only plain values are accepted on Windows.")]
    NeedsQuotingOnWindows(String),
}

/// Returns the shell program and the flag that makes it run a single command line.
///
/// POSIX `sh` on Unix-like systems, `cmd /C` on Windows.
pub fn default_shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

/// Quotes a single value for interpolation into a line run by [`default_shell`].
///
/// Values made only of safe characters are returned untouched. On Windows those are the only
/// values accepted.
pub fn quote(value: &str) -> Result<Cow<'_, str>, ShellError> {
    quote_for(value, cfg!(target_os = "windows"))
}

fn quote_for(value: &str, windows: bool) -> Result<Cow<'_, str>, ShellError> {
    let quoted = shlex::try_quote(value)
        .map_err(|_| ShellError::Unquotable(value.escape_debug().to_string()))?;
    if windows && quoted != value {
        return Err(ShellError::NeedsQuotingOnWindows(value.to_string()));
    }
    Ok(quoted)
}

/// Quotes every value and joins them with single spaces.
pub fn join_quoted<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<String, ShellError> {
    let quoted = values
        .into_iter()
        .map(quote)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(" "))
}
