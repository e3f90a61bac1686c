// src/system/executor.rs

use crate::{constants::DEBUG_ENV_VARS, system::shell};
use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

/// Failures of a single command execution. Every variant that ran something keeps its output.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The request had a blank command; nothing was spawned.
    #[error("No command specified to run.")]
    EmptyCommand,
    /// The process could not be started, or its output could not be read.
    #[error("Command '{command}' could not be executed: {source}")]
    CommandFailed {
        /// The requested program or shell line.
        command: String,
        /// Whatever was captured before the failure.
        output: String,
        #[source]
        source: io::Error,
    },
    #[error("Command '{command}' exited with a non-zero status ({}).", exit_code_label(.code))]
    /// The process ran and reported failure.
    NonZeroExitStatus {
        /// The requested program or shell line.
        command: String,
        /// Exit code, `None` when the process was killed by a signal.
        code: Option<i32>,
        /// Combined stdout and stderr.
        output: String,
    },
}

impl ExecutionError {
    /// The combined output captured before the failure. Empty when the process never started.
    pub fn output(&self) -> &str {
        match self {
            Self::EmptyCommand => "",
            Self::CommandFailed { output, .. } | Self::NonZeroExitStatus { output, .. } => output,
        }
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// How the `command` of a request is handed to the operating system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvocationMode {
    /// `command` is a program, spawned directly with `args`.
    #[default]
    Direct,
    /// `command` is a full line interpreted by the platform shell. Use only when shell
    /// features (pipes) are needed.
    Shell,
}

/// One subprocess invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// A program name, or a whole shell line in [`InvocationMode::Shell`].
    pub command: String,
    /// Arguments, passed as-is without any shell interpretation.
    pub args: Vec<String>,
    /// Directory to run in. `None` or an empty path inherits the caller's.
    pub working_dir: Option<PathBuf>,
    /// `KEY=VALUE` entries applied in order on top of the inherited environment.
    pub environment: Vec<String>,
    /// How `command` is handed to the operating system.
    pub mode: InvocationMode,
}

impl ExecutionRequest {
    /// A direct invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            command: program.into(),
            ..Default::default()
        }
    }

    /// A single line run through the platform shell (`sh -c` / `cmd /C`).
    pub fn shell(line: impl Into<String>) -> Self {
        Self {
            command: line.into(),
            mode: InvocationMode::Shell,
            ..Default::default()
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a `KEY=VALUE` environment entry.
    pub fn env(mut self, entry: impl Into<String>) -> Self {
        self.environment.push(entry.into());
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Human-readable rendering, used in logs and error messages.
    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }

    /// Resolves the actual program and argument vector handed to the OS.
    fn resolve_invocation(&self) -> (String, Vec<String>) {
        match self.mode {
            InvocationMode::Direct => (self.command.clone(), self.args.clone()),
            InvocationMode::Shell => {
                let (program, flag) = shell::default_shell();
                let mut argv = vec![flag.to_string(), self.command.clone()];
                argv.extend(self.args.iter().cloned());
                (program.to_string(), argv)
            }
        }
    }
}

/// The seam every operation runs its commands through.
pub trait CommandRunner {
    /// Runs the request to completion and returns its combined stdout/stderr.
    ///
    /// On failure the captured output travels inside the error, see [`ExecutionError::output`].
    fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
        (**self).execute(request)
    }
}

/// Returns `true` when one of the debug toggles (`MAGEFILE_DEBUG`, `MAGEFILE_VERBOSE`) is `1`.
pub fn debug_enabled() -> bool {
    debug_enabled_from(|key| env::var(key).ok())
}

fn debug_enabled_from(lookup: impl Fn(&str) -> Option<String>) -> bool {
    DEBUG_ENV_VARS
        .iter()
        .any(|key| lookup(key).is_some_and(|value| value.trim() == "1"))
}

/// Spawns real processes with `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor {
    debug: bool,
}

impl SystemExecutor {
    /// Creates an executor; `debug` logs every command and its output.
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Reads the debug toggles from the process environment.
    pub fn from_env() -> Self {
        Self::new(debug_enabled())
    }
}

impl CommandRunner for SystemExecutor {
    /// Executes the request synchronously, capturing stdout and stderr through one pipe so the
    /// interleaving produced by the child is preserved.
    fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
        if request.command.trim().is_empty() {
            return Err(ExecutionError::EmptyCommand);
        }

        let command_line = request.command.clone();
        let start_failure = |source: io::Error| ExecutionError::CommandFailed {
            command: command_line.clone(),
            output: String::new(),
            source,
        };

        let (program, argv) = request.resolve_invocation();
        if self.debug {
            log::info!("Executing binary [{}] with args: {:?}", program, argv);
            if !request.environment.is_empty() {
                log::info!("Extra environment: {:?}", request.environment);
            }
        }

        let mut command = StdCommand::new(&program);
        command.args(&argv).stdin(Stdio::null());

        for entry in &request.environment {
            let (key, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
            command.env(key, value);
        }

        if let Some(dir) = request
            .working_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
        {
            command.current_dir(dunce::simplified(dir));
        }

        let (mut reader, writer) = io::pipe().map_err(&start_failure)?;
        let writer_for_stderr = writer.try_clone().map_err(&start_failure)?;
        command.stdout(writer).stderr(writer_for_stderr);

        let spawned = command.spawn();
        // The command keeps copies of the pipe's write ends; they must be closed before
        // reading, otherwise the reader never sees EOF.
        drop(command);
        let mut child = spawned.map_err(&start_failure)?;

        let mut buffer = Vec::new();
        let read_result = reader.read_to_end(&mut buffer);
        let wait_result = child.wait();
        let output = String::from_utf8_lossy(&buffer).into_owned();

        if self.debug {
            log::info!("Output of [{}]:\n{}", program, output);
        }

        let status = match (read_result, wait_result) {
            (Ok(_), Ok(status)) => status,
            (Err(source), _) | (_, Err(source)) => {
                return Err(ExecutionError::CommandFailed {
                    command: command_line,
                    output,
                    source,
                });
            }
        };

        if !status.success() {
            log::debug!("Command '{}' failed with status {:?}", command_line, status);
            return Err(ExecutionError::NonZeroExitStatus {
                command: command_line,
                code: status.code(),
                output,
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// A `CommandRunner` that records every request and replays scripted responses.
    /// Once the script runs out, every call succeeds with empty output.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRunner {
        calls: RefCell<Vec<ExecutionRequest>>,
        responses: RefCell<VecDeque<Result<String, ExecutionError>>>,
    }

    impl RecordingRunner {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_responses(
            responses: impl IntoIterator<Item = Result<String, ExecutionError>>,
        ) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                responses: RefCell::new(responses.into_iter().collect()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<ExecutionRequest> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn execute(&self, request: &ExecutionRequest) -> Result<String, ExecutionError> {
            self.calls.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    pub(crate) fn failure(command: &str, output: &str) -> ExecutionError {
        ExecutionError::NonZeroExitStatus {
            command: command.to_string(),
            code: Some(1),
            output: output.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_toggle_reads_either_variable() {
        assert!(debug_enabled_from(|key| (key == "MAGEFILE_DEBUG").then(|| "1".to_string())));
        assert!(debug_enabled_from(|key| (key == "MAGEFILE_VERBOSE").then(|| "1".to_string())));
        assert!(!debug_enabled_from(|_| Some("0".to_string())));
        assert!(!debug_enabled_from(|_| None));
    }

    #[test]
    fn test_empty_command_is_rejected_before_spawning() {
        let result = SystemExecutor::default().execute(&ExecutionRequest::new("   "));
        assert!(matches!(result, Err(ExecutionError::EmptyCommand)));
    }

    #[test]
    fn test_missing_binary_reports_command_name() {
        let request = ExecutionRequest::new("gitops-tasks-no-such-binary").arg("--version");
        let err = SystemExecutor::default().execute(&request).unwrap_err();

        assert!(matches!(
            &err,
            ExecutionError::CommandFailed { command, .. } if command == "gitops-tasks-no-such-binary"
        ));
        assert!(err.output().is_empty());
        assert!(err.to_string().contains("gitops-tasks-no-such-binary"));
    }

    #[test]
    fn test_shell_request_wraps_line_for_platform_shell() {
        let request = ExecutionRequest::shell("ssh-keyscan github.com | argocd cert add-ssh --batch");
        let (program, argv) = request.resolve_invocation();
        let (expected_program, flag) = shell::default_shell();

        assert_eq!(program, expected_program);
        assert_eq!(
            argv,
            vec![
                flag.to_string(),
                "ssh-keyscan github.com | argocd cert add-ssh --batch".to_string()
            ]
        );
    }

    #[test]
    fn test_display_line_joins_arguments() {
        let request = ExecutionRequest::new("kubectl").args(["create", "namespace", "argo"]);
        assert_eq!(request.display_line(), "kubectl create namespace argo");
        assert_eq!(ExecutionRequest::new("pwd").display_line(), "pwd");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        #[test]
        fn test_zero_argument_command_still_runs() {
            // --- Setup ---
            let dir = tempfile::tempdir().unwrap();
            let request = ExecutionRequest::new("pwd").current_dir(dir.path());

            // --- Execute ---
            let output = SystemExecutor::default().execute(&request).unwrap();

            // --- Assert ---
            let dir_name = dir.path().file_name().unwrap().to_string_lossy().to_string();
            assert!(output.trim_end().ends_with(&dir_name));
        }

        #[test]
        fn test_failure_keeps_combined_output() {
            let request = ExecutionRequest::new("sh")
                .arg("-c")
                .arg("echo to-stdout; echo to-stderr 1>&2; exit 3");

            let err = SystemExecutor::default().execute(&request).unwrap_err();

            match &err {
                ExecutionError::NonZeroExitStatus { code, .. } => assert_eq!(*code, Some(3)),
                other => panic!("unexpected error: {other:?}"),
            }
            assert!(err.output().contains("to-stdout"));
            assert!(err.output().contains("to-stderr"));
        }

        #[test]
        fn test_stderr_and_stdout_share_one_stream_in_order() {
            let request = ExecutionRequest::new("sh")
                .arg("-c")
                .arg("echo first; echo second 1>&2; echo third");

            let output = SystemExecutor::default().execute(&request).unwrap();

            assert_eq!(output, "first\nsecond\nthird\n");
        }

        #[test]
        fn test_later_environment_entries_win() {
            let request = ExecutionRequest::new("printenv")
                .arg("GITOPS_TASKS_TEST_VALUE")
                .env("GITOPS_TASKS_TEST_VALUE=first")
                .env("GITOPS_TASKS_TEST_VALUE=second");

            let output = SystemExecutor::default().execute(&request).unwrap();

            assert_eq!(output.trim(), "second");
        }

        #[test]
        fn test_environment_is_appended_to_inherited_one() {
            let request = ExecutionRequest::new("sh")
                .arg("-c")
                .arg("test -n \"$PATH\" && echo \"$GITOPS_TASKS_EXTRA\"")
                .env("GITOPS_TASKS_EXTRA=present");

            let output = SystemExecutor::default().execute(&request).unwrap();

            assert_eq!(output.trim(), "present");
        }

        #[test]
        fn test_missing_working_dir_is_a_start_error() {
            let dir = tempfile::tempdir().unwrap();
            let request = ExecutionRequest::new("pwd").current_dir(dir.path().join("missing"));

            let err = SystemExecutor::default().execute(&request).unwrap_err();

            assert!(matches!(err, ExecutionError::CommandFailed { .. }));
        }

        #[test]
        fn test_shell_mode_supports_pipes() {
            let request = ExecutionRequest::shell("echo gitops | tr a-z A-Z");

            let output = SystemExecutor::default().execute(&request).unwrap();

            assert_eq!(output.trim(), "GITOPS");
        }
    }
}
