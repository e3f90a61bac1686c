//! # Command Line Interface
//!
//! The clap entry struct, the per-target argument structs, the target registry and the
//! handlers behind it.

use crate::system::executor::ExecutionError;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// Per-target argument structs.
pub mod args;
/// The target registry and dispatch.
pub mod dispatcher;
/// One handler per target.
pub mod handlers;

/// gitops-tasks: cross-compile Go projects and bootstrap Argo CD / Argo Workflows.
///
/// Run without a target to list every available target.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(
    disable_help_subcommand = true,
    subcommand_value_name = "TARGET",
    subcommand_help_heading = "Targets",
    after_help = "Run without a target to list them. Run `<TARGET> --help` for its arguments."
)]
pub struct Cli {
    /// Path to the task configuration file. Defaults to `tasks.toml` in the current directory.
    #[arg(long, short, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The target and everything after it. Flags after the target belong to the target.
    #[command(subcommand)]
    pub invocation: Option<TargetInvocation>,
}

/// A target name followed by its raw arguments, untouched by the top-level parser.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TargetInvocation {
    /// `<TARGET> [ARGS...]`
    #[command(external_subcommand)]
    Target(Vec<String>),
}

impl Cli {
    /// Splits the invocation into the target name and the arguments handed to the target.
    pub fn target_and_args(&self) -> (Option<String>, Vec<String>) {
        match &self.invocation {
            Some(TargetInvocation::Target(argv)) => match argv.split_first() {
                Some((name, rest)) => (Some(name.clone()), rest.to_vec()),
                None => (None, Vec::new()),
            },
            None => (None, Vec::new()),
        }
    }
}

/// Renders a failed run: first the captured output of the command that failed (if any command
/// did), then the error message.
pub fn render_failure(error: &anyhow::Error) -> String {
    let failed_output = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ExecutionError>())
        .map(|exec_err| exec_err.output().trim_end())
        .filter(|output| !output.is_empty());

    let mut rendered = String::new();
    if let Some(output) = failed_output {
        rendered.push_str(output);
        rendered.push('\n');
    }
    rendered.push_str(&format!("\n{}: {}", "Error".red().bold(), error));
    rendered
}

/// Prints [`render_failure`] to stderr.
pub fn report_failure(error: &anyhow::Error) {
    eprintln!("{}", render_failure(error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::args::BuildArgs, gitops::GitOpsError};
    use clap::error::ErrorKind;

    fn split(argv: &[&str]) -> (Option<PathBuf>, Option<String>, Vec<String>) {
        let cli = Cli::try_parse_from(argv).unwrap();
        let (target, args) = cli.target_and_args();
        (cli.config, target, args)
    }

    #[test]
    fn test_no_target() {
        assert_eq!(split(&["gitops-tasks"]), (None, None, vec![]));
    }

    #[test]
    fn test_target_help_reaches_the_target_parser() {
        // --- Execute ---
        let (_, target, args) = split(&["gitops-tasks", "build", "--help"]);

        // --- Assert ---
        assert_eq!(target.as_deref(), Some("build"));
        assert_eq!(args, vec!["--help"]);
        let err = BuildArgs::try_parse_from(&args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_flags_after_the_target_belong_to_the_target() {
        let (config, target, args) = split(&["gitops-tasks", "build", "-c", "x"]);
        assert_eq!(config, None);
        assert_eq!(target.as_deref(), Some("build"));
        assert_eq!(args, vec!["-c", "x"]);

        let (config, _, args) =
            split(&["gitops-tasks", "build", "--name", "svc", "--config", "x.toml"]);
        assert_eq!(config, None);
        assert_eq!(args, vec!["--name", "svc", "--config", "x.toml"]);
    }

    #[test]
    fn test_config_before_the_target_is_global() {
        let (config, target, args) =
            split(&["gitops-tasks", "-c", "ci.toml", "argocd:install"]);
        assert_eq!(config, Some(PathBuf::from("ci.toml")));
        assert_eq!(target.as_deref(), Some("argocd:install"));
        assert!(args.is_empty());
    }

    #[test]
    fn test_top_level_help_is_still_handled() {
        let err = Cli::try_parse_from(["gitops-tasks", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_failure_report_prints_captured_output_before_error() {
        // --- Setup ---
        let error = anyhow::Error::new(GitOpsError::Step {
            step: "add the repository",
            source: ExecutionError::NonZeroExitStatus {
                command: "argocd".to_string(),
                code: Some(1),
                output: "boom\n".to_string(),
            },
        });

        // --- Execute ---
        let rendered = render_failure(&error);

        // --- Assert ---
        let output_at = rendered.find("boom").unwrap();
        let error_at = rendered.find("Unable to add the repository").unwrap();
        assert!(output_at < error_at);
        assert!(rendered.contains("exit code 1"));
    }

    #[test]
    fn test_failure_report_without_output_has_no_output_block() {
        let error = anyhow::Error::new(GitOpsError::Step {
            step: "log in",
            source: ExecutionError::NonZeroExitStatus {
                command: "argocd".to_string(),
                code: Some(1),
                output: "  \n".to_string(),
            },
        });

        let rendered = render_failure(&error);

        assert_eq!(rendered, format!("\n{}: {}", "Error".red().bold(), error));
    }
}
