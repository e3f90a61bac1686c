//! # Go Project Targets
//!
//! Cross-compilation of a Go project over an OS x architecture matrix, plus the companion
//! `test` and `clean` targets.
//!
//! Every target runs through a [`CommandRunner`], strictly one after another: the Go compiler
//! already saturates the machine and all targets share one working tree and build cache.
use crate::{
    constants::GO_BINARY,
    models::{BuildTarget, ProjectConfig},
    system::executor::{CommandRunner, ExecutionError, ExecutionRequest},
};
use colored::Colorize;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors of the Go project targets.
#[derive(Error, Debug)]
pub enum BuildError {
    /// `project_name` is empty; nothing was built.
    #[error("No project_name defined. Set it in the [project] section or pass --name.")]
    MissingProjectName,
    #[error("Unable to create output directory '{}': {source}", .path.display())]
    /// The output directory could not be created.
    OutputDir {
        /// The directory that was being created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    #[error("Build for target {target} failed: {source}")]
    /// Compilation failed for one target. Later targets were not attempted.
    Target {
        /// The failing target.
        target: BuildTarget,
        /// The compiler failure, carrying its output.
        #[source]
        source: ExecutionError,
    },
    /// `go test` failed.
    #[error("Tests failed: {0}")]
    Test(#[source] ExecutionError),
    #[error("Unable to remove output directory '{}': {source}", .path.display())]
    /// The output directory could not be removed.
    Clean {
        /// The directory that was being removed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Renders the linker symbol overrides as `-X key=value ` fragments, one per entry.
///
/// Returns `None` for an empty map so callers omit the `-ldflags` argument entirely.
pub fn render_ld_flags(ld_flags: &BTreeMap<String, String>) -> Option<String> {
    if ld_flags.is_empty() {
        return None;
    }
    let mut rendered = String::with_capacity(ld_flags.len() * 32);
    for (key, value) in ld_flags {
        rendered.push_str(&format!("-X {}={} ", key, value));
    }
    Some(rendered)
}

/// The artifact location for one target: `<output_dir>/<project>-<os>-<arch>`.
pub fn artifact_path(output_dir: &Path, project_name: &str, target: &BuildTarget) -> PathBuf {
    output_dir.join(target.artifact_name(project_name))
}

fn cgo_env(cgo_enabled: bool) -> String {
    format!("CGO_ENABLED={}", cgo_enabled)
}

/// Builds the `go build` request for a single target.
pub fn build_request(
    config: &ProjectConfig,
    target: &BuildTarget,
    ld_flags: Option<&str>,
) -> ExecutionRequest {
    let output = artifact_path(&config.output_dir, &config.project_name, target);

    let mut request = ExecutionRequest::new(GO_BINARY).args(["build", "-v"]);
    if let Some(flags) = ld_flags {
        request = request.arg(format!("-ldflags={}", flags));
    }
    request
        .arg("-o")
        .arg(output.to_string_lossy())
        .arg(".")
        .env(format!("GOOS={}", target.os))
        .env(format!("GOARCH={}", target.arch))
        .env(cgo_env(config.cgo_enabled))
}

/// Compiles the project for every target in the matrix.
///
/// Stops at the first failing target; artifacts of earlier targets are left in place.
pub fn build(config: &ProjectConfig, runner: &impl CommandRunner) -> Result<(), BuildError> {
    if config.project_name.trim().is_empty() {
        return Err(BuildError::MissingProjectName);
    }

    let ld_flags = render_ld_flags(&config.ld_flags);

    fs::create_dir_all(&config.output_dir).map_err(|source| BuildError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    for target in config.targets() {
        let artifact = target.artifact_name(&config.project_name);
        println!(
            "{} {}",
            "→".blue(),
            format!(t!("build.info.building"), artifact = artifact).green()
        );

        let request = build_request(config, &target, ld_flags.as_deref());
        log::debug!("Build request for {}: {}", target, request.display_line());

        match runner.execute(&request) {
            Ok(output) => {
                log::debug!("Build output for {}:\n{}", target, output);
                println!("{}", t!("build.info.done").dimmed());
            }
            Err(source) => return Err(BuildError::Target { target, source }),
        }
    }

    Ok(())
}

/// Runs `go test ./...` and returns its output.
pub fn run_tests(config: &ProjectConfig, runner: &impl CommandRunner) -> Result<String, BuildError> {
    let request = ExecutionRequest::new(GO_BINARY)
        .args(["test", "./..."])
        .env(cgo_env(config.cgo_enabled));
    runner.execute(&request).map_err(BuildError::Test)
}

/// Removes the output directory and everything in it. A missing directory is not an error.
pub fn clean(config: &ProjectConfig) -> Result<(), BuildError> {
    match fs::remove_dir_all(&config.output_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!(
                "Output directory '{}' does not exist, nothing to clean.",
                config.output_dir.display()
            );
            Ok(())
        }
        Err(source) => Err(BuildError::Clean {
            path: config.output_dir.clone(),
            source,
        }),
    }
}
