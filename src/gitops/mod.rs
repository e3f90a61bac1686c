//! # GitOps Tooling
//!
//! Command templates that install and configure Argo CD and Argo Workflows on the cluster the
//! current `kubectl` context points at. Each operation is a short, synchronous sequence of
//! CLI calls through a [`CommandRunner`]; failures are wrapped with the step being attempted
//! and nothing already applied to the cluster is rolled back.

/// Argo CD install, access, repositories and applications.
pub mod argocd;
/// Namespace validation and idempotent creation.
pub mod namespace;
/// Argo Workflows install, server and port-forward.
pub mod workflows;

use crate::{
    core::paths::PathError,
    system::{
        executor::{CommandRunner, ExecutionError, ExecutionRequest},
        shell::ShellError,
    },
};
use thiserror::Error;

/// Errors of the GitOps operations.
#[derive(Error, Debug)]
pub enum GitOpsError {
    /// The namespace name is not a valid RFC 1123 label. Nothing was run.
    #[error(
        "'{0}' is not a valid namespace name (lowercase alphanumerics and '-', at most 63 characters)."
    )]
    InvalidNamespace(String),
    #[error("Unable to create namespace '{namespace}': {source}")]
    /// Namespace creation failed for a reason other than "already exists".
    Namespace {
        /// The namespace being created.
        namespace: String,
        /// The kubectl failure, carrying its output.
        #[source]
        source: ExecutionError,
    },
    #[error("Unable to {step}: {source}")]
    /// One step of an operation failed.
    Step {
        /// What was being attempted, e.g. "deploy Argo CD".
        step: &'static str,
        /// The command failure, carrying its output.
        #[source]
        source: ExecutionError,
    },
    /// `argocd admin initial-password` printed nothing.
    #[error("No admin password was returned for namespace '{0}'.")]
    EmptyPassword(String),
    /// An SSH key path could not be expanded.
    #[error(transparent)]
    Path(#[from] PathError),
    /// A value could not be put on a shell line.
    #[error(transparent)]
    Shell(#[from] ShellError),
}

impl GitOpsError {
    /// The underlying command failure, if this error wraps one.
    pub fn execution_error(&self) -> Option<&ExecutionError> {
        match self {
            Self::Namespace { source, .. } | Self::Step { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Runs one step of a GitOps operation, labelling its failure with `step`.
fn run_step(
    runner: &impl CommandRunner,
    step: &'static str,
    request: ExecutionRequest,
) -> Result<String, GitOpsError> {
    runner
        .execute(&request)
        .map_err(|source| GitOpsError::Step { step, source })
}
