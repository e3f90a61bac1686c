//! Task-runner helpers: cross-compile a Go project over an OS x architecture matrix and
//! bootstrap Argo CD and Argo Workflows on the current Kubernetes context.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// Command line entry point, target registry and handlers.
pub mod cli;
/// File names, URL templates and other fixed values.
pub mod constants;
/// Configuration loading and the Go project targets.
pub mod core;
/// Argo CD and Argo Workflows command templates.
pub mod gitops;
/// The `tasks.toml` model and build matrix types.
pub mod models;
pub mod system;
