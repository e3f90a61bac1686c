// src/cli/handlers/mod.rs

/// `argocd:*` targets.
pub mod argocd;
/// Context and helpers shared by every handler.
pub mod commons;
/// `build`, `test` and `clean`.
pub mod go;
/// `init`.
pub mod init;
/// `workflows:*` targets.
pub mod workflows;
