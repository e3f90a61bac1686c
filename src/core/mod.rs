// src/core/mod.rs

/// Loading and writing `tasks.toml`.
pub mod config_loader;
/// Cross-compilation matrix, `go test` and output cleanup.
pub mod go_project;
/// `~` and `$VAR` expansion for user-supplied paths.
pub mod paths;
