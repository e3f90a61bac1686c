// src/cli/handlers/commons.rs

// Shared helpers for the target handlers.

use crate::{core::config_loader::LoadedConfig, models::TasksConfig, system::executor::SystemExecutor};
use anyhow::{Result, anyhow};
use clap::{Parser, error::ErrorKind};
use std::{collections::BTreeMap, path::PathBuf};

/// Everything a target handler needs: the loaded configuration and the executor to run
/// commands with.
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// The loaded `tasks.toml`, or the defaults.
    pub config: TasksConfig,
    /// Where the configuration was read from, or would be written to.
    pub config_path: PathBuf,
    /// Runs every external command.
    pub executor: SystemExecutor,
}

impl TaskContext {
    /// Builds the context from a loaded configuration.
    pub fn new(loaded: LoadedConfig, executor: SystemExecutor) -> Self {
        Self {
            config: loaded.config,
            config_path: loaded.path,
            executor,
        }
    }
}

/// Parses a target's arguments. `--help` prints the target's usage and exits the process.
pub fn parse_target_args<T: Parser>(args: &[String]) -> Result<T> {
    match T::try_parse_from(args) {
        Ok(parsed) => Ok(parsed),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => Err(e.into()),
    }
}

/// Prints command output as-is, skipping empty output.
pub fn print_output(output: &str) {
    let trimmed = output.trim_end();
    if !trimmed.is_empty() {
        println!("{}", trimmed);
    }
}

/// Parses `KEY=VALUE` pairs. Keys and values are trimmed; an empty key is rejected.
pub fn parse_key_value_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => {
                return Err(anyhow!(
                    "Invalid format for key-value pair: '{}'. Expected 'KEY=VALUE'.",
                    pair
                ));
            }
        }
    }
    Ok(map)
}
