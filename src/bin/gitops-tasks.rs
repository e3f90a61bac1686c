// src/bin/gitops-tasks.rs

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use gitops_tasks::{
    cli::{Cli, dispatcher, handlers::commons::TaskContext, report_failure},
    core::config_loader::{self, ConfigError, LoadedConfig},
    models::TasksConfig,
    system::executor::{self, SystemExecutor},
};
use std::{env, path::Path};

/// The main entry point of `gitops-tasks`.
/// It sets up logging, loads the configuration, dispatches the target and reports failures.
fn main() {
    // `RUST_LOG` wins; otherwise the debug toggles raise the default level.
    let default_level = if executor::debug_enabled() { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run_cli(Cli::parse()) {
        report_failure(&e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let (target, args) = cli.target_and_args();
    dispatcher::dispatch(target, args, |target| load_context(cli.config.as_deref(), target))
}

/// Loads the configuration for a target that needs it.
fn load_context(explicit: Option<&Path>, target: &str) -> Result<TaskContext> {
    let current_dir = env::current_dir().context("Unable to read the current directory")?;
    let loaded = match config_loader::load(explicit, &current_dir) {
        // `init` is the one target that creates the file it was pointed at.
        Err(ConfigError::NotFound(path)) if target == "init" => LoadedConfig {
            config: TasksConfig::default(),
            path,
        },
        result => result?,
    };

    Ok(TaskContext::new(loaded, SystemExecutor::from_env()))
}
