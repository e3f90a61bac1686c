// src/cli/handlers/init.rs

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::commons::{TaskContext, parse_target_args};
use crate::{
    cli::args::NoArgs,
    core::config_loader,
    models::{ProjectConfig, TasksConfig},
};

/// The handler for the `init` target.
/// Writes a configuration with every default spelled out, named after the current directory.
pub fn handle(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    let project_name = ctx
        .config_path
        .parent()
        .map(|dir| if dir.as_os_str().is_empty() { Path::new(".") } else { dir })
        .and_then(|dir| dunce::canonicalize(dir).ok())
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let config = TasksConfig {
        project: ProjectConfig::new(project_name),
        ..Default::default()
    };
    config_loader::write_new(&config, &ctx.config_path)?;

    let path = ctx.config_path.display().to_string();
    println!("{}", format!(t!("init.info.created"), path = path).green());
    Ok(())
}
