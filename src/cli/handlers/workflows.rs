// src/cli/handlers/workflows.rs

use anyhow::Result;
use colored::Colorize;

use super::commons::{TaskContext, parse_target_args, print_output};
use crate::{cli::args::NoArgs, gitops::workflows};

/// The handler for `workflows:install`.
pub fn handle_install(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    let manifest = workflows::manifest_url(&ctx.config.workflows);
    println!(
        "{}",
        format!(
            t!("workflows.info.installing"),
            namespace = ctx.config.workflows.namespace,
            manifest = manifest
        )
        .cyan()
    );
    print_output(&workflows::install(&ctx.config.workflows, &ctx.executor)?);
    Ok(())
}

/// The handler for `workflows:server`. Blocks until `argo server` exits.
pub fn handle_server(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;
    print_output(&workflows::server(&ctx.config.workflows, &ctx.executor)?);
    Ok(())
}

/// The handler for `workflows:port-forward`. Prints the UI address, then blocks on kubectl.
pub fn handle_port_forward(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    let url = workflows::local_url(&ctx.config.workflows);
    println!(
        "{} {}",
        "→".blue(),
        format!(t!("workflows.info.access_url"), url = url).green()
    );
    print_output(&workflows::port_forward(&ctx.config.workflows, &ctx.executor)?);
    Ok(())
}
