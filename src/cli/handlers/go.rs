// src/cli/handlers/go.rs

use anyhow::{Context, Result};
use colored::Colorize;

use super::commons::{self, TaskContext, parse_target_args};
use crate::{
    cli::args::{BuildArgs, NoArgs},
    core::go_project,
    models::ProjectConfig,
};

/// The handler for the `build` target.
/// Flags override the `[project]` section for this run only.
pub fn handle_build(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let build_args: BuildArgs = parse_target_args(&args)?;
    let project = apply_build_args(&ctx.config.project, build_args)?;

    go_project::build(&project, &ctx.executor)?;
    Ok(())
}

/// The handler for the `test` target.
pub fn handle_test(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    println!("{}", t!("test.info.running").cyan());
    let output = go_project::run_tests(&ctx.config.project, &ctx.executor)?;
    commons::print_output(&output);
    Ok(())
}

/// The handler for the `clean` target.
pub fn handle_clean(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    let output_dir = ctx.config.project.output_dir.display().to_string();
    println!(
        "{}",
        format!(t!("clean.info.cleaning"), path = output_dir).cyan()
    );
    go_project::clean(&ctx.config.project)?;
    Ok(())
}

fn apply_build_args(base: &ProjectConfig, args: BuildArgs) -> Result<ProjectConfig> {
    let mut project = base.clone();

    if let Some(name) = args.name {
        project.project_name = name;
    }
    if let Some(output_dir) = args.output_dir {
        project.output_dir = output_dir;
    }
    if !args.os.is_empty() {
        project.os_types = args.os;
    }
    if !args.arch.is_empty() {
        project.arch_types = args.arch;
    }
    if let Some(cgo) = args.cgo {
        project.cgo_enabled = cgo;
    }

    let ld_flags = commons::parse_key_value_pairs(&args.ld_flags)
        .context("Invalid --ldflag value")?;
    project.ld_flags.extend(ld_flags);

    Ok(project)
}
