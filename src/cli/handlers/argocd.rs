// src/cli/handlers/argocd.rs

use anyhow::Result;
use colored::Colorize;

use super::commons::{TaskContext, parse_target_args, print_output};
use crate::{
    cli::args::{
        CreateAppArgs, HostArgs, HttpRepoArgs, ManifestArgs, NoArgs, RepoCredsArgs, RepoSshArgs,
    },
    gitops::argocd::{self, AppSpec},
};

/// The handler for `argocd:install`.
pub fn handle_install(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    let manifest = argocd::manifest_url(&ctx.config.argocd);
    println!(
        "{}",
        format!(
            t!("argocd.info.installing"),
            namespace = ctx.config.argocd.namespace,
            manifest = manifest
        )
        .cyan()
    );
    print_output(&argocd::install(&ctx.config.argocd, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:port-forward`. Prints the UI address, then blocks on kubectl.
pub fn handle_port_forward(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    let url = argocd::local_url(&ctx.config.argocd);
    println!(
        "{} {}",
        "→".blue(),
        format!(t!("argocd.info.access_url"), url = url).green()
    );
    print_output(&argocd::port_forward(&ctx.config.argocd, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:admin-password`.
pub fn handle_admin_password(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;

    let password = argocd::admin_password(&ctx.config.argocd, &ctx.executor)?;
    println!("{}", password);
    Ok(())
}

/// The handler for `argocd:login`.
pub fn handle_login(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;
    print_output(&argocd::login(&ctx.config.argocd, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:add-host-ssh-cert <hostname>`.
pub fn handle_add_host_ssh_cert(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let host_args: HostArgs = parse_target_args(&args)?;
    print_output(&argocd::add_host_ssh_cert(&host_args.hostname, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:add-github-ssh-cert`.
pub fn handle_add_github_ssh_cert(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;
    print_output(&argocd::add_github_ssh_cert(&ctx.config.argocd, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:add-repo-ssh-creds <repo_url> <ssh_key_path>`.
pub fn handle_add_repo_ssh_creds(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let creds: RepoCredsArgs = parse_target_args(&args)?;
    print_output(&argocd::add_repo_ssh_creds(
        &creds.repo_url,
        &creds.ssh_key_path,
        &ctx.executor,
    )?);
    Ok(())
}

/// The handler for `argocd:add-github-ssh-creds`.
pub fn handle_add_github_ssh_creds(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let _: NoArgs = parse_target_args(&args)?;
    print_output(&argocd::add_github_ssh_creds(&ctx.config.argocd, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:add-http-repo <repo_url> <argo_url>`.
pub fn handle_add_http_repo(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let repo: HttpRepoArgs = parse_target_args(&args)?;
    print_output(&argocd::add_http_repo(&repo.repo_url, &repo.argo_url, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:add-repo-ssh <repo_url> <ssh_key_path> <argo_url>`.
pub fn handle_add_repo_ssh(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let repo: RepoSshArgs = parse_target_args(&args)?;
    print_output(&argocd::add_repo_ssh(
        &repo.repo_url,
        &repo.ssh_key_path,
        &repo.argo_url,
        &ctx.executor,
    )?);
    Ok(())
}

/// The handler for `argocd:create-app <app_name> <path> <repo_url> <namespace>`.
pub fn handle_create_app(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let app: CreateAppArgs = parse_target_args(&args)?;
    let spec = AppSpec {
        name: &app.app_name,
        path: &app.path,
        repo_url: &app.repo_url,
        dest_namespace: &app.namespace,
    };
    print_output(&argocd::create_app(&spec, &ctx.executor)?);
    Ok(())
}

/// The handler for `argocd:create-app-manifest <manifest_path>`.
pub fn handle_create_app_manifest(args: Vec<String>, ctx: &TaskContext) -> Result<()> {
    let manifest: ManifestArgs = parse_target_args(&args)?;
    print_output(&argocd::create_app_manifest(
        &manifest.manifest_path,
        &ctx.executor,
    )?);
    Ok(())
}
