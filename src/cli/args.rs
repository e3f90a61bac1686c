// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Arguments of targets that take none. Still parsed so `--help` and typos are handled.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct NoArgs {}

/// Arguments of `build`. Each flag overrides the `[project]` section for this run.
#[derive(Parser, Debug, Default)]
#[command(name = "build", no_binary_name = true)]
pub struct BuildArgs {
    /// Overrides `project_name` from the configuration.
    #[arg(long)]
    pub name: Option<String>,

    /// Overrides the artifact output directory.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Target operating systems (e.g. "linux,darwin").
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub os: Vec<String>,

    /// Target architectures (e.g. "amd64,arm64").
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub arch: Vec<String>,

    /// Enables or disables cgo ("true" or "false").
    #[arg(long)]
    pub cgo: Option<bool>,

    /// Linker symbol override, repeatable (e.g. "main.version=1.0").
    #[arg(long = "ldflag", value_name = "KEY=VALUE")]
    pub ld_flags: Vec<String>,
}

/// Arguments of `argocd:add-host-ssh-cert`.
#[derive(Parser, Debug, Default)]
#[command(name = "argocd:add-host-ssh-cert", no_binary_name = true)]
pub struct HostArgs {
    /// The SSH host whose keys are registered (e.g. "gitlab.com").
    pub hostname: String,
}

/// Arguments of `argocd:add-repo-ssh-creds`.
#[derive(Parser, Debug, Default)]
#[command(name = "argocd:add-repo-ssh-creds", no_binary_name = true)]
pub struct RepoCredsArgs {
    /// Repository URL prefix the credentials apply to.
    pub repo_url: String,
    /// Path to the SSH private key.
    pub ssh_key_path: String,
}

/// Arguments of `argocd:add-http-repo`.
#[derive(Parser, Debug, Default)]
#[command(name = "argocd:add-http-repo", no_binary_name = true)]
pub struct HttpRepoArgs {
    /// HTTP(S) URL of the repository.
    pub repo_url: String,
    /// Address of the Argo CD server (e.g. "localhost:8080").
    pub argo_url: String,
}

/// Arguments of `argocd:add-repo-ssh`.
#[derive(Parser, Debug, Default)]
#[command(name = "argocd:add-repo-ssh", no_binary_name = true)]
pub struct RepoSshArgs {
    /// SSH URL of the repository (e.g. "git@github.com:org/repo.git").
    pub repo_url: String,
    /// Path to the SSH private key.
    pub ssh_key_path: String,
    /// Address of the Argo CD server (e.g. "localhost:8080").
    pub argo_url: String,
}

/// Arguments of `argocd:create-app`.
#[derive(Parser, Debug, Default)]
#[command(name = "argocd:create-app", no_binary_name = true)]
pub struct CreateAppArgs {
    /// Name of the application.
    pub app_name: String,
    /// Directory inside the repository holding the manifests.
    pub path: String,
    /// Repository holding the manifests.
    pub repo_url: String,
    /// Namespace the application is deployed into.
    pub namespace: String,
}

/// Arguments of `argocd:create-app-manifest`.
#[derive(Parser, Debug, Default)]
#[command(name = "argocd:create-app-manifest", no_binary_name = true)]
pub struct ManifestArgs {
    /// Path to an Argo CD `Application` manifest.
    pub manifest_path: String,
}
