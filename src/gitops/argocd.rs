// src/gitops/argocd.rs

use super::{GitOpsError, namespace, run_step};
use crate::{
    constants::{ARGOCD_MANIFEST_URL, GITHUB_HOST, IN_CLUSTER_SERVER},
    core::paths,
    models::ArgoCdConfig,
    system::{
        executor::{CommandRunner, ExecutionRequest},
        shell,
    },
};

/// The install manifest URL for the configured release.
pub fn manifest_url(config: &ArgoCdConfig) -> String {
    ARGOCD_MANIFEST_URL.replace("{version}", &config.version)
}

/// The local URL the Argo CD UI is reachable at while `port_forward` runs.
pub fn local_url(config: &ArgoCdConfig) -> String {
    format!("https://localhost:{}", config.port_forward_port)
}

/// Creates the Argo CD namespace and applies the release manifest.
pub fn install(config: &ArgoCdConfig, runner: &impl CommandRunner) -> Result<String, GitOpsError> {
    let mut transcript = namespace::create_namespace(&config.namespace, runner)?;

    let apply = ExecutionRequest::new("kubectl").args([
        "apply",
        "-n",
        config.namespace.as_str(),
        "-f",
        manifest_url(config).as_str(),
    ]);
    transcript.push_str(&run_step(runner, "deploy Argo CD", apply)?);
    Ok(transcript)
}

/// Forwards the local port to `svc/argocd-server`. Blocks until kubectl exits.
pub fn port_forward(
    config: &ArgoCdConfig,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let request = ExecutionRequest::new("kubectl").args([
        "port-forward".to_string(),
        "svc/argocd-server".to_string(),
        "-n".to_string(),
        config.namespace.clone(),
        format!("{}:443", config.port_forward_port),
    ]);
    run_step(runner, "port-forward svc/argocd-server", request)
}

/// Reads the initial admin password. Only the first line of the CLI output is the password.
pub fn admin_password(
    config: &ArgoCdConfig,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let request = ExecutionRequest::new("argocd").args([
        "admin",
        "initial-password",
        "-n",
        config.namespace.as_str(),
    ]);
    let output = run_step(runner, "fetch the admin credentials", request)?;

    output
        .lines()
        .next()
        .map(str::trim)
        .filter(|password| !password.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GitOpsError::EmptyPassword(config.namespace.clone()))
}

/// Logs the CLI in as `admin` through the forwarded port.
pub fn login(config: &ArgoCdConfig, runner: &impl CommandRunner) -> Result<String, GitOpsError> {
    let password = admin_password(config, runner)?;

    let request = ExecutionRequest::new("argocd").args([
        "login".to_string(),
        "--username".to_string(),
        "admin".to_string(),
        "--password".to_string(),
        password,
        "--insecure".to_string(),
        format!("localhost:{}", config.port_forward_port),
    ]);
    run_step(runner, "log in", request)
}

/// Registers the SSH host keys of `hostname` with Argo CD.
///
/// This is the one command that needs a shell: `ssh-keyscan` output is piped into
/// `argocd cert add-ssh`. The host name is quoted before it reaches the shell line.
pub fn add_host_ssh_cert(
    hostname: &str,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let line = format!(
        "{} | argocd cert add-ssh --batch",
        shell::join_quoted(["ssh-keyscan", hostname])?
    );
    run_step(runner, "add the ssh host cert", ExecutionRequest::shell(line))
}

/// Logs in, then registers GitHub's SSH host keys.
pub fn add_github_ssh_cert(
    config: &ArgoCdConfig,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let mut transcript = login(config, runner)?;
    transcript.push_str(&add_host_ssh_cert(GITHUB_HOST, runner)?);
    Ok(transcript)
}

/// Adds an SSH credential template for every repository under `repo_url`.
pub fn add_repo_ssh_creds(
    repo_url: &str,
    ssh_key_path: &str,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let key_path = paths::expand_user_path_arg(ssh_key_path)?;
    let request = ExecutionRequest::new("argocd").args([
        "repocreds",
        "add",
        repo_url,
        "--ssh-private-key-path",
        key_path.as_str(),
    ]);
    run_step(runner, "add repocreds", request)
}

/// [`add_repo_ssh_creds`] for `git@github.com` with the configured key.
pub fn add_github_ssh_creds(
    config: &ArgoCdConfig,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    add_repo_ssh_creds(
        &format!("git@{}", GITHUB_HOST),
        &config.ssh_key_path,
        runner,
    )
}

/// Adds an HTTP(S) repository through the Argo CD server at `argo_url`.
pub fn add_http_repo(
    repo_url: &str,
    argo_url: &str,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let request =
        ExecutionRequest::new("argocd").args(["repo", "add", repo_url, "--server", argo_url]);
    run_step(runner, "add the repository", request)
}

/// Adds an SSH repository authenticated with the private key at `ssh_key_path`.
pub fn add_repo_ssh(
    repo_url: &str,
    ssh_key_path: &str,
    argo_url: &str,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let key_path = paths::expand_user_path_arg(ssh_key_path)?;
    let request = ExecutionRequest::new("argocd").args([
        "repo",
        "add",
        repo_url,
        "--ssh-private-key-path",
        key_path.as_str(),
        "--server",
        argo_url,
    ]);
    run_step(runner, "add the repository", request)
}

/// Parameters of an application created through the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSpec<'a> {
    /// Application name.
    pub name: &'a str,
    /// Directory inside the repository holding the manifests.
    pub path: &'a str,
    /// Repository the manifests are read from.
    pub repo_url: &'a str,
    /// Namespace the application is deployed into.
    pub dest_namespace: &'a str,
}

/// Creates an application that syncs `spec.path` of `spec.repo_url` into the local cluster.
pub fn create_app(spec: &AppSpec<'_>, runner: &impl CommandRunner) -> Result<String, GitOpsError> {
    let request = ExecutionRequest::new("argocd").args([
        "app",
        "create",
        spec.name,
        "--repo",
        spec.repo_url,
        "--path",
        spec.path,
        "--dest-server",
        IN_CLUSTER_SERVER,
        "--dest-namespace",
        spec.dest_namespace,
    ]);
    run_step(runner, "add the application", request)
}

/// Creates an application from an `Application` manifest file.
pub fn create_app_manifest(
    manifest_path: &str,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let request = ExecutionRequest::new("kubectl").args(["apply", "-f", manifest_path]);
    run_step(runner, "add the application", request)
}
