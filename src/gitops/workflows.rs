// src/gitops/workflows.rs

use super::{GitOpsError, namespace, run_step};
use crate::{
    constants::ARGO_WORKFLOWS_MANIFEST_URL,
    models::ArgoWorkflowsConfig,
    system::executor::{CommandRunner, ExecutionRequest},
};

/// Port the `argo-server` service listens on inside the cluster.
const ARGO_SERVER_PORT: u16 = 2746;

/// The install manifest URL for the configured release.
pub fn manifest_url(config: &ArgoWorkflowsConfig) -> String {
    ARGO_WORKFLOWS_MANIFEST_URL.replace("{version}", &config.version)
}

/// The local URL the Argo Workflows UI is reachable at while `port_forward` runs.
pub fn local_url(config: &ArgoWorkflowsConfig) -> String {
    format!("https://localhost:{}", config.port_forward_port)
}

/// Creates the Argo Workflows namespace and applies the release manifest.
pub fn install(
    config: &ArgoWorkflowsConfig,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let mut transcript = namespace::create_namespace(&config.namespace, runner)?;

    let apply = ExecutionRequest::new("kubectl").args([
        "apply",
        "-n",
        config.namespace.as_str(),
        "-f",
        manifest_url(config).as_str(),
    ]);
    transcript.push_str(&run_step(runner, "deploy Argo Workflows", apply)?);
    Ok(transcript)
}

/// Runs `argo server` locally in server auth mode. Blocks until it exits.
pub fn server(
    config: &ArgoWorkflowsConfig,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let request = ExecutionRequest::new("argo").args([
        "server",
        "--namespace",
        config.namespace.as_str(),
        "--auth-mode=server",
    ]);
    run_step(runner, "start the argo-server", request)
}

/// Forwards the configured local port to `svc/argo-server`. Blocks until kubectl exits.
pub fn port_forward(
    config: &ArgoWorkflowsConfig,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    let request = ExecutionRequest::new("kubectl").args([
        "port-forward".to_string(),
        "svc/argo-server".to_string(),
        "-n".to_string(),
        config.namespace.clone(),
        format!("{}:{}", config.port_forward_port, ARGO_SERVER_PORT),
    ]);
    run_step(runner, "port-forward svc/argo-server", request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::executor::testing::{RecordingRunner, failure};

    #[test]
    fn test_install_applies_release_manifest() {
        let runner = RecordingRunner::new();

        install(&ArgoWorkflowsConfig::default(), &runner).unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].display_line(), "kubectl create namespace argo");
        assert_eq!(
            calls[1].display_line(),
            "kubectl apply -n argo -f https://github.com/argoproj/argo-workflows/releases/download/v3.5.10/install.yaml"
        );
    }

    #[test]
    fn test_install_namespace_failure_skips_apply() {
        let runner = RecordingRunner::with_responses([Err(failure("kubectl", "forbidden"))]);

        let err = install(&ArgoWorkflowsConfig::default(), &runner).unwrap_err();

        assert_eq!(runner.calls().len(), 1);
        assert!(matches!(err, GitOpsError::Namespace { ref namespace, .. } if namespace == "argo"));
    }

    #[test]
    fn test_server_and_port_forward() {
        let config = ArgoWorkflowsConfig {
            namespace: "workflows".to_string(),
            port_forward_port: "12746".to_string(),
            ..Default::default()
        };
        let runner = RecordingRunner::new();

        server(&config, &runner).unwrap();
        port_forward(&config, &runner).unwrap();

        let calls = runner.calls();
        assert_eq!(
            calls[0].display_line(),
            "argo server --namespace workflows --auth-mode=server"
        );
        assert_eq!(
            calls[1].display_line(),
            "kubectl port-forward svc/argo-server -n workflows 12746:2746"
        );
        assert_eq!(local_url(&config), "https://localhost:12746");
    }
}
