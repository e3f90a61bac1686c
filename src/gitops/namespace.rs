// src/gitops/namespace.rs

use super::GitOpsError;
use crate::system::executor::{CommandRunner, ExecutionError, ExecutionRequest};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NAMESPACE_NAME: Regex =
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("namespace pattern is valid");
}

const MAX_NAMESPACE_LEN: usize = 63;

/// Checks `name` against the Kubernetes rules for namespace names (RFC 1123 labels).
pub fn validate_namespace(name: &str) -> Result<(), GitOpsError> {
    if name.len() <= MAX_NAMESPACE_LEN && NAMESPACE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(GitOpsError::InvalidNamespace(name.to_string()))
    }
}

/// Returns `true` if `output` is kubectl's `AlreadyExists` report for exactly `namespace`.
///
/// kubectl exits with status 1 for every server-side error, so the rendered reason is the only
/// signal. The quotes around the name keep `argo` from matching a message about `argocd`.
pub fn is_already_exists(output: &str, namespace: &str) -> bool {
    let expected = format!("namespaces \"{}\" already exists", namespace);
    output.contains(&expected)
}

/// Creates `namespace`, treating "already exists" for that same namespace as success.
pub fn create_namespace(
    namespace: &str,
    runner: &impl CommandRunner,
) -> Result<String, GitOpsError> {
    validate_namespace(namespace)?;

    let request = ExecutionRequest::new("kubectl").args(["create", "namespace", namespace]);
    match runner.execute(&request) {
        Ok(output) => Ok(output),
        Err(ExecutionError::NonZeroExitStatus { output, .. })
            if is_already_exists(&output, namespace) =>
        {
            log::debug!("Namespace '{}' already exists, continuing.", namespace);
            Ok(output)
        }
        Err(source) => Err(GitOpsError::Namespace {
            namespace: namespace.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::executor::testing::{RecordingRunner, failure};

    const ARGOCD_EXISTS: &str =
        "Error from server (AlreadyExists): namespaces \"argocd\" already exists\n";

    #[test]
    fn test_create_namespace_issues_kubectl_create() {
        let runner = RecordingRunner::with_responses([Ok("namespace/argocd created\n".into())]);

        let output = create_namespace("argocd", &runner).unwrap();

        assert_eq!(output, "namespace/argocd created\n");
        assert_eq!(
            runner.calls()[0].display_line(),
            "kubectl create namespace argocd"
        );
    }

    #[test]
    fn test_existing_namespace_is_success() {
        let runner = RecordingRunner::with_responses([Err(failure("kubectl", ARGOCD_EXISTS))]);

        let output = create_namespace("argocd", &runner).unwrap();

        assert_eq!(output, ARGOCD_EXISTS);
    }

    #[test]
    fn test_already_exists_for_another_namespace_is_an_error() {
        let runner = RecordingRunner::with_responses([Err(failure("kubectl", ARGOCD_EXISTS))]);

        let err = create_namespace("argo", &runner).unwrap_err();

        match err {
            GitOpsError::Namespace { namespace, source } => {
                assert_eq!(namespace, "argo");
                assert_eq!(source.output(), ARGOCD_EXISTS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_failures_propagate_with_output() {
        let runner = RecordingRunner::with_responses([Err(failure(
            "kubectl",
            "The connection to the server localhost:8080 was refused",
        ))]);

        let err = create_namespace("argocd", &runner).unwrap_err();

        assert!(
            err.execution_error()
                .unwrap()
                .output()
                .contains("connection to the server")
        );
    }

    #[test]
    fn test_invalid_namespace_runs_nothing() {
        let runner = RecordingRunner::new();
        let too_long = "a".repeat(64);

        for name in ["", "Argo", "argo_cd", "-argo", "argo-", too_long.as_str()] {
            let result = create_namespace(name, &runner);
            assert!(matches!(result, Err(GitOpsError::InvalidNamespace(_))), "{name}");
        }
        assert!(runner.calls().is_empty());
        assert!(validate_namespace(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_is_already_exists_matching() {
        assert!(is_already_exists(ARGOCD_EXISTS, "argocd"));
        assert!(!is_already_exists(ARGOCD_EXISTS, "argo"));
        assert!(!is_already_exists("", "argocd"));
    }
}
