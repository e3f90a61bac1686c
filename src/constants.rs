// src/constants.rs

/// The name of the task configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "tasks.toml";

/// Environment toggles that enable debug logging of every executed command (value `1`).
pub const DEBUG_ENV_VARS: [&str; 2] = ["MAGEFILE_DEBUG", "MAGEFILE_VERBOSE"];

/// The Go toolchain binary used for builds and tests.
pub const GO_BINARY: &str = "go";

/// Kubernetes API server address as seen from inside the cluster.
pub const IN_CLUSTER_SERVER: &str = "https://kubernetes.default.svc";

/// Host whose SSH keys and credentials have dedicated targets.
pub const GITHUB_HOST: &str = "github.com";

/// The Argo CD manifest URL template; `{version}` is a release tag or `stable`.
pub const ARGOCD_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/argoproj/argo-cd/{version}/manifests/install.yaml";

/// The Argo Workflows manifest URL template; `{version}` is a release tag.
pub const ARGO_WORKFLOWS_MANIFEST_URL: &str =
    "https://github.com/argoproj/argo-workflows/releases/download/{version}/install.yaml";
