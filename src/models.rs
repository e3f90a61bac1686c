// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

// --- `tasks.toml` MODELS ---

/// The whole task configuration file. Every section is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TasksConfig {
    /// `[project]`: the Go project to build.
    pub project: ProjectConfig,
    /// `[argocd]`
    pub argocd: ArgoCdConfig,
    /// `[workflows]`
    pub workflows: ArgoWorkflowsConfig,
}

/// Describes the Go project to cross-compile.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Build identifier, used as the artifact name prefix. Required by `build`.
    pub project_name: String,
    /// Directory the artifacts are written to.
    pub output_dir: PathBuf,
    /// Value of `CGO_ENABLED` for every build and test run.
    pub cgo_enabled: bool,
    /// Linker symbol overrides (`-X key=value`). Sorted by key so builds log deterministically.
    pub ld_flags: BTreeMap<String, String>,
    /// `GOOS` values, the outer loop of the matrix.
    pub os_types: Vec<String>,
    /// `GOARCH` values, the inner loop of the matrix.
    pub arch_types: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            output_dir: PathBuf::from("bin"),
            cgo_enabled: false,
            ld_flags: BTreeMap::new(),
            os_types: vec!["linux".to_string()],
            arch_types: vec!["amd64".to_string()],
        }
    }
}

impl ProjectConfig {
    /// Creates a configuration with the given name and every other field at its default.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    /// Every (os, arch) pair, `os_types` outer and `arch_types` inner, in declared order.
    pub fn targets(&self) -> impl Iterator<Item = BuildTarget> + '_ {
        self.os_types.iter().flat_map(move |os| {
            self.arch_types
                .iter()
                .map(move |arch| BuildTarget::new(os.clone(), arch.clone()))
        })
    }
}

/// Deployment parameters for Argo CD.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ArgoCdConfig {
    /// Namespace Argo CD is installed into.
    pub namespace: String,
    /// Release tag of the install manifest. `stable` tracks the latest release.
    pub version: String,
    /// Local port forwarded to `svc/argocd-server`.
    pub port_forward_port: String,
    /// Private key used for the GitHub repository credentials. `~` and `$VAR` are expanded.
    pub ssh_key_path: String,
}

impl Default for ArgoCdConfig {
    fn default() -> Self {
        Self {
            namespace: "argocd".to_string(),
            version: "v2.11.3".to_string(),
            port_forward_port: "8080".to_string(),
            ssh_key_path: "~/.ssh/id_rsa".to_string(),
        }
    }
}

/// Deployment parameters for Argo Workflows.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ArgoWorkflowsConfig {
    /// Namespace Argo Workflows is installed into.
    pub namespace: String,
    /// Release tag of the install manifest.
    pub version: String,
    /// Local port forwarded to `svc/argo-server`.
    pub port_forward_port: String,
}

impl Default for ArgoWorkflowsConfig {
    fn default() -> Self {
        Self {
            namespace: "argo".to_string(),
            version: "v3.5.10".to_string(),
            port_forward_port: "2746".to_string(),
        }
    }
}

// --- BUILD MATRIX MODELS ---

/// One cross-compilation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTarget {
    /// `GOOS`
    pub os: String,
    /// `GOARCH`
    pub arch: String,
}

impl BuildTarget {
    /// Creates a target from its `GOOS` and `GOARCH` values.
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The artifact file name for this target: `<project>-<os>-<arch>`.
    pub fn artifact_name(&self, project_name: &str) -> String {
        format!("{}-{}-{}", project_name, self.os, self.arch)
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
