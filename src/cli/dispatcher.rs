// src/cli/dispatcher.rs

use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::cli::handlers::{self, commons::TaskContext};

// --- Target Definition and Registry ---

/// How a target runs: on its own, or against the loaded configuration.
#[derive(Clone, Copy)]
enum TargetHandler {
    Standalone(fn(Vec<String>) -> Result<()>),
    WithContext(fn(Vec<String>, &TaskContext) -> Result<()>),
}

/// Defines a target, its aliases, its one-line description and its handler.
struct TargetDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    handler: TargetHandler,
}

/// The single source of truth for all targets, in listing order.
static TARGET_REGISTRY: &[TargetDefinition] = &[
    TargetDefinition {
        name: "build",
        aliases: &[],
        description: t!("target.build"),
        handler: TargetHandler::WithContext(handlers::go::handle_build),
    },
    TargetDefinition {
        name: "test",
        aliases: &[],
        description: t!("target.test"),
        handler: TargetHandler::WithContext(handlers::go::handle_test),
    },
    TargetDefinition {
        name: "clean",
        aliases: &[],
        description: t!("target.clean"),
        handler: TargetHandler::WithContext(handlers::go::handle_clean),
    },
    TargetDefinition {
        name: "init",
        aliases: &[],
        description: t!("target.init"),
        handler: TargetHandler::WithContext(handlers::init::handle),
    },
    TargetDefinition {
        name: "list",
        aliases: &["ls"],
        description: t!("target.list"),
        handler: TargetHandler::Standalone(handle_list),
    },
    TargetDefinition {
        name: "argocd:install",
        aliases: &[],
        description: t!("target.argocd.install"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_install),
    },
    TargetDefinition {
        name: "argocd:port-forward",
        aliases: &["argocd:pf"],
        description: t!("target.argocd.port_forward"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_port_forward),
    },
    TargetDefinition {
        name: "argocd:admin-password",
        aliases: &[],
        description: t!("target.argocd.admin_password"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_admin_password),
    },
    TargetDefinition {
        name: "argocd:login",
        aliases: &[],
        description: t!("target.argocd.login"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_login),
    },
    TargetDefinition {
        name: "argocd:add-host-ssh-cert",
        aliases: &[],
        description: t!("target.argocd.add_host_ssh_cert"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_add_host_ssh_cert),
    },
    TargetDefinition {
        name: "argocd:add-github-ssh-cert",
        aliases: &[],
        description: t!("target.argocd.add_github_ssh_cert"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_add_github_ssh_cert),
    },
    TargetDefinition {
        name: "argocd:add-repo-ssh-creds",
        aliases: &[],
        description: t!("target.argocd.add_repo_ssh_creds"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_add_repo_ssh_creds),
    },
    TargetDefinition {
        name: "argocd:add-github-ssh-creds",
        aliases: &[],
        description: t!("target.argocd.add_github_ssh_creds"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_add_github_ssh_creds),
    },
    TargetDefinition {
        name: "argocd:add-http-repo",
        aliases: &[],
        description: t!("target.argocd.add_http_repo"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_add_http_repo),
    },
    TargetDefinition {
        name: "argocd:add-repo-ssh",
        aliases: &[],
        description: t!("target.argocd.add_repo_ssh"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_add_repo_ssh),
    },
    TargetDefinition {
        name: "argocd:create-app",
        aliases: &[],
        description: t!("target.argocd.create_app"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_create_app),
    },
    TargetDefinition {
        name: "argocd:create-app-manifest",
        aliases: &[],
        description: t!("target.argocd.create_app_manifest"),
        handler: TargetHandler::WithContext(handlers::argocd::handle_create_app_manifest),
    },
    TargetDefinition {
        name: "workflows:install",
        aliases: &[],
        description: t!("target.workflows.install"),
        handler: TargetHandler::WithContext(handlers::workflows::handle_install),
    },
    TargetDefinition {
        name: "workflows:server",
        aliases: &[],
        description: t!("target.workflows.server"),
        handler: TargetHandler::WithContext(handlers::workflows::handle_server),
    },
    TargetDefinition {
        name: "workflows:port-forward",
        aliases: &["workflows:pf"],
        description: t!("target.workflows.port_forward"),
        handler: TargetHandler::WithContext(handlers::workflows::handle_port_forward),
    },
];

/// Finds a target definition in the registry by its name or alias.
fn find_target(name: &str) -> Option<&'static TargetDefinition> {
    TARGET_REGISTRY
        .iter()
        .find(|target| target.name == name || target.aliases.contains(&name))
}

/// Runs `target` with `args`. Without a target, lists every available target.
///
/// `load_context` is only called for targets that need the configuration, so listing targets
/// works even when `tasks.toml` is broken.
pub fn dispatch(
    target: Option<String>,
    args: Vec<String>,
    load_context: impl FnOnce(&str) -> Result<TaskContext>,
) -> Result<()> {
    log::debug!("Dispatching target {:?} with args: {:?}", target, args);

    let Some(name) = target else {
        print_targets();
        return Ok(());
    };

    let definition = find_target(&name)
        .ok_or_else(|| anyhow!(t!("cli.error.unknown_target"), target = name))?;

    match definition.handler {
        TargetHandler::Standalone(handler) => handler(args),
        TargetHandler::WithContext(handler) => handler(args, &load_context(definition.name)?),
    }
}

fn handle_list(args: Vec<String>) -> Result<()> {
    let _: crate::cli::args::NoArgs = handlers::commons::parse_target_args(&args)?;
    print_targets();
    Ok(())
}

fn print_targets() {
    println!("{}", t!("cli.info.available_targets").yellow().bold());
    let width = TARGET_REGISTRY
        .iter()
        .map(|target| target.name.len())
        .max()
        .unwrap_or_default();

    for target in TARGET_REGISTRY {
        println!(
            "  {}  {}",
            format!("{:<width$}", target.name, width = width).cyan().bold(),
            target.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_target_by_name_and_alias() {
        assert_eq!(find_target("build").map(|t| t.name), Some("build"));
        assert_eq!(
            find_target("argocd:pf").map(|t| t.name),
            Some("argocd:port-forward")
        );
        assert!(find_target("argocd:uninstall").is_none());
    }

    #[test]
    fn test_names_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for target in TARGET_REGISTRY {
            assert!(seen.insert(target.name), "duplicate name {}", target.name);
            for alias in target.aliases {
                assert!(seen.insert(*alias), "duplicate alias {}", alias);
            }
        }
    }

    fn broken_config(_: &str) -> Result<TaskContext> {
        Err(anyhow!("tasks.toml is broken"))
    }

    #[test]
    fn test_listing_does_not_load_the_configuration() {
        assert!(dispatch(None, vec![], broken_config).is_ok());
        assert!(dispatch(Some("list".to_string()), vec![], broken_config).is_ok());
        assert!(dispatch(Some("ls".to_string()), vec![], broken_config).is_ok());
    }

    #[test]
    fn test_unknown_target_fails_before_loading_the_configuration() {
        let err = dispatch(Some("argocd:uninstall".to_string()), vec![], |_| {
            panic!("configuration must not be loaded")
        })
        .unwrap_err();

        assert!(err.to_string().contains("argocd:uninstall"));
    }

    #[test]
    fn test_configured_targets_load_the_configuration_by_canonical_name() {
        let mut requested = None;

        let err = dispatch(Some("argocd:pf".to_string()), vec![], |name| {
            requested = Some(name.to_string());
            broken_config(name)
        })
        .unwrap_err();

        assert_eq!(requested.as_deref(), Some("argocd:port-forward"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_every_target_has_a_description() {
        assert!(TARGET_REGISTRY.iter().all(|t| !t.description.is_empty()));
    }
}
