//! Tool registry with first-registration-wins semantics.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::search::resolve_tool_path;
use super::target::{ResolutionStrategy, ToolTarget};
use super::{CLAW_TOOL, PRIMARY_TOOL};

/// How tool names are turned into locations.
#[derive(Debug, Clone)]
pub enum ResolveMode {
    /// Tools are assumed to exist on the system search path.
    NoInstall { path_entries: Vec<PathBuf> },

    /// Tools live at `<venv_bin>/<name>`; no existence check is performed.
    Managed { venv_bin: PathBuf },
}

impl ResolveMode {
    /// No-install mode over the current process `PATH`.
    pub fn system() -> Self {
        Self::NoInstall {
            path_entries: super::search::parse_system_path(),
        }
    }
}

/// Registry of imported tool targets for one build-configuration pass.
///
/// Registrations are write-once: a name already present is never
/// re-resolved or overwritten, matching the configure-time macro this
/// replaces.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    targets: BTreeMap<String, ToolTarget>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register each name not already present, resolving per `mode`.
    ///
    /// In no-install mode a missing tool registers with an empty location
    /// and a warning; failure is deferred to the point of invocation.
    pub fn register_tools<I, S>(&mut self, names: I, mode: &ResolveMode)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.register_one(name.as_ref(), mode);
        }
    }

    fn register_one(&mut self, name: &str, mode: &ResolveMode) {
        if self.targets.contains_key(name) {
            tracing::debug!(tool = name, "already registered, keeping first registration");
            return;
        }

        let (location, strategy) = match mode {
            ResolveMode::NoInstall { path_entries } => {
                let found = resolve_tool_path(name, path_entries);
                if found.is_none() {
                    tracing::warn!(tool = name, "not found on PATH, registering dangling target");
                }
                (found, ResolutionStrategy::SearchPath)
            }
            ResolveMode::Managed { venv_bin } => {
                (Some(venv_bin.join(name)), ResolutionStrategy::VenvBin)
            }
        };

        tracing::debug!(tool = name, strategy = %strategy, location = ?location, "registered");
        self.targets
            .insert(name.to_string(), ToolTarget::new(name, location, strategy));
    }

    /// Register the CLAW driver (`clawfc`).
    ///
    /// The driver is resolved by search-path lookup whenever no-install
    /// mode is active or the CLAW feature is disabled. With CLAW enabled
    /// in managed mode it resolves into the venv `bin` directory and an
    /// ordering dependency is recorded from the primary driver onto it:
    /// `loki-transform.py` must not run before `clawfc` is available.
    pub fn register_claw(&mut self, mode: &ResolveMode, claw_enabled: bool) {
        let search_fallback = !claw_enabled || matches!(mode, ResolveMode::NoInstall { .. });

        if search_fallback {
            let path_entries = match mode {
                ResolveMode::NoInstall { path_entries } => path_entries.clone(),
                ResolveMode::Managed { .. } => super::search::parse_system_path(),
            };
            self.register_one(CLAW_TOOL, &ResolveMode::NoInstall { path_entries });
            return;
        }

        self.register_one(CLAW_TOOL, mode);
        if let Some(primary) = self.targets.get_mut(PRIMARY_TOOL) {
            if !primary.depends_on.iter().any(|d| d == CLAW_TOOL) {
                primary.depends_on.push(CLAW_TOOL.to_string());
            }
        }
    }

    /// Look up a registered target.
    pub fn get(&self, name: &str) -> Option<&ToolTarget> {
        self.targets.get(name)
    }

    /// All registered targets, ordered by name.
    pub fn targets(&self) -> impl Iterator<Item = &ToolTarget> {
        self.targets.values()
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LOKI_TOOLS;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[test]
    fn managed_mode_joins_venv_bin_without_existence_check() {
        let mut registry = ToolRegistry::new();
        let mode = ResolveMode::Managed {
            venv_bin: PathBuf::from("/a/b"),
        };
        registry.register_tools(["loki-transform.py"], &mode);

        let target = registry.get("loki-transform.py").unwrap();
        assert_eq!(target.location, Some(PathBuf::from("/a/b/loki-transform.py")));
        assert_eq!(target.strategy, ResolutionStrategy::VenvBin);
    }

    #[test]
    fn no_install_miss_registers_dangling_target() {
        let temp = TempDir::new().unwrap();
        let mut registry = ToolRegistry::new();
        let mode = ResolveMode::NoInstall {
            path_entries: vec![temp.path().to_path_buf()],
        };
        registry.register_tools(["loki-lint.py"], &mode);

        let target = registry.get("loki-lint.py").unwrap();
        assert!(target.location.is_none());
        assert_eq!(target.strategy, ResolutionStrategy::SearchPath);
    }

    #[test]
    fn first_registration_wins() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("loki-transform.py"));

        let mut registry = ToolRegistry::new();
        registry.register_tools(
            ["loki-transform.py"],
            &ResolveMode::NoInstall {
                path_entries: vec![temp.path().to_path_buf()],
            },
        );
        let first = registry.get("loki-transform.py").unwrap().location.clone();

        // A second pass in a different mode must not change the location.
        registry.register_tools(
            ["loki-transform.py"],
            &ResolveMode::Managed {
                venv_bin: PathBuf::from("/other/bin"),
            },
        );
        assert_eq!(registry.get("loki-transform.py").unwrap().location, first);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn claw_uses_search_path_when_disabled() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("clawfc"));

        let mut registry = ToolRegistry::new();
        let mode = ResolveMode::Managed {
            venv_bin: PathBuf::from("/venv/bin"),
        };
        registry.register_tools(LOKI_TOOLS.iter().copied(), &mode);
        // Feature disabled: managed mode still falls back to PATH lookup.
        registry.register_claw(
            &ResolveMode::NoInstall {
                path_entries: vec![temp.path().to_path_buf()],
            },
            false,
        );

        let claw = registry.get("clawfc").unwrap();
        assert_eq!(claw.strategy, ResolutionStrategy::SearchPath);
        assert!(registry
            .get("loki-transform.py")
            .unwrap()
            .depends_on
            .is_empty());
    }

    #[test]
    fn claw_uses_search_path_in_no_install_mode_even_when_enabled() {
        let temp = TempDir::new().unwrap();
        let mut registry = ToolRegistry::new();
        let mode = ResolveMode::NoInstall {
            path_entries: vec![temp.path().to_path_buf()],
        };
        registry.register_tools(LOKI_TOOLS.iter().copied(), &mode);
        registry.register_claw(&mode, true);

        let claw = registry.get("clawfc").unwrap();
        assert_eq!(claw.strategy, ResolutionStrategy::SearchPath);
        assert!(claw.location.is_none());
    }

    #[test]
    fn claw_enabled_managed_mode_records_ordering_dependency() {
        let mut registry = ToolRegistry::new();
        let mode = ResolveMode::Managed {
            venv_bin: PathBuf::from("/venv/bin"),
        };
        registry.register_tools(LOKI_TOOLS.iter().copied(), &mode);
        registry.register_claw(&mode, true);

        let claw = registry.get("clawfc").unwrap();
        assert_eq!(claw.location, Some(PathBuf::from("/venv/bin/clawfc")));
        assert_eq!(claw.strategy, ResolutionStrategy::VenvBin);

        let primary = registry.get("loki-transform.py").unwrap();
        assert_eq!(primary.depends_on, vec!["clawfc".to_string()]);
    }

    #[test]
    fn claw_dependency_not_duplicated_on_repeat_call() {
        let mut registry = ToolRegistry::new();
        let mode = ResolveMode::Managed {
            venv_bin: PathBuf::from("/venv/bin"),
        };
        registry.register_tools(LOKI_TOOLS.iter().copied(), &mode);
        registry.register_claw(&mode, true);
        registry.register_claw(&mode, true);

        assert_eq!(
            registry.get("loki-transform.py").unwrap().depends_on.len(),
            1
        );
    }
}
