//! Imported tool targets.

use serde::Serialize;
use std::path::PathBuf;

/// How a tool target's location was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    /// Located by searching the system `PATH`.
    SearchPath,
    /// Assumed at a fixed location inside the managed venv's `bin` directory.
    VenvBin,
}

impl std::fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SearchPath => write!(f, "search-path"),
            Self::VenvBin => write!(f, "venv-bin"),
        }
    }
}

/// An imported build target for an externally-produced executable.
///
/// `location` is `None` when a search-path lookup found nothing. This is
/// not an error: the target stays registered as a dangling reference and
/// fails only when the build graph invokes it.
#[derive(Debug, Clone, Serialize)]
pub struct ToolTarget {
    /// Logical tool name, unique within a registry.
    pub name: String,

    /// Resolved filesystem path, absent if the lookup missed.
    pub location: Option<PathBuf>,

    /// Strategy that produced (or failed to produce) the location.
    pub strategy: ResolutionStrategy,

    /// Names of targets that must be available before this one runs.
    pub depends_on: Vec<String>,
}

impl ToolTarget {
    /// Create a target with no dependencies.
    pub fn new(
        name: impl Into<String>,
        location: Option<PathBuf>,
        strategy: ResolutionStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            strategy,
            depends_on: Vec::new(),
        }
    }

    /// Whether the target has a resolved location.
    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_display_matches_wire_names() {
        assert_eq!(ResolutionStrategy::SearchPath.to_string(), "search-path");
        assert_eq!(ResolutionStrategy::VenvBin.to_string(), "venv-bin");
    }

    #[test]
    fn unresolved_target_is_not_an_error() {
        let target = ToolTarget::new("clawfc", None, ResolutionStrategy::SearchPath);
        assert!(!target.is_resolved());
        assert!(target.depends_on.is_empty());
    }
}
