//! CMake rendering of the tool registry.
//!
//! The build graph consumes the registry as an include fragment of
//! imported targets. Unresolved tools render with an empty
//! `IMPORTED_LOCATION` so that configuration succeeds and failure is
//! deferred to the rule that invokes the target.

use super::registry::ToolRegistry;

/// Render the registry as a CMake include fragment.
pub fn render(registry: &ToolRegistry) -> String {
    let mut out = String::from("# Generated by loki-setup. Do not edit.\n");

    for target in registry.targets() {
        let location = target
            .location
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "\nif( NOT TARGET {name} )\n    \
             add_executable( {name} IMPORTED GLOBAL )\n    \
             set_target_properties( {name} PROPERTIES IMPORTED_LOCATION \"{location}\" )\nendif()\n",
            name = target.name,
            location = location,
        ));
    }

    for target in registry.targets() {
        for dep in &target.depends_on {
            out.push_str(&format!(
                "\nadd_dependencies( {} {} )\n",
                target.name, dep
            ));
        }
    }

    out
}
