//! Build-target resolution for Loki's executable scripts.
//!
//! The downstream CMake build graph consumes Loki's command-line scripts
//! (`loki-transform.py`, `loki-lint.py`) and optionally the CLAW compiler
//! driver (`clawfc`) as imported targets. This module reimplements the
//! resolution macro: each logical tool name is registered exactly once,
//! either by searching the system `PATH` (no-install mode) or by pointing
//! at a fixed location inside the managed virtual environment's `bin`
//! directory.
//!
//! Resolution never fails at registration time. A tool that cannot be
//! found registers with an empty location; the error surfaces only when
//! the build graph actually invokes the missing target. Downstream
//! consumers rely on this deferral, so it is preserved deliberately.

pub mod cmake;
pub mod registry;
pub mod search;
pub mod target;

pub use registry::{ResolveMode, ToolRegistry};
pub use search::{is_executable, parse_system_path, resolve_tool_path};
pub use target::{ResolutionStrategy, ToolTarget};

/// Loki command-line scripts registered for the build graph.
pub const LOKI_TOOLS: &[&str] = &["loki-transform.py", "loki-lint.py"];

/// The driver script that owns the ordering dependency on CLAW.
pub const PRIMARY_TOOL: &str = "loki-transform.py";

/// The CLAW compiler driver, resolved separately from the Loki scripts.
pub const CLAW_TOOL: &str = "clawfc";
