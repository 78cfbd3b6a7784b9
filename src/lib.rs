//! loki-setup - Environment provisioning for the Loki Fortran toolchain.
//!
//! loki-setup replaces Loki's ad-hoc `install` shell script with a single
//! binary that provisions a Python virtual environment, optionally installs
//! pinned third-party components (JDK, Apache Ant, the CLAW/OMNI compiler),
//! patches the Open Fortran Parser package, and writes an activation
//! script. It also resolves Loki's command-line scripts as imported build
//! targets for the CMake build graph.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`installer`] - The sequential provisioning pipeline
//! - [`net`] - Pinned archive downloads
//! - [`resolver`] - Imported-target resolution for the build graph
//! - [`shell`] - Shell command execution with an explicit environment context
//! - [`ui`] - Terminal output and progress bars
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use loki_setup::resolver::{ResolveMode, ToolRegistry, LOKI_TOOLS};
//!
//! // Resolve the Loki tools into a managed venv's bin directory.
//! let mut registry = ToolRegistry::new();
//! let mode = ResolveMode::Managed { venv_bin: PathBuf::from("/opt/loki_env/bin") };
//! registry.register_tools(LOKI_TOOLS.iter().copied(), &mode);
//!
//! let target = registry.get("loki-transform.py").unwrap();
//! assert_eq!(target.location.as_deref(),
//!            Some(std::path::Path::new("/opt/loki_env/bin/loki-transform.py")));
//! ```

pub mod cli;
pub mod error;
pub mod installer;
pub mod net;
pub mod resolver;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
