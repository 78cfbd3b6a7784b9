//! CLI argument definitions.
//!
//! The top-level flags are the installer surface: running with no
//! subcommand provisions the environment, matching the shell installer
//! this replaces. `resolve` and `completions` are subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// loki-setup - Provision the Loki development environment.
#[derive(Debug, Parser)]
#[command(name = "loki-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Load ECMWF workstation toolchain modules and proxy configuration
    #[arg(long)]
    pub ecmwf: bool,

    /// Reuse an existing virtual environment instead of creating one
    #[arg(long, value_name = "PATH")]
    pub use_venv: Option<PathBuf>,

    /// Download and install a pinned JDK into the environment
    #[arg(long)]
    pub with_jdk: bool,

    /// Download and install Apache Ant into the environment
    #[arg(long)]
    pub with_ant: bool,

    /// Clone and build the CLAW/OMNI Fortran compiler
    #[arg(long)]
    pub with_claw: bool,

    /// Enable the experimental Maxeler simulator toolchain (requires --ecmwf)
    #[arg(long)]
    pub with_max: bool,

    /// Print the stage plan without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output, including command output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve Loki tools as imported build targets
    Resolve(ResolveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output formats for the `resolve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ResolveFormat {
    /// Human-readable listing
    #[default]
    Plain,
    /// JSON array of targets
    Json,
    /// CMake include fragment of imported targets
    Cmake,
}

impl std::fmt::Display for ResolveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Cmake => write!(f, "cmake"),
        }
    }
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    /// Logical tool names to register (defaults to the Loki tool set)
    pub tools: Vec<String>,

    /// Assume tools already exist on the system search path
    #[arg(long)]
    pub no_install: bool,

    /// Venv bin directory for managed resolution
    /// (defaults to <project>/loki_env/bin)
    #[arg(long, value_name = "DIR")]
    pub venv_bin: Option<PathBuf>,

    /// CLAW feature enabled: resolve clawfc into the venv and record the
    /// ordering dependency from the driver onto it
    #[arg(long)]
    pub with_claw: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = ResolveFormat::Plain)]
    pub format: ResolveFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
