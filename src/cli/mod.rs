//! Command-line interface for loki-setup.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations behind the [`Command`] trait

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ResolveArgs, ResolveFormat};
pub use commands::{Command, CommandDispatcher, CommandResult};
