//! Shell command execution.
//!
//! Every external tool the installer drives (python, pip, git, cmake, ant)
//! runs through this module. Commands execute under a [`ShellContext`] that
//! carries the accumulated environment exports and an optional prelude
//! (e.g. `module load` lines in ECMWF workstation mode), so environment
//! mutation stays an explicit object rather than a process-global side
//! channel.

pub mod command;

pub use command::{execute, execute_check, CommandOptions, CommandResult, ShellContext};
