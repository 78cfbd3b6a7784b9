//! Terminal output.
//!
//! The installer is non-interactive, so this is a thin layer: an output
//! mode, styled status lines, and a download progress bar.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including command output.
    Verbose,
    /// Show stage progress and status only.
    #[default]
    Normal,
    /// Show nothing except errors.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows command output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Output writer that respects output mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Announce a stage starting.
    pub fn stage(&self, index: usize, total: usize, name: &str) {
        if self.mode.shows_status() {
            println!(
                "{} {}",
                style(format!("[{}/{}]", index, total)).bold().dim(),
                name
            );
        }
    }

    /// Write a status line.
    pub fn status(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("  {}", msg);
        }
    }

    /// Write a success line.
    pub fn success(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{} {}", style("✓").green().bold(), msg);
        }
    }

    /// Write an error line to stderr. Always shown.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", style("✗").red().bold(), msg);
    }
}

/// Create a progress bar for a download of known size, or a spinner when
/// the server sends no length.
pub fn download_bar(total: Option<u64>, artifact: &str) -> ProgressBar {
    let bar = match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template(
                    "{msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{msg} {spinner} {bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar
        }
    };
    bar.set_message(artifact.to_string());
    bar
}
