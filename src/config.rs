//! Run options for an organizing pass.
//!
//! There is no configuration file: options come from command-line flags and
//! from the shells, and logging verbosity from `RUST_LOG`.

use crate::target::current_program_path;
use std::path::PathBuf;

/// Options controlling a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeOptions {
    /// Report planned moves without creating folders or moving files.
    pub dry_run: bool,
    /// Entries resolving to this path are never moved. `None` disables the check.
    pub self_path: Option<PathBuf>,
}

impl OrganizeOptions {
    /// Options for the running program: no dry run, and the executable itself
    /// is protected from relocation.
    pub fn for_current_program() -> Self {
        Self {
            dry_run: false,
            self_path: current_program_path(),
        }
    }

    /// Sets the dry-run flag.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the path that must never be moved.
    pub fn with_self_path(mut self, self_path: Option<PathBuf>) -> Self {
        self.self_path = self_path;
        self
    }
}
