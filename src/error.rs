//! Error types shared by the organizer and the invocation shells.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while organizing a directory.
///
/// Only [`OrganizeError::InvalidTarget`] and [`OrganizeError::HomeDirUnavailable`]
/// stop a pass before it starts. Every other variant is scoped to a single
/// entry and is recovered by the organizer.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The supplied path does not resolve to an existing directory.
    #[error("The path '{}' is not a valid directory.", path.display())]
    InvalidTarget { path: PathBuf },

    /// A `~` shorthand was used but no home directory could be determined.
    #[error("Cannot expand '{input}': home directory is unknown")]
    HomeDirUnavailable { input: String },

    /// The target validated but could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create a destination folder.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Something other than a directory already occupies the destination folder name.
    #[error("{} exists and is not a directory", path.display())]
    DestinationNotADirectory { path: PathBuf },

    /// A file with the same name is already inside the destination folder.
    #[error("{} already exists", path.display())]
    DestinationOccupied { path: PathBuf },

    /// Failed to move a file into its destination folder.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for organize operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Errors raised by the interactive shell's controller and prompts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("Please select a directory first.")]
    NoDirectorySelected,

    #[error("Cannot handle {event} while {state}")]
    InvalidTransition { state: String, event: String },

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl ShellError {
    pub fn invalid_transition<S: Into<String>, E: Into<String>>(state: S, event: E) -> Self {
        ShellError::InvalidTransition {
            state: state.into(),
            event: event.into(),
        }
    }
}
