//! Resolution of the directory an invocation operates on.

use crate::error::{OrganizeError, OrganizeResult};
use std::path::{Path, PathBuf};

/// Expands a leading `~` or `~/` to the current user's home directory.
///
/// Any other input, including `~user` forms, is returned unchanged.
///
/// # Errors
///
/// Returns `OrganizeError::HomeDirUnavailable` if the input starts with the
/// shorthand but the home directory cannot be determined.
pub fn expand_home(input: &str) -> OrganizeResult<PathBuf> {
    let rest = if input == "~" {
        ""
    } else if let Some(rest) = input.strip_prefix("~/") {
        rest
    } else if cfg!(windows) && input.starts_with("~\\") {
        &input[2..]
    } else {
        return Ok(PathBuf::from(input));
    };

    let home = dirs::home_dir().ok_or_else(|| OrganizeError::HomeDirUnavailable {
        input: input.to_string(),
    })?;

    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}

/// Expands the shorthand and checks that the result is an existing directory.
///
/// # Errors
///
/// Returns `OrganizeError::InvalidTarget` if the path is missing or is not a
/// directory, and `OrganizeError::HomeDirUnavailable` if it cannot be expanded.
pub fn resolve_target(input: &str) -> OrganizeResult<PathBuf> {
    let path = expand_home(input)?;
    if !path.is_dir() {
        return Err(OrganizeError::InvalidTarget { path });
    }
    Ok(path)
}

/// Canonical location of the running executable, if it can be determined.
pub fn current_program_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.canonicalize().ok().or(Some(exe))
}

/// Returns true when `entry` is the same file as `program`.
///
/// Both sides are compared in canonical form so a relative or symlinked
/// target directory still matches.
pub fn is_same_file(entry: &Path, program: &Path) -> bool {
    match (entry.canonicalize(), program.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => entry == program,
    }
}
