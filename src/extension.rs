//! Extension classification for directory entries.
//!
//! A file's extension decides which folder it belongs to: `report.PDF` has the
//! extension `.pdf` and belongs in `PDF Files`. The comparison is case-insensitive,
//! the file name itself is never altered.
//!
//! # Examples
//!
//! ```
//! use extsort::extension::Extension;
//!
//! let ext = Extension::from_name("Holiday.JPG").unwrap();
//! assert_eq!(ext.as_str(), ".jpg");
//! assert_eq!(ext.folder_name(), "JPG Files");
//! assert!(Extension::from_name("Makefile").is_none());
//! ```

use std::fmt;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

/// Suffix appended to the upper-cased extension to name a destination folder.
pub const FOLDER_SUFFIX: &str = " Files";

/// A lowercase file extension, stored with its leading dot (e.g. `.txt`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Extension(String);

impl Extension {
    /// Derives the extension of a file name.
    ///
    /// Returns `None` when the name has no extension. Following the usual
    /// file-name conventions, a leading dot alone (`.bashrc`) does not start
    /// an extension, and a trailing dot (`notes.`) yields an empty one, which
    /// is treated as none. Only the last suffix counts: `a.tar.gz` is `.gz`.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_string_lossy();
        if ext.is_empty() {
            return None;
        }
        Some(Extension(format!(".{}", ext.to_lowercase())))
    }

    /// The extension with its leading dot, lowercased.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the folder that collects files with this extension.
    ///
    /// The dot is stripped and the rest upper-cased: `.pdf` becomes `PDF Files`.
    pub fn folder_name(&self) -> String {
        format!("{}{}", self.0[1..].to_uppercase(), FOLDER_SUFFIX)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A direct child of the target directory, captured when the scan starts.
#[derive(Debug, Clone)]
pub struct ScanEntry {
    /// The entry's file name, extension included.
    pub name: String,
    /// The full path to the entry.
    pub path: PathBuf,
    /// Whether the entry is a directory. Symbolic links are followed.
    pub is_directory: bool,
    /// The lowercase extension, if the name has one.
    pub extension: Option<Extension>,
}

impl ScanEntry {
    /// Builds a scan entry from a path inside the target directory.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = Extension::from_name(&name);

        ScanEntry {
            is_directory: path.is_dir(),
            name,
            path,
            extension,
        }
    }

    /// Builds a scan entry from a `read_dir` result.
    pub fn from_dir_entry(entry: &DirEntry) -> Self {
        Self::from_path(entry.path())
    }
}
