//! Sorting of a directory's files into per-extension folders.
//!
//! One pass lists the target's immediate children once, then moves every file
//! that has an extension into `"{EXT} Files"` next to it. Directories are never
//! entered, and a failure on one file never stops the others.

use crate::config::OrganizeOptions;
use crate::error::{OrganizeError, OrganizeResult};
use crate::extension::{Extension, ScanEntry};
use crate::target::{is_same_file, resolve_target};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A human-readable status line emitted during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusMessage {
    /// The pass has started on a valid directory.
    Scanning { directory: PathBuf },
    /// The supplied path is not an existing directory. Nothing was changed.
    InvalidTarget { path: PathBuf },
    /// The directory validated but its listing could not be read.
    ScanFailed { error: String },
    /// A file was left in place because its name has no extension.
    SkippedNoExtension { name: String },
    /// The first file with this extension was moved in this pass.
    FolderCreated { folder: String, extension: String },
    /// Dry run: the file would be moved into the folder.
    WouldMove { name: String, folder: String },
    /// A file could not be moved and was left in place.
    MoveFailed { name: String, error: String },
    /// The pass is over.
    Complete,
}

impl StatusMessage {
    /// Returns true for messages that report a failure.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget { .. } | Self::ScanFailed { .. } | Self::MoveFailed { .. }
        )
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scanning { directory } => {
                write!(f, "Scanning directory: {}", directory.display())
            }
            Self::InvalidTarget { path } => write!(
                f,
                "Error: The path '{}' is not a valid directory.",
                path.display()
            ),
            Self::ScanFailed { error } => write!(f, "Could not read directory. Error: {}", error),
            Self::SkippedNoExtension { name } => {
                write!(f, "Skipping '{}' (no file extension).", name)
            }
            Self::FolderCreated { folder, extension } => {
                write!(f, "Created folder '{}' for *{} files.", folder, extension)
            }
            Self::WouldMove { name, folder } => {
                write!(f, "Would move '{}' to '{}/'.", name, folder)
            }
            Self::MoveFailed { name, error } => {
                write!(f, "Could not move '{}'. Error: {}", name, error)
            }
            Self::Complete => write!(f, "Organization complete!"),
        }
    }
}

/// Record of one file relocation (or, in a dry run, a planned one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    /// Where the file was before the pass.
    pub original_path: PathBuf,
    /// Where the file is after the pass.
    pub new_path: PathBuf,
    /// Name of the destination folder.
    pub folder: String,
}

/// Outcome of one pass over a directory.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// RFC 3339 timestamp of when the pass started.
    pub timestamp: String,
    /// The directory the pass ran on, after home expansion.
    pub directory: PathBuf,
    /// Whether the filesystem was left untouched.
    pub dry_run: bool,
    /// Every status message, in emission order.
    pub messages: Vec<StatusMessage>,
    /// Files moved (or planned) during the pass.
    pub moved: Vec<MovedFile>,
    /// Files left in place because they had no extension or were the program itself.
    pub skipped: usize,
    /// Files that could not be moved.
    pub failed: usize,
}

impl Report {
    fn new(directory: PathBuf, dry_run: bool) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            directory,
            dry_run,
            messages: Vec::new(),
            moved: Vec::new(),
            skipped: 0,
            failed: 0,
        }
    }

    /// True when the pass never started because the target was not a directory.
    pub fn is_invalid_target(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m, StatusMessage::InvalidTarget { .. }))
    }

    /// Text of the message that prevented the pass from running, if any.
    pub fn fatal_error(&self) -> Option<String> {
        self.messages
            .iter()
            .find(|m| {
                matches!(
                    m,
                    StatusMessage::InvalidTarget { .. } | StatusMessage::ScanFailed { .. }
                )
            })
            .map(ToString::to_string)
    }

    /// Number of moved files per destination folder, sorted by folder name.
    pub fn folder_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for moved in &self.moved {
            *counts.entry(moved.folder.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The status messages rendered as text lines.
    pub fn lines(&self) -> Vec<String> {
        self.messages.iter().map(ToString::to_string).collect()
    }
}

/// Collects messages into the report and forwards each one to an observer.
struct Pass<'a, F: FnMut(&StatusMessage)> {
    report: Report,
    observer: &'a mut F,
}

impl<F: FnMut(&StatusMessage)> Pass<'_, F> {
    fn emit(&mut self, message: StatusMessage) {
        (self.observer)(&message);
        self.report.messages.push(message);
    }
}

/// Organizes a directory's files into per-extension folders.
#[derive(Debug, Clone, Default)]
pub struct FileOrganizer {
    options: OrganizeOptions,
}

impl FileOrganizer {
    /// Creates an organizer with the given options.
    pub fn new(options: OrganizeOptions) -> Self {
        Self { options }
    }

    /// The options this organizer runs with.
    pub fn options(&self) -> &OrganizeOptions {
        &self.options
    }

    /// Runs one pass over `directory` and returns its report.
    ///
    /// A leading `~` is expanded. If the result is not an existing directory
    /// the report holds a single `InvalidTarget` message and nothing is
    /// changed on disk; this is not returned as an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extsort::{FileOrganizer, OrganizeOptions};
    ///
    /// let organizer = FileOrganizer::new(OrganizeOptions::for_current_program());
    /// let report = organizer.organize("~/Downloads");
    /// for line in report.lines() {
    ///     println!("{}", line);
    /// }
    /// ```
    pub fn organize(&self, directory: &str) -> Report {
        self.organize_with(directory, |_| {})
    }

    /// Like [`FileOrganizer::organize`], also handing every message to
    /// `observer` as soon as it is emitted.
    pub fn organize_with<F>(&self, directory: &str, mut observer: F) -> Report
    where
        F: FnMut(&StatusMessage),
    {
        let base_path = match resolve_target(directory) {
            Ok(path) => path,
            Err(e) => {
                warn!("Refusing to organize '{}': {}", directory, e);
                let path = match e {
                    OrganizeError::InvalidTarget { path } => path,
                    _ => PathBuf::from(directory),
                };
                let mut pass = Pass {
                    report: Report::new(path.clone(), self.options.dry_run),
                    observer: &mut observer,
                };
                pass.emit(StatusMessage::InvalidTarget { path });
                return pass.report;
            }
        };

        info!(
            "Organizing {}{}",
            base_path.display(),
            if self.options.dry_run { " (dry run)" } else { "" }
        );

        let mut pass = Pass {
            report: Report::new(base_path.clone(), self.options.dry_run),
            observer: &mut observer,
        };
        pass.emit(StatusMessage::Scanning {
            directory: base_path.clone(),
        });

        match Self::scan(&base_path) {
            Ok(entries) => self.process_entries(&base_path, entries, &mut pass),
            Err(e) => {
                warn!("{}", e);
                pass.emit(StatusMessage::ScanFailed {
                    error: e.to_string(),
                });
            }
        }

        pass.emit(StatusMessage::Complete);
        info!(
            "Finished {}: {} moved, {} skipped, {} failed",
            base_path.display(),
            pass.report.moved.len(),
            pass.report.skipped,
            pass.report.failed
        );
        pass.report
    }

    /// Lists the immediate children of `base_path`, once.
    ///
    /// The whole listing is collected before anything is moved, so folders
    /// created during the pass are never visited.
    pub fn scan(base_path: &Path) -> OrganizeResult<Vec<ScanEntry>> {
        let entries = fs::read_dir(base_path).map_err(|e| OrganizeError::ReadDirectory {
            path: base_path.to_path_buf(),
            source: e,
        })?;

        let mut scanned = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => scanned.push(ScanEntry::from_dir_entry(&entry)),
                Err(e) => warn!("Skipping unreadable entry in {}: {}", base_path.display(), e),
            }
        }
        Ok(scanned)
    }

    fn process_entries<F: FnMut(&StatusMessage)>(
        &self,
        base_path: &Path,
        entries: Vec<ScanEntry>,
        pass: &mut Pass<'_, F>,
    ) {
        let mut found_extensions: HashSet<Extension> = HashSet::new();

        for entry in entries {
            if entry.is_directory {
                debug!("Skipping directory {}", entry.name);
                continue;
            }

            if self.is_own_program(&entry.path) {
                debug!("Skipping {}: it is the running program", entry.name);
                pass.report.skipped += 1;
                continue;
            }

            let Some(extension) = entry.extension else {
                pass.report.skipped += 1;
                pass.emit(StatusMessage::SkippedNoExtension { name: entry.name });
                continue;
            };

            let folder = extension.folder_name();

            if self.options.dry_run {
                pass.report.moved.push(MovedFile {
                    new_path: base_path.join(&folder).join(&entry.name),
                    original_path: entry.path,
                    folder: folder.clone(),
                });
                pass.emit(StatusMessage::WouldMove {
                    name: entry.name,
                    folder,
                });
                continue;
            }

            match Self::move_into_folder(base_path, &entry.path, &folder) {
                Ok(moved) => {
                    debug!("Moved {} to {}", entry.name, moved.new_path.display());
                    pass.report.moved.push(moved);
                    if found_extensions.insert(extension.clone()) {
                        pass.emit(StatusMessage::FolderCreated {
                            folder,
                            extension: extension.to_string(),
                        });
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    pass.report.failed += 1;
                    pass.emit(StatusMessage::MoveFailed {
                        name: entry.name,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    fn is_own_program(&self, path: &Path) -> bool {
        self.options
            .self_path
            .as_deref()
            .is_some_and(|program| is_same_file(path, program))
    }

    /// Creates `folder_path` unless it already exists as a directory.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::DestinationNotADirectory` if something other
    /// than a directory holds the name, or `DirectoryCreationFailed` for any
    /// other I/O failure.
    pub fn ensure_folder(folder_path: &Path) -> OrganizeResult<()> {
        match fs::create_dir_all(folder_path) {
            Ok(()) => Ok(()),
            Err(_) if folder_path.exists() && !folder_path.is_dir() => {
                Err(OrganizeError::DestinationNotADirectory {
                    path: folder_path.to_path_buf(),
                })
            }
            Err(e) => Err(OrganizeError::DirectoryCreationFailed {
                path: folder_path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Moves a file into `folder_name` within the base path and records the move.
    ///
    /// The folder is created if it does not exist. The file keeps its name and
    /// is never allowed to replace an existing entry in the folder.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The directory the destination folder lives in
    /// * `file_path` - The full path to the file to be moved
    /// * `folder_name` - The destination folder's name, e.g. `PDF Files`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extsort::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let result = FileOrganizer::move_into_folder(
    ///     Path::new("/path/to/base"),
    ///     Path::new("/path/to/base/report.pdf"),
    ///     "PDF Files",
    /// );
    ///
    /// match result {
    ///     Ok(moved) => println!("Moved to {}", moved.new_path.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_into_folder(
        base_path: &Path,
        file_path: &Path,
        folder_name: &str,
    ) -> OrganizeResult<MovedFile> {
        let folder_path = base_path.join(folder_name);
        Self::ensure_folder(&folder_path)?;

        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                from: file_path.to_path_buf(),
                to: folder_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let destination_path = folder_path.join(file_name);

        // rename() silently replaces files on Unix
        if destination_path.symlink_metadata().is_ok() {
            return Err(OrganizeError::DestinationOccupied {
                path: destination_path,
            });
        }

        fs::rename(file_path, &destination_path).map_err(|e| OrganizeError::FileMoveFailure {
            from: file_path.to_path_buf(),
            to: destination_path.clone(),
            source: e,
        })?;

        Ok(MovedFile {
            original_path: file_path.to_path_buf(),
            new_path: destination_path,
            folder: folder_name.to_string(),
        })
    }
}
