//! extsort - sort a directory's files into per-extension folders
//!
//! This library lists the immediate entries of one directory and moves every
//! file with an extension into a `"{EXT} Files"` folder beside it. It powers
//! both the `extsort` command and the `extsort-interactive` session, which runs
//! the same pass on a worker thread.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod extension;
pub mod file_organizer;
pub mod interactive;
pub mod output;
pub mod target;

pub use config::OrganizeOptions;
pub use error::{OrganizeError, OrganizeResult, ShellError};
pub use extension::{Extension, ScanEntry};
pub use file_organizer::{FileOrganizer, MovedFile, Report, StatusMessage};

pub use cli::{Cli, run_cli};

/// Initializes logging.
///
/// The level defaults to `warn` and is raised by `verbosity` (1 = info,
/// 2 or more = debug). `RUST_LOG` overrides both.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env();
    // A logger may already be installed, e.g. by a test harness.
    let _ = builder.try_init();
}
