//! State and background worker behind the interactive shell.
//!
//! The [`Controller`] owns every piece of presentation state and changes it
//! only in response to [`ShellEvent`]s. A pass runs on its own thread via
//! [`spawn_pass`]; its status lines and final [`Outcome`] come back over a
//! channel, so the worker never touches the controller.

use crate::error::ShellError;
use crate::file_organizer::{FileOrganizer, Report, StatusMessage};
use log::{debug, error};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// Shown in the path display while no directory is selected.
pub const PATH_PLACEHOLDER: &str = "No directory selected...";

pub const SUCCESS_TEXT: &str = "Files have been successfully organized.";

/// The shell's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    Selected { directory: String },
    Running { directory: String },
}

impl ShellState {
    fn name(&self) -> &'static str {
        match self {
            ShellState::Idle => "idle",
            ShellState::Selected { .. } => "selected",
            ShellState::Running { .. } => "running",
        }
    }
}

/// How a pass ended, as seen by the shell.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(Report),
    /// The pass could not run, or a fault escaped it. Holds the error text.
    Failed(String),
}

impl Outcome {
    /// Classifies a finished report: an invalid target counts as a failure.
    pub fn from_report(report: Report) -> Self {
        match report.fatal_error() {
            Some(text) => Outcome::Failed(text),
            None => Outcome::Success(report),
        }
    }
}

/// Events that drive the controller.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    PathSelected(String),
    PickerCancelled,
    RunStarted,
    RunFinished(Outcome),
}

impl ShellEvent {
    fn name(&self) -> &'static str {
        match self {
            ShellEvent::PathSelected(_) => "path selection",
            ShellEvent::PickerCancelled => "cancelled selection",
            ShellEvent::RunStarted => "run start",
            ShellEvent::RunFinished(_) => "run completion",
        }
    }
}

/// What the user is told once a pass is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgment {
    Success(String),
    Error(String),
}

/// What the caller must do after an event was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start a pass on this directory.
    StartPass(String),
    /// Show this acknowledgment to the user.
    Acknowledge(Acknowledgment),
}

/// Owner of the interactive shell's presentation state.
#[derive(Debug, Clone)]
pub struct Controller {
    state: ShellState,
    status_text: String,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            state: ShellState::Idle,
            status_text: String::new(),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// The line shown under the trigger control.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Whether the busy indicator should be visible.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ShellState::Running { .. })
    }

    /// The selected directory, or the placeholder.
    pub fn path_display(&self) -> &str {
        match &self.state {
            ShellState::Idle => PATH_PLACEHOLDER,
            ShellState::Selected { directory } | ShellState::Running { directory } => directory,
        }
    }

    /// Applies an event.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::NoDirectorySelected` when a run is requested with
    /// nothing selected, and `ShellError::InvalidTransition` for any other
    /// event that does not apply to the current state. The state is left
    /// unchanged on error.
    pub fn handle(&mut self, event: ShellEvent) -> Result<Effect, ShellError> {
        debug!("{} in state {}", event.name(), self.state.name());

        match (&self.state, event) {
            (ShellState::Idle | ShellState::Selected { .. }, ShellEvent::PathSelected(path)) => {
                if path.trim().is_empty() {
                    return Ok(Effect::None);
                }
                self.state = ShellState::Selected { directory: path };
                self.status_text.clear();
                Ok(Effect::None)
            }
            (ShellState::Idle | ShellState::Selected { .. }, ShellEvent::PickerCancelled) => {
                Ok(Effect::None)
            }
            (ShellState::Idle, ShellEvent::RunStarted) => Err(ShellError::NoDirectorySelected),
            (ShellState::Selected { directory }, ShellEvent::RunStarted) => {
                let directory = directory.clone();
                self.status_text = format!("Processing {}...", base_name(&directory));
                self.state = ShellState::Running {
                    directory: directory.clone(),
                };
                Ok(Effect::StartPass(directory))
            }
            (ShellState::Running { .. }, ShellEvent::RunFinished(outcome)) => {
                self.state = ShellState::Idle;
                let ack = match outcome {
                    Outcome::Success(_) => {
                        self.status_text = "Organization complete!".to_string();
                        Acknowledgment::Success(SUCCESS_TEXT.to_string())
                    }
                    Outcome::Failed(text) => {
                        self.status_text = "An error occurred.".to_string();
                        Acknowledgment::Error(format!(
                            "An error occurred during organization:\n{}",
                            text
                        ))
                    }
                };
                Ok(Effect::Acknowledge(ack))
            }
            (state, event) => Err(ShellError::invalid_transition(state.name(), event.name())),
        }
    }
}

fn base_name(directory: &str) -> String {
    Path::new(directory)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| directory.to_string())
}

/// Messages sent from the worker thread.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Status(StatusMessage),
    Finished(Outcome),
}

/// A pass running on a background thread.
pub struct PassHandle {
    receiver: Receiver<WorkerMessage>,
    thread: JoinHandle<()>,
}

impl PassHandle {
    /// The channel the worker reports on.
    pub fn receiver(&self) -> &Receiver<WorkerMessage> {
        &self.receiver
    }

    /// Blocks until the pass is over, forwarding each status line to `on_status`.
    pub fn wait<F: FnMut(&StatusMessage)>(self, mut on_status: F) -> Outcome {
        let mut outcome = None;
        for message in self.receiver.iter() {
            match message {
                WorkerMessage::Status(status) => on_status(&status),
                WorkerMessage::Finished(result) => {
                    outcome = Some(result);
                    break;
                }
            }
        }

        if self.thread.join().is_err() {
            error!("Organizer worker thread panicked");
        }

        outcome.unwrap_or_else(|| Outcome::Failed("the worker stopped unexpectedly".to_string()))
    }
}

/// Runs `organizer` over `directory` on a background thread.
pub fn spawn_pass(organizer: FileOrganizer, directory: String) -> PassHandle {
    spawn_pass_with(directory, move |dir, observer| {
        organizer.organize_with(dir, observer)
    })
}

/// Runs an arbitrary pass function on a background thread.
///
/// A panic inside `job` is caught and reported as `Outcome::Failed`.
pub fn spawn_pass_with<J>(directory: String, job: J) -> PassHandle
where
    J: FnOnce(&str, &mut dyn FnMut(&StatusMessage)) -> Report + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    let thread = thread::spawn(move || {
        let status_sender = sender.clone();
        let mut forward = |message: &StatusMessage| {
            // The receiver may be gone if the shell stopped listening.
            let _ = status_sender.send(WorkerMessage::Status(message.clone()));
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| job(&directory, &mut forward)));

        let outcome = match result {
            Ok(report) => Outcome::from_report(report),
            Err(payload) => {
                let text = panic_text(payload.as_ref());
                error!("Organizing {} failed: {}", directory, text);
                Outcome::Failed(text)
            }
        };
        let _ = sender.send(WorkerMessage::Finished(outcome));
    });

    PassHandle { receiver, thread }
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown error".to_string()
    }
}
