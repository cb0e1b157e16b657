//! Interactive terminal session.
//!
//! Asks for a directory, runs the pass on a worker thread behind a spinner,
//! then acknowledges the outcome and returns to the idle state.

use crate::controller::{Acknowledgment, Controller, Effect, ShellEvent, ShellState, spawn_pass};
use crate::error::ShellError;
use crate::file_organizer::FileOrganizer;
use crate::output::OutputFormatter;
use dialoguer::{Confirm, Input};
use log::info;

/// Source of the user's answers.
pub trait Prompter {
    /// Asks for a directory to organize. `None` means the user cancelled.
    fn pick_directory(&mut self) -> Result<Option<String>, ShellError>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, ShellError>;
}

/// Prompts on the terminal with `dialoguer`.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn pick_directory(&mut self) -> Result<Option<String>, ShellError> {
        let answer = Input::<String>::new()
            .with_prompt("Select a folder to organize (leave empty to cancel)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ShellError::Prompt(e.to_string()))?;

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, ShellError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| ShellError::Prompt(e.to_string()))
    }
}

/// An interactive session driving a [`Controller`].
pub struct InteractiveSession<P: Prompter> {
    prompter: P,
    controller: Controller,
    organizer: FileOrganizer,
    show_spinner: bool,
}

impl<P: Prompter> InteractiveSession<P> {
    pub fn new(prompter: P, organizer: FileOrganizer) -> Self {
        Self {
            prompter,
            controller: Controller::new(),
            organizer,
            show_spinner: true,
        }
    }

    /// Disables the spinner; status lines are then printed directly.
    pub fn without_spinner(mut self) -> Self {
        self.show_spinner = false;
        self
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Runs until the user declines to organize another directory.
    ///
    /// Returns every acknowledgment shown during the session.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Prompt` if the terminal cannot be read.
    pub fn run(&mut self) -> Result<Vec<Acknowledgment>, ShellError> {
        let mut acknowledgments = Vec::new();
        OutputFormatter::header("Select a Directory to Organize");

        loop {
            OutputFormatter::plain(self.controller.path_display());

            let event = match self.prompter.pick_directory()? {
                Some(directory) => ShellEvent::PathSelected(directory),
                None => ShellEvent::PickerCancelled,
            };
            self.controller.handle(event)?;

            if let ShellState::Selected { directory } = self.controller.state() {
                OutputFormatter::info(&format!("Selected: {}", directory));
            }

            if self.prompter.confirm("Organize Files?", true)? {
                match self.run_pass() {
                    Ok(ack) => acknowledgments.push(ack),
                    Err(ShellError::NoDirectorySelected) => {
                        OutputFormatter::error(&ShellError::NoDirectorySelected.to_string())
                    }
                    Err(e) => return Err(e),
                }
            }

            if !self.prompter.confirm("Organize another directory?", false)? {
                break;
            }
        }

        Ok(acknowledgments)
    }

    /// Starts a pass for the selected directory and waits for it.
    fn run_pass(&mut self) -> Result<Acknowledgment, ShellError> {
        let Effect::StartPass(directory) = self.controller.handle(ShellEvent::RunStarted)? else {
            return Err(ShellError::invalid_transition("selected", "run start"));
        };
        info!("Starting pass on {}", directory);

        let spinner = self
            .show_spinner
            .then(|| OutputFormatter::create_spinner(self.controller.status_text()));
        if spinner.is_none() {
            OutputFormatter::info(self.controller.status_text());
        }

        let handle = spawn_pass(self.organizer.clone(), directory);
        let outcome = handle.wait(|message| match &spinner {
            Some(spinner) => spinner.println(OutputFormatter::render_status(message)),
            None => OutputFormatter::status(message),
        });

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let ack = match self.controller.handle(ShellEvent::RunFinished(outcome))? {
            Effect::Acknowledge(ack) => ack,
            _ => return Err(ShellError::invalid_transition("running", "run completion")),
        };

        match &ack {
            Acknowledgment::Success(text) => OutputFormatter::success(text),
            Acknowledgment::Error(text) => OutputFormatter::error(text),
        }
        OutputFormatter::info(self.controller.status_text());

        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrganizeOptions;
    use crate::controller::{PATH_PLACEHOLDER, SUCCESS_TEXT};
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    /// Replays a fixed script of answers.
    struct ScriptedPrompter {
        directories: VecDeque<Option<String>>,
        confirmations: VecDeque<bool>,
    }

    impl ScriptedPrompter {
        fn new(directories: Vec<Option<String>>, confirmations: Vec<bool>) -> Self {
            Self {
                directories: directories.into(),
                confirmations: confirmations.into(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn pick_directory(&mut self) -> Result<Option<String>, ShellError> {
            self.directories
                .pop_front()
                .ok_or_else(|| ShellError::Prompt("script exhausted".to_string()))
        }

        fn confirm(&mut self, _prompt: &str, _default: bool) -> Result<bool, ShellError> {
            self.confirmations
                .pop_front()
                .ok_or_else(|| ShellError::Prompt("script exhausted".to_string()))
        }
    }

    fn session(prompter: ScriptedPrompter) -> InteractiveSession<ScriptedPrompter> {
        InteractiveSession::new(prompter, FileOrganizer::new(OrganizeOptions::default()))
            .without_spinner()
    }

    #[test]
    fn test_session_organizes_selected_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("report.pdf"), "pdf").unwrap();

        let dir = temp_dir.path().to_string_lossy().to_string();
        let mut session = session(ScriptedPrompter::new(vec![Some(dir)], vec![true, false]));
        let acks = session.run().expect("session runs");

        assert_eq!(acks, vec![Acknowledgment::Success(SUCCESS_TEXT.to_string())]);
        assert!(temp_dir.path().join("PDF Files").join("report.pdf").exists());
        assert_eq!(session.controller().state(), &ShellState::Idle);
        assert_eq!(session.controller().path_display(), PATH_PLACEHOLDER);
    }

    #[test]
    fn test_cancelled_picker_does_not_run() {
        let mut session = session(ScriptedPrompter::new(vec![None], vec![true, false]));
        let acks = session.run().expect("session runs");

        assert!(acks.is_empty());
        assert_eq!(session.controller().state(), &ShellState::Idle);
    }

    #[test]
    fn test_invalid_directory_is_acknowledged_as_error() {
        let mut session = session(ScriptedPrompter::new(
            vec![Some("/non/existent/path".to_string())],
            vec![true, false],
        ));
        let acks = session.run().expect("session runs");

        assert_eq!(acks.len(), 1);
        assert!(matches!(&acks[0], Acknowledgment::Error(text) if text.contains("not a valid directory")));
        assert!(!session.controller().is_busy());
        assert_eq!(session.controller().status_text(), "An error occurred.");
    }

    #[test]
    fn test_declined_run_keeps_selection() {
        let mut session = session(ScriptedPrompter::new(
            vec![Some("/tmp".to_string())],
            vec![false, false],
        ));
        let acks = session.run().expect("session runs");

        assert!(acks.is_empty());
        assert_eq!(
            session.controller().state(),
            &ShellState::Selected {
                directory: "/tmp".to_string()
            }
        );
    }

    #[test]
    fn test_two_rounds() {
        let first = TempDir::new().expect("Failed to create temp directory");
        let second = TempDir::new().expect("Failed to create temp directory");
        fs::write(first.path().join("a.txt"), "a").unwrap();
        fs::write(second.path().join("b.jpg"), "b").unwrap();

        let mut session = session(ScriptedPrompter::new(
            vec![
                Some(first.path().to_string_lossy().to_string()),
                Some(second.path().to_string_lossy().to_string()),
            ],
            vec![true, true, true, false],
        ));
        let acks = session.run().expect("session runs");

        assert_eq!(acks.len(), 2);
        assert!(first.path().join("TXT Files").join("a.txt").exists());
        assert!(second.path().join("JPG Files").join("b.jpg").exists());
    }
}
