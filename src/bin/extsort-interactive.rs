use extsort::interactive::{InteractiveSession, TerminalPrompter};
use extsort::output::OutputFormatter;
use extsort::{FileOrganizer, OrganizeOptions};

fn main() {
    extsort::init_logging(0);

    let organizer = FileOrganizer::new(OrganizeOptions::for_current_program());
    let mut session = InteractiveSession::new(TerminalPrompter, organizer);

    if let Err(e) = session.run() {
        OutputFormatter::error(&e.to_string());
    }
}
