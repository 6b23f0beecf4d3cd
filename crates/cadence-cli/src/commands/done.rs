use anyhow::Result;
use cadence_core::schedule::{complete_task, Completion};

use crate::cli::DoneCommand;
use crate::util::Session;

pub fn done_task(session: &Session, command: DoneCommand) -> Result<()> {
    let outcome = complete_task(
        &session.engine,
        session.today,
        &command.date,
        &command.repeat,
    )?;

    session.emit(&outcome, || match outcome {
        Completion::Remove => "remove".to_string(),
        Completion::Reschedule(date) => date.to_string(),
    })
}
