use anyhow::Result;
use serde_json::json;

use crate::cli::NextCommand;
use crate::util::Session;

pub fn next_date(session: &Session, command: NextCommand) -> Result<()> {
    let reference = session.reference(command.now.as_deref())?;
    let next = session
        .engine
        .next_date(reference, &command.date, &command.repeat)?;

    session.emit(&json!({ "date": next }), || next.to_string())
}
