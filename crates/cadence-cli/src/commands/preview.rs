use anyhow::Result;
use serde_json::json;

use crate::cli::PreviewCommand;
use crate::util::Session;
use crate::views::table::display_preview;

pub fn preview_dates(session: &Session, command: PreviewCommand) -> Result<()> {
    let reference = session.reference(command.now.as_deref())?;
    let count = command.count.unwrap_or(session.config.preview.count);
    let dates = session
        .engine
        .preview(reference, &command.date, &command.repeat, count)?;

    if session.json {
        println!("{}", json!({ "dates": dates }));
    } else {
        display_preview(&command.repeat, &dates, session.today);
    }
    Ok(())
}
