use anyhow::Result;
use cadence_core::schedule::plan_task_date;
use serde_json::json;

use crate::cli::PlanCommand;
use crate::util::Session;

pub fn plan_task(session: &Session, command: PlanCommand) -> Result<()> {
    let planned = plan_task_date(
        &session.engine,
        session.today,
        &command.date,
        &command.repeat,
    )?;

    session.emit(&json!({ "date": planned }), || planned.to_string())
}
