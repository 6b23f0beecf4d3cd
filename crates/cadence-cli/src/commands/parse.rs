use anyhow::Result;
use cadence_core::error::CoreError;
use cadence_core::rule::parse_rule;
use serde_json::json;

use crate::cli::ParseCommand;
use crate::util::Session;

pub fn parse_rule_command(session: &Session, command: ParseCommand) -> Result<()> {
    let rule = parse_rule(&command.rule).map_err(CoreError::from)?;
    rule.validate()?;

    let canonical = rule.to_string();
    let description = rule.describe();
    session.emit(
        &json!({
            "rule": canonical,
            "kind": rule.kind(),
            "description": description,
        }),
        || {
            if rule.is_none() {
                description.clone()
            } else {
                format!("{canonical}\n{description}")
            }
        },
    )
}
