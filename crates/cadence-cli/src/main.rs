use anyhow::{bail, Context, Result};
use cadence_core::error::CoreError;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

fn main() {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    if let Err(e) = run(cli) {
        handle_error(e, json);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: cli::Cli) -> Result<()> {
    if let Some(path) = cli.config.as_deref() {
        if !path.exists() {
            bail!("configuration file '{}' not found", path.display());
        }
    }
    let config = config::Config::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    let session = util::Session::new(config, cli.json)?;

    match cli.command {
        cli::Commands::Next(command) => commands::next::next_date(&session, command),
        cli::Commands::Parse(command) => commands::parse::parse_rule_command(&session, command),
        cli::Commands::Preview(command) => commands::preview::preview_dates(&session, command),
        cli::Commands::Plan(command) => commands::plan::plan_task(&session, command),
        cli::Commands::Done(command) => commands::done::done_task(&session, command),
    }
}

fn handle_error(err: anyhow::Error, json: bool) {
    tracing::debug!(error = ?err, "command failed");

    if json {
        println!("{}", json!({ "error": format!("{err:#}") }));
        return;
    }

    let error_style = Style::new().red().bold();
    match err.downcast_ref::<CoreError>() {
        Some(CoreError::Parse(parse_error)) => {
            eprintln!("{} {}", "Error:".style(error_style), parse_error);
            eprintln!(
                "Repeat rules look like {}, {}, {} or {}",
                "d 3".yellow(),
                "y".yellow(),
                "w 1,3".yellow(),
                "m 1,-1 [1,6]".yellow()
            );
        }
        Some(CoreError::Unsatisfiable { rule, horizon_years }) => {
            eprintln!(
                "{} repeat rule '{}' has no date within {} years",
                "Error:".style(error_style),
                rule.yellow(),
                horizon_years
            );
            eprintln!("Raise engine.horizon_years in cadence.toml to search further.");
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
