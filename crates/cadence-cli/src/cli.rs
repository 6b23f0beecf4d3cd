use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cadence: compute when repeating tasks fall due
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Print results and errors as JSON
    #[clap(long, global = true)]
    pub json: bool,
    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub verbose: bool,
    /// Path to the configuration file
    #[clap(long, global = true, help = "Configuration file (default: cadence.toml)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the next due date of a repeating task
    Next(NextCommand),
    /// Check a repeat rule and show its canonical form
    Parse(ParseCommand),
    /// List upcoming due dates of a repeating task
    Preview(PreviewCommand),
    /// Show the date a new task would be stored with
    Plan(PlanCommand),
    /// Show what happens when a task is marked done
    Done(DoneCommand),
}

#[derive(Args, Debug, Clone)]
pub struct NextCommand {
    /// The task's current date (DD.MM.YYYY)
    #[clap(short, long)]
    pub date: String,
    /// The repeat rule
    #[clap(short, long, allow_hyphen_values = true)]
    pub repeat: String,
    /// Reference date; defaults to today
    #[clap(short, long, help = "Reference date (DD.MM.YYYY or e.g. 'tomorrow')")]
    pub now: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// The repeat rule
    #[clap(allow_hyphen_values = true)]
    pub rule: String,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewCommand {
    /// The task's current date (DD.MM.YYYY)
    #[clap(short, long)]
    pub date: String,
    /// The repeat rule
    #[clap(short, long, allow_hyphen_values = true)]
    pub repeat: String,
    /// Reference date; defaults to today
    #[clap(short, long, help = "Reference date (DD.MM.YYYY or e.g. 'tomorrow')")]
    pub now: Option<String>,
    /// Number of dates to show
    #[clap(short, long, help = "Number of dates to show (default from config)")]
    pub count: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct PlanCommand {
    /// The requested date (DD.MM.YYYY); empty means today
    #[clap(short, long, default_value = "")]
    pub date: String,
    /// The repeat rule; empty means the task does not repeat
    #[clap(short, long, default_value = "", allow_hyphen_values = true)]
    pub repeat: String,
}

#[derive(Args, Debug, Clone)]
pub struct DoneCommand {
    /// The task's current date (DD.MM.YYYY)
    #[clap(short, long)]
    pub date: String,
    /// The repeat rule; empty means the task does not repeat
    #[clap(short, long, default_value = "", allow_hyphen_values = true)]
    pub repeat: String,
}
