pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "replyr",
    about = "Replyr operator CLI",
    long_about = "Run comments through the live classification pipeline and inspect configuration readiness.",
    after_help = "Examples:\n  replyr process --comment \"Where can I buy this?\"\n  replyr config\n  replyr doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Classify one comment and draft a reply, optionally syncing a contact")]
    Process {
        #[arg(long, help = "Comment text to classify")]
        comment: String,
        #[arg(long, help = "Contact identifier (email or handle) to sync to the CRM")]
        contact: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and report model/CRM credential readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Process { comment, contact } => {
            commands::process::run(&comment, contact.as_deref())
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
