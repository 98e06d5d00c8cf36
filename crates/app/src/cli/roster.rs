use std::{error::Error as _, path::PathBuf};

use clap::{Args, Subcommand};
use guestgate_app::roster;

#[derive(Debug, Args)]
pub(crate) struct RosterCommand {
    #[command(subcommand)]
    command: RosterSubcommand,
}

#[derive(Debug, Subcommand)]
enum RosterSubcommand {
    /// Load a roster file and print its totals
    Check(CheckRosterArgs),
}

#[derive(Debug, Args)]
struct CheckRosterArgs {
    /// Path to the roster file (YAML or JSON)
    #[arg(long, env = "ROSTER_FILE")]
    file: PathBuf,
}

pub(crate) async fn run(command: RosterCommand) -> Result<(), String> {
    match command.command {
        RosterSubcommand::Check(args) => check(args).await,
    }
}

async fn check(args: CheckRosterArgs) -> Result<(), String> {
    let roster = roster::load(&args.file)
        .await
        .map_err(|error| match error.source() {
            Some(source) => format!("{error}: {source}"),
            None => error.to_string(),
        })?;

    let without_tickets = roster
        .iter()
        .filter(|(_, guest)| !guest.has_tickets())
        .count();

    let newsletter = roster
        .iter()
        .filter(|(_, guest)| guest.newsletter_opt_in)
        .count();

    println!("guests: {}", roster.len());
    println!("tickets: {}", roster.total_tickets());
    println!("guests_without_tickets: {without_tickets}");
    println!("newsletter_opt_ins: {newsletter}");

    Ok(())
}
