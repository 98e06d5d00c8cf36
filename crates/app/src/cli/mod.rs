use clap::{Parser, Subcommand};

mod roster;
mod token;

#[derive(Debug, Parser)]
#[command(name = "guestgate-app", about = "Guestgate CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Roster(roster::RosterCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Roster(command) => roster::run(command).await,
            Commands::Token(command) => token::run(command),
        }
    }
}
