mod auth;
mod drive;
mod sheet;
mod show;

use crate::error::Result;
use clap::{Parser, Subcommand};

pub use auth::AuthProvider;
pub use drive::DriveCommand;
pub use sheet::SheetCommand;
pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "sheetdrive")]
#[command(about = "One-call Google Sheets and Drive operations from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Auth { provider, reset } => provider.execute(*reset).await,
            Commands::Sheet { command } => command.execute().await,
            Commands::Drive { command } => command.execute().await,
            Commands::Show { resource } => resource.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify authentication for a Google service
    Auth {
        #[command(subcommand)]
        provider: AuthProvider,

        /// Discard cached tokens and re-authenticate
        #[arg(long)]
        reset: bool,
    },
    /// Spreadsheet value and formatting operations
    Sheet {
        #[command(subcommand)]
        command: SheetCommand,
    },
    /// Drive file export and import operations
    Drive {
        #[command(subcommand)]
        command: DriveCommand,
    },
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}
