use crate::config::Config;
use crate::drive::{DriveClient, clear_drive_tokens};
use crate::error::Result;
use crate::sheets::{SheetsClient, clear_sheets_tokens};
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum AuthProvider {
    /// Authenticate with Google Sheets
    Sheets,
    /// Authenticate with Google Drive
    Drive,
}

impl AuthProvider {
    pub async fn execute(&self, reset: bool) -> Result<()> {
        match self {
            AuthProvider::Sheets => authenticate_sheets(reset).await,
            AuthProvider::Drive => authenticate_drive(reset).await,
        }
    }
}

async fn authenticate_sheets(reset: bool) -> Result<()> {
    if reset {
        clear_sheets_tokens()?;
    }

    let config = Config::load()?;
    let _client = SheetsClient::new(&config.google).await?;

    info!("Google Sheets authentication verified");

    Ok(())
}

async fn authenticate_drive(reset: bool) -> Result<()> {
    if reset {
        clear_drive_tokens()?;
    }

    let config = Config::load()?;
    let _client = DriveClient::new(&config.google).await?;

    info!("Google Drive authentication verified");

    Ok(())
}
