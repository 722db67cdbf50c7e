use crate::config::Config;
use crate::drive::{DriveClient, DriveOperations};
use crate::error::Result;
use clap::Subcommand;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum DriveCommand {
    /// Export a remote document and write it to a local path
    Download {
        file_id: String,
        path: PathBuf,

        /// Export format, sent as "application/{format}"
        #[arg(long, default_value = "pdf")]
        format: String,
    },
    /// Create a remote file from a local file's bytes
    Upload {
        path: PathBuf,

        /// MIME format, sent as "application/{format}"
        #[arg(long, default_value = "pdf")]
        format: String,

        /// Parent folder id for the new file
        #[arg(long)]
        folder: Option<String>,
    },
}

impl DriveCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load()?;
        let client = DriveClient::new(&config.google).await?;
        self.run(&client).await
    }

    async fn run(&self, client: &impl DriveOperations) -> Result<()> {
        match self {
            DriveCommand::Download {
                file_id,
                path,
                format,
            } => {
                client.download(file_id, path, format).await?;
                info!(path = %path.display(), "File downloaded");
            }
            DriveCommand::Upload {
                path,
                format,
                folder,
            } => {
                let id = client.upload(path, format, folder.as_deref()).await?;
                info!(id = id, path = %path.display(), "File uploaded");
            }
        }

        Ok(())
    }
}
