mod client;

pub use client::DriveClient;

// Re-export clear_tokens for CLI usage
pub use client::clear_tokens as clear_drive_tokens;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait DriveOperations {
    /// Export a remote document to the given format and write it to a local
    /// path, overwriting any existing file.
    async fn download(&self, file_id: &str, path: &Path, format: &str) -> Result<()>;

    /// Create a new remote file from a local file's bytes, optionally under a
    /// parent folder. Returns the created file id.
    async fn upload(&self, path: &Path, format: &str, folder_id: Option<&str>) -> Result<String>;
}
