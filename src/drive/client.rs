use super::DriveOperations;
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::session::SessionProvider;
use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

// Full access to the user's Drive files.
pub(crate) const AUTH_SCOPE: &str = "https://www.googleapis.com/auth/drive";

const TOKEN_CACHE_FILE: &str = "drive_tokens.json";
const MULTIPART_BOUNDARY: &str = "sheetdrive_boundary";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

pub struct DriveClient {
    client: Client,
    session: SessionProvider,
}

impl DriveClient {
    /// Create a new DriveClient with authenticated access
    #[instrument(name = "Authenticating to Google Drive", skip_all)]
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let session = SessionProvider::connect(config, AUTH_SCOPE, TOKEN_CACHE_FILE).await?;

        Ok(Self {
            client: Client::new(),
            session,
        })
    }
}

#[async_trait]
impl DriveOperations for DriveClient {
    #[instrument(name = "Exporting file", skip(self))]
    async fn download(&self, file_id: &str, path: &Path, format: &str) -> Result<()> {
        let token = self.session.access_token().await?;
        let url = format!("{}/files/{}/export", DRIVE_API_BASE, file_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[("mimeType", mime_type_for(format))])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Drive(format!(
                "Failed to export file: {} - {}",
                status, body
            )));
        }

        let bytes = response.bytes().await?;
        fs::write(path, &bytes)?;
        debug!(bytes = bytes.len(), "Export written");

        Ok(())
    }

    #[instrument(name = "Uploading file", skip(self))]
    async fn upload(&self, path: &Path, format: &str, folder_id: Option<&str>) -> Result<String> {
        let content = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = upload_metadata(&name, &mime_type_for(format), folder_id);
        let body = multipart_related_body(&metadata, &content)?;

        let token = self.session.access_token().await?;
        let url = format!("{}/files?uploadType=multipart", DRIVE_UPLOAD_BASE);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Drive(format!(
                "Failed to upload file: {} - {}",
                status, body
            )));
        }

        let file: DriveFile = response.json().await?;
        debug!(id = %file.id, name = ?file.name, "File uploaded");

        Ok(file.id)
    }
}

fn mime_type_for(format: &str) -> String {
    format!("application/{}", format)
}

fn upload_metadata(name: &str, mime_type: &str, folder_id: Option<&str>) -> serde_json::Value {
    let mut metadata = serde_json::json!({
        "name": name,
        "mimeType": mime_type,
    });

    if let Some(folder) = folder_id {
        metadata["parents"] = serde_json::json!([folder]);
    }

    metadata
}

fn multipart_related_body(metadata: &serde_json::Value, content: &[u8]) -> Result<Vec<u8>> {
    let metadata_json = serde_json::to_string(metadata)?;

    let mut body = Vec::new();

    // Metadata part
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata_json.as_bytes());
    body.extend_from_slice(b"\r\n");

    // Media part
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");

    // End boundary
    body.extend_from_slice(format!("--{}--", MULTIPART_BOUNDARY).as_bytes());

    Ok(body)
}

/// Clear cached Google Drive tokens
pub fn clear_tokens() -> Result<()> {
    crate::session::clear_tokens(TOKEN_CACHE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for("pdf"), "application/pdf");
        assert_eq!(mime_type_for("zip"), "application/zip");
    }

    #[test]
    fn test_upload_metadata_without_folder() {
        let metadata = upload_metadata("report.pdf", "application/pdf", None);
        assert_eq!(metadata["name"], "report.pdf");
        assert_eq!(metadata["mimeType"], "application/pdf");
        assert!(metadata.get("parents").is_none());
    }

    #[test]
    fn test_upload_metadata_with_folder() {
        let metadata = upload_metadata("report.pdf", "application/pdf", Some("folder123"));
        assert_eq!(metadata["parents"][0], "folder123");
    }

    #[test]
    fn test_multipart_related_body() {
        let metadata = upload_metadata("a.pdf", "application/pdf", None);
        let body = multipart_related_body(&metadata, b"FILEBYTES").unwrap();
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with(&format!("--{}\r\n", MULTIPART_BOUNDARY)));
        assert!(text.contains("Content-Type: application/json; charset=UTF-8"));
        assert!(text.contains("\"name\":\"a.pdf\""));
        assert!(text.contains("Content-Type: application/octet-stream"));
        assert!(text.contains("FILEBYTES"));
        assert!(text.ends_with(&format!("--{}--", MULTIPART_BOUNDARY)));
    }
}
