//! Thin Google Drive v3 client over reqwest.

use serde::Deserialize;
use std::time::Duration;

use super::{SyncConfig, SyncError};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct DriveClient {
    http: reqwest::Client,
    access_token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdTime", default)]
    pub created_time: Option<String>,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteFile>,
}

/// files.list query term for an exact, untrashed name. Embedded quotes get
/// backslash-escaped per the Drive query syntax.
pub fn search_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name='{escaped}' and trashed=false")
}

/// Turn a non-success response into `SyncError::Api` with the body text.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    Err(SyncError::Api { status, message })
}

impl DriveClient {
    /// Exchange the refresh token for an access token.
    pub async fn connect(config: &SyncConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        let resp = http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("refresh_token", config.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;
        let token: TokenResponse = check(resp).await?.json().await?;

        Ok(Self { http, access_token: token.access_token })
    }

    /// First file matching the exact name, if any.
    pub async fn find_file(&self, name: &str) -> Result<Option<RemoteFile>, SyncError> {
        let resp = self
            .http
            .get(FILES_URL)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", search_query(name).as_str()),
                ("fields", "files(id, name, createdTime)"),
            ])
            .send()
            .await?;
        let list: FileList = check(resp).await?.json().await?;
        Ok(list.files.into_iter().next())
    }

    /// Download the file contents (`alt=media`).
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>, SyncError> {
        let resp = self
            .http
            .get(format!("{FILES_URL}/{file_id}"))
            .bearer_auth(&self.access_token)
            .query(&[("alt", "media")])
            .send()
            .await?;
        let bytes = check(resp).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Multipart create: a JSON metadata part plus the raw database bytes.
    /// Returns the new file id.
    pub async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<String, SyncError> {
        let metadata = serde_json::json!({
            "name": name,
            "description": "Note Coach SQLite database for voice notes and AI coaching",
            "mimeType": "application/x-sqlite3",
        });
        let form = reqwest::multipart::Form::new()
            .part(
                "metadata",
                reqwest::multipart::Part::text(metadata.to_string())
                    .mime_str("application/json")?,
            )
            .part(
                "media",
                reqwest::multipart::Part::bytes(bytes).mime_str("application/x-sqlite3")?,
            );

        let resp = self
            .http
            .post(UPLOAD_URL)
            .bearer_auth(&self.access_token)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .multipart(form)
            .send()
            .await?;

        #[derive(Deserialize)]
        struct Created {
            id: String,
        }
        let created: Created = check(resp).await?.json().await?;
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_is_exact_and_untrashed() {
        assert_eq!(
            search_query("note-coach-database.sqlite3"),
            "name='note-coach-database.sqlite3' and trashed=false"
        );
    }

    #[test]
    fn search_query_escapes_quotes() {
        assert_eq!(search_query("it's.db"), r"name='it\'s.db' and trashed=false");
    }
}
