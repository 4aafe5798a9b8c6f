//! Remote file storage collaborators.
//!
//! The resolver only depends on the `RemoteStorage` trait; `DriveStorage`
//! implements it over the Google Drive v3 `files.list` endpoint. Minting
//! credentials is out of scope here, so the client is handed a ready-made
//! access token and sends it as a bearer header.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{RemoteFile, TypeFilter};

/// Listing capability supplied by the remote storage collaborator.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// List the direct children of `container`, restricted by `filter`.
    /// Returns an empty sequence when the container has no matching children
    /// and `RemoteUnavailable`/`RemoteStatus` on I/O failure.
    async fn list_children(&self, container: &str, filter: TypeFilter)
        -> Result<Vec<RemoteFile>>;
}

const FILES_ENDPOINT: &str = "https://www.googleapis.com/drive/v3/files";
const LIST_FIELDS: &str =
    "nextPageToken, files(id, name, mimeType, createdTime, webViewLink, thumbnailLink, fileExtension)";
const PAGE_SIZE: u32 = 100;

/// Resolve a Drive access token from the environment, trying
/// `DRIVE_ACCESS_TOKEN` first and `GOOGLE_DRIVE_TOKEN` second.
pub fn resolve_drive_token() -> Option<String> {
    ["DRIVE_ACCESS_TOKEN", "GOOGLE_DRIVE_TOKEN"]
        .iter()
        .find_map(|key| env::var(key).ok())
        .filter(|token| !token.trim().is_empty())
}

/// Google Drive v3 listing client.
pub struct DriveStorage {
    http: Client,
    token: String,
}

impl DriveStorage {
    /// `timeout` bounds every individual listing call; cancelling a resolution
    /// cancels its outstanding request along with the future.
    pub fn new(token: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, token })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteFile>,
    next_page_token: Option<String>,
}

/// Build the Drive query expression for one listing call.
fn list_query(container: &str, filter: TypeFilter) -> String {
    // a stray single quote in the container reference would break the
    // expression grammar
    let container = container.replace('\'', "\\'");
    let mut q = format!("'{container}' in parents and trashed = false");
    if let Some(clause) = filter.mime_clause() {
        q.push_str(" and ");
        q.push_str(clause);
    }
    q
}

#[async_trait]
impl RemoteStorage for DriveStorage {
    async fn list_children(
        &self,
        container: &str,
        filter: TypeFilter,
    ) -> Result<Vec<RemoteFile>> {
        let q = list_query(container, filter);
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(FILES_ENDPOINT)
                .bearer_auth(&self.token)
                .query(&[("q", q.as_str()), ("fields", LIST_FIELDS)])
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = page_token.as_deref() {
                request = request.query(&[("pageToken", token)]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(Error::RemoteStatus {
                    status: response.status().as_u16(),
                    body: response.text().await.unwrap_or_default(),
                });
            }

            let page: FileList = response.json().await?;
            files.extend(page.files);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(container, count = files.len(), "listed remote children");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_restricts_to_parent_and_excludes_trash() {
        assert_eq!(
            list_query("folder123", TypeFilter::Any),
            "'folder123' in parents and trashed = false"
        );
    }

    #[test]
    fn query_appends_the_mime_clause() {
        assert_eq!(
            list_query("folder123", TypeFilter::Folder),
            "'folder123' in parents and trashed = false \
             and mimeType = 'application/vnd.google-apps.folder'"
        );
        assert_eq!(
            list_query("folder123", TypeFilter::Pdf),
            "'folder123' in parents and trashed = false and mimeType = 'application/pdf'"
        );
    }

    #[test]
    fn query_escapes_single_quotes() {
        assert_eq!(
            list_query("it's", TypeFilter::Any),
            "'it\\'s' in parents and trashed = false"
        );
    }
}
