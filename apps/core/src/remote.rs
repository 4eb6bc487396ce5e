use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde_json::json;

use crate::model::RawBookmark;

pub const USER_AGENT: &str = "org.deckmark.core";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const TOTAL_COUNT_HEADER: &str = "Total-Count";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    Transport(String),
    Status { status: u16, url: String },
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Status { status, url } => write!(f, "got response {status} querying {url}"),
        }
    }
}

impl std::error::Error for RemoteError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub bookmarks: Vec<RawBookmark>,
    pub total_count: u64,
}

/// Seam between the refresh pipeline and the remote API. The scheduler,
/// pager, and action executor only ever see this trait.
pub trait BookmarkSource: Send + Sync {
    fn list_page(&self, offset: u64, limit: u64) -> Result<Page, RemoteError>;
    fn archive(&self, id: &str) -> Result<(), RemoteError>;
    fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

/// Stateless client for a Readeck instance. Requests carry bearer auth and a
/// fixed short timeout; no retries here — a failed page aborts the current
/// refresh cycle at the pager.
pub struct ReadeckClient {
    http: reqwest::blocking::Client,
    instance_url: String,
    api_key: String,
}

impl ReadeckClient {
    pub fn new(instance_url: &str, api_key: &str) -> Result<Self, RemoteError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        Ok(Self {
            http,
            instance_url: instance_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn bookmarks_url(&self) -> String {
        format!("{}/api/bookmarks", self.instance_url)
    }
}

impl BookmarkSource for ReadeckClient {
    fn list_page(&self, offset: u64, limit: u64) -> Result<Page, RemoteError> {
        let url = self.bookmarks_url();
        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit), ("offset", offset)])
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .send()
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                url,
            });
        }

        // Absent header counts as 1, which ends pagination after this page.
        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or(1);

        let bookmarks = response
            .json()
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        Ok(Page {
            bookmarks,
            total_count,
        })
    }

    fn archive(&self, id: &str) -> Result<(), RemoteError> {
        let url = format!("{}/{id}/", self.bookmarks_url());
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "is_archived": true }))
            .send()
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        check_status(&url, response.status())
    }

    fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let url = format!("{}/{id}", self.bookmarks_url());
        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        check_status(&url, response.status())
    }
}

fn check_status(url: &str, status: reqwest::StatusCode) -> Result<(), RemoteError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(RemoteError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RemoteError;

    #[test]
    fn status_error_names_url_and_code() {
        let error = RemoteError::Status {
            status: 401,
            url: "http://localhost:8000/api/bookmarks".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "got response 401 querying http://localhost:8000/api/bookmarks"
        );
    }
}
