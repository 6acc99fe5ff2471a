// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The narrow remote-store capability the sync core needs: find, create,
//! update, and read one well-known object. Session/OAuth lifecycle is the
//! cloud collaborator's problem, not ours.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking::RequestBuilder;

use crate::error::SyncError;

/// Well-known object name in the remote storage scope.
pub const SYNC_FILE_NAME: &str = "billfold-sync.json";

#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub id: String,
    pub modified_at: DateTime<Utc>,
}

pub trait RemoteStore {
    fn find(&self) -> Result<Option<RemoteObject>, SyncError>;
    fn create(&self, content: &str) -> Result<String, SyncError>;
    fn update(&self, object_id: &str, content: &str) -> Result<String, SyncError>;
    fn read_content(&self, object_id: &str) -> Result<String, SyncError>;
}

/// Object store speaking plain HTTP GET/HEAD/PUT against a base URL, with
/// an optional bearer token. `Last-Modified` is the remote modification
/// timestamp the auto-sync policy compares against.
pub struct HttpObjectStore {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, SyncError> {
        let client = crate::utils::http_client()
            .map_err(|e| SyncError::Transport(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn object_url(&self, object_id: &str) -> String {
        format!("{}/{}", self.base_url, object_id)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    fn modified_at_from(resp: &reqwest::blocking::Response) -> DateTime<Utc> {
        resp.headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| DateTime::parse_from_rfc2822(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            // A store that reports no Last-Modified is treated as stale,
            // which makes the policy upload over it.
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl RemoteStore for HttpObjectStore {
    fn find(&self) -> Result<Option<RemoteObject>, SyncError> {
        let url = self.object_url(SYNC_FILE_NAME);
        let resp = self
            .with_auth(self.client.head(&url))
            .send()
            .map_err(|e| SyncError::Transport(format!("HEAD {}: {}", url, e)))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(SyncError::Transport(format!(
                "HEAD {} returned {}",
                url,
                resp.status()
            )));
        }
        Ok(Some(RemoteObject {
            id: SYNC_FILE_NAME.to_string(),
            modified_at: Self::modified_at_from(&resp),
        }))
    }

    fn create(&self, content: &str) -> Result<String, SyncError> {
        self.update(SYNC_FILE_NAME, content)
    }

    fn update(&self, object_id: &str, content: &str) -> Result<String, SyncError> {
        let url = self.object_url(object_id);
        let resp = self
            .with_auth(self.client.put(&url))
            .body(content.to_string())
            .send()
            .map_err(|e| SyncError::Transport(format!("PUT {}: {}", url, e)))?;
        if !resp.status().is_success() {
            return Err(SyncError::Transport(format!(
                "PUT {} returned {}",
                url,
                resp.status()
            )));
        }
        Ok(object_id.to_string())
    }

    fn read_content(&self, object_id: &str) -> Result<String, SyncError> {
        let url = self.object_url(object_id);
        let resp = self
            .with_auth(self.client.get(&url))
            .send()
            .map_err(|e| SyncError::Transport(format!("GET {}: {}", url, e)))?;
        if !resp.status().is_success() {
            return Err(SyncError::Transport(format!(
                "GET {} returned {}",
                url,
                resp.status()
            )));
        }
        resp.text()
            .map_err(|e| SyncError::Transport(format!("read {}: {}", url, e)))
    }
}
