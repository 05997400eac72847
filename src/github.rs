use std::time::Duration;

use futures::future::BoxFuture;
use log::debug;
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{ContentsEntry, FileNode, RepoMetadata};

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("failed to construct HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Thin client over the repository metadata and contents endpoints. The
/// base URL is injectable so tests can point it at a stub server.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubClient {
    pub fn new(api_base: impl Into<String>) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GithubError::Client)?;
        Ok(GithubClient {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn repo_metadata(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<RepoMetadata, GithubError> {
        let url = format!("{}/repos/{}/{}", self.api_base, owner, repo);
        self.get_json(url, token).await
    }

    /// Fetches one directory listing. An empty `path` addresses the
    /// repository root.
    pub async fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        token: Option<&str>,
    ) -> Result<Vec<ContentsEntry>, GithubError> {
        let url = if path.is_empty() {
            format!("{}/repos/{}/{}/contents", self.api_base, owner, repo)
        } else {
            format!("{}/repos/{}/{}/contents/{}", self.api_base, owner, repo, path)
        };
        self.get_json(url, token).await
    }

    /// Expands an already-fetched listing into a fully resolved forest,
    /// issuing one further listing request per directory. The first failed
    /// request anywhere aborts the whole build; there is no partial result.
    ///
    /// Each level is reversed relative to upstream listing order. Consumers
    /// depend on that ordering.
    pub fn build_file_structure<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        entries: Vec<ContentsEntry>,
        token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<FileNode>, GithubError>> {
        Box::pin(async move {
            let mut structure = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry.entry_type.as_str() {
                    "file" => structure.push(FileNode::file(entry.name, entry.path)),
                    "dir" => {
                        let sub_entries =
                            self.contents(owner, repo, &entry.path, token).await?;
                        let children = self
                            .build_file_structure(owner, repo, sub_entries, token)
                            .await?;
                        structure.push(FileNode::dir(entry.name, entry.path, children));
                    }
                    other => {
                        debug!("Skipping entry '{}' of unsupported type '{}'", entry.path, other);
                    }
                }
            }
            structure.reverse();
            Ok(structure)
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        token: Option<&str>,
    ) -> Result<T, GithubError> {
        debug!("GET {}", url);
        let mut request = self.http.get(&url).header(header::ACCEPT, ACCEPT_GITHUB_JSON);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|source| GithubError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status { url, status });
        }
        response
            .json()
            .await
            .map_err(|source| GithubError::Decode { url, source })
    }
}
