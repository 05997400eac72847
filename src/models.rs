use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a repository tree. Files carry no `children` and no
/// `collapsed` key on the wire; directories always carry both once the
/// tree has been built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Dir,
}

impl FileNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        FileNode {
            name: name.into(),
            kind: NodeKind::File,
            path: path.into(),
            children: None,
            collapsed: None,
        }
    }

    /// Directories start expanded; the view model applies the initial
    /// collapse after taking ownership of the forest.
    pub fn dir(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<FileNode>,
    ) -> Self {
        FileNode {
            name: name.into(),
            kind: NodeKind::Dir,
            path: path.into(),
            children: Some(children),
            collapsed: Some(false),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }
}

#[derive(Debug, Deserialize)]
pub struct RepoQuery {
    pub owner: Option<String>,
    pub repo: Option<String>,
}

/// Response envelope for a successful exploration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoDetails {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub watchers: u64,
    pub default_branch: String,
    pub file_structure: Vec<FileNode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub language: Option<String>,
    pub license: Option<String>,
    pub open_issues: u64,
    pub forks: u64,
    pub private: bool,
}

impl RepoDetails {
    pub fn new(metadata: RepoMetadata, file_structure: Vec<FileNode>) -> Self {
        RepoDetails {
            name: metadata.name,
            description: metadata.description,
            stars: metadata.stargazers_count,
            watchers: metadata.watchers_count,
            default_branch: metadata.default_branch,
            file_structure,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            language: metadata.language,
            license: metadata.license.map(|license| license.name),
            open_issues: metadata.open_issues_count,
            forks: metadata.forks_count,
            private: metadata.private,
        }
    }
}

/// Subset of `GET /repos/{owner}/{repo}` that the envelope is built from.
#[derive(Debug, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub default_branch: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub language: Option<String>,
    pub license: Option<LicenseInfo>,
    pub open_issues_count: u64,
    pub forks_count: u64,
    pub private: bool,
}

#[derive(Debug, Deserialize)]
pub struct LicenseInfo {
    pub name: String,
}

/// One entry of `GET /repos/{owner}/{repo}/contents[/{path}]`. The `type`
/// field stays a plain string: entries that are neither "file" nor "dir"
/// (symlinks, submodules) are skipped by the tree builder.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}
