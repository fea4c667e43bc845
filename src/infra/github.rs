use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::change::CommitSnapshot;
use crate::domain::repository::RepositoryId;
use crate::error::{AppError, AppResult};
use crate::services::CommitHistoryService;

const PAGE_SIZE: usize = 100;
const FILES_PAGE_SIZE: usize = 300;
const MAX_FILE_PAGES: usize = 10;
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    token: String,
    repository: RepositoryId,
}

impl GitHubClient {
    pub fn new(api_base_url: &str, token: &str, repository: RepositoryId) -> Self {
        Self {
            http: Client::new(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            repository,
        }
    }

    fn repo_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base_url, self.repository.owner, self.repository.name
        )
    }

    fn commits_endpoint(&self) -> String {
        format!("{}/commits", self.repo_endpoint())
    }

    fn commit_endpoint(&self, sha: &str) -> String {
        format!("{}/commits/{sha}", self.repo_endpoint())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("recent-changes/", env!("CARGO_PKG_VERSION")))
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(|err| AppError::CommitHistory(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            AppError::CommitHistory(format!("failed to read GitHub response: {err}"))
        })?;

        check_status(status, url, &body)?;
        decode(&body)
    }

    async fn default_branch(&self) -> AppResult<String> {
        let repo: RepositoryPayload = self.get_json(&self.repo_endpoint(), &[]).await?;
        Ok(repo.default_branch)
    }

    async fn list_commits(&self, branch: &str, limit: usize) -> AppResult<Vec<CommitListItem>> {
        let per_page = limit.min(PAGE_SIZE);
        let endpoint = self.commits_endpoint();
        let endpoint = endpoint.as_str();
        collect_pages(limit, per_page, move |page| {
            let query = [
                ("sha", branch.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ];
            async move { self.get_json(endpoint, &query).await }
        })
        .await
    }

    /// Commit detail with every file page GitHub is willing to serve.
    async fn commit_detail(&self, sha: &str) -> AppResult<CommitPayload> {
        let endpoint = self.commit_endpoint(sha);
        let mut detail: CommitPayload = self.get_json(&endpoint, &[]).await?;
        let mut last_batch = detail.files.len();
        let mut page = 1usize;

        while last_batch == FILES_PAGE_SIZE && page < MAX_FILE_PAGES {
            page += 1;
            let next: CommitPayload = self
                .get_json(&endpoint, &[("page", page.to_string())])
                .await?;
            last_batch = next.files.len();
            detail.files.extend(next.files);
        }

        if last_batch == FILES_PAGE_SIZE {
            tracing::warn!(
                sha,
                files = detail.files.len(),
                "GitHub stopped listing files for this commit; later files are not tracked"
            );
        }
        Ok(detail)
    }
}

/// Requests pages of a fixed size until `limit` items arrive or a short page
/// marks the end. The size must stay fixed: GitHub offsets `page` by `per_page`.
async fn collect_pages<T, F, Fut>(
    limit: usize,
    per_page: usize,
    mut fetch: F,
) -> AppResult<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = AppResult<Vec<T>>>,
{
    let mut items = Vec::new();
    if limit == 0 || per_page == 0 {
        return Ok(items);
    }

    let mut page = 1usize;
    while items.len() < limit {
        let batch = fetch(page).await?;
        tracing::debug!(page, count = batch.len(), "fetched commit page");

        let exhausted = batch.len() < per_page;
        items.extend(batch);
        if exhausted {
            break;
        }
        page += 1;
    }

    items.truncate(limit);
    Ok(items)
}

#[async_trait]
impl CommitHistoryService for GitHubClient {
    async fn recent_commits(&self, limit: usize) -> AppResult<Vec<CommitSnapshot>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let branch = self.default_branch().await?;
        tracing::info!(repository = %self.repository, branch = %branch, "reading commit history");

        let listed = self.list_commits(&branch, limit).await?;
        let mut snapshots = Vec::with_capacity(listed.len());
        for item in listed {
            let detail = self.commit_detail(&item.sha).await?;
            snapshots.push(detail.into_snapshot());
        }
        Ok(snapshots)
    }
}

fn check_status(status: StatusCode, url: &str, body: &str) -> AppResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(AppError::CommitHistory(format!(
            "GitHub responded with {status} for {url}: {body}"
        )))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    serde_json::from_str(body)
        .map_err(|err| AppError::CommitHistory(format!("failed to parse GitHub response: {err}")))
}

#[derive(Deserialize)]
struct RepositoryPayload {
    default_branch: String,
}

#[derive(Deserialize)]
struct CommitListItem {
    sha: String,
}

#[derive(Deserialize)]
struct CommitPayload {
    sha: String,
    html_url: String,
    commit: GitCommit,
    #[serde(default)]
    files: Vec<CommitFile>,
}

impl CommitPayload {
    fn into_snapshot(self) -> CommitSnapshot {
        CommitSnapshot {
            sha: self.sha,
            html_url: self.html_url,
            author_name: self.commit.author.name,
            authored_at: self.commit.author.date,
            message: self.commit.message,
            files: self.files.into_iter().map(|file| file.filename).collect(),
        }
    }
}

#[derive(Deserialize)]
struct GitCommit {
    message: String,
    author: GitActor,
}

#[derive(Deserialize)]
struct GitActor {
    name: String,
    date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CommitFile {
    filename: String,
}
