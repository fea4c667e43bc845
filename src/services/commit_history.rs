use async_trait::async_trait;

use crate::domain::change::CommitSnapshot;
use crate::error::AppResult;

#[async_trait]
pub trait CommitHistoryService: Send + Sync {
    /// Up to `limit` commits of the default branch, newest first, each with
    /// the paths it touched.
    async fn recent_commits(&self, limit: usize) -> AppResult<Vec<CommitSnapshot>>;
}
