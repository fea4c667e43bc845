use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};

use crate::domain::exclusion::ExclusionFilter;

/// One commit as reported by the history service, newest first.
#[derive(Debug, Clone)]
pub struct CommitSnapshot {
    pub sha: String,
    pub html_url: String,
    pub author_name: String,
    pub authored_at: DateTime<Utc>,
    pub message: String,
    pub files: Vec<String>,
}

/// Last known modification of a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: String,
    pub last_modified: DateTime<Utc>,
    pub author: String,
    pub commit_message: String,
    pub commit_url: String,
}

impl ChangeRecord {
    fn from_commit(path: &str, commit: &CommitSnapshot) -> Self {
        Self {
            path: path.to_string(),
            last_modified: commit.authored_at,
            author: commit.author_name.clone(),
            commit_message: headline(&commit.message).to_string(),
            commit_url: commit.html_url.clone(),
        }
    }
}

/// Most recent change per repository-relative path, ordered by path.
#[derive(Debug, Clone, Default)]
pub struct ChangeMap {
    records: BTreeMap<String, ChangeRecord>,
}

impl ChangeMap {
    pub fn from_commits(commits: &[CommitSnapshot], filter: &ExclusionFilter) -> Self {
        let mut records = BTreeMap::new();
        for commit in commits {
            tracing::debug!(sha = %commit.sha, files = commit.files.len(), "aggregating commit");
            for path in &commit.files {
                if filter.is_excluded(path) {
                    tracing::debug!(path = %path, "skipping excluded path");
                    continue;
                }
                match records.entry(path.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(ChangeRecord::from_commit(path, commit));
                    }
                    Entry::Occupied(mut slot) => {
                        if commit.authored_at > slot.get().last_modified {
                            slot.insert(ChangeRecord::from_commit(path, commit));
                        }
                    }
                }
            }
        }
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn headline(message: &str) -> &str {
    message.split('\n').next().unwrap_or_default().trim_end_matches('\r')
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid fixture date");
        Utc.from_utc_datetime(&naive)
    }

    pub fn commit(sha: &str, authored_at: DateTime<Utc>, files: &[&str]) -> CommitSnapshot {
        CommitSnapshot {
            sha: sha.to_string(),
            html_url: format!("https://github.com/octo/site/commit/{sha}"),
            author_name: format!("author-{sha}"),
            authored_at,
            message: format!("change {sha}\n\nlonger body"),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn record(path: &str, last_modified: DateTime<Utc>) -> ChangeRecord {
        ChangeRecord {
            path: path.to_string(),
            last_modified,
            author: "A".to_string(),
            commit_message: "fix bug".to_string(),
            commit_url: "u".to_string(),
        }
    }

    impl ChangeMap {
        pub fn get(&self, path: &str) -> Option<&ChangeRecord> {
            self.records.get(path)
        }
    }

    pub fn map_of(records: Vec<ChangeRecord>) -> ChangeMap {
        ChangeMap {
            records: records
                .into_iter()
                .map(|record| (record.path.clone(), record))
                .collect(),
        }
    }
}
