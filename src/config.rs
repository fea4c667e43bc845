use std::env;
use std::path::{Path, PathBuf};

use crate::domain::fragment::Markers;
use crate::domain::repository::RepositoryId;
use crate::domain::target::Variant;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_FILES_PER_DIRECTORY: usize = 10;
pub const DEFAULT_COMMIT_LIMIT: usize = 100;

const BASE_EXCLUDES: &[&str] = &[r"^\.git.*", r"^\.github.*", r"^LICENSE$", r"^\.gitignore$"];
const JEKYLL_EXCLUDES: &[&str] = &[
    r"^_site/.*",
    r"^\.sass-cache/.*",
    r"^\.jekyll-cache/.*",
    r"^vendor/.*",
];
const BASE_SKIP_DIRS: &[&str] = &[".git", ".github"];
const JEKYLL_SKIP_DIRS: &[&str] = &["_site", ".jekyll-cache", ".sass-cache"];
const JEKYLL_CONTENT_DIRS: &[&str] = &[
    "_posts", "_pages", "_layouts", "_includes", "assets", "img", "video",
];

/// Values supplied by the surrounding automation environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub repository: Option<String>,
    pub api_base_url: String,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn load(workspace_root: &Path) -> AppResult<Self> {
        Ok(Self::from_lookup(workspace_root, |key| env::var(key).ok()))
    }

    pub fn from_lookup<F>(workspace_root: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            github_token: non_empty("GITHUB_TOKEN"),
            repository: non_empty("GITHUB_REPOSITORY"),
            api_base_url: non_empty("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            workspace_root: workspace_root.to_path_buf(),
        }
    }

    pub fn require_token(&self) -> AppResult<&str> {
        self.github_token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GITHUB_TOKEN is not set".to_string()))
    }

    pub fn require_repository(&self) -> AppResult<RepositoryId> {
        let value = self
            .repository
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GITHUB_REPOSITORY is not set".to_string()))?;
        RepositoryId::parse(value)
    }
}

/// Knobs shared by discovery, aggregation, rendering and splicing.
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub variant: Variant,
    pub exclude_patterns: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub markers: Markers,
    pub files_per_directory: usize,
    pub commit_limit: usize,
    /// Directories that get a seeded index.md when missing one.
    pub content_dirs: Vec<String>,
    pub seed_indexes: bool,
}

impl UpdateSettings {
    pub fn for_variant(variant: Variant) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let (exclude_patterns, skip_dirs, content_dirs) = match variant {
            Variant::Readme => (owned(BASE_EXCLUDES), owned(BASE_SKIP_DIRS), Vec::new()),
            Variant::Jekyll => (
                owned(&[BASE_EXCLUDES, JEKYLL_EXCLUDES].concat()),
                owned(&[BASE_SKIP_DIRS, JEKYLL_SKIP_DIRS].concat()),
                owned(JEKYLL_CONTENT_DIRS),
            ),
        };

        Self {
            variant,
            exclude_patterns,
            skip_dirs,
            markers: Markers::default(),
            files_per_directory: DEFAULT_FILES_PER_DIRECTORY,
            commit_limit: DEFAULT_COMMIT_LIMIT,
            seed_indexes: variant == Variant::Jekyll,
            content_dirs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(Path::new("/work"), |key| vars.get(key).cloned())
    }

    #[test]
    fn reads_github_environment() {
        let config = config_from(&[
            ("GITHUB_TOKEN", "ghp_secret"),
            ("GITHUB_REPOSITORY", "octo/site"),
        ]);
        assert_eq!(config.require_token().unwrap(), "ghp_secret");
        assert_eq!(config.require_repository().unwrap().to_string(), "octo/site");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.workspace_root, PathBuf::from("/work"));
    }

    #[test]
    fn honours_enterprise_api_url() {
        let config = config_from(&[("GITHUB_API_URL", "https://ghe.example.com/api/v3")]);
        assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn missing_values_are_configuration_errors() {
        let config = config_from(&[("GITHUB_TOKEN", "  ")]);
        assert!(matches!(config.require_token(), Err(AppError::Configuration(_))));
        assert!(matches!(
            config.require_repository(),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn jekyll_settings_extend_readme_settings() {
        let readme = UpdateSettings::for_variant(Variant::Readme);
        let jekyll = UpdateSettings::for_variant(Variant::Jekyll);

        assert!(
            readme
                .exclude_patterns
                .iter()
                .all(|p| jekyll.exclude_patterns.contains(p))
        );
        assert!(jekyll.skip_dirs.contains(&"_site".to_string()));
        assert!(!readme.seed_indexes);
        assert!(jekyll.seed_indexes);
        assert!(readme.content_dirs.is_empty());
        assert_eq!(readme.files_per_directory, 10);
        assert_eq!(readme.commit_limit, 100);
    }
}
