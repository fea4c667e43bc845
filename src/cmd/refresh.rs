use chrono::Local;

use crate::config::UpdateSettings;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::refresh::{RefreshOutcome, refresh_targets};

#[derive(Debug, Clone, Default)]
pub struct RefreshCommandArgs {
    pub max_files: Option<usize>,
    pub commit_limit: Option<usize>,
    pub no_seed: bool,
}

impl RefreshCommandArgs {
    pub fn apply(&self, settings: &mut UpdateSettings) {
        if let Some(max_files) = self.max_files {
            settings.files_per_directory = max_files;
        }
        if let Some(commit_limit) = self.commit_limit {
            settings.commit_limit = commit_limit;
        }
        if self.no_seed {
            settings.seed_indexes = false;
        }
    }
}

pub async fn run(ctx: &AppContext) -> AppResult<RefreshOutcome> {
    refresh_targets(ctx, Local::now().naive_local()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::target::Variant;

    #[test]
    fn overrides_only_what_was_given() {
        let mut settings = UpdateSettings::for_variant(Variant::Jekyll);
        RefreshCommandArgs::default().apply(&mut settings);
        assert_eq!(settings.files_per_directory, 10);
        assert_eq!(settings.commit_limit, 100);
        assert!(settings.seed_indexes);

        RefreshCommandArgs {
            max_files: Some(5),
            commit_limit: Some(250),
            no_seed: true,
        }
        .apply(&mut settings);
        assert_eq!(settings.files_per_directory, 5);
        assert_eq!(settings.commit_limit, 250);
        assert!(!settings.seed_indexes);
    }
}
