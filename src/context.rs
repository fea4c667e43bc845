use std::sync::Arc;

use crate::config::{AppConfig, UpdateSettings};
use crate::services::CommitHistoryService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub settings: UpdateSettings,
    pub commit_history: Arc<dyn CommitHistoryService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        settings: UpdateSettings,
        commit_history: Arc<dyn CommitHistoryService>,
    ) -> Self {
        Self {
            config,
            settings,
            commit_history,
        }
    }
}
