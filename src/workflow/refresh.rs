use std::path::Path;

use chrono::NaiveDateTime;

use crate::context::AppContext;
use crate::domain::change::ChangeMap;
use crate::domain::exclusion::ExclusionFilter;
use crate::domain::fragment::{Renderer, Splicer};
use crate::domain::scope::scope_changes;
use crate::domain::target::{MarkdownTarget, Variant};
use crate::error::AppResult;
use crate::infra::discovery::TargetFinder;
use crate::infra::markdown_file;
use crate::workflow::seed::seed_indexes;

pub struct RefreshOutcome {
    pub tracked_files: usize,
    pub seeded: Vec<String>,
    pub updates: Vec<TargetUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUpdate {
    pub path: String,
    pub listed: usize,
    pub created: bool,
}

/// Aggregates recent history once, then rewrites the fragment of every
/// markdown target under the workspace root.
pub async fn refresh_targets(ctx: &AppContext, now: NaiveDateTime) -> AppResult<RefreshOutcome> {
    let settings = &ctx.settings;
    let root = ctx.config.workspace_root.as_path();

    let filter = ExclusionFilter::new(&settings.exclude_patterns)?;
    let page = PageWriter {
        variant: settings.variant,
        renderer: Renderer::new(settings.variant, settings.markers.clone())?,
        splicer: Splicer::new(settings.markers.clone())?,
        files_per_directory: settings.files_per_directory,
    };

    let commits = ctx
        .commit_history
        .recent_commits(settings.commit_limit)
        .await?;
    let changes = ChangeMap::from_commits(&commits, &filter);
    tracing::info!(
        commits = commits.len(),
        files = changes.len(),
        "aggregated recent changes"
    );
    if changes.is_empty() {
        tracing::warn!("no tracked changes found in recent history");
    }

    let seeded = if settings.seed_indexes {
        seed_indexes(root, &settings.content_dirs, &settings.markers)?
    } else {
        Vec::new()
    };

    let targets = TargetFinder::new(settings.variant.target_names(), &settings.skip_dirs)
        .find(root)?;
    tracing::info!(
        count = targets.len(),
        variant = settings.variant.as_str(),
        "found markdown targets"
    );

    let mut updates = Vec::with_capacity(targets.len());
    for target in &targets {
        updates.push(page.update(root, target, &changes, now)?);
    }

    Ok(RefreshOutcome {
        tracked_files: changes.len(),
        seeded,
        updates,
    })
}

struct PageWriter {
    variant: Variant,
    renderer: Renderer,
    splicer: Splicer,
    files_per_directory: usize,
}

impl PageWriter {
    fn update(
        &self,
        root: &Path,
        target: &MarkdownTarget,
        changes: &ChangeMap,
        now: NaiveDateTime,
    ) -> AppResult<TargetUpdate> {
        let path = target.resolve(root);
        let existing = markdown_file::read_existing(&path)?;
        let created = existing.is_none();
        let content = existing.unwrap_or_else(|| target.placeholder_body(self.variant));

        let scoped = scope_changes(target.path(), changes, self.files_per_directory);
        let fragment = self.renderer.render(target, &scoped, now);
        markdown_file::write(&path, &self.splicer.splice(&content, &fragment))?;

        tracing::info!(path = target.path(), changes = scoped.len(), "updated markdown target");
        Ok(TargetUpdate {
            path: target.path().to_string(),
            listed: scoped.len(),
            created,
        })
    }
}
