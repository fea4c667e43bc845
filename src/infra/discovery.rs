use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::domain::target::MarkdownTarget;
use crate::error::{AppError, AppResult};

/// Walks the working tree for markdown targets.
pub struct TargetFinder<'a> {
    file_names: &'a [&'a str],
    skip_dirs: &'a [String],
}

impl<'a> TargetFinder<'a> {
    pub fn new(file_names: &'a [&'a str], skip_dirs: &'a [String]) -> Self {
        Self {
            file_names,
            skip_dirs,
        }
    }

    /// Targets in traversal order, as repository-relative `/` paths.
    pub fn find(&self, root: &Path) -> AppResult<Vec<MarkdownTarget>> {
        let mut targets = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_skipped_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(AppError::Io(err.into())),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.is_target_name(&entry) {
                continue;
            }
            if let Some(relative) = relative_path(root, entry.path()) {
                tracing::debug!(path = %relative, "found markdown target");
                targets.push(MarkdownTarget::new(relative));
            }
        }

        Ok(targets)
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|skip| skip == name))
    }

    fn is_target_name(&self, entry: &DirEntry) -> bool {
        entry.file_name().to_str().is_some_and(|name| {
            let lower = name.to_lowercase();
            self.file_names.iter().any(|candidate| *candidate == lower)
        })
    }
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
