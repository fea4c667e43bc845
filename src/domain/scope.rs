use crate::domain::change::{ChangeMap, ChangeRecord};

/// Prefix shared by every path below the directory holding `target`.
pub fn directory_prefix(target: &str) -> String {
    match target.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => format!("{dir}/"),
        _ => String::new(),
    }
}

/// Changes under the target's directory, newest first, at most `limit` of them.
/// The target itself is never part of its own scope.
pub fn scope_changes<'a>(
    target: &str,
    changes: &'a ChangeMap,
    limit: usize,
) -> Vec<&'a ChangeRecord> {
    let prefix = directory_prefix(target);
    let mut scoped: Vec<&ChangeRecord> = changes
        .iter()
        .filter(|record| record.path.starts_with(&prefix) && record.path != target)
        .collect();

    scoped.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    scoped.truncate(limit);
    scoped
}
