use std::path::Path;

use crate::domain::fragment::Markers;
use crate::domain::target::{capitalize, front_matter_page};
use crate::error::AppResult;
use crate::infra::markdown_file;

/// Creates an `index.md` in every existing content directory that lacks one.
/// Returns the repository-relative paths of the files written.
pub fn seed_indexes(
    root: &Path,
    content_dirs: &[String],
    markers: &Markers,
) -> AppResult<Vec<String>> {
    let mut seeded = Vec::new();

    for dir in content_dirs {
        let dir_path = root.join(dir);
        let index_path = dir_path.join("index.md");
        if !dir_path.is_dir() || index_path.exists() {
            continue;
        }

        let mut body = front_matter_page(&capitalize(dir));
        body.push_str(&format!("This directory contains {} files.\n\n", dir.to_lowercase()));
        body.push_str(&markers.pending_block());

        markdown_file::write(&index_path, &body)?;
        tracing::info!(path = %index_path.display(), "created index page");
        seeded.push(format!("{dir}/index.md"));
    }

    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn dirs(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn seeds_only_existing_directories_without_index() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("assets")).unwrap();
        fs::create_dir(tmp.path().join("_posts")).unwrap();
        fs::write(tmp.path().join("_posts/index.md"), "keep me").unwrap();

        let seeded = seed_indexes(
            tmp.path(),
            &dirs(&["_posts", "assets", "video"]),
            &Markers::default(),
        )
        .unwrap();

        assert_eq!(seeded, vec!["assets/index.md"]);
        assert_eq!(
            fs::read_to_string(tmp.path().join("_posts/index.md")).unwrap(),
            "keep me"
        );
        assert!(!tmp.path().join("video").exists());
    }

    #[test]
    fn seeded_page_carries_front_matter_and_markers() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("img")).unwrap();

        seed_indexes(tmp.path(), &dirs(&["img"]), &Markers::default()).unwrap();

        let body = fs::read_to_string(tmp.path().join("img/index.md")).unwrap();
        assert!(body.starts_with("---\nlayout: default\ntitle: Img Directory\n---\n\n# Img Directory\n\n"));
        assert!(body.contains("This directory contains img files.\n\n"));
        assert!(body.ends_with("*Updates will appear here after the next run*\n\n<!-- RECENT_CHANGES_END -->"));
    }
}
