use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Contents of a markdown file, or `None` when it does not exist yet.
pub fn read_existing(path: &Path) -> AppResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(AppError::Io(err)),
    }
}

/// Overwrites `path`, creating missing parent directories first.
pub fn write(path: &Path, contents: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_existing(&tmp.path().join("README.md")).unwrap(), None);
    }

    #[test]
    fn directory_in_place_of_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("README.md")).unwrap();
        assert!(read_existing(&tmp.path().join("README.md")).is_err());
    }

    #[test]
    fn write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/index.md");
        write(&path, "hello").unwrap();
        assert_eq!(read_existing(&path).unwrap().as_deref(), Some("hello"));
    }
}
