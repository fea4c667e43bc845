use std::path::{Path, PathBuf};

/// Which flavour of site the markdown targets belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Readme,
    Jekyll,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Readme => "readme",
            Variant::Jekyll => "jekyll",
        }
    }

    /// Lowercase file names treated as markdown targets.
    pub fn target_names(&self) -> &'static [&'static str] {
        match self {
            Variant::Readme => &["readme.md"],
            Variant::Jekyll => &["readme.md", "index.md"],
        }
    }
}

/// A README.md or index.md maintained by the updater.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTarget {
    path: String,
}

impl MarkdownTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Repository-relative path with `/` separators.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Containing directory, empty at the repository root.
    pub fn directory(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    pub fn is_index(&self) -> bool {
        self.file_name().eq_ignore_ascii_case("index.md")
    }

    pub fn resolve(&self, root: &Path) -> PathBuf {
        self.path.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
    }

    /// Body written for a target that does not exist yet.
    pub fn placeholder_body(&self, variant: Variant) -> String {
        let directory = if self.directory().is_empty() {
            "Root"
        } else {
            self.directory()
        };
        let title = match variant {
            Variant::Readme => directory.to_string(),
            Variant::Jekyll => capitalize(directory),
        };

        if variant == Variant::Jekyll && self.is_index() {
            front_matter_page(&title)
        } else {
            format!("# {title} Directory\n\n")
        }
    }
}

pub fn front_matter_page(title: &str) -> String {
    format!("---\nlayout: default\ntitle: {title} Directory\n---\n\n# {title} Directory\n\n")
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
