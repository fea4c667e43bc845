use chrono::NaiveDateTime;
use regex::{NoExpand, Regex};

use crate::domain::change::ChangeRecord;
use crate::domain::scope::directory_prefix;
use crate::domain::target::{MarkdownTarget, Variant};
use crate::error::AppResult;

pub const START_MARKER: &str = "<!-- RECENT_CHANGES_START -->";
pub const END_MARKER: &str = "<!-- RECENT_CHANGES_END -->";

const HEADING: &str = "## Recently Updated Files";
const NO_CHANGES: &str = "*No recent changes found in this directory*";
const MAX_MESSAGE_CHARS: usize = 60;
const TRUNCATED_MESSAGE_CHARS: usize = 57;

/// The pair of comment lines delimiting the generated fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: START_MARKER.to_string(),
            end: END_MARKER.to_string(),
        }
    }
}

impl Markers {
    /// Marker block shown until the first real update lands.
    pub fn pending_block(&self) -> String {
        format!(
            "{}\n{HEADING}\n\n*Updates will appear here after the next run*\n\n{}",
            self.start, self.end
        )
    }
}

/// Renders the recent-changes table for one target.
#[derive(Debug, Clone)]
pub struct Renderer {
    variant: Variant,
    markers: Markers,
    post_pattern: Regex,
}

impl Renderer {
    pub fn new(variant: Variant, markers: Markers) -> AppResult<Self> {
        Ok(Self {
            variant,
            markers,
            post_pattern: Regex::new(r"^_posts/(\d{4}-\d{2}-\d{2})-(.*?)\.md")?,
        })
    }

    pub fn render(
        &self,
        target: &MarkdownTarget,
        changes: &[&ChangeRecord],
        now: NaiveDateTime,
    ) -> String {
        let mut out = format!("{}\n{HEADING}\n\n", self.markers.start);
        out.push_str(&format!("*Last updated: {}*\n\n", now.format("%Y-%m-%d %H:%M:%S")));

        if changes.is_empty() {
            out.push_str(NO_CHANGES);
            out.push('\n');
        } else {
            out.push_str("| File | Last Updated | Author | Commit Message |\n");
            out.push_str("| ---- | ------------ | ------ | -------------- |\n");
            for record in changes {
                out.push_str(&self.render_row(target, record));
                out.push('\n');
            }
        }

        out.push('\n');
        out.push_str(&self.markers.end);
        out
    }

    fn render_row(&self, target: &MarkdownTarget, record: &ChangeRecord) -> String {
        let (label, link) = match self.variant {
            Variant::Readme => readme_link(target, &record.path),
            Variant::Jekyll => self.jekyll_link(&record.path),
        };
        format!(
            "| [{label}]({link}) | {} | {} | [{}]({}) |",
            record.last_modified.format("%Y-%m-%d"),
            record.author,
            truncate_message(&record.commit_message),
            record.commit_url,
        )
    }

    fn jekyll_link(&self, path: &str) -> (String, String) {
        let file_name = base_name(path);

        let (label, link) = if let Some(caps) = self.post_pattern.captures(path) {
            let date = &caps[1];
            let slug = &caps[2];
            (format!("{date}: {}", slug.replace('-', " ")), format!("/blog/{slug}"))
        } else if let Some(stem) = markdown_stem(path)
            && !file_name.eq_ignore_ascii_case("readme.md")
        {
            (file_name.to_string(), format!("/{stem}/"))
        } else {
            (file_name.to_string(), format!("/{path}"))
        };

        if label.eq_ignore_ascii_case("readme.md") {
            let parent = path
                .rsplit_once('/')
                .map(|(dir, _)| base_name(dir))
                .unwrap_or("Main");
            return (parent.to_string(), link);
        }
        (label, link)
    }
}

fn readme_link(target: &MarkdownTarget, path: &str) -> (String, String) {
    let prefix = directory_prefix(target.path());
    let relative = path.strip_prefix(prefix.as_str()).unwrap_or(path);
    (base_name(path).to_string(), relative.replace(' ', "%20"))
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn markdown_stem(path: &str) -> Option<&str> {
    path.strip_suffix(".md")
        .or_else(|| path.strip_suffix(".markdown"))
}

pub fn truncate_message(message: &str) -> String {
    if message.chars().count() > MAX_MESSAGE_CHARS {
        let head: String = message.chars().take(TRUNCATED_MESSAGE_CHARS).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

/// Replaces or appends the marker-delimited fragment inside a document.
#[derive(Debug, Clone)]
pub struct Splicer {
    markers: Markers,
    section: Regex,
}

impl Splicer {
    pub fn new(markers: Markers) -> AppResult<Self> {
        let section = Regex::new(&format!(
            "(?s){}.*?{}",
            regex::escape(&markers.start),
            regex::escape(&markers.end)
        ))?;
        Ok(Self { markers, section })
    }

    pub fn has_fragment(&self, content: &str) -> bool {
        content.contains(&self.markers.start) && content.contains(&self.markers.end)
    }

    pub fn splice(&self, content: &str, fragment: &str) -> String {
        if self.has_fragment(content) {
            self.section
                .replace_all(content, NoExpand(fragment))
                .into_owned()
        } else {
            format!("{content}\n\n{fragment}")
        }
    }
}
