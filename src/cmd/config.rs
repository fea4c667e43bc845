use crate::config::{AppConfig, UpdateSettings};
use crate::domain::target::Variant;
use crate::error::AppResult;

/// Prints the configuration a run would use, secrets masked.
pub fn run(config: &AppConfig) -> AppResult<()> {
    for line in describe(config) {
        println!("{line}");
    }
    Ok(())
}

fn describe(config: &AppConfig) -> Vec<String> {
    let mut lines = vec![
        format!("Workspace root: {}", config.workspace_root.display()),
        format!("Repository: {}", display_value(&config.repository)),
        format!("GitHub API URL: {}", config.api_base_url),
        format!("GitHub token: {}", mask_secret(&config.github_token)),
    ];

    for variant in [Variant::Readme, Variant::Jekyll] {
        let settings = UpdateSettings::for_variant(variant);
        lines.push(format!(
            "[{}] targets: {}; files per directory: {}; commits scanned: {}; excluded: {}",
            variant.as_str(),
            variant.target_names().join(", "),
            settings.files_per_directory,
            settings.commit_limit,
            settings.exclude_patterns.join(" "),
        ));
    }
    lines
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(token) if token.chars().count() >= 12 => {
            let count = token.chars().count();
            let suffix: String = token.chars().skip(count - 4).collect();
            format!("***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
