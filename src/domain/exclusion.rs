use regex::Regex;

use crate::error::AppResult;

/// Ordered path rules; a path is excluded as soon as one of them matches.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    rules: Vec<Regex>,
}

impl ExclusionFilter {
    /// Compiles each pattern, anchoring it at the start of the path when it
    /// is not anchored already.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> AppResult<Self> {
        let rules = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                if pattern.starts_with('^') {
                    Regex::new(pattern)
                } else {
                    Regex::new(&format!("^(?:{pattern})"))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(path))
    }
}
