//! Job board search filters.
//!
//! The job search form sends placeholder values for "no filter"; they are
//! normalised away here so the query layer only ever sees real predicates.

use serde::{Deserialize, Serialize};

/// Placeholder sent by the category dropdown when no category is chosen.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Placeholder sent by the experience dropdown when no level is chosen.
pub const ANY_EXPERIENCE: &str = "Any Experience";

/// Normalised job search criteria. `None` means "do not filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact experience level match.
    pub experience_level: Option<String>,
    /// Case-insensitive substring of the job title.
    pub keywords: Option<String>,
}

impl JobSearchFilter {
    /// Builds a filter from raw query values, dropping blanks and placeholders.
    #[must_use]
    pub fn from_raw(
        category: Option<&str>,
        experience_level: Option<&str>,
        keywords: Option<&str>,
    ) -> Self {
        Self {
            category: meaningful(category, ALL_CATEGORIES),
            experience_level: meaningful(experience_level, ANY_EXPERIENCE),
            keywords: meaningful(keywords, ""),
        }
    }

    /// Returns true if no predicate beyond "active" applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.experience_level.is_none() && self.keywords.is_none()
    }

    /// Builds the `ILIKE` pattern for the keyword predicate, escaping
    /// `%`, `_` and `\` so user input is matched literally.
    #[must_use]
    pub fn keyword_pattern(&self) -> Option<String> {
        self.keywords.as_deref().map(|keywords| {
            let mut pattern = String::with_capacity(keywords.len() + 2);
            pattern.push('%');
            for c in keywords.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

fn meaningful(value: Option<&str>, placeholder: &str) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != placeholder)
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_dropped() {
        let filter = JobSearchFilter::from_raw(Some(ALL_CATEGORIES), Some(ANY_EXPERIENCE), None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_blank_values_are_dropped() {
        let filter = JobSearchFilter::from_raw(Some(""), Some("  "), Some(""));
        assert_eq!(filter, JobSearchFilter::default());
    }

    #[test]
    fn test_real_values_kept_and_trimmed() {
        let filter = JobSearchFilter::from_raw(Some("Technology"), Some("Senior "), Some(" rust"));

        assert_eq!(filter.category.as_deref(), Some("Technology"));
        assert_eq!(filter.experience_level.as_deref(), Some("Senior"));
        assert_eq!(filter.keywords.as_deref(), Some("rust"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_keyword_pattern_wraps_and_escapes() {
        let filter = JobSearchFilter::from_raw(None, None, Some("100%_dev"));
        assert_eq!(filter.keyword_pattern().as_deref(), Some("%100\\%\\_dev%"));
    }

    #[test]
    fn test_no_keyword_no_pattern() {
        assert_eq!(JobSearchFilter::default().keyword_pattern(), None);
    }
}
