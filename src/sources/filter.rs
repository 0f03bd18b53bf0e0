use std::sync::OnceLock;

use regex::Regex;

use crate::sources::wikipedia::PageSummary;

pub const DEFAULT_MIN_EXTRACT_LENGTH: usize = 100;

fn excluded_title() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^lists? of\b|\(disambiguation\)").expect("title pattern is valid")
    })
}

/// Quality rules applied to candidate summaries before they enter a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityFilter {
    pub require_thumbnail: bool,
    pub min_extract_length: usize,
    pub exclude_lists: bool,
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self {
            require_thumbnail: true,
            min_extract_length: DEFAULT_MIN_EXTRACT_LENGTH,
            exclude_lists: true,
        }
    }
}

impl QualityFilter {
    /// Accept everything
    pub fn permissive() -> Self {
        Self {
            require_thumbnail: false,
            min_extract_length: 0,
            exclude_lists: false,
        }
    }

    pub fn accepts(&self, summary: &PageSummary) -> bool {
        if self.require_thumbnail && summary.thumbnail.is_none() {
            return false;
        }

        if summary.extract.chars().count() < self.min_extract_length {
            return false;
        }

        if self.exclude_lists {
            if summary.is_disambiguation() || excluded_title().is_match(&summary.title) {
                return false;
            }
            if summary.extract.contains("may refer to") {
                return false;
            }
        }

        true
    }
}
