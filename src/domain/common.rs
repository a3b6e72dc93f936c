//! Shared domain vocabulary.

use serde::{Deserialize, Serialize};

/// Difficulty grade of an exam material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lowercase form used in cache keys and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Exam section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Reading,
    Listening,
}

impl Section {
    /// Lowercase form used in cache keys and URL paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Reading => "reading",
            Section::Listening => "listening",
        }
    }
}

/// Optional filters narrowing a content or practice list.
///
/// Unset fields are dropped everywhere: they never reach the cache key
/// and never reach the query string, so functionally identical queries
/// land on one cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilters {
    /// Restrict to one difficulty grade.
    pub difficulty: Option<Difficulty>,
    /// Full-text search over titles.
    pub search: Option<String>,
    /// Page number, 1-based.
    pub page: Option<u32>,
}

impl ContentFilters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one difficulty grade (builder pattern).
    #[must_use]
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the title search text.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the page number.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Query-string form, with unset fields omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(difficulty) = self.difficulty {
            query.push(("difficulty", difficulty.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_omits_unset_fields() {
        let filters = ContentFilters::new().difficulty(Difficulty::Hard);

        assert_eq!(filters.to_query(), vec![("difficulty", "hard".to_string())]);
        assert!(ContentFilters::new().to_query().is_empty());
    }
}
