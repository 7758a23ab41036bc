//! Search Filters
//!
//! Immutable filter state for a search invocation, plus the query-string
//! representation that keeps search state bookmarkable and shareable.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

// == Search Filters ==
/// Filter set for one search invocation. A new filter set is a new
/// cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub keyword: Option<String>,
    pub city_slug: Option<String>,
    pub category_slug: Option<String>,
    pub month: Option<String>,
    pub duration: Option<String>,
    /// Pagination cursor, 1-based
    pub page: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            keyword: None,
            city_slug: None,
            category_slug: None,
            month: None,
            duration: None,
            page: 1,
        }
    }
}

impl SearchFilters {
    /// Converts the set fields into query parameters. Ordering does not
    /// matter here: the cache layer canonicalizes keys by sorting.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(keyword) = &self.keyword {
            params.push(("keyword".to_string(), keyword.clone()));
        }
        if let Some(city) = &self.city_slug {
            params.push(("city".to_string(), city.clone()));
        }
        if let Some(category) = &self.category_slug {
            params.push(("category".to_string(), category.clone()));
        }
        if let Some(month) = &self.month {
            params.push(("month".to_string(), month.clone()));
        }
        if let Some(duration) = &self.duration {
            params.push(("duration".to_string(), duration.clone()));
        }
        params.push(("page".to_string(), self.page.to_string()));
        params
    }

    // == Query String Surface ==
    /// Encodes the filters as a page query string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.to_params() {
            serializer.append_pair(&name, &value);
        }
        serializer.finish()
    }

    /// Restores filters from a page query string. Unknown parameters are
    /// ignored; a missing or unparsable page falls back to 1.
    pub fn from_query_string(query: &str) -> Self {
        let mut filters = Self::default();
        for (name, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match name.as_ref() {
                "keyword" => filters.keyword = non_empty(&value),
                "city" => filters.city_slug = non_empty(&value),
                "category" => filters.category_slug = non_empty(&value),
                "month" => filters.month = non_empty(&value),
                "duration" => filters.duration = non_empty(&value),
                "page" => filters.page = value.parse().unwrap_or(1),
                _ => {}
            }
        }
        filters
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// == Filter Update ==
/// A partial update, shallow-merged into the current filters. `Some(None)`
/// clears a field; `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub keyword: Option<Option<String>>,
    pub city_slug: Option<Option<String>>,
    pub category_slug: Option<Option<String>>,
    pub month: Option<Option<String>>,
    pub duration: Option<Option<String>>,
    pub page: Option<u32>,
}

impl FilterUpdate {
    pub fn keyword(value: impl Into<String>) -> Self {
        Self {
            keyword: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn city(value: impl Into<String>) -> Self {
        Self {
            city_slug: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn category(value: impl Into<String>) -> Self {
        Self {
            category_slug: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn page(value: u32) -> Self {
        Self {
            page: Some(value),
            ..Self::default()
        }
    }

    /// Whether this update changes the keyword relative to `filters`.
    pub fn changes_keyword(&self, filters: &SearchFilters) -> bool {
        match &self.keyword {
            Some(new) => *new != filters.keyword,
            None => false,
        }
    }

    /// Applies the update in place.
    pub fn apply(&self, filters: &mut SearchFilters) {
        if let Some(keyword) = &self.keyword {
            filters.keyword = keyword.clone();
        }
        if let Some(city) = &self.city_slug {
            filters.city_slug = city.clone();
        }
        if let Some(category) = &self.category_slug {
            filters.category_slug = category.clone();
        }
        if let Some(month) = &self.month {
            filters.month = month.clone();
        }
        if let Some(duration) = &self.duration {
            filters.duration = duration.clone();
        }
        if let Some(page) = self.page {
            filters.page = page;
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_is_one() {
        assert_eq!(SearchFilters::default().page, 1);
    }

    #[test]
    fn test_to_params_skips_unset_fields() {
        let filters = SearchFilters {
            keyword: Some("leadership".to_string()),
            ..Default::default()
        };
        let params = filters.to_params();
        assert_eq!(params.len(), 2); // keyword + page
        assert!(params.contains(&("keyword".to_string(), "leadership".to_string())));
        assert!(params.contains(&("page".to_string(), "1".to_string())));
    }

    #[test]
    fn test_query_string_round_trip() {
        let filters = SearchFilters {
            keyword: Some("project management".to_string()),
            city_slug: Some("dubai".to_string()),
            month: Some("2026-09".to_string()),
            page: 3,
            ..Default::default()
        };

        let restored = SearchFilters::from_query_string(&filters.to_query_string());
        assert_eq!(restored, filters);
    }

    #[test]
    fn test_from_query_string_ignores_unknown_params() {
        let filters = SearchFilters::from_query_string("?keyword=hr&utm_source=mail&page=2");
        assert_eq!(filters.keyword, Some("hr".to_string()));
        assert_eq!(filters.page, 2);
    }

    #[test]
    fn test_from_query_string_bad_page_falls_back() {
        let filters = SearchFilters::from_query_string("page=abc");
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_update_merges_shallowly() {
        let mut filters = SearchFilters {
            keyword: Some("finance".to_string()),
            city_slug: Some("london".to_string()),
            page: 4,
            ..Default::default()
        };

        FilterUpdate::keyword("leadership").apply(&mut filters);

        assert_eq!(filters.keyword, Some("leadership".to_string()));
        // Untouched fields survive, including the page cursor
        assert_eq!(filters.city_slug, Some("london".to_string()));
        assert_eq!(filters.page, 4);
    }

    #[test]
    fn test_update_can_clear_a_field() {
        let mut filters = SearchFilters {
            city_slug: Some("london".to_string()),
            ..Default::default()
        };

        let update = FilterUpdate {
            city_slug: Some(None),
            ..Default::default()
        };
        update.apply(&mut filters);

        assert_eq!(filters.city_slug, None);
    }

    #[test]
    fn test_changes_keyword() {
        let filters = SearchFilters {
            keyword: Some("finance".to_string()),
            ..Default::default()
        };

        assert!(FilterUpdate::keyword("leadership").changes_keyword(&filters));
        assert!(!FilterUpdate::keyword("finance").changes_keyword(&filters));
        assert!(!FilterUpdate::page(2).changes_keyword(&filters));
    }
}
