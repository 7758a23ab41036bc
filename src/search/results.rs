//! Unified Search Results
//!
//! The search endpoint returns either course timings or courses; the
//! server decides which for a given filter set and tags the whole
//! response with a single discriminator. This module models the wire
//! shape and normalizes it into one closed result union.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

// == Result Type Discriminator ==
/// Per-response discriminator: every item in a response shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Timings,
    Courses,
}

// == Result Item Payloads ==
/// A course timing as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTiming {
    pub id: u64,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub course_slug: Option<String>,
    #[serde(default)]
    pub city_slug: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub fee: Option<f64>,
}

/// A course as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCourse {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// == Unified Result ==
/// Closed union over the two search result variants. Consumers match
/// exhaustively; there is no catch-all shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UnifiedSearchResult {
    Timing { id: u64, data: SearchTiming },
    Course { id: u64, data: SearchCourse },
}

impl UnifiedSearchResult {
    pub fn id(&self) -> u64 {
        match self {
            UnifiedSearchResult::Timing { id, .. } => *id,
            UnifiedSearchResult::Course { id, .. } => *id,
        }
    }

    pub fn result_type(&self) -> ResultType {
        match self {
            UnifiedSearchResult::Timing { .. } => ResultType::Timings,
            UnifiedSearchResult::Course { .. } => ResultType::Courses,
        }
    }
}

// == Wire Shape ==
/// Raw search response as returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub result_type: ResultType,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Normalized search response: one homogeneous result list plus the
/// batch discriminator and total count.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResults {
    pub result_type: ResultType,
    pub results: Vec<UnifiedSearchResult>,
    pub total_count: usize,
}

impl SearchResponse {
    /// Parses every raw item according to the batch discriminator.
    ///
    /// A malformed item fails the whole normalization: a response that
    /// lies about its discriminator should surface as an error, not as a
    /// silently shorter list.
    pub fn normalize(self) -> Result<NormalizedResults> {
        let mut results = Vec::with_capacity(self.results.len());

        for item in self.results {
            let unified = match self.result_type {
                ResultType::Timings => {
                    let timing: SearchTiming = serde_json::from_value(item).map_err(|e| {
                        ApiError::Unknown(format!("malformed timing result: {}", e))
                    })?;
                    UnifiedSearchResult::Timing {
                        id: timing.id,
                        data: timing,
                    }
                }
                ResultType::Courses => {
                    let course: SearchCourse = serde_json::from_value(item).map_err(|e| {
                        ApiError::Unknown(format!("malformed course result: {}", e))
                    })?;
                    UnifiedSearchResult::Course {
                        id: course.id,
                        data: course,
                    }
                }
            };
            results.push(unified);
        }

        let total_count = self.total.map(|t| t as usize).unwrap_or(results.len());

        Ok(NormalizedResults {
            result_type: self.result_type,
            results,
            total_count,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course_response() -> SearchResponse {
        serde_json::from_value(json!({
            "result_type": "courses",
            "results": [
                {"id": 1, "title": "Leading Teams", "slug": "leading-teams"},
                {"id": 2, "title": "Leadership Essentials", "slug": "leadership-essentials"},
            ],
            "total": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_discriminator_parses_lowercase() {
        let response: SearchResponse =
            serde_json::from_value(json!({"result_type": "timings", "results": []})).unwrap();
        assert_eq!(response.result_type, ResultType::Timings);
    }

    #[test]
    fn test_normalize_courses() {
        let normalized = course_response().normalize().unwrap();

        assert_eq!(normalized.result_type, ResultType::Courses);
        assert_eq!(normalized.total_count, 2);
        assert!(normalized
            .results
            .iter()
            .all(|r| r.result_type() == ResultType::Courses));
        assert_eq!(normalized.results[0].id(), 1);
    }

    #[test]
    fn test_normalize_timings() {
        let response: SearchResponse = serde_json::from_value(json!({
            "result_type": "timings",
            "results": [
                {"id": 11, "course_slug": "leading-teams", "city_slug": "dubai",
                 "start_date": "2026-09-07"},
            ]
        }))
        .unwrap();

        let normalized = response.normalize().unwrap();
        assert_eq!(normalized.result_type, ResultType::Timings);
        // Missing total falls back to the result count
        assert_eq!(normalized.total_count, 1);
        match &normalized.results[0] {
            UnifiedSearchResult::Timing { data, .. } => {
                assert_eq!(data.city_slug.as_deref(), Some("dubai"));
            }
            UnifiedSearchResult::Course { .. } => panic!("expected timing variant"),
        }
    }

    #[test]
    fn test_normalize_rejects_mismatched_items() {
        // Tagged as courses but the item lacks course fields
        let response: SearchResponse = serde_json::from_value(json!({
            "result_type": "courses",
            "results": [{"id": 5}]
        }))
        .unwrap();

        assert!(response.normalize().is_err());
    }

    #[test]
    fn test_empty_response_normalizes() {
        let response: SearchResponse =
            serde_json::from_value(json!({"result_type": "courses"})).unwrap();
        let normalized = response.normalize().unwrap();
        assert!(normalized.results.is_empty());
        assert_eq!(normalized.total_count, 0);
    }
}
