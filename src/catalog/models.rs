//! Catalog API models
//!
//! Deserialization targets for the content API. Only the fields the
//! product actually reads are modeled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// A course category (e.g. "Leadership", "Finance").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub courses_count: Option<u64>,
}

/// A training city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// A course as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub fee: Option<f64>,
}

/// A scheduled run of a course in a specific city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTiming {
    pub id: u64,
    pub course_slug: String,
    #[serde(default)]
    pub course_title: Option<String>,
    pub city_slug: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub fee: Option<f64>,
}

/// A blog post in the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// One sitemap URL entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Generic paginated list envelope used by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}
