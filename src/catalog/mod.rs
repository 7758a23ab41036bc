//! Catalog Domain Module
//!
//! Typed models for the remote content API payloads and the logical
//! endpoint paths the data layer talks to. Payload shapes are owned by
//! the remote service, so fields are optional wherever the API is loose.

mod models;

pub use models::{
    BlogPost, Category, City, Course, CourseTiming, Paginated, SitemapEntry,
};

// == Logical Endpoints ==
/// Endpoint paths, relative to the API base. These prefixes double as
/// the invalidation patterns for domain-scoped cache clearing.
pub mod endpoints {
    pub const CATEGORIES: &str = "/categories";
    pub const CITIES: &str = "/cities";
    pub const COURSES: &str = "/courses";
    pub const UPCOMING_COURSES: &str = "/upcoming-courses";
    pub const BLOGS: &str = "/blogs";
    pub const SEARCH: &str = "/search";
    pub const SITEMAP: &str = "/sitemap";
}
