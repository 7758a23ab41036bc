//! Lead-Capture Forms
//!
//! Typed payloads for the five lead-capture forms, submitted as
//! multipart bodies through the gateway. Submissions are never cached.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gateway::{ApiClient, ApiResponse, RequestOptions};

// == Form Kind ==
/// The five lead-capture forms the site offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Register,
    Inquire,
    Download,
    Contact,
    Join,
}

impl FormKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            FormKind::Register => "/forms/register",
            FormKind::Inquire => "/forms/inquire",
            FormKind::Download => "/forms/download",
            FormKind::Contact => "/forms/contact",
            FormKind::Join => "/forms/join",
        }
    }
}

// == Lead Submission ==
/// Visitor details captured by a form. Course/city context is present
/// when the form was opened from a course or timing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub course_slug: Option<String>,
    #[serde(default)]
    pub city_slug: Option<String>,
}

impl LeadSubmission {
    /// Flattens the submission into multipart text fields, skipping
    /// unset optional fields.
    fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("phone".to_string(), self.phone.clone()),
        ];
        if let Some(company) = &self.company {
            fields.push(("company".to_string(), company.clone()));
        }
        if let Some(message) = &self.message {
            fields.push(("message".to_string(), message.clone()));
        }
        if let Some(course) = &self.course_slug {
            fields.push(("course".to_string(), course.clone()));
        }
        if let Some(city) = &self.city_slug {
            fields.push(("city".to_string(), city.clone()));
        }
        fields
    }
}

/// Submits a lead form; the caller decides how to surface failures.
pub async fn submit(
    client: &ApiClient,
    kind: FormKind,
    lead: &LeadSubmission,
) -> Result<ApiResponse> {
    client
        .post_form(kind.endpoint(), lead.to_fields(), RequestOptions::default())
        .await
}
