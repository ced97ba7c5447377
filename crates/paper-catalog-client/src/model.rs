//! Documents as the catalog API returns them, and the bodies it accepts.
//!
//! Identifiers are kept as opaque strings. Parent references in read documents are
//! projections that become `None` once the parent has been deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything with an identifier, so reducers can replace or drop it by id.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef {
    pub id: String,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterRef {
    pub id: String,
    pub name: String,
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub college: Option<CodeRef>,
    pub duration: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub course: Option<CodeRef>,
    pub year: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub code: String,
    pub semester: Option<SemesterRef>,
    pub course: Option<CodeRef>,
    #[serde(default)]
    pub credits: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub college: Option<CodeRef>,
    pub course: Option<CodeRef>,
    pub semester: Option<SemesterRef>,
    pub subject: Option<CodeRef>,
    pub year: u32,
    /// Display string, e.g. `"Mid Term"`.
    pub exam_type: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub uploaded_by: String,
    pub download_count: u64,
    pub created_at: DateTime<Utc>,
}

identified!(College, Course, Semester, Subject, Paper);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollegeInput {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseInput {
    pub name: String,
    pub code: String,
    pub college: String,
    pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SemesterInput {
    pub name: String,
    pub number: u32,
    pub course: String,
    pub year: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubjectInput {
    pub name: String,
    pub code: String,
    pub semester: String,
    /// Derived from the semester when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
}

/// A paper upload: form fields plus the PDF.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperUpload {
    pub title: String,
    pub description: Option<String>,
    pub college: Option<String>,
    pub course: String,
    pub semester: String,
    pub subject: String,
    pub year: u32,
    pub exam_type: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Metadata edits of a paper. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Criteria of `GET /api/papers/filter`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
}

/// A downloaded paper file.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
