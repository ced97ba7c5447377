use super::input::{self, Fields};
use super::refs::CodeRef;
use super::{CollegeId, CourseId};
use crate::error::{CatalogError, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A course offered by a college. `(code, college)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub code: String,
    pub college: CollegeId,
    /// Length of the course in years.
    pub duration: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseCreate {
    pub name: String,
    pub code: String,
    pub college: CollegeId,
    pub duration: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct CourseInput {
    pub name: Option<Value>,
    pub code: Option<Value>,
    pub college: Option<Value>,
    pub duration: Option<Value>,
}

impl CourseInput {
    pub fn validate(self) -> Result<CourseCreate, CatalogError> {
        let mut fields = Fields::new();
        let name = fields.required_text(&self.name, "name", "Name is required");
        let code = fields.required_text(&self.code, "code", "Code is required");
        let college = fields.required_text(&self.college, "college", "College is required");
        let duration = fields.required_number(&self.duration, "duration", "Duration is required");
        fields.finish()?;

        Ok(CourseCreate {
            name: name.unwrap_or_default(),
            code: code.unwrap_or_default(),
            college: input::reference(&college.unwrap_or_default(), Resource::College)?,
            duration: duration.unwrap_or_default(),
        })
    }
}

/// Equality criteria for listing courses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    pub college: Option<CollegeId>,
}

/// A course with its college expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub id: CourseId,
    pub name: String,
    pub code: String,
    pub college: Option<CodeRef<CollegeId>>,
    pub duration: u32,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn new(id: CourseId, params: CourseCreate) -> Self {
        Self {
            id,
            name: params.name,
            code: params.code,
            college: params.college,
            duration: params.duration,
            created_at: Utc::now(),
        }
    }

    pub fn into_view(self, college: Option<CodeRef<CollegeId>>) -> CourseView {
        CourseView {
            id: self.id,
            name: self.name,
            code: self.code,
            college,
            duration: self.duration,
            created_at: self.created_at,
        }
    }
}
