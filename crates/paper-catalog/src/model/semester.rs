use super::input::{self, Fields};
use super::refs::CodeRef;
use super::{CourseId, SemesterId};
use crate::error::{CatalogError, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A semester of a course. `(number, course)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: SemesterId,
    pub name: String,
    pub number: u32,
    pub course: CourseId,
    /// Year of study the semester belongs to.
    pub year: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemesterCreate {
    pub name: String,
    pub number: u32,
    pub course: CourseId,
    pub year: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct SemesterInput {
    pub name: Option<Value>,
    pub number: Option<Value>,
    pub course: Option<Value>,
    pub year: Option<Value>,
}

impl SemesterInput {
    pub fn validate(self) -> Result<SemesterCreate, CatalogError> {
        let mut fields = Fields::new();
        let name = fields.required_text(&self.name, "name", "Name is required");
        let number = fields.required_number(&self.number, "number", "Number is required");
        let course = fields.required_text(&self.course, "course", "Course is required");
        let year = fields.required_number(&self.year, "year", "Year is required");
        fields.finish()?;

        Ok(SemesterCreate {
            name: name.unwrap_or_default(),
            number: number.unwrap_or_default(),
            course: input::reference(&course.unwrap_or_default(), Resource::Course)?,
            year: year.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemesterFilter {
    pub course: Option<CourseId>,
}

/// A semester with its course expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterView {
    pub id: SemesterId,
    pub name: String,
    pub number: u32,
    pub course: Option<CodeRef<CourseId>>,
    pub year: u32,
    pub created_at: DateTime<Utc>,
}

impl Semester {
    pub fn new(id: SemesterId, params: SemesterCreate) -> Self {
        Self {
            id,
            name: params.name,
            number: params.number,
            course: params.course,
            year: params.year,
            created_at: Utc::now(),
        }
    }

    pub fn into_view(self, course: Option<CodeRef<CourseId>>) -> SemesterView {
        SemesterView {
            id: self.id,
            name: self.name,
            number: self.number,
            course,
            year: self.year,
            created_at: self.created_at,
        }
    }
}
