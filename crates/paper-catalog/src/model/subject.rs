use super::input::{self, Fields};
use super::refs::{CodeRef, SemesterRef};
use super::{CourseId, SemesterId, SubjectId};
use crate::error::{CatalogError, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A subject taught in a semester. `(code, semester)` is unique.
///
/// `course` is derived: it always equals the course of `semester`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub semester: SemesterId,
    pub course: CourseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Validated subject fields. `course` may be left out and is then taken from the semester.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectDraft {
    pub name: String,
    pub code: String,
    pub semester: SemesterId,
    pub course: Option<CourseId>,
    pub credits: Option<u32>,
}

/// Subject fields with the course resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectCreate {
    pub name: String,
    pub code: String,
    pub semester: SemesterId,
    pub course: CourseId,
    pub credits: Option<u32>,
}

impl SubjectDraft {
    pub fn resolved(self, course: CourseId) -> SubjectCreate {
        SubjectCreate {
            name: self.name,
            code: self.code,
            semester: self.semester,
            course,
            credits: self.credits,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SubjectInput {
    pub name: Option<Value>,
    pub code: Option<Value>,
    pub semester: Option<Value>,
    pub course: Option<Value>,
    pub credits: Option<Value>,
}

impl SubjectInput {
    pub fn validate(self) -> Result<SubjectDraft, CatalogError> {
        let mut fields = Fields::new();
        let name = fields.required_text(&self.name, "name", "Name is required");
        let code = fields.required_text(&self.code, "code", "Code is required");
        let semester = fields.required_text(&self.semester, "semester", "Semester is required");
        let credits = fields.optional_number(&self.credits, "credits");
        fields.finish()?;

        let course = match input::text(&self.course) {
            Some(raw) => Some(input::reference(&raw, Resource::Course)?),
            None => None,
        };
        Ok(SubjectDraft {
            name: name.unwrap_or_default(),
            code: code.unwrap_or_default(),
            semester: input::reference(&semester.unwrap_or_default(), Resource::Semester)?,
            course,
            credits,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectFilter {
    pub semester: Option<SemesterId>,
    pub course: Option<CourseId>,
}

/// A subject with its semester and course expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub semester: Option<SemesterRef>,
    pub course: Option<CodeRef<CourseId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(id: SubjectId, params: SubjectCreate) -> Self {
        Self {
            id,
            name: params.name,
            code: params.code,
            semester: params.semester,
            course: params.course,
            credits: params.credits,
            created_at: Utc::now(),
        }
    }

    pub fn into_view(
        self,
        semester: Option<SemesterRef>,
        course: Option<CodeRef<CourseId>>,
    ) -> SubjectView {
        SubjectView {
            id: self.id,
            name: self.name,
            code: self.code,
            semester,
            course,
            credits: self.credits,
            created_at: self.created_at,
        }
    }
}
