use super::input::{self, Fields};
use super::refs::{CodeRef, SemesterRef};
use super::{AdminId, CollegeId, CourseId, PaperId, SemesterId, SubjectId};
use crate::error::{CatalogError, Resource};
use crate::storage::StoredFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The kind of examination a paper was set for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "Mid Term")]
    MidTerm,
    #[serde(rename = "End Term")]
    EndTerm,
    Supplementary,
    Practice,
    Other,
}

impl ExamType {
    pub const ALL: [ExamType; 5] = [
        ExamType::MidTerm,
        ExamType::EndTerm,
        ExamType::Supplementary,
        ExamType::Practice,
        ExamType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExamType::MidTerm => "Mid Term",
            ExamType::EndTerm => "End Term",
            ExamType::Supplementary => "Supplementary",
            ExamType::Practice => "Practice",
            ExamType::Other => "Other",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exam type {0:?}")]
pub struct UnknownExamType(pub String);

impl FromStr for ExamType {
    type Err = UnknownExamType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ExamType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownExamType(wanted.to_string()))
    }
}

/// The four parents of a paper.
///
/// Always consistent: `semester` belongs to `course`, `course` to `college`, and
/// `subject` is taught in `semester`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lineage {
    pub college: CollegeId,
    pub course: CourseId,
    pub semester: SemesterId,
    pub subject: SubjectId,
}

/// Parents named by a request. Omitted ones are derived from the next lower parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineageRequest {
    pub subject: SubjectId,
    pub semester: Option<SemesterId>,
    pub course: Option<CourseId>,
    pub college: Option<CollegeId>,
}

/// An uploaded question paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: PaperId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub college: CollegeId,
    pub course: CourseId,
    pub semester: SemesterId,
    pub subject: SubjectId,
    pub year: u32,
    pub exam_type: ExamType,
    /// Location under the `/uploads` mount, e.g. `uploads/papers/file-….pdf`.
    pub file_path: String,
    /// Name of the file as uploaded.
    pub file_name: String,
    pub file_size: u64,
    pub uploaded_by: AdminId,
    pub download_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Paper {
    pub fn new(id: PaperId, params: PaperCreate) -> Self {
        Self {
            id,
            title: params.title,
            description: params.description,
            college: params.lineage.college,
            course: params.lineage.course,
            semester: params.lineage.semester,
            subject: params.lineage.subject,
            year: params.year,
            exam_type: params.exam_type,
            file_path: params.file.path,
            file_name: params.file.name,
            file_size: params.file.size,
            uploaded_by: params.uploaded_by,
            download_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn lineage(&self) -> Lineage {
        Lineage {
            college: self.college,
            course: self.course,
            semester: self.semester,
            subject: self.subject,
        }
    }

    pub fn set_lineage(&mut self, lineage: Lineage) {
        self.college = lineage.college;
        self.course = lineage.course;
        self.semester = lineage.semester;
        self.subject = lineage.subject;
    }

    /// Newest first.
    pub fn newest_first(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Metadata of a paper, validated from the multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperDraft {
    pub title: String,
    pub description: Option<String>,
    pub year: u32,
    pub exam_type: ExamType,
    pub parents: LineageRequest,
}

/// Everything the paper actor needs to store a new paper.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperCreate {
    pub title: String,
    pub description: Option<String>,
    pub year: u32,
    pub exam_type: ExamType,
    pub lineage: Lineage,
    pub file: StoredFile,
    pub uploaded_by: AdminId,
}

impl PaperDraft {
    pub fn into_create(self, lineage: Lineage, file: StoredFile, uploaded_by: AdminId) -> PaperCreate {
        PaperCreate {
            title: self.title,
            description: self.description,
            year: self.year,
            exam_type: self.exam_type,
            lineage,
            file,
            uploaded_by,
        }
    }
}

/// Text fields of the upload form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperInput {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub college: Option<Value>,
    pub course: Option<Value>,
    pub semester: Option<Value>,
    pub subject: Option<Value>,
    pub year: Option<Value>,
    pub exam_type: Option<Value>,
}

fn exam_type(fields: &mut Fields, value: &Option<Value>) -> Option<ExamType> {
    let raw = input::text(value)?;
    match raw.parse() {
        Ok(t) => Some(t),
        Err(_) => {
            fields.push("examType", "Exam type is invalid");
            None
        }
    }
}

fn optional_reference<I: FromStr>(value: &Option<Value>, parent: Resource) -> Result<Option<I>, CatalogError> {
    input::text(value)
        .map(|raw| input::reference(&raw, parent))
        .transpose()
}

impl PaperInput {
    /// `has_file` reports whether the form carried a `file` part.
    pub fn validate(self, has_file: bool) -> Result<PaperDraft, CatalogError> {
        let mut fields = Fields::new();
        let title = fields.required_text(&self.title, "title", "Title is required");
        let year = fields.required_number(&self.year, "year", "Year is required");
        if input::text(&self.exam_type).is_none() {
            fields.push("examType", "Exam type is required");
        }
        let exam_type = exam_type(&mut fields, &self.exam_type);
        let subject = fields.required_text(&self.subject, "subject", "Subject is required");
        fields.required_text(&self.semester, "semester", "Semester is required");
        fields.required_text(&self.course, "course", "Course is required");
        if !has_file {
            fields.push("file", "File is required");
        }
        fields.finish()?;

        let parents = LineageRequest {
            subject: input::reference(&subject.unwrap_or_default(), Resource::Subject)?,
            semester: optional_reference(&self.semester, Resource::Semester)?,
            course: optional_reference(&self.course, Resource::Course)?,
            college: optional_reference(&self.college, Resource::College)?,
        };
        Ok(PaperDraft {
            title: title.unwrap_or_default(),
            description: input::text(&self.description),
            year: year.unwrap_or_default(),
            exam_type: exam_type.unwrap_or(ExamType::Other),
            parents,
        })
    }
}

/// Metadata edits. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub year: Option<u32>,
    pub exam_type: Option<ExamType>,
    pub college: Option<CollegeId>,
    pub course: Option<CourseId>,
    pub semester: Option<SemesterId>,
    pub subject: Option<SubjectId>,
}

impl PaperChanges {
    pub fn touches_lineage(&self) -> bool {
        self.college.is_some()
            || self.course.is_some()
            || self.semester.is_some()
            || self.subject.is_some()
    }
}

/// An edit together with the administrator requesting it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperUpdate {
    pub requested_by: AdminId,
    pub changes: PaperChanges,
}

/// A delete together with the administrator requesting it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRemoval {
    pub requested_by: AdminId,
}

/// JSON body of a paper edit.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperChangesInput {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub college: Option<Value>,
    pub course: Option<Value>,
    pub semester: Option<Value>,
    pub subject: Option<Value>,
    pub year: Option<Value>,
    pub exam_type: Option<Value>,
}

impl PaperChangesInput {
    pub fn validate(self) -> Result<PaperChanges, CatalogError> {
        let mut fields = Fields::new();
        let year = fields.optional_number(&self.year, "year");
        let exam_type = exam_type(&mut fields, &self.exam_type);
        fields.finish()?;

        Ok(PaperChanges {
            title: input::text(&self.title),
            description: self.description.as_ref().map(|_| input::text(&self.description)),
            year,
            exam_type,
            college: optional_reference(&self.college, Resource::College)?,
            course: optional_reference(&self.course, Resource::Course)?,
            semester: optional_reference(&self.semester, Resource::Semester)?,
            subject: optional_reference(&self.subject, Resource::Subject)?,
        })
    }
}

/// Equality criteria of `GET /api/papers/filter`. Empty means every paper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperFilter {
    pub college: Option<CollegeId>,
    pub course: Option<CourseId>,
    pub semester: Option<SemesterId>,
    pub subject: Option<SubjectId>,
    pub year: Option<u32>,
    pub exam_type: Option<ExamType>,
}

impl PaperFilter {
    pub fn matches(&self, paper: &Paper) -> bool {
        fn eq<T: PartialEq>(wanted: &Option<T>, actual: &T) -> bool {
            match wanted {
                Some(w) => w == actual,
                None => true,
            }
        }
        eq(&self.college, &paper.college)
            && eq(&self.course, &paper.course)
            && eq(&self.semester, &paper.semester)
            && eq(&self.subject, &paper.subject)
            && eq(&self.year, &paper.year)
            && eq(&self.exam_type, &paper.exam_type)
    }
}

/// Query string of `GET /api/papers/filter`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperQuery {
    pub college: Option<String>,
    pub course: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    pub year: Option<String>,
    pub exam_type: Option<String>,
}

fn query_id<I: FromStr>(fields: &mut Fields, raw: &Option<String>, param: &str, msg: &str) -> Option<I> {
    let raw = raw.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            fields.push(param, msg);
            None
        }
    }
}

impl PaperQuery {
    pub fn validate(self) -> Result<PaperFilter, CatalogError> {
        let mut fields = Fields::new();
        let filter = PaperFilter {
            college: query_id(&mut fields, &self.college, "college", "College id is invalid"),
            course: query_id(&mut fields, &self.course, "course", "Course id is invalid"),
            semester: query_id(&mut fields, &self.semester, "semester", "Semester id is invalid"),
            subject: query_id(&mut fields, &self.subject, "subject", "Subject id is invalid"),
            year: query_id(&mut fields, &self.year, "year", "Year must be a number"),
            exam_type: query_id(&mut fields, &self.exam_type, "examType", "Exam type is invalid"),
        };
        fields.finish()?;
        Ok(filter)
    }
}

/// A paper with its four parents expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperView {
    pub id: PaperId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub college: Option<CodeRef<CollegeId>>,
    pub course: Option<CodeRef<CourseId>>,
    pub semester: Option<SemesterRef>,
    pub subject: Option<CodeRef<SubjectId>>,
    pub year: u32,
    pub exam_type: ExamType,
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub uploaded_by: AdminId,
    pub download_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Expanded parents of one paper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperParents {
    pub college: Option<CodeRef<CollegeId>>,
    pub course: Option<CodeRef<CourseId>>,
    pub semester: Option<SemesterRef>,
    pub subject: Option<CodeRef<SubjectId>>,
}

impl Paper {
    pub fn into_view(self, parents: PaperParents) -> PaperView {
        PaperView {
            id: self.id,
            title: self.title,
            description: self.description,
            college: parents.college,
            course: parents.course,
            semester: parents.semester,
            subject: parents.subject,
            year: self.year,
            exam_type: self.exam_type,
            file_path: self.file_path,
            file_name: self.file_name,
            file_size: self.file_size,
            uploaded_by: self.uploaded_by,
            download_count: self.download_count,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exam_types_use_display_strings() {
        assert_eq!(serde_json::to_value(ExamType::MidTerm).unwrap(), json!("Mid Term"));
        assert_eq!("end term".parse::<ExamType>().unwrap(), ExamType::EndTerm);
        assert!("Final".parse::<ExamType>().is_err());
    }

    #[test]
    fn upload_form_requires_metadata_and_file() {
        let err = PaperInput::default().validate(false).unwrap_err();
        let CatalogError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let params: Vec<_> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(
            params,
            ["title", "year", "examType", "subject", "semester", "course", "file"]
        );
    }

    #[test]
    fn upload_form_college_is_optional() {
        let input = PaperInput {
            title: Some(json!("Midterm 2023")),
            year: Some(json!("2023")),
            exam_type: Some(json!("Mid Term")),
            subject: Some(json!(SubjectId::new().to_string())),
            semester: Some(json!(SemesterId::new().to_string())),
            course: Some(json!(CourseId::new().to_string())),
            ..Default::default()
        };
        let draft = input.validate(true).unwrap();
        assert_eq!(draft.year, 2023);
        assert_eq!(draft.exam_type, ExamType::MidTerm);
        assert!(draft.parents.college.is_none());
        assert!(draft.parents.semester.is_some());
    }

    #[test]
    fn malformed_reference_is_not_found() {
        let input = PaperInput {
            title: Some(json!("Quiz")),
            year: Some(json!(2022)),
            exam_type: Some(json!("Practice")),
            subject: Some(json!("nope")),
            semester: Some(json!("x")),
            course: Some(json!("y")),
            ..Default::default()
        };
        let err = input.validate(true).unwrap_err();
        assert_eq!(err.to_string(), "Subject not found");
    }

    #[test]
    fn query_rejects_malformed_ids_and_years() {
        let query = PaperQuery {
            course: Some("abc".into()),
            year: Some("twenty".into()),
            ..Default::default()
        };
        let CatalogError::Validation(errors) = query.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);

        let empty = PaperQuery {
            college: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty.validate().unwrap(), PaperFilter::default());
    }

    #[test]
    fn description_can_be_cleared() {
        let changes = PaperChangesInput {
            description: Some(json!("")),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(changes.description, Some(None));
        assert!(!changes.touches_lineage());
    }
}
