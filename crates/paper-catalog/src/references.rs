//! # Parent References
//!
//! Lookups that entity hooks use to check the parents a write refers to. They ask the
//! parent actor through its [`ResourceClient`] and translate a missing parent into the
//! catalog's `"<Parent> not found"` error.

use crate::error::{CatalogError, Resource};
use crate::model::{
    College, Course, CourseId, Lineage, LineageRequest, Semester, SemesterId, Subject,
};
use catalog_framework::{ActorEntity, ResourceClient};

/// Fetches a parent that must exist.
pub async fn require<T: ActorEntity>(
    client: &ResourceClient<T>,
    id: T::Id,
    resource: Resource,
) -> Result<T, CatalogError> {
    client
        .get(id)
        .await
        .map_err(|e| CatalogError::Unavailable(e.to_string()))?
        .ok_or_else(|| resource.not_found())
}

fn mismatch(param: &str, msg: &str) -> CatalogError {
    CatalogError::field(param, msg)
}

/// A parent the request may name. A named parent must exist, and must then agree
/// with the one derived from below.
async fn named_or_derived<T: ActorEntity>(
    client: &ResourceClient<T>,
    named: Option<T::Id>,
    derived: T::Id,
    resource: Resource,
    (param, msg): (&str, &str),
) -> Result<T, CatalogError> {
    let id = named.unwrap_or_else(|| derived.clone());
    let parent = require(client, id.clone(), resource).await?;
    if id != derived {
        return Err(mismatch(param, msg));
    }
    Ok(parent)
}

/// Course of a subject: the semester's course. A course named explicitly must exist
/// and agree.
pub async fn subject_course(
    semesters: &ResourceClient<Semester>,
    courses: &ResourceClient<Course>,
    semester: SemesterId,
    course: Option<CourseId>,
) -> Result<CourseId, CatalogError> {
    let semester = require(semesters, semester, Resource::Semester).await?;
    let course = named_or_derived(
        courses,
        course,
        semester.course,
        Resource::Course,
        ("course", "Course does not match the semester's course"),
    )
    .await?;
    Ok(course.id)
}

/// Parent clients needed to resolve a paper's lineage.
pub struct LineageClients<'a> {
    pub colleges: &'a ResourceClient<College>,
    pub courses: &'a ResourceClient<Course>,
    pub semesters: &'a ResourceClient<Semester>,
    pub subjects: &'a ResourceClient<Subject>,
}

impl LineageClients<'_> {
    /// Walks up from the subject, filling omitted parents and checking named ones.
    ///
    /// Every parent must exist, named or derived. A named parent that disagrees with
    /// the one derived from below is a validation error.
    pub async fn resolve(&self, request: LineageRequest) -> Result<Lineage, CatalogError> {
        let subject = require(self.subjects, request.subject, Resource::Subject).await?;
        let semester = named_or_derived(
            self.semesters,
            request.semester,
            subject.semester,
            Resource::Semester,
            ("semester", "Subject does not belong to this semester"),
        )
        .await?;
        let course = named_or_derived(
            self.courses,
            request.course,
            semester.course,
            Resource::Course,
            ("course", "Semester does not belong to this course"),
        )
        .await?;
        let college = named_or_derived(
            self.colleges,
            request.college,
            course.college,
            Resource::College,
            ("college", "Course does not belong to this college"),
        )
        .await?;

        Ok(Lineage {
            college: college.id,
            course: course.id,
            semester: semester.id,
            subject: subject.id,
        })
    }
}
