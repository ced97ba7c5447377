//! # Subject Client
//!
//! Wraps a `ResourceClient<Subject>`. On create it derives the subject's course from
//! the semester before the payload reaches the actor; the actor's `on_create` hook
//! checks the pair again when the subject is committed.

use super::{found, parents};
use crate::error::{CatalogError, Resource};
use crate::model::{
    CodeRef, Course, CourseId, Semester, SemesterRef, Subject, SubjectDraft, SubjectFilter,
    SubjectId, SubjectView,
};
use crate::references::subject_course;
use async_trait::async_trait;
use catalog_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SubjectClient {
    inner: ResourceClient<Subject>,
    semesters: ResourceClient<Semester>,
    courses: ResourceClient<Course>,
}

impl SubjectClient {
    pub fn new(
        inner: ResourceClient<Subject>,
        semesters: ResourceClient<Semester>,
        courses: ResourceClient<Course>,
    ) -> Self {
        Self {
            inner,
            semesters,
            courses,
        }
    }

    async fn expand(&self, subjects: Vec<Subject>) -> Result<Vec<SubjectView>, CatalogError> {
        let semesters = parents::<_, _, SemesterRef>(
            &subjects,
            |s| s.semester,
            &self.semesters,
            Resource::Semester,
            |s: &Semester| s.id,
        )
        .await?;
        let courses = parents::<_, _, CodeRef<CourseId>>(
            &subjects,
            |s| s.course,
            &self.courses,
            Resource::Course,
            |c: &Course| c.id,
        )
        .await?;
        Ok(subjects
            .into_iter()
            .map(|s| {
                let semester = semesters.get(&s.semester);
                let course = courses.get(&s.course);
                s.into_view(semester, course)
            })
            .collect())
    }

    async fn expand_one(&self, subject: Subject) -> Result<SubjectView, CatalogError> {
        let mut views = self.expand(vec![subject]).await?;
        views.pop().ok_or_else(|| Resource::Subject.not_found())
    }

    #[instrument(skip(self))]
    pub async fn create(&self, draft: SubjectDraft) -> Result<SubjectView, CatalogError> {
        let course =
            subject_course(&self.semesters, &self.courses, draft.semester, draft.course).await?;
        debug!(%course, "Derived subject course");
        let subject = self
            .inner
            .create(draft.resolved(course))
            .await
            .map_err(Self::map_error)?;
        self.expand_one(subject).await
    }

    /// Subjects matching `filter`, by name.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: SubjectFilter) -> Result<Vec<SubjectView>, CatalogError> {
        let subjects = self.inner.list(filter).await.map_err(Self::map_error)?;
        self.expand(subjects).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: SubjectId) -> Result<SubjectView, CatalogError> {
        let subject = found(self.fetch(id).await?, Resource::Subject)?;
        self.expand_one(subject).await
    }

    /// The course is derived inside the actor for updates.
    #[instrument(skip(self))]
    pub async fn update(&self, id: SubjectId, draft: SubjectDraft) -> Result<SubjectView, CatalogError> {
        debug!("Sending request");
        let subject = self.inner.update(id, draft).await.map_err(Self::map_error)?;
        self.expand_one(subject).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: SubjectId) -> Result<(), CatalogError> {
        self.remove(id, ()).await
    }
}

#[async_trait]
impl ActorClient<Subject> for SubjectClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Subject> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CatalogError {
        CatalogError::from_framework(e, Resource::Subject)
    }
}
