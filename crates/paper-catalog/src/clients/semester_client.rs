//! # Semester Client
//!
//! Wraps a `ResourceClient<Semester>` and expands each semester's course for reads.

use super::{found, parents};
use crate::error::{CatalogError, Resource};
use crate::model::{
    CodeRef, Course, CourseId, Semester, SemesterCreate, SemesterFilter, SemesterId, SemesterView,
};
use async_trait::async_trait;
use catalog_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SemesterClient {
    inner: ResourceClient<Semester>,
    courses: ResourceClient<Course>,
}

impl SemesterClient {
    pub fn new(inner: ResourceClient<Semester>, courses: ResourceClient<Course>) -> Self {
        Self { inner, courses }
    }

    async fn expand(&self, semesters: Vec<Semester>) -> Result<Vec<SemesterView>, CatalogError> {
        let courses = parents::<_, _, CodeRef<CourseId>>(
            &semesters,
            |s| s.course,
            &self.courses,
            Resource::Course,
            |c: &Course| c.id,
        )
        .await?;
        Ok(semesters
            .into_iter()
            .map(|s| {
                let course = courses.get(&s.course);
                s.into_view(course)
            })
            .collect())
    }

    async fn expand_one(&self, semester: Semester) -> Result<SemesterView, CatalogError> {
        let mut views = self.expand(vec![semester]).await?;
        views.pop().ok_or_else(|| Resource::Semester.not_found())
    }

    #[instrument(skip(self))]
    pub async fn create(&self, params: SemesterCreate) -> Result<SemesterView, CatalogError> {
        debug!("Sending request");
        let semester = self.inner.create(params).await.map_err(Self::map_error)?;
        self.expand_one(semester).await
    }

    /// Semesters matching `filter`, in teaching order.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: SemesterFilter) -> Result<Vec<SemesterView>, CatalogError> {
        let semesters = self.inner.list(filter).await.map_err(Self::map_error)?;
        self.expand(semesters).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: SemesterId) -> Result<SemesterView, CatalogError> {
        let semester = found(self.fetch(id).await?, Resource::Semester)?;
        self.expand_one(semester).await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: SemesterId,
        params: SemesterCreate,
    ) -> Result<SemesterView, CatalogError> {
        debug!("Sending request");
        let semester = self.inner.update(id, params).await.map_err(Self::map_error)?;
        self.expand_one(semester).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: SemesterId) -> Result<(), CatalogError> {
        self.remove(id, ()).await
    }
}

#[async_trait]
impl ActorClient<Semester> for SemesterClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Semester> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CatalogError {
        CatalogError::from_framework(e, Resource::Semester)
    }
}
