//! # Course Client
//!
//! Wraps a `ResourceClient<Course>` and expands each course's college for reads.

use super::{found, parents};
use crate::error::{CatalogError, Resource};
use crate::model::{College, CodeRef, CollegeId, Course, CourseCreate, CourseFilter, CourseId, CourseView};
use async_trait::async_trait;
use catalog_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CourseClient {
    inner: ResourceClient<Course>,
    colleges: ResourceClient<College>,
}

impl CourseClient {
    pub fn new(inner: ResourceClient<Course>, colleges: ResourceClient<College>) -> Self {
        Self { inner, colleges }
    }

    /// Replaces college ids with `{ id, name, code }`, or `null` for a deleted college.
    async fn expand(&self, courses: Vec<Course>) -> Result<Vec<CourseView>, CatalogError> {
        let colleges = parents::<_, _, CodeRef<CollegeId>>(
            &courses,
            |c| c.college,
            &self.colleges,
            Resource::College,
            |c: &College| c.id,
        )
        .await?;
        Ok(courses
            .into_iter()
            .map(|c| {
                let college = colleges.get(&c.college);
                c.into_view(college)
            })
            .collect())
    }

    async fn expand_one(&self, course: Course) -> Result<CourseView, CatalogError> {
        let mut views = self.expand(vec![course]).await?;
        views.pop().ok_or_else(|| Resource::Course.not_found())
    }

    #[instrument(skip(self))]
    pub async fn create(&self, params: CourseCreate) -> Result<CourseView, CatalogError> {
        debug!("Sending request");
        let course = self.inner.create(params).await.map_err(Self::map_error)?;
        self.expand_one(course).await
    }

    /// Courses matching `filter`, by name.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: CourseFilter) -> Result<Vec<CourseView>, CatalogError> {
        let courses = self.inner.list(filter).await.map_err(Self::map_error)?;
        self.expand(courses).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: CourseId) -> Result<CourseView, CatalogError> {
        let course = found(self.fetch(id).await?, Resource::Course)?;
        self.expand_one(course).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: CourseId, params: CourseCreate) -> Result<CourseView, CatalogError> {
        debug!("Sending request");
        let course = self.inner.update(id, params).await.map_err(Self::map_error)?;
        self.expand_one(course).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: CourseId) -> Result<(), CatalogError> {
        self.remove(id, ()).await
    }
}

#[async_trait]
impl ActorClient<Course> for CourseClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Course> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CatalogError {
        CatalogError::from_framework(e, Resource::Course)
    }
}
