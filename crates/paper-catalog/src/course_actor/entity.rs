//! [`ActorEntity`] implementation for [`Course`].

use crate::error::{CatalogError, Resource};
use crate::model::{College, Course, CourseCreate, CourseFilter, CourseId};
use crate::references::require;
use async_trait::async_trait;
use catalog_framework::{ActorEntity, NoAction, ResourceClient, UniqueKey};
use std::cmp::Ordering;

#[async_trait]
impl ActorEntity for Course {
    type Id = CourseId;
    type Create = CourseCreate;
    type Update = CourseCreate;
    type Remove = ();
    type Filter = CourseFilter;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ResourceClient<College>;
    type Error = CatalogError;

    fn from_create_params(id: CourseId, params: CourseCreate) -> Result<Self, Self::Error> {
        Ok(Course::new(id, params))
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "code_college",
            [self.code.clone(), self.college.to_string()],
        )]
    }

    fn matches(&self, filter: &CourseFilter) -> bool {
        match filter.college {
            Some(college) => college == self.college,
            None => true,
        }
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// The college must exist.
    async fn on_create(&mut self, colleges: &ResourceClient<College>) -> Result<(), Self::Error> {
        require(colleges, self.college, Resource::College).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: CourseCreate,
        colleges: &ResourceClient<College>,
    ) -> Result<(), Self::Error> {
        require(colleges, update.college, Resource::College).await?;
        self.name = update.name;
        self.code = update.code;
        self.college = update.college;
        self.duration = update.duration;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: NoAction,
        _ctx: &ResourceClient<College>,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
