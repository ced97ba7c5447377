use crate::error::{CatalogError, Resource};
use crate::model::{Course, Semester, SemesterCreate, SemesterFilter, SemesterId};
use crate::references::require;
use async_trait::async_trait;
use catalog_framework::{ActorEntity, NoAction, ResourceClient, UniqueKey};
use std::cmp::Ordering;

#[async_trait]
impl ActorEntity for Semester {
    type Id = SemesterId;
    type Create = SemesterCreate;
    type Update = SemesterCreate;
    type Remove = ();
    type Filter = SemesterFilter;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ResourceClient<Course>;
    type Error = CatalogError;

    fn from_create_params(id: SemesterId, params: SemesterCreate) -> Result<Self, Self::Error> {
        Ok(Semester::new(id, params))
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "number_course",
            [self.number.to_string(), self.course.to_string()],
        )]
    }

    fn matches(&self, filter: &SemesterFilter) -> bool {
        match filter.course {
            Some(course) => course == self.course,
            None => true,
        }
    }

    /// Semesters list in teaching order.
    fn list_order(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.name.cmp(&other.name))
    }

    async fn on_create(&mut self, courses: &ResourceClient<Course>) -> Result<(), Self::Error> {
        require(courses, self.course, Resource::Course).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: SemesterCreate,
        courses: &ResourceClient<Course>,
    ) -> Result<(), Self::Error> {
        require(courses, update.course, Resource::Course).await?;
        self.name = update.name;
        self.number = update.number;
        self.course = update.course;
        self.year = update.year;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: NoAction,
        _ctx: &ResourceClient<Course>,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
