//! [`ActorEntity`] implementation for [`Subject`].
//!
//! Creates arrive with the course already derived by
//! [`SubjectClient`](crate::clients::SubjectClient); `on_create` checks it again against
//! the semester. Updates carry a [`SubjectDraft`] and derive the course here.

use super::SubjectContext;
use crate::error::CatalogError;
use crate::model::{Subject, SubjectCreate, SubjectDraft, SubjectFilter, SubjectId};
use crate::references::subject_course;
use async_trait::async_trait;
use catalog_framework::{ActorEntity, NoAction, UniqueKey};
use std::cmp::Ordering;

#[async_trait]
impl ActorEntity for Subject {
    type Id = SubjectId;
    type Create = SubjectCreate;
    type Update = SubjectDraft;
    type Remove = ();
    type Filter = SubjectFilter;
    type Action = NoAction;
    type ActionResult = ();
    type Context = SubjectContext;
    type Error = CatalogError;

    fn from_create_params(id: SubjectId, params: SubjectCreate) -> Result<Self, Self::Error> {
        Ok(Subject::new(id, params))
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "code_semester",
            [self.code.clone(), self.semester.to_string()],
        )]
    }

    fn matches(&self, filter: &SubjectFilter) -> bool {
        let semester = match filter.semester {
            Some(semester) => semester == self.semester,
            None => true,
        };
        let course = match filter.course {
            Some(course) => course == self.course,
            None => true,
        };
        semester && course
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    async fn on_create(&mut self, ctx: &SubjectContext) -> Result<(), Self::Error> {
        subject_course(&ctx.semesters, &ctx.courses, self.semester, Some(self.course)).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: SubjectDraft,
        ctx: &SubjectContext,
    ) -> Result<(), Self::Error> {
        let course =
            subject_course(&ctx.semesters, &ctx.courses, update.semester, update.course).await?;
        let update = update.resolved(course);
        self.name = update.name;
        self.code = update.code;
        self.semester = update.semester;
        self.course = update.course;
        self.credits = update.credits;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: NoAction,
        _ctx: &SubjectContext,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
