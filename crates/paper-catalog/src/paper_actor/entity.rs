//! [`ActorEntity`] implementation for [`Paper`].

use super::{PaperAction, PaperContext};
use crate::error::CatalogError;
use crate::model::{
    AdminId, LineageRequest, Paper, PaperChanges, PaperCreate, PaperFilter, PaperId,
    PaperRemoval, PaperUpdate,
};
use async_trait::async_trait;
use catalog_framework::ActorEntity;
use std::cmp::Ordering;
use tracing::debug;

impl Paper {
    fn check_owner(&self, requested_by: AdminId, verb: &str) -> Result<(), CatalogError> {
        if self.uploaded_by == requested_by {
            Ok(())
        } else {
            Err(CatalogError::Unauthorized(format!(
                "Not authorized to {verb} this paper"
            )))
        }
    }

    /// Parents to resolve after `changes`. A changed reference drops the stored
    /// references above it so they are derived again.
    fn requested_lineage(&self, changes: &PaperChanges) -> LineageRequest {
        let below_semester = changes.subject.is_some();
        let below_course = below_semester || changes.semester.is_some();
        let below_college = below_course || changes.course.is_some();

        LineageRequest {
            subject: changes.subject.unwrap_or(self.subject),
            semester: changes
                .semester
                .or((!below_semester).then_some(self.semester)),
            course: changes.course.or((!below_course).then_some(self.course)),
            college: changes.college.or((!below_college).then_some(self.college)),
        }
    }
}

#[async_trait]
impl ActorEntity for Paper {
    type Id = PaperId;
    type Create = PaperCreate;
    type Update = PaperUpdate;
    type Remove = PaperRemoval;
    type Filter = PaperFilter;
    type Action = PaperAction;
    type ActionResult = Paper;
    type Context = PaperContext;
    type Error = CatalogError;

    fn from_create_params(id: PaperId, params: PaperCreate) -> Result<Self, Self::Error> {
        Ok(Paper::new(id, params))
    }

    fn matches(&self, filter: &PaperFilter) -> bool {
        filter.matches(self)
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.newest_first(other)
    }

    /// The stored chain must still hold when the paper is committed.
    async fn on_create(&mut self, ctx: &PaperContext) -> Result<(), Self::Error> {
        let lineage = self.lineage();
        let request = LineageRequest {
            subject: lineage.subject,
            semester: Some(lineage.semester),
            course: Some(lineage.course),
            college: Some(lineage.college),
        };
        ctx.lineage().resolve(request).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: PaperUpdate,
        ctx: &PaperContext,
    ) -> Result<(), Self::Error> {
        self.check_owner(update.requested_by, "update")?;
        let changes = update.changes;

        if changes.touches_lineage() {
            let lineage = ctx.lineage().resolve(self.requested_lineage(&changes)).await?;
            self.set_lineage(lineage);
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
        if let Some(exam_type) = changes.exam_type {
            self.exam_type = exam_type;
        }
        Ok(())
    }

    async fn on_delete(
        &self,
        removal: &PaperRemoval,
        ctx: &PaperContext,
    ) -> Result<(), Self::Error> {
        self.check_owner(removal.requested_by, "delete")?;
        if !ctx.uploads.remove(&self.file_path).await? {
            debug!(id = %self.id, path = %self.file_path, "Paper file was already gone");
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PaperAction,
        ctx: &PaperContext,
    ) -> Result<Paper, Self::Error> {
        match action {
            PaperAction::RecordDownload => {
                if !ctx.uploads.exists(&self.file_path).await? {
                    return Err(CatalogError::NotFound("File not found".to_string()));
                }
                self.download_count += 1;
                Ok(self.clone())
            }
        }
    }
}
