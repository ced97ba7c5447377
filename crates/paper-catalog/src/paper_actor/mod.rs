//! # Paper Actor
//!
//! Owns the question papers. Besides CRUD it carries the paper-specific rules:
//!
//! - the four parent references always form one consistent chain, re-checked by the
//!   `on_create`/`on_update` hooks against the parent actors in [`PaperContext`]
//! - only the administrator who uploaded a paper may edit or delete it
//! - deleting a paper removes its file from the upload directory first
//! - downloads are counted by [`PaperAction::RecordDownload`], which runs inside the
//!   actor so that concurrent downloads never lose an increment
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](catalog_framework::ActorEntity) implementation for [`Paper`]
//! - [`actions`] - [`PaperAction`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;

pub use actions::*;

use crate::model::{College, Course, Paper, Semester, Subject};
use crate::references::LineageClients;
use crate::storage::UploadStore;
use catalog_framework::{ResourceActor, ResourceClient};

/// Dependencies of the paper actor.
#[derive(Clone)]
pub struct PaperContext {
    pub colleges: ResourceClient<College>,
    pub courses: ResourceClient<Course>,
    pub semesters: ResourceClient<Semester>,
    pub subjects: ResourceClient<Subject>,
    pub uploads: UploadStore,
}

impl PaperContext {
    pub fn lineage(&self) -> LineageClients<'_> {
        LineageClients {
            colleges: &self.colleges,
            courses: &self.courses,
            semesters: &self.semesters,
            subjects: &self.subjects,
        }
    }
}

/// Creates a new Paper actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Paper>, ResourceClient<Paper>) {
    ResourceActor::new(buffer)
}
