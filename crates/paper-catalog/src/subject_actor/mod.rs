//! # Subject Actor
//!
//! Owns the subject collection. A subject's `course` is never taken on trust: it is the
//! course of the subject's semester, looked up through [`SubjectContext`] whenever a
//! subject is created or moved.

pub mod entity;

use crate::model::{Course, Semester, Subject};
use catalog_framework::{ResourceActor, ResourceClient};

/// Parent clients the subject actor runs with.
#[derive(Clone)]
pub struct SubjectContext {
    pub semesters: ResourceClient<Semester>,
    pub courses: ResourceClient<Course>,
}

/// Creates a new Subject actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Subject>, ResourceClient<Subject>) {
    ResourceActor::new(buffer)
}
