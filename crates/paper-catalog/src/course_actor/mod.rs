//! # Course Actor
//!
//! Owns the course collection. Started with the college client as its context so that
//! `on_create`/`on_update` can refuse a course whose college does not exist.
//!
//! - [`entity`] - [`ActorEntity`](catalog_framework::ActorEntity) implementation for [`Course`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;

use crate::model::Course;
use catalog_framework::{ResourceActor, ResourceClient};

/// Creates a new Course actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Course>, ResourceClient<Course>) {
    ResourceActor::new(buffer)
}
