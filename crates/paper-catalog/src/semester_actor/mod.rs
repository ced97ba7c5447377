//! # Semester Actor
//!
//! Owns the semester collection. Its context is the course client; a semester can only
//! be written against an existing course, and `(number, course)` is unique.

pub mod entity;

use crate::model::Semester;
use catalog_framework::{ResourceActor, ResourceClient};

/// Creates a new Semester actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Semester>, ResourceClient<Semester>) {
    ResourceActor::new(buffer)
}
