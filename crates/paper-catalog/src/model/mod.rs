//! # Catalog Model
//!
//! Pure data structures for the five catalog resources. Each resource has:
//!
//! - the stored document (`College`, `Course`, ...), which references parents by id
//! - the validated write payload (`CourseCreate`, `SubjectDraft`, ...)
//! - the raw HTTP body (`CourseInput`, ...) with a `validate()` step
//! - a list filter and an expanded read view (`CourseView`, ...) where parent ids are
//!   replaced by [`refs`] projections
//!
//! The [`ActorEntity`](catalog_framework::ActorEntity) implementations live next to
//! each actor (`college_actor::entity`, ...).

pub mod college;
pub mod course;
pub mod ids;
pub mod input;
pub mod paper;
pub mod refs;
pub mod semester;
pub mod subject;

pub use college::*;
pub use course::*;
pub use ids::*;
pub use paper::*;
pub use refs::{CodeRef, SemesterRef};
pub use semester::*;
pub use subject::*;
