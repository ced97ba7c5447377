//! # Resource Clients
//!
//! Typed wrappers around each actor's [`ResourceClient`]. They translate framework
//! errors into [`CatalogError`] and turn stored documents into read views by fetching
//! the referenced parents in one `get_many` round trip per parent collection.

pub mod college_client;
pub mod course_client;
pub mod paper_client;
pub mod semester_client;
pub mod subject_client;

pub use college_client::CollegeClient;
pub use course_client::CourseClient;
pub use paper_client::PaperClient;
pub use semester_client::SemesterClient;
pub use subject_client::SubjectClient;

use crate::error::{CatalogError, Resource};
use crate::model::refs::{distinct, Projections};
use catalog_framework::{ActorEntity, ResourceClient};

/// Unwraps a fetched document, or `"<Resource> not found"`.
fn found<T>(document: Option<T>, resource: Resource) -> Result<T, CatalogError> {
    document.ok_or_else(|| resource.not_found())
}

/// Projections of the parents referenced by `children`. Parents that no longer exist
/// are simply absent from the result.
async fn parents<C, T, P>(
    children: &[C],
    child_ref: impl Fn(&C) -> T::Id,
    client: &ResourceClient<T>,
    resource: Resource,
    parent_id: impl Fn(&T) -> T::Id,
) -> Result<Projections<T::Id, P>, CatalogError>
where
    T: ActorEntity,
    T::Id: Copy,
    P: Clone,
    for<'a> P: From<&'a T>,
{
    let ids = distinct(children, child_ref);
    let fetched = client
        .get_many(ids)
        .await
        .map_err(|e| CatalogError::from_framework(e, resource))?;
    Ok(Projections::new(&fetched, parent_id))
}
