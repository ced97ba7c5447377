//! # College Actor
//!
//! Owns the college collection. Colleges have no parents, so the actor runs with an
//! empty `()` context; its work is keeping `name` and `code` unique.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](catalog_framework::ActorEntity) implementation for [`College`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use paper_catalog::college_actor;
//! use paper_catalog::clients::CollegeClient;
//! use paper_catalog::model::CollegeCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = college_actor::new(32);
//!     let client = CollegeClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let college = client
//!         .create(CollegeCreate {
//!             name: "Tech U".to_string(),
//!             code: "TU".to_string(),
//!             location: None,
//!         })
//!         .await?;
//!     assert_eq!(client.get(college.id).await?.code, "TU");
//!     Ok(())
//! }
//! ```

pub mod entity;

use crate::model::College;
use catalog_framework::{ResourceActor, ResourceClient};

/// Creates a new College actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<College>, ResourceClient<College>) {
    ResourceActor::new(buffer)
}
