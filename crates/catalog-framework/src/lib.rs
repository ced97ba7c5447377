//! # Catalog Framework
//!
//! Building blocks for the question-paper catalog: each resource collection (colleges,
//! courses, semesters, subjects, papers) is owned by one actor, and everything else talks
//! to it through a cloneable client. It is a **Resource-Oriented Architecture (ROA)**
//! on top of the **Actor Model**.
//!
//! ## Why Actors for a Catalog?
//!
//! The catalog has a handful of integrity rules that must hold under concurrent requests:
//!
//! - natural keys are unique (a college code, a course code within a college, ...)
//! - a document only references parents that exist
//! - download counters never lose an increment
//!
//! An actor processes its messages one at a time, so a uniqueness check and the insert
//! it guards cannot interleave with another request. No locks are needed and the rules
//! are enforced where the data lives, not in every handler.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the document type, its unique keys, filter and hooks
//! 2. **Runtime Layer** ([`ResourceActor`]): message processing, storage and unique indexes
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): type-safe communication
//!
//! ## Core Abstractions
//!
//! ### [`ActorEntity`] - The Business Logic
//!
//! ```rust
//! use catalog_framework::{ActorEntity, NoAction, ResourceActor, UniqueKey};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Board {
//!     id: uuid::Uuid,
//!     code: String,
//! }
//!
//! #[derive(Debug)] struct BoardCreate { code: String }
//! #[derive(Debug)] struct BoardUpdate { code: Option<String> }
//! #[derive(Debug, thiserror::Error)] #[error("{0}")] struct BoardError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Board {
//!     type Id = uuid::Uuid;
//!     type Create = BoardCreate;
//!     type Update = BoardUpdate;
//!     type Remove = ();
//!     type Filter = ();
//!     type Action = NoAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = BoardError;
//!
//!     fn from_create_params(id: uuid::Uuid, params: BoardCreate) -> Result<Self, Self::Error> {
//!         if params.code.is_empty() {
//!             return Err(BoardError("Code is required".into()));
//!         }
//!         Ok(Self { id, code: params.code })
//!     }
//!
//!     fn unique_keys(&self) -> Vec<UniqueKey> {
//!         vec![UniqueKey::new("code", [&self.code])]
//!     }
//!
//!     async fn on_update(&mut self, update: BoardUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(code) = update.code { self.code = code; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: NoAction, _: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Board>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let board = client.create(BoardCreate { code: "CBSE".into() }).await.unwrap();
//!     let fetched = client.get(board.id).await.unwrap().unwrap();
//!     assert_eq!(fetched.code, "CBSE");
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time.
//! All actors are created first, then each one is started with the clients of the actors
//! it references:
//!
//! ```text
//! colleges.run(())
//! courses.run(college_client)
//! semesters.run(course_client)
//! subjects.run((semester_client, course_client))
//! papers.run(PaperContext { colleges, courses, semesters, subjects, uploads })
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Different actors run in **parallel**
//! - An actor stops once every client is dropped; its task then logs `Shutdown`
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a `ResourceClient` from queued expectations so that an
//! actor can be tested with its dependencies mocked. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, NoAction, UniqueKey};
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
