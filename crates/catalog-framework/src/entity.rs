//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every catalog resource (College, Course,
//! Semester, Subject, Paper) implements to be managed by the generic `ResourceActor`.
//! It names the associated types for IDs, DTOs, filters, actions, context and errors,
//! declares the unique indexes of a document, and provides the lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Storage-level constraints
//! Two integrity rules live at the storage layer instead of in request handlers:
//!
//! - **Unique indexes**: [`ActorEntity::unique_keys`] lists the natural keys of a document.
//!   The actor keeps an index of every key and rejects a create or update whose keys
//!   are already held by a different document. The check and the write happen in the
//!   same message, so two concurrent creates cannot both pass.
//! - **References**: hooks receive the injected `Context` (usually clients of the parent
//!   actors) and refuse the write when a referenced parent does not exist.
//!
//! # Provided Methods (Hooks)
//! `on_create`, `on_delete`, `unique_keys`, `matches` and `list_order` have default
//! implementations. Only `from_create_params`, `on_update` and `handle_action` are required.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use uuid::Uuid;

/// One entry of a unique index.
///
/// `index` names the constraint (e.g. `"code_college"`), `value` is the normalized key.
/// Two documents of the same type may not share an equal `UniqueKey`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueKey {
    pub index: &'static str,
    pub value: String,
}

impl UniqueKey {
    /// Builds a key from one or more parts. Compound keys join their parts with `\u{1f}`
    /// so that `("a b", "c")` and `("a", "b c")` never collide.
    pub fn new<I, S>(index: &'static str, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let value = parts
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\u{1f}");
        Self { index, value }
    }
}

/// Action type for entities that have no custom actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g. asking a
/// parent actor whether a referenced document exists). The `Context` type is injected into
/// every hook when the actor is started, not when it is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity. Fresh ids are generated from a random UUID.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<Uuid>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The data accompanying a delete request (e.g. the identity of the caller).
    /// Use `()` when deletion needs nothing.
    type Remove: Send + Sync + Debug;

    /// Equality criteria used by `list`.
    type Filter: Send + Sync + Debug;

    /// Enum representing resource-specific operations. Use [`NoAction`] when there are none.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    type Context: Send + Sync;

    /// The error type returned by hooks. It is boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and can be
    /// recovered by the caller with `downcast`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Natural keys of this document. Each key must be unique among all documents
    /// held by the actor.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    /// Returns `true` when this document satisfies `filter`.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    /// Ordering of documents in `list` results.
    fn list_order(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// Returning an error aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update. The actor runs this against a copy of the stored document and
    /// only commits the copy once the hook and the unique indexes both accept it.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed. Returning an error keeps it.
    async fn on_delete(
        &self,
        _remove: &Self::Remove,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
