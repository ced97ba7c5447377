//! # ActorClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default `fetch`
//! and `remove` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the raw storage operations.
///
/// Resource clients usually add their own methods that expand references or validate
/// input; the defaults here hand back stored documents with errors mapped through
/// [`ActorClient::map_error`].
///
/// # Example
///
/// ```rust
/// use catalog_framework::{ActorClient, ActorEntity, FrameworkError, NoAction, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Room { id: uuid::Uuid }
/// #[derive(Debug)] struct RoomCreate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct RoomError(String);
///
/// #[async_trait]
/// impl ActorEntity for Room {
///     type Id = uuid::Uuid;
///     type Create = RoomCreate;
///     type Update = RoomCreate;
///     type Remove = ();
///     type Filter = ();
///     type Action = NoAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = RoomError;
///
///     fn from_create_params(id: uuid::Uuid, _: RoomCreate) -> Result<Self, RoomError> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: RoomCreate, _: &()) -> Result<(), RoomError> { Ok(()) }
///     async fn handle_action(&mut self, a: NoAction, _: &()) -> Result<(), RoomError> { match a {} }
/// }
///
/// struct RoomClient {
///     inner: ResourceClient<Room>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Room> for RoomClient {
///     type Error = RoomError;
///
///     fn inner(&self) -> &ResourceClient<Room> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> RoomError {
///         RoomError(e.to_string())
///     }
/// }
///
/// async fn usage(client: RoomClient, id: uuid::Uuid) {
///     // fetch() and remove() are provided automatically.
///     let _ = client.fetch(id).await;
///     let _ = client.remove(id, ()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a stored entity by ID.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: T::Id, remove: T::Remove) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id, remove).await.map_err(Self::map_error)
    }
}
