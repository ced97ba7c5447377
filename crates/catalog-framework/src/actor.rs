//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns one collection of
//! entities. It implements the "Server" side of the Actor Model, processing messages
//! sequentially and therefore holding exclusive access to the collection and its
//! unique indexes.

use crate::client::ResourceClient;
use crate::entity::{ActorEntity, UniqueKey};
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The generic actor that manages a collection of entities.
///
/// **Concurrency Model**:
/// Each `ResourceActor` processes its own messages *sequentially* in a loop, so the
/// `store` and `index` need no `Mutex`. A uniqueness check and the write it guards
/// happen while handling a single message, which makes the unique indexes strict
/// even under concurrent requests.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use catalog_framework::{ActorEntity, NoAction, ResourceActor, UniqueKey};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: uuid::Uuid, label: String }
/// #[derive(Debug)] struct TagCreate { label: String }
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = uuid::Uuid;
///     type Create = TagCreate;
///     type Update = TagCreate;
///     type Remove = ();
///     type Filter = ();
///     type Action = NoAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(id: uuid::Uuid, p: TagCreate) -> Result<Self, TagError> {
///         Ok(Self { id, label: p.label })
///     }
///     fn unique_keys(&self) -> Vec<UniqueKey> {
///         vec![UniqueKey::new("label", [&self.label])]
///     }
///     async fn on_update(&mut self, p: TagCreate, _: &()) -> Result<(), TagError> {
///         self.label = p.label;
///         Ok(())
///     }
///     async fn handle_action(&mut self, a: NoAction, _: &()) -> Result<(), TagError> {
///         match a {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tag>::new(10);
///     tokio::spawn(actor.run(()));
///
///     client.create(TagCreate { label: "exam".into() }).await.unwrap();
///     assert!(client.create(TagCreate { label: "exam".into() }).await.is_err());
/// }
/// ```
///
/// # Operations
///
/// * **Create**: generates a UUID id, calls `from_create_params`, then `on_create`,
///   then checks the unique indexes before inserting.
/// * **Get / GetMany / List**: read-only lookups returning clones.
/// * **Update**: runs `on_update` against a copy, checks the unique indexes excluding the
///   document itself, then commits the copy and re-indexes it.
/// * **Delete**: calls `on_delete`, then removes the document and its index entries.
/// * **Action**: calls `handle_action` on the stored document. Actions must not change
///   the unique keys of a document.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    index: HashMap<UniqueKey, T::Id>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. If the channel is full,
    /// calls to the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            index: HashMap::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// First key in `keys` already held by a document other than `owner`.
    fn find_conflict(&self, keys: &[UniqueKey], owner: Option<&T::Id>) -> Option<UniqueKey> {
        keys.iter()
            .find(|key| match self.index.get(*key) {
                Some(holder) => Some(holder) != owner,
                None => false,
            })
            .cloned()
    }

    fn conflict_error(key: UniqueKey) -> FrameworkError {
        FrameworkError::Conflict {
            index: key.index,
            value: key.value,
        }
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to reach other actors that were created *after* this actor was instantiated but
    /// *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Course" instead of "paper_catalog::model::course::Course")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(Uuid::new_v4());

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let keys = item.unique_keys();
                    if let Some(key) = self.find_conflict(&keys, None) {
                        warn!(entity_type, index = key.index, "Unique index conflict");
                        let _ = respond_to.send(Err(Self::conflict_error(key)));
                        continue;
                    }
                    for key in keys {
                        self.index.insert(key, id.clone());
                    }
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::GetMany { ids, respond_to } => {
                    let items: Vec<T> = ids
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, requested = ids.len(), found = items.len(), "GetMany");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let mut items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    items.sort_by(|a, b| a.list_order(b));
                    debug!(entity_type, ?filter, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut next = current.clone();
                    if let Err(e) = next.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let keys = next.unique_keys();
                    if let Some(key) = self.find_conflict(&keys, Some(&id)) {
                        warn!(entity_type, %id, index = key.index, "Unique index conflict");
                        let _ = respond_to.send(Err(Self::conflict_error(key)));
                        continue;
                    }
                    for key in current.unique_keys() {
                        self.index.remove(&key);
                    }
                    for key in keys {
                        self.index.insert(key, id.clone());
                    }
                    self.store.insert(id.clone(), next.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(next));
                }
                ResourceRequest::Delete {
                    id,
                    remove,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?remove, "Delete");
                    let Some(item) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&remove, &context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    for key in item.unique_keys() {
                        self.index.remove(&key);
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
