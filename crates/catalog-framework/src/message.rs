//! # Generic Messages
//!
//! Message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the CRUD lifecycle of a resource plus two read shapes
/// (`GetMany` for expanding references in bulk, `List` for filtered listings) and an
/// `Action` escape hatch for resource-specific operations.
///
/// - **Create**: builds a document from [`ActorEntity::Create`] and returns it.
/// - **Get**: fetches one document by id.
/// - **GetMany**: fetches every listed id that exists, in request order.
/// - **List**: every document matching [`ActorEntity::Filter`], sorted by
///   [`ActorEntity::list_order`].
/// - **Update**: applies [`ActorEntity::Update`] and returns the new state.
/// - **Delete**: removes a document after [`ActorEntity::on_delete`] accepts
///   [`ActorEntity::Remove`].
/// - **Action**: executes a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        remove: T::Remove,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
