//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `ResourceClient<T>` whose requests are answered
//! from a queue of expectations instead of by a `ResourceActor`. It is used to test an actor
//! whose hooks call *other* actors (a Course checking its College, a Paper resolving its
//! Subject) without spawning those actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state and unique indexes |
//! | **Use Case** | Dependencies of the actor under test | The actor under test or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! 1. **Single actor**: spawn one `ResourceActor` with a `()` context and drive it through
//!    its client. See `tests/integration_test.rs` in this crate.
//! 2. **Actor with mocked dependencies**: spawn the actor under test, build its context from
//!    `MockClient::client()` handles and queue the answers the dependencies should give.
//!    See `course_actor_test.rs` in the `paper-catalog` crate.
//! 3. **Full system**: start the HTTP server on an ephemeral port and call it. See
//!    `api_test.rs` in the `paper-catalog` crate.
//!
//! ## Example
//!
//! ```rust
//! use catalog_framework::mock::MockClient;
//! use catalog_framework::{ActorEntity, FrameworkError, NoAction};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Board { id: uuid::Uuid, name: String }
//! #[derive(Debug)] struct BoardCreate { name: String }
//! #[derive(Debug, thiserror::Error)] #[error("board error")] struct BoardError;
//!
//! #[async_trait]
//! impl ActorEntity for Board {
//!     type Id = uuid::Uuid; type Create = BoardCreate; type Update = BoardCreate;
//!     type Remove = (); type Filter = (); type Action = NoAction;
//!     type ActionResult = (); type Context = (); type Error = BoardError;
//!     fn from_create_params(id: uuid::Uuid, p: BoardCreate) -> Result<Self, BoardError> {
//!         Ok(Self { id, name: p.name })
//!     }
//!     async fn on_update(&mut self, _: BoardCreate, _: &()) -> Result<(), BoardError> { Ok(()) }
//!     async fn handle_action(&mut self, a: NoAction, _: &()) -> Result<(), BoardError> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let id = uuid::Uuid::new_v4();
//!     let mut mock = MockClient::<Board>::new();
//!     mock.expect_get(id).return_ok(Some(Board { id, name: "CBSE".into() }));
//!     mock.expect_get(id).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(id).await.unwrap().unwrap().name, "CBSE");
//!     assert!(matches!(client.get(id).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] with the `expect_*` helpers to answer requests by hand, or the
//! fluent [`MockClient`] API to queue answers up front.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request to the mock client and the answer to give.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    GetMany {
        response: Result<Vec<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

fn check_id<I: PartialEq + std::fmt::Debug>(op: &str, got: &I, expected: &I) {
    assert_eq!(got, expected, "mock {op} called with an unexpected id");
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are answered strictly in the order they were queued. A request that does
/// not match the next expectation panics the mock task, which surfaces in the test as
/// [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("get", &id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::GetMany { respond_to, .. },
                        Some(Expectation::GetMany { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("update", &id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to, .. },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("delete", &id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("action", &id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Get {
            id,
            response,
        })
    }

    /// Expects a `get_many` operation.
    pub fn expect_get_many(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::GetMany {
            response,
        })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::List {
            response,
        })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create {
            response,
        })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Update {
            id,
            response,
        })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Delete {
            id,
            response,
        })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Action {
            id,
            response,
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder returned by the `expect_*` methods. Finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Queue<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.make)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Tests inspect each request with the `expect_*` helpers below and answer through the
/// returned oneshot sender, which allows asserting on request payloads as well as
/// simulating delays or failures.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ActorEntity, NoAction};
    use async_trait::async_trait;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq)]
    struct Board {
        id: Uuid,
        name: String,
    }

    #[derive(Debug)]
    struct BoardCreate {
        name: String,
    }

    #[derive(Debug, PartialEq)]
    struct BoardFilter {
        name: Option<String>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Board error")]
    struct BoardError;

    #[async_trait]
    impl ActorEntity for Board {
        type Id = Uuid;
        type Create = BoardCreate;
        type Update = BoardCreate;
        type Remove = ();
        type Filter = BoardFilter;
        type Action = NoAction;
        type ActionResult = ();
        type Context = ();
        type Error = BoardError;

        fn from_create_params(id: Uuid, params: BoardCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(
            &mut self,
            update: BoardCreate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            self.name = update.name;
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: NoAction,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            match action {}
        }
    }

    fn board(name: &str) -> Board {
        Board {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_channel_helpers() {
        let (client, mut receiver) = create_mock_client::<Board>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(BoardCreate {
                    name: "ICSE".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "ICSE");
        let stored = board("ICSE");
        responder.send(Ok(stored.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_list_filter_is_forwarded() {
        let (client, mut receiver) = create_mock_client::<Board>(10);

        let list_task = tokio::spawn(async move {
            client
                .list(BoardFilter {
                    name: Some("State".to_string()),
                })
                .await
        });

        let (filter, responder) = expect_list(&mut receiver).await.unwrap();
        assert_eq!(filter.name.as_deref(), Some("State"));
        responder.send(Ok(vec![board("State")])).unwrap();

        assert_eq!(list_task.await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Board>::new();
        let stored = board("CBSE");

        mock.expect_create().return_ok(stored.clone());
        mock.expect_get(stored.id).return_ok(Some(stored.clone()));
        mock.expect_delete(stored.id)
            .return_err(FrameworkError::NotFound(stored.id.to_string()));

        let client = mock.client();

        let created = client
            .create(BoardCreate {
                name: "CBSE".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, stored.id);

        let fetched = client.get(stored.id).await.unwrap();
        assert_eq!(fetched.unwrap().name, "CBSE");

        let deleted = client.delete(stored.id, ()).await;
        assert!(matches!(deleted, Err(FrameworkError::NotFound(_))));

        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_drops_response() {
        let mock = MockClient::<Board>::new();
        let client = mock.client();

        let result = client.get(Uuid::new_v4()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
