//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations instead of a store. Code under test cannot tell the difference, which
//! makes it the easiest way to inject collaborator failures: an order store that refuses to
//! create, a status write that never lands, a catalog that is unreachable.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | Scripted replies | Real store semantics |
//! | **State** | None, only the expectation queue | Ordered store, assigned ids |
//! | **Use Case** | Logic *around* a collaborator | The collaborator itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Needs a payload the entity rejects |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 0: Client Logic Test (Pure Mock)</b></summary>
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::ActorEntity;
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Category { id: u32, name: String }
//! #[derive(Debug)] struct CategoryCreate { name: String }
//! #[derive(Debug)] struct CategoryUpdate;
//! #[derive(Debug)] enum CategoryAction {}
//! #[derive(Debug, thiserror::Error)] #[error("category error")] struct CategoryError;
//!
//! #[async_trait]
//! impl ActorEntity for Category {
//!     type Id = u32; type Create = CategoryCreate; type Update = CategoryUpdate;
//!     type Action = CategoryAction; type ActionResult = (); type Context = (); type Error = CategoryError;
//!     fn from_create_params(id: u32, p: CategoryCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: p.name })
//!     }
//!     async fn on_update(&mut self, _: CategoryUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: CategoryAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Category>::new();
//!     mock.expect_list().return_ok(vec![Category { id: 1, name: "Home".into() }]);
//!
//!     let names: Vec<String> = mock.client().list().await.unwrap()
//!         .into_iter().map(|c| c.name).collect();
//!     assert_eq!(names, vec!["Home"]);
//!     mock.verify();
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 1: Single Actor Test (Fast, Isolated)</b></summary>
//!
//! Spawn one [`ResourceActor`](crate::ResourceActor) with `()` context and drive it through
//! its client. See `tests/integration_test.rs` in this crate.
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Real Engine with Mocked Collaborators (Sweet Spot)</b></summary>
//!
//! ```text
//! Wrap MockClient::client() in the typed collaborator client (for example OrderClient),
//! then drive the engine component under test against it. See
//! tests/checkout_test.rs and tests/tracker_test.rs in the storefront-engine crate.
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 3: Full System Integration Test (Comprehensive)</b></summary>
//!
//! Start every actor through `StoreSystem` and walk real flows end to end. See
//! `tests/integration_test.rs` in the storefront-engine crate.
//! </details>
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Order { id: u32 }
//! #[derive(Debug)] struct OrderCreate;
//! #[derive(Debug)] struct OrderUpdate;
//! #[derive(Debug)] enum OrderAction {}
//! #[derive(Debug, thiserror::Error)] #[error("order error")] struct OrderError;
//!
//! #[async_trait]
//! impl ActorEntity for Order {
//!     type Id = u32; type Create = OrderCreate; type Update = OrderUpdate;
//!     type Action = OrderAction; type ActionResult = (); type Context = (); type Error = OrderError;
//!     fn from_create_params(id: u32, _: OrderCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: OrderUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: OrderAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Order>::new();
//!     mock.expect_create().return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().create(OrderCreate).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw receiver when a test needs to look
//! at the request payload, or the fluent [`MockClient`] API when only the reply matters.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted reply, matched against requests in FIFO order.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
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

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "Get",
            Expectation::Create { .. } => "Create",
            Expectation::List { .. } => "List",
            Expectation::Update { .. } => "Update",
            Expectation::Delete { .. } => "Delete",
            Expectation::Action { .. } => "Action",
        }
    }
}

fn request_name<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
    }
}

fn check_id<I: PartialEq + std::fmt::Debug>(op: &str, expected: &I, actual: &I) {
    if expected != actual {
        panic!("{op} expected for {expected:?}, got {actual:?}");
    }
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are answered in the order expectations were registered. A request that does not
/// match the next expectation (wrong operation or wrong id) panics inside the mock task, which
/// the caller observes as [`FrameworkError::ActorDropped`].
///
/// ```ignore
/// let mut mock = MockClient::<Order>::new();
/// mock.expect_create().return_ok(order.clone());
/// mock.expect_update(order.id.clone()).return_err(FrameworkError::ActorClosed);
///
/// let client = OrderClient::new(mock.client());
/// // drive the code under test...
/// mock.verify();
/// ```
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
                let next = queue.lock().unwrap().pop_front();

                match (request, next) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id("Get", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        check_id("Update", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) => {
                        check_id("Delete", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        check_id("Action", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (request, Some(expectation)) => {
                        panic!(
                            "Unexpected {} request, next expectation is {}",
                            request_name(&request),
                            expectation.name()
                        );
                    }
                    (request, None) => {
                        panic!("Unexpected {} request, no expectations left", request_name(&request));
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
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation. The reply is the record the store would have stored.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder returned by the `expect_*` methods; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Reply with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Reply with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its mailbox.
///
/// The test plays the actor: it pulls requests off `receiver` with the `expect_*` helpers
/// below, asserts on the payload and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
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
