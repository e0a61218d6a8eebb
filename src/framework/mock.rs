//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `ResourceClient<T>` whose requests are
//! answered from a queue of expectations instead of a running actor. It lets you test
//! the logic *around* a client (the rating aggregator, review workflows, cart
//! collaborators) without spawning the actors it talks to.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use marketplace_core::framework::mock::MockClient;
//! use marketplace_core::framework::FrameworkError;
//! use marketplace_core::model::{Product, ProductId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Product>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get(ProductId(1)).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(ProductId(1)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Use [`create_mock_client`] instead when the test needs to inspect the request
//! payloads itself.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

/// Represents an expected request to the mock client.
///
/// Ids are recorded so a mismatch can be reported, but requests are matched on
/// their kind and answered strictly in order.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
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
    Purge {
        response: Result<usize, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(expectations: &Expectations<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    expectations.lock().unwrap_or_else(PoisonError::into_inner)
}

fn answer<R>(respond_to: oneshot::Sender<Result<R, FrameworkError>>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Review>::new();
/// mock.expect_list().return_ok(vec![review]);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime: the responder runs as a background task.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&expectations_clone).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response, .. })) => {
                        answer(respond_to, response)
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        answer(respond_to, response)
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        answer(respond_to, response)
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update { response, .. })) => {
                        answer(respond_to, response)
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Some(Expectation::Delete { response, .. })) => {
                        answer(respond_to, response)
                    }
                    (ResourceRequest::Purge { respond_to, .. }, Some(Expectation::Purge { response })) => {
                        answer(respond_to, response)
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action { response, .. })) => {
                        answer(respond_to, response)
                    }
                    (request, expectation) => {
                        let expected = expectation.map(|e| e.describe());
                        panic!(
                            "Unexpected {} request, expected {expected:?}",
                            request_kind(&request)
                        );
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

    fn push(&self, expectation: Expectation<T>) {
        lock(&self.expectations).push_back(expectation);
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, |response| Expectation::Create { response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, move |response| Expectation::Delete { id, response })
    }

    /// Expects a `purge` operation.
    pub fn expect_purge(&mut self) -> ExpectationBuilder<'_, T, usize> {
        ExpectationBuilder::new(self, |response| Expectation::Purge { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, move |response| Expectation::Action { id, response })
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.expectations).len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Get { id, .. } => format!("Get({id})"),
            Expectation::Create { .. } => "Create".to_string(),
            Expectation::List { .. } => "List".to_string(),
            Expectation::Update { id, .. } => format!("Update({id})"),
            Expectation::Delete { id, .. } => format!("Delete({id})"),
            Expectation::Purge { .. } => "Purge".to_string(),
            Expectation::Action { id, .. } => format!("Action({id})"),
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Purge { .. } => "Purge",
        ResourceRequest::Action { .. } => "Action",
    }
}

/// Builder that records what an expected request should answer.
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends messages to a channel the test controls (`receiver`); the test
/// inspects each request and answers it through its `respond_to` sender, which lets
/// it simulate success, failure and delays deterministically.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
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

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Query, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}
