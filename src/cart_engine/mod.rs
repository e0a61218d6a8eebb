//! # Cart Reconciliation Engine
//!
//! Keeps a consumer's view of their cart coherent with the server while giving
//! immediate feedback for adds and removes.
//!
//! - [`CartEngine`] is a cloneable handle. Every mutation is sent over one channel to
//!   a single [`CartWorker`], so the server observes calls in the order they were
//!   issued and never two at once.
//! - Optimistic changes are [`PendingAdjustment`] values. They are confirmed or
//!   discarded by the worker and folded away by the next refresh.
//! - Quantity edits and removals schedule a debounced refresh: the worker keeps a
//!   deadline that every request pushes back and any immediate refresh cancels.
//! - Collaborator failures are re-raised only after the worker has resynchronized.
//!
//! Engines are scoped to a login, see [`CartSession`].
//!
//! ```no_run
//! use marketplace_core::cart_engine::{mock::MockCartBackend, CartSession};
//! use marketplace_core::config::MarketConfig;
//! use marketplace_core::model::{Identity, ProductId, UserId};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), marketplace_core::cart_engine::CartError> {
//! let backend = Arc::new(MockCartBackend::new().with_product(ProductId(1), "Mug", 10.0));
//! let session = CartSession::login(Identity::consumer(UserId(1)), backend, &MarketConfig::default());
//! session.engine().add_item(ProductId(1), 2).await?;
//! assert_eq!(session.engine().total_items(), 2);
//! session.logout().await;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod handle;
pub mod mock;
pub mod session;
pub mod state;
pub mod worker;

pub use backend::CartBackend;
pub use error::CartError;
pub use handle::CartEngine;
pub use session::CartSession;
pub use state::{AdjustmentPhase, AdjustmentTarget, CartStatus, CartView, PendingAdjustment};
pub use worker::CartWorker;

use crate::config::MarketConfig;
use crate::model::Identity;
use state::SharedCart;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Creates a cart worker and its engine handle for `identity`.
///
/// The worker must be spawned for the handle to make progress.
pub fn new(
    identity: Identity,
    backend: Arc<dyn CartBackend>,
    config: &MarketConfig,
) -> (CartWorker, CartEngine) {
    let (sender, receiver) = mpsc::channel(config.channel_capacity);
    let shared = Arc::new(SharedCart::new());
    let worker = CartWorker::new(identity, backend, receiver, shared.clone(), config.debounce);
    (worker, CartEngine::new(identity, sender, shared))
}
