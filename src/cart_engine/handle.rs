//! # Cart Engine Handle
//!
//! The cloneable front of a cart. Checks that need no server (role, quantity range)
//! happen here, optimistic deltas are applied here, and everything else is queued to
//! the [`CartWorker`](super::CartWorker).

use crate::cart_engine::error::CartError;
use crate::cart_engine::state::{AdjustmentTarget, CartView, SharedCart};
use crate::cart_engine::worker::{CartCommand, CartOp};
use crate::model::{Identity, ItemId, ProductId, UserId};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Handle to one consumer's cart.
///
/// Mutations are executed strictly in the order they were issued, including calls
/// started from different clones without awaiting each other.
#[derive(Clone)]
pub struct CartEngine {
    identity: Identity,
    sender: mpsc::Sender<CartCommand>,
    shared: Arc<SharedCart>,
}

impl CartEngine {
    pub(crate) fn new(
        identity: Identity,
        sender: mpsc::Sender<CartCommand>,
        shared: Arc<SharedCart>,
    ) -> Self {
        Self {
            identity,
            sender,
            shared,
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Fetches cart and totals and replaces the local view.
    ///
    /// Without an authenticated consumer the view is cleared and nothing is fetched.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), CartError> {
        if !self.identity.is_consumer() {
            debug!("No consumer, clearing cart view");
            self.shared.reset();
            return Ok(());
        }
        self.submit(|_| CartOp::Refresh).await
    }

    /// Adds `quantity` units of a product. The item count goes up immediately; a
    /// failure rolls it back and resynchronizes before the error is returned.
    #[instrument(skip(self))]
    pub async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        self.consumer()?;
        validate_quantity(quantity)?;
        self.submit(|shared| CartOp::Add {
            product_id,
            quantity,
            adjustment: shared.begin(AdjustmentTarget::New(product_id), i64::from(quantity)),
        })
        .await
    }

    /// Sets a line's quantity. The refresh that follows is debounced, so a burst of
    /// edits costs one round trip.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, item_id: ItemId, quantity: u32) -> Result<(), CartError> {
        self.consumer()?;
        validate_quantity(quantity)?;
        self.submit(|_| CartOp::UpdateQuantity { item_id, quantity })
            .await
    }

    /// Removes a line, taking its quantity off the item count right away.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: ItemId) -> Result<(), CartError> {
        self.consumer()?;
        self.submit(|shared| {
            let quantity = shared.view().snapshot.line(item_id).map(|line| line.quantity);
            CartOp::Remove {
                item_id,
                adjustment: quantity
                    .map(|q| shared.begin(AdjustmentTarget::Line(item_id), -i64::from(q))),
            }
        })
        .await
    }

    /// Empties the cart. On success the view is empty without another fetch.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), CartError> {
        self.consumer()?;
        self.submit(|_| CartOp::Clear).await
    }

    /// Current view of the cart.
    pub fn view(&self) -> CartView {
        self.shared.view()
    }

    /// Receives every change to the view.
    pub fn subscribe(&self) -> watch::Receiver<CartView> {
        self.shared.subscribe()
    }

    /// Item count including optimistic deltas.
    pub fn total_items(&self) -> u32 {
        self.shared.view().total_items()
    }

    /// Asks the worker to stop after the operations already queued.
    pub(crate) async fn shutdown(&self) -> Result<(), CartError> {
        self.submit(|_| CartOp::Shutdown).await
    }

    pub(crate) fn discard_view(&self) {
        self.shared.reset();
    }

    fn consumer(&self) -> Result<UserId, CartError> {
        self.identity.consumer_id().ok_or(CartError::Unauthorized)
    }

    /// Queues the operation built by `build` once the worker's queue has room.
    ///
    /// Optimistic adjustments are only recorded after a slot is reserved, so a caller
    /// that gives up while the queue is full leaves the view untouched. From there on
    /// the worker owns the adjustment.
    async fn submit(&self, build: impl FnOnce(&SharedCart) -> CartOp) -> Result<(), CartError> {
        let permit = self
            .sender
            .reserve()
            .await
            .map_err(|_| CartError::EngineClosed)?;
        let op = build(&self.shared);
        let adjustment = op.adjustment();
        let (respond_to, response) = oneshot::channel();
        permit.send(CartCommand { op, respond_to });
        match response.await {
            Ok(result) => result,
            Err(_) => {
                // Dropped unprocessed by a stopping worker.
                if let Some(id) = adjustment {
                    self.shared.discard(id);
                }
                Err(CartError::EngineClosed)
            }
        }
    }
}

fn validate_quantity(quantity: u32) -> Result<(), CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity(quantity));
    }
    Ok(())
}
