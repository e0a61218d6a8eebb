//! The single task that executes a cart's operations, one at a time, in arrival order.

use crate::cart_actor::CartLineError;
use crate::cart_engine::backend::CartBackend;
use crate::cart_engine::error::CartError;
use crate::cart_engine::state::{AdjustmentPhase, CartStatus, SharedCart};
use crate::config::whole_millis;
use crate::model::{Identity, ItemId, ProductId, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Operations queued by [`CartEngine`](super::CartEngine).
#[derive(Debug)]
pub(crate) enum CartOp {
    Refresh,
    Add {
        product_id: ProductId,
        quantity: u32,
        adjustment: u64,
    },
    UpdateQuantity {
        item_id: ItemId,
        quantity: u32,
    },
    Remove {
        item_id: ItemId,
        adjustment: Option<u64>,
    },
    Clear,
    Shutdown,
}

impl CartOp {
    pub(crate) fn adjustment(&self) -> Option<u64> {
        match self {
            CartOp::Add { adjustment, .. } => Some(*adjustment),
            CartOp::Remove { adjustment, .. } => *adjustment,
            _ => None,
        }
    }
}

pub(crate) struct CartCommand {
    pub op: CartOp,
    pub respond_to: oneshot::Sender<Result<(), CartError>>,
}

/// Owns the backend connection and the debounce deadline for one cart.
///
/// Spawn [`run`](CartWorker::run) on the runtime; it exits on logout or once every
/// engine handle is dropped.
pub struct CartWorker {
    identity: Identity,
    backend: Arc<dyn CartBackend>,
    receiver: mpsc::Receiver<CartCommand>,
    shared: Arc<SharedCart>,
    debounce: Duration,
    refresh_at: Option<Instant>,
}

impl CartWorker {
    pub(crate) fn new(
        identity: Identity,
        backend: Arc<dyn CartBackend>,
        receiver: mpsc::Receiver<CartCommand>,
        shared: Arc<SharedCart>,
        debounce: Duration,
    ) -> Self {
        Self {
            identity,
            backend,
            receiver,
            shared,
            debounce,
            refresh_at: None,
        }
    }

    pub async fn run(mut self) {
        info!(
            identity = ?self.identity,
            debounce_ms = whole_millis(self.debounce),
            "Cart worker started"
        );

        loop {
            let refresh_at = self.refresh_at;
            tokio::select! {
                // Queued operations go first; a due refresh waits for the current one.
                biased;

                command = self.receiver.recv() => {
                    let Some(CartCommand { op, respond_to }) = command else {
                        break;
                    };
                    if matches!(op, CartOp::Shutdown) {
                        let _ = respond_to.send(Ok(()));
                        break;
                    }
                    let result = self.execute(op).await;
                    let _ = respond_to.send(result);
                }

                _ = sleep_until(refresh_at.unwrap_or_else(Instant::now)), if refresh_at.is_some() => {
                    debug!("Debounced refresh firing");
                    self.refresh_or_reschedule().await;
                }
            }
        }

        if self.refresh_at.is_some() {
            debug!("Dropping scheduled refresh");
        }
        info!("Cart worker shut down");
    }

    async fn execute(&mut self, op: CartOp) -> Result<(), CartError> {
        let Some(owner) = self.identity.consumer_id() else {
            if let Some(id) = op.adjustment() {
                self.shared.discard(id);
            }
            return Err(CartError::Unauthorized);
        };

        match op {
            CartOp::Refresh => self.refresh(owner).await,
            CartOp::Add {
                product_id,
                quantity,
                adjustment,
            } => {
                debug!(%product_id, quantity, "Add");
                match self.backend.add_item(owner, product_id, quantity).await {
                    Ok(_) => {
                        self.shared.confirm(adjustment);
                        self.refresh_or_reschedule().await;
                        Ok(())
                    }
                    Err(e) => {
                        self.shared.discard(adjustment);
                        Err(self.resync(owner, e).await)
                    }
                }
            }
            CartOp::UpdateQuantity { item_id, quantity } => {
                debug!(%item_id, quantity, "Update quantity");
                match self.backend.update_item(owner, item_id, quantity).await {
                    Ok(_) => {
                        self.schedule_refresh();
                        Ok(())
                    }
                    Err(e) => Err(self.resync(owner, e).await),
                }
            }
            CartOp::Remove {
                item_id,
                adjustment,
            } => {
                debug!(%item_id, "Remove");
                match self.backend.remove_item(owner, item_id).await {
                    Ok(_) => {
                        if let Some(id) = adjustment {
                            self.shared.confirm(id);
                        }
                        self.schedule_refresh();
                        Ok(())
                    }
                    Err(e) => {
                        if let Some(id) = adjustment {
                            self.shared.discard(id);
                        }
                        Err(self.resync(owner, e).await)
                    }
                }
            }
            CartOp::Clear => match self.backend.clear(owner).await {
                Ok(()) => {
                    self.refresh_at = None;
                    self.shared.modify(|v| {
                        v.snapshot.items.clear();
                        v.totals = None;
                        v.status = CartStatus::Empty;
                        v.pending.retain(|a| a.phase == AdjustmentPhase::InFlight);
                    });
                    info!(%owner, "Cart cleared");
                    Ok(())
                }
                Err(e) => Err(self.resync(owner, e).await),
            },
            // Handled by the run loop.
            CartOp::Shutdown => Ok(()),
        }
    }

    /// Replaces the snapshot and totals wholesale. Cancels any scheduled refresh.
    async fn refresh(&mut self, owner: UserId) -> Result<(), CartError> {
        self.refresh_at = None;
        self.shared.modify(|v| {
            if v.status == CartStatus::Uninitialized {
                v.status = CartStatus::Loading;
            }
        });

        let fetched = async {
            let snapshot = self.backend.fetch_cart(owner).await?;
            let totals = self.backend.fetch_totals(owner).await?;
            Ok::<_, CartLineError>((snapshot, totals))
        }
        .await;

        match fetched {
            Ok((snapshot, totals)) => {
                info!(%owner, lines = snapshot.items.len(), total_items = totals.total_items, "Cart refreshed");
                self.shared.modify(|v| {
                    v.snapshot = snapshot;
                    v.totals = Some(totals);
                    v.status = CartStatus::Ready;
                    // Confirmed deltas are now part of the server's numbers.
                    v.pending.retain(|a| a.phase == AdjustmentPhase::InFlight);
                });
                Ok(())
            }
            Err(e) => {
                warn!(%owner, error = %e, "Cart refresh failed");
                self.shared.modify(|v| {
                    if v.status == CartStatus::Loading {
                        v.status = CartStatus::Uninitialized;
                    }
                });
                Err(e.into())
            }
        }
    }

    /// Immediate refresh after a committed mutation. A failure here must not be
    /// reported as a failure of the mutation, so the refresh is retried later instead.
    async fn refresh_or_reschedule(&mut self) {
        let Some(owner) = self.identity.consumer_id() else {
            return;
        };
        if self.refresh(owner).await.is_err() {
            self.schedule_refresh();
        }
    }

    /// Resynchronizes after a failed mutation and hands back the mutation's error.
    async fn resync(&mut self, owner: UserId, error: CartLineError) -> CartError {
        warn!(%owner, error = %error, "Cart mutation failed, resynchronizing");
        if self.refresh(owner).await.is_err() {
            self.schedule_refresh();
        }
        CartError::Collaborator(error)
    }

    fn schedule_refresh(&mut self) {
        self.refresh_at = Some(Instant::now() + self.debounce);
        debug!(delay_ms = whole_millis(self.debounce), "Refresh scheduled");
    }
}
