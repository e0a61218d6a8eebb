//! The engine's view of a cart: last server snapshot plus outstanding optimistic deltas.

use crate::model::{CartSnapshot, CartTotals, ItemId, ProductId};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

/// Per-cart lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CartStatus {
    #[default]
    Uninitialized,
    /// First refresh in progress.
    Loading,
    Ready,
    /// Cleared locally; nothing to fetch until the next refresh.
    Empty,
}

/// What an optimistic delta applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentTarget {
    /// A product being added; the server has not assigned a line yet.
    New(ProductId),
    Line(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentPhase {
    /// The server call has not completed.
    InFlight,
    /// The server accepted it; waiting for a refresh to fold it into the snapshot.
    Confirmed,
}

/// A provisional change to the item count, applied before the server confirms it.
///
/// Rolling back is dropping the value and resyncing, never arithmetic on the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAdjustment {
    pub id: u64,
    pub target: AdjustmentTarget,
    pub delta_quantity: i64,
    pub applied_at: Instant,
    pub phase: AdjustmentPhase,
}

/// Everything a UI needs to render the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub status: CartStatus,
    pub snapshot: CartSnapshot,
    /// Absent until the first refresh and after a clear.
    pub totals: Option<CartTotals>,
    pub pending: Vec<PendingAdjustment>,
}

impl CartView {
    /// Item count shown to the user: the server's count plus every pending delta,
    /// never below zero.
    ///
    /// Only the count is optimistic. Money fields keep their last server values until
    /// the next refresh.
    pub fn total_items(&self) -> u32 {
        let server = self
            .totals
            .as_ref()
            .map_or_else(|| self.snapshot.total_quantity(), |t| t.total_items);
        let delta: i64 = self.pending.iter().map(|a| a.delta_quantity).sum();
        let shown = (i64::from(server) + delta).max(0);
        u32::try_from(shown).unwrap_or(u32::MAX)
    }

    /// True when no delta is outstanding, i.e. the view is exactly the server's.
    pub fn is_consistent(&self) -> bool {
        self.pending.is_empty()
    }
}

/// State shared between the engine handles and the worker.
pub(crate) struct SharedCart {
    view: watch::Sender<CartView>,
    next_adjustment: AtomicU64,
}

impl SharedCart {
    pub(crate) fn new() -> Self {
        let (view, _) = watch::channel(CartView::default());
        Self {
            view,
            next_adjustment: AtomicU64::new(1),
        }
    }

    pub(crate) fn view(&self) -> CartView {
        self.view.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<CartView> {
        self.view.subscribe()
    }

    pub(crate) fn modify(&self, f: impl FnOnce(&mut CartView)) {
        self.view.send_modify(f);
    }

    pub(crate) fn reset(&self) {
        self.view.send_replace(CartView::default());
    }

    /// Records an in-flight delta and returns its id.
    pub(crate) fn begin(&self, target: AdjustmentTarget, delta_quantity: i64) -> u64 {
        let id = self.next_adjustment.fetch_add(1, Ordering::Relaxed);
        debug!(adjustment = id, ?target, delta_quantity, "Optimistic adjustment applied");
        self.modify(|v| {
            v.pending.push(PendingAdjustment {
                id,
                target,
                delta_quantity,
                applied_at: Instant::now(),
                phase: AdjustmentPhase::InFlight,
            })
        });
        id
    }

    pub(crate) fn confirm(&self, id: u64) {
        self.modify(|v| {
            if let Some(a) = v.pending.iter_mut().find(|a| a.id == id) {
                a.phase = AdjustmentPhase::Confirmed;
            }
        });
    }

    pub(crate) fn discard(&self, id: u64) {
        debug!(adjustment = id, "Optimistic adjustment discarded");
        self.modify(|v| v.pending.retain(|a| a.id != id));
    }
}
