//! # Mock Cart Backend
//!
//! An in-memory [`CartBackend`] that keeps a journal of every call it receives, can
//! be told to fail specific calls and can simulate latency. Engine tests assert on
//! the journal: call order, how many refreshes were made, and that rejected
//! operations never reached the server.
//!
//! ```rust
//! use marketplace_core::cart_actor::CartLineError;
//! use marketplace_core::cart_engine::mock::{BackendCall, BackendOp, MockCartBackend};
//! use marketplace_core::cart_engine::CartBackend;
//! use marketplace_core::model::{ProductId, UserId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MockCartBackend::new().with_product(ProductId(1), "Mug", 10.0);
//!     backend.fail_next(BackendOp::Add, CartLineError::ActorCommunicationError("down".into()));
//!
//!     assert!(backend.add_item(UserId(1), ProductId(1), 1).await.is_err());
//!     assert_eq!(backend.calls(), vec![BackendCall::Add { product_id: ProductId(1), quantity: 1 }]);
//! }
//! ```

use crate::cart_actor::CartLineError;
use crate::cart_engine::CartBackend;
use crate::model::{CartLine, CartSnapshot, CartTotals, ItemId, ProductId, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by the mock, recorded before any latency or injected failure.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    FetchCart,
    FetchTotals,
    Add { product_id: ProductId, quantity: u32 },
    Update { item_id: ItemId, quantity: u32 },
    Remove { item_id: ItemId },
    Clear,
}

/// Selects which kind of call an injected failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOp {
    FetchCart,
    FetchTotals,
    Add,
    Update,
    Remove,
    Clear,
}

impl BackendCall {
    pub fn op(&self) -> BackendOp {
        match self {
            BackendCall::FetchCart => BackendOp::FetchCart,
            BackendCall::FetchTotals => BackendOp::FetchTotals,
            BackendCall::Add { .. } => BackendOp::Add,
            BackendCall::Update { .. } => BackendOp::Update,
            BackendCall::Remove { .. } => BackendOp::Remove,
            BackendCall::Clear => BackendOp::Clear,
        }
    }
}

#[derive(Default)]
struct MockState {
    catalog: HashMap<ProductId, (String, f64)>,
    lines: Vec<CartLine>,
    next_item: u32,
    journal: Vec<BackendCall>,
    failures: Vec<(BackendOp, CartLineError)>,
}

/// In-memory cart server for engine tests. Holds a single cart per owner.
#[derive(Default)]
pub struct MockCartBackend {
    state: Mutex<MockState>,
    latency: Duration,
    tax_rate: f64,
}

impl MockCartBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `product_id` addable at `unit_price`.
    pub fn with_product(self, product_id: ProductId, name: &str, unit_price: f64) -> Self {
        self.lock()
            .catalog
            .insert(product_id, (name.to_string(), unit_price));
        self
    }

    /// Every call sleeps this long (on the tokio clock) before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// The next call of kind `op` fails with `error`. Failures queue up per kind.
    pub fn fail_next(&self, op: BackendOp, error: CartLineError) {
        self.lock().failures.push((op, error));
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().journal.clone()
    }

    pub fn count(&self, op: BackendOp) -> usize {
        self.lock().journal.iter().filter(|c| c.op() == op).count()
    }

    /// Number of cart fetches, i.e. refreshes performed by an engine.
    pub fn refresh_count(&self) -> usize {
        self.count(BackendOp::FetchCart)
    }

    pub fn clear_journal(&self) {
        self.lock().journal.clear();
    }

    /// The server-side lines of `owner`, bypassing the journal.
    pub fn lines_of(&self, owner: UserId) -> Vec<CartLine> {
        self.lock()
            .lines
            .iter()
            .filter(|l| l.owner == owner)
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Journals the call, waits out the latency and returns an injected failure if any.
    async fn enter(&self, call: BackendCall) -> Result<(), CartLineError> {
        let op = call.op();
        self.lock().journal.push(call);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut state = self.lock();
        match state.failures.iter().position(|(o, _)| *o == op) {
            Some(index) => Err(state.failures.remove(index).1),
            None => Ok(()),
        }
    }

    fn snapshot(state: &MockState, owner: UserId) -> CartSnapshot {
        CartSnapshot {
            items: state
                .lines
                .iter()
                .filter(|l| l.owner == owner)
                .cloned()
                .collect(),
        }
    }

    fn owned_line(
        state: &mut MockState,
        owner: UserId,
        item_id: ItemId,
    ) -> Result<&mut CartLine, CartLineError> {
        state
            .lines
            .iter_mut()
            .find(|l| l.item_id == item_id && l.owner == owner)
            .ok_or_else(|| CartLineError::NotFound(item_id.to_string()))
    }
}

#[async_trait]
impl CartBackend for MockCartBackend {
    async fn fetch_cart(&self, owner: UserId) -> Result<CartSnapshot, CartLineError> {
        self.enter(BackendCall::FetchCart).await?;
        Ok(Self::snapshot(&self.lock(), owner))
    }

    async fn fetch_totals(&self, owner: UserId) -> Result<CartTotals, CartLineError> {
        self.enter(BackendCall::FetchTotals).await?;
        let snapshot = Self::snapshot(&self.lock(), owner);
        Ok(CartTotals::from_lines(&snapshot.items, self.tax_rate, "USD"))
    }

    async fn add_item(
        &self,
        owner: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError> {
        self.enter(BackendCall::Add {
            product_id,
            quantity,
        })
        .await?;
        if quantity < 1 {
            return Err(CartLineError::InvalidQuantity(quantity));
        }
        let mut state = self.lock();
        let (name, unit_price) = state
            .catalog
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CartLineError::UnknownProduct(product_id.to_string()))?;
        let existing = state
            .lines
            .iter()
            .position(|l| l.owner == owner && l.product_id == product_id);
        match existing {
            Some(index) => state.lines[index].quantity += quantity,
            None => {
                state.next_item += 1;
                let item_id = ItemId(state.next_item);
                state.lines.push(CartLine {
                    item_id,
                    owner,
                    product_id,
                    quantity,
                    unit_price,
                    product_name: name,
                    vendor_name: "Mock Vendor".to_string(),
                });
            }
        }
        Ok(Self::snapshot(&state, owner))
    }

    async fn update_item(
        &self,
        owner: UserId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartLineError> {
        self.enter(BackendCall::Update { item_id, quantity }).await?;
        if quantity < 1 {
            return Err(CartLineError::InvalidQuantity(quantity));
        }
        let mut state = self.lock();
        Self::owned_line(&mut state, owner, item_id)?.quantity = quantity;
        Ok(Self::snapshot(&state, owner))
    }

    async fn remove_item(
        &self,
        owner: UserId,
        item_id: ItemId,
    ) -> Result<CartSnapshot, CartLineError> {
        self.enter(BackendCall::Remove { item_id }).await?;
        let mut state = self.lock();
        Self::owned_line(&mut state, owner, item_id)?;
        state.lines.retain(|l| l.item_id != item_id);
        Ok(Self::snapshot(&state, owner))
    }

    async fn clear(&self, owner: UserId) -> Result<(), CartLineError> {
        self.enter(BackendCall::Clear).await?;
        self.lock().lines.retain(|l| l.owner != owner);
        Ok(())
    }
}
