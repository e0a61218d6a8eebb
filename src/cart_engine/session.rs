//! Login-scoped ownership of a cart engine.

use crate::cart_engine::{CartBackend, CartEngine};
use crate::config::MarketConfig;
use crate::model::Identity;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A cart engine tied to one authenticated session.
///
/// Constructed on login and torn down on logout; callers pass the engine around
/// explicitly instead of reaching for shared state.
pub struct CartSession {
    engine: CartEngine,
    worker: JoinHandle<()>,
}

impl CartSession {
    /// Spawns the worker for `identity` on the current runtime.
    pub fn login(
        identity: Identity,
        backend: Arc<dyn CartBackend>,
        config: &MarketConfig,
    ) -> Self {
        info!(?identity, "Cart session started");
        let (worker, engine) = super::new(identity, backend, config);
        Self {
            engine,
            worker: tokio::spawn(worker.run()),
        }
    }

    pub fn engine(&self) -> &CartEngine {
        &self.engine
    }

    /// Lets queued operations finish, stops the worker and discards the view.
    ///
    /// Engine clones still held elsewhere fail with
    /// [`CartError::EngineClosed`](crate::cart_engine::CartError::EngineClosed) afterwards.
    pub async fn logout(self) {
        // Already stopped is fine.
        let _ = self.engine.shutdown().await;
        if let Err(e) = self.worker.await {
            error!("Cart worker failed: {:?}", e);
        }
        self.engine.discard_view();
        info!("Cart session ended");
    }
}
