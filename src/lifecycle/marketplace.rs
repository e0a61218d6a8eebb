use crate::cart_engine::CartSession;
use crate::clients::{CartClient, OrderClient, ProductClient, ReviewClient};
use crate::config::{whole_millis, MarketConfig};
use crate::model::Identity;
use crate::rating::{RatingAggregator, ReviewService};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator for the in-process marketplace.
///
/// Owns the Product, Order, Review and Cart actors and exposes their clients, plus the
/// review workflow built on top of them.
///
/// # Example
///
/// ```no_run
/// use marketplace_core::config::MarketConfig;
/// use marketplace_core::lifecycle::Marketplace;
/// use marketplace_core::model::{Identity, ProductCreate, UserId};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let market = Marketplace::new(MarketConfig::default());
/// let product_id = market
///     .products
///     .create_product(ProductCreate {
///         name: "Mug".into(),
///         vendor_name: "Acme".into(),
///         price: 10.0,
///         stock: 5,
///     })
///     .await?;
///
/// let session = market.cart_session(Identity::consumer(UserId(1)));
/// session.engine().add_item(product_id, 2).await?;
/// session.logout().await;
///
/// market.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct Marketplace {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub review_client: ReviewClient,
    pub carts: CartClient,
    /// Review mutations followed by rating recomputes.
    pub reviews: ReviewService,
    config: MarketConfig,
    // Awaited in this order on shutdown: dependents before their dependencies.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl Marketplace {
    /// Spawns every actor on the current runtime and wires their contexts.
    pub fn new(config: MarketConfig) -> Self {
        let capacity = config.channel_capacity;

        // 1. Create actors (no dependencies yet)
        let (product_actor, product_inner) = crate::product_actor::new(capacity);
        let (order_actor, order_inner) = crate::order_actor::new(capacity);
        let (review_actor, review_inner) = crate::review_actor::new(capacity);
        let (cart_actor, cart_inner) = crate::cart_actor::new(capacity);

        let products = ProductClient::new(product_inner);
        let orders = OrderClient::new(order_inner);
        let review_client = ReviewClient::new(review_inner);
        let carts = CartClient::new(cart_inner, &config);

        // 2. Start actors with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(products.clone()));
        let review_handle = tokio::spawn(review_actor.run(orders.clone()));
        let cart_handle = tokio::spawn(cart_actor.run(products.clone()));

        let aggregator = RatingAggregator::new(products.clone(), review_client.clone());
        let reviews = ReviewService::new(review_client.clone(), aggregator);

        info!(
            debounce_ms = whole_millis(config.debounce),
            capacity, "Marketplace started"
        );

        Self {
            products,
            orders,
            review_client,
            carts,
            reviews,
            config,
            handles: vec![
                ("review", review_handle),
                ("cart", cart_handle),
                ("order", order_handle),
                ("product", product_handle),
            ],
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Logs `identity` into a cart engine backed by the cart actor.
    ///
    /// Log the session out before [`shutdown`](Self::shutdown): a live engine keeps
    /// the cart actor running.
    pub fn cart_session(&self, identity: Identity) -> CartSession {
        CartSession::login(identity, Arc::new(self.carts.clone()), &self.config)
    }

    /// Gracefully shuts down the marketplace.
    ///
    /// Dropping the clients closes the channels; each actor's loop ends, which drops the
    /// clients it held as context, which in turn lets its dependencies finish.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down marketplace...");

        drop(self.reviews);
        drop(self.review_client);
        drop(self.carts);
        drop(self.orders);
        drop(self.products);

        for (name, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(actor = name, "Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Marketplace shutdown complete.");
        Ok(())
    }
}
