//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for the whole marketplace.
//!
//! ## Configuration
//!
//! Compact format without module paths (`with_target(false)`); actors tag their lines
//! with `entity_type` instead. Levels come from `RUST_LOG`:
//!
//! ```bash
//! # Lifecycle, creates, refreshes and recomputes
//! RUST_LOG=info cargo run
//!
//! # Request payloads, optimistic adjustments, debounce scheduling
//! RUST_LOG=debug cargo run
//!
//! # Only the cart engine
//! RUST_LOG=marketplace_core::cart_engine=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown and final store size
//! - **Entity Operations**: create, get, list, update, delete, purge and actions
//! - **Cart Engine**: adjustments applied/discarded, refreshes, scheduled refreshes, resyncs
//! - **Ratings**: every recompute with its resulting average and count
//!
//! ## Workflow Trace Example
//!
//! Adding a product to the cart with `RUST_LOG=debug`:
//!
//! ```text
//! DEBUG add_item: Optimistic adjustment applied adjustment=1 target=New(ProductId(1)) delta_quantity=2
//! DEBUG Add product_id=product_1 quantity=2
//! INFO  add_item: Cart line created item_id=item_1
//! INFO  Cart refreshed owner=user_1 lines=1 total_items=2
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the actor instead
        .compact()
        .init();
}
