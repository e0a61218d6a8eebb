//! # Marketplace Core
//!
//! The stateful core of a multi-vendor marketplace: a client-side cart engine that
//! reconciles optimistic state with the server, and server-side rating aggregation that
//! keeps each product's summary equal to its reviews.
//!
//! Both are built on a small resource-actor framework: each collaborator (products,
//! orders, reviews, cart lines) is an actor that owns its store and is reached through a
//! typed client.
//!
//! ## Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each component has its own `thiserror` enum (`ProductError`, `CartError`, ...).
//! Entity errors cross the actor boundary boxed in [`FrameworkError`](framework::FrameworkError)
//! and are recovered as their concrete type by the client wrappers. All of them map onto
//! one taxonomy through [`HasErrorKind`](error::HasErrorKind).
//!
//! ### 2. Async Context Injection
//! Dependencies are injected when an actor starts running (`run(context)`), not when it
//! is constructed, so actors can be wired in any order.
//!
//! ### 3. Concurrency Model
//! Every actor and every cart worker is one Tokio task processing messages
//! sequentially. Cart mutations are therefore FIFO per cart without locks.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields; see [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`framework`]: generic `ResourceActor<T>`, clients, errors and mocks
//! - [`model`]: pure data
//! - [`product_actor`], [`order_actor`], [`review_actor`], [`cart_actor`]: the collaborators
//! - [`clients`]: domain-specific client wrappers
//! - [`cart_engine`]: optimistic, serialized, debounced cart state
//! - [`rating`]: rating recomputation and the review workflow
//! - [`lifecycle`]: spawning, wiring and shutting down the marketplace
//! - [`config`], [`error`]: runtime settings and the error taxonomy
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod cart_engine;
pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod rating;
pub mod review_actor;
