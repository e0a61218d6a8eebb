//! # System Lifecycle & Orchestration
//!
//! Individual actors are simple; wiring them together is where the complexity lives.
//! [`Marketplace`] is the conductor for the in-process marketplace:
//!
//! 1. **Actor Creation** - every actor and its client, sized from [`MarketConfig`](crate::config::MarketConfig)
//! 2. **Dependency Injection** - contexts are handed over in `run()`, after all clients exist
//! 3. **Graceful Shutdown** - dropping clients closes channels; actors drain and exit
//!
//! Dependencies between actors:
//!
//! ```text
//! Review ──▶ Order ──▶ Product ◀── Cart
//!                        ▲
//!   RatingAggregator ────┘ (and Review)
//! ```
//!
//! [`setup_tracing`] installs the log subscriber used by the demo binary.

pub mod marketplace;
pub mod tracing;

pub use self::marketplace::{Marketplace, ShutdownError};
pub use self::tracing::setup_tracing;
