//! # Marketplace Demo
//!
//! Wires the in-process marketplace and walks one consumer through it:
//! 1. A vendor lists products.
//! 2. The consumer fills a cart (optimistic adds, debounced quantity edits).
//! 3. The cart is checked out as an order, which is shipped and delivered.
//! 4. The consumer reviews a delivered product; a second shopper is turned away.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! MARKET_TAX_RATE=0.08 RUST_LOG=debug cargo run
//! ```

use marketplace_core::config::MarketConfig;
use marketplace_core::error::HasErrorKind;
use marketplace_core::lifecycle::{setup_tracing, Marketplace};
use marketplace_core::model::{Identity, OrderCreate, OrderLine, ProductCreate, UserId};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = MarketConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting marketplace demo");

    let market = Marketplace::new(config);
    let alice = UserId(1);
    let bob = UserId(2);

    let mug = market
        .products
        .create_product(ProductCreate {
            name: "Stoneware Mug".to_string(),
            vendor_name: "Clay & Co".to_string(),
            price: 12.50,
            stock: 20,
        })
        .await
        .map_err(|e| e.to_string())?;
    let kettle = market
        .products
        .create_product(ProductCreate {
            name: "Copper Kettle".to_string(),
            vendor_name: "Hearth Goods".to_string(),
            price: 48.00,
            stock: 3,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%mug, %kettle, "Catalog ready");

    // Shopping
    let session = market.cart_session(Identity::consumer(alice));
    let cart = session.engine().clone();
    async {
        cart.refresh().await?;
        cart.add_item(mug, 1).await?;
        cart.add_item(kettle, 1).await?;

        let mug_line = cart
            .view()
            .snapshot
            .items
            .iter()
            .find(|l| l.product_id == mug)
            .map(|l| l.item_id);
        if let Some(item_id) = mug_line {
            // A burst of edits: one refresh fires after the quiet period.
            for quantity in 2..=4 {
                cart.update_quantity(item_id, quantity).await?;
            }
        }

        // More kettles than the vendor has: rejected, view resynchronized.
        if let Err(e) = cart.add_item(kettle, 5).await {
            info!(error = %e, kind = %e.kind(), "Add rejected");
        }
        Ok::<_, marketplace_core::cart_engine::CartError>(())
    }
    .instrument(tracing::info_span!("shopping"))
    .await
    .map_err(|e| e.to_string())?;

    tokio::time::sleep(market.config().debounce * 2).await;
    let view = cart.view();
    if let Some(totals) = &view.totals {
        info!(
            items = totals.total_items,
            subtotal = totals.subtotal,
            tax = totals.estimated_tax,
            total = totals.total,
            currency = %totals.currency,
            "Cart settled"
        );
    }

    // Checkout
    let lines = view
        .snapshot
        .items
        .iter()
        .map(|l| OrderLine {
            product_id: l.product_id,
            quantity: l.quantity,
            unit_price: l.unit_price,
        })
        .collect();
    let order_id = market
        .orders
        .place_order(OrderCreate {
            user_id: alice,
            lines,
        })
        .instrument(tracing::info_span!("checkout"))
        .await
        .map_err(|e| e.to_string())?;
    cart.clear_cart().await.map_err(|e| e.to_string())?;
    market
        .orders
        .deliver(order_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(%order_id, "Order delivered");
    session.logout().await;

    // Reviews
    let receipt = market
        .reviews
        .create_review(alice, mug, 5, Some("Keeps coffee hot".to_string()))
        .await
        .map_err(|e| e.to_string())?;
    match &receipt.summary {
        Ok(summary) => info!(
            review_id = %receipt.value,
            average = summary.display_average(),
            count = summary.review_count,
            "Review published"
        ),
        Err(e) => error!(error = %e, "Review published, rating summary stale"),
    }

    match market.reviews.create_review(bob, mug, 1, None).await {
        Ok(_) => error!("Review accepted without a purchase"),
        Err(e) => info!(error = %e, kind = %e.kind(), "Review rejected"),
    }

    market.shutdown().await.map_err(|e| e.to_string())?;
    info!("Demo completed successfully");
    Ok(())
}
