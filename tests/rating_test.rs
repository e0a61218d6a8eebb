use marketplace_core::config::MarketConfig;
use marketplace_core::error::{ErrorKind, HasErrorKind};
use marketplace_core::framework::ActorClient;
use marketplace_core::lifecycle::Marketplace;
use marketplace_core::model::{
    OrderCreate, OrderLine, ProductCreate, ProductId, RatingSummary, ReviewChanges, UserId,
};
use marketplace_core::review_actor::ReviewError;

async fn listed(market: &Marketplace, name: &str) -> ProductId {
    market
        .products
        .create_product(ProductCreate {
            name: name.to_string(),
            vendor_name: "Clay & Co".to_string(),
            price: 12.0,
            stock: 50,
        })
        .await
        .unwrap()
}

async fn delivered(market: &Marketplace, user_id: UserId, product_id: ProductId) {
    let order_id = market
        .orders
        .place_order(OrderCreate {
            user_id,
            lines: vec![OrderLine {
                product_id,
                quantity: 1,
                unit_price: 0.0,
            }],
        })
        .await
        .unwrap();
    market.orders.deliver(order_id).await.unwrap();
}

async fn stored_summary(market: &Marketplace, product_id: ProductId) -> RatingSummary {
    market
        .products
        .get(product_id)
        .await
        .unwrap()
        .expect("product exists")
        .rating
}

#[tokio::test]
async fn test_recalculate_over_three_reviews() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;

    for (user, stars) in [(1, 5), (2, 3), (3, 4)] {
        delivered(&market, UserId(user), mug).await;
        let receipt = market
            .reviews
            .create_review(UserId(user), mug, stars, None)
            .await
            .unwrap();
        assert!(!receipt.summary_is_stale());
    }

    let summary = market.reviews.retry_recalculate(mug).await.unwrap();
    assert_eq!(summary.review_count, 3);
    assert_eq!(summary.average_rating, 4.0);
    assert_eq!(stored_summary(&market, mug).await, summary);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_recalculate_with_no_reviews_is_zero() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;

    let summary = market.reviews.retry_recalculate(mug).await.unwrap();
    assert_eq!(summary.review_count, 0);
    assert_eq!(summary.average_rating, 0.0);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_recalculate_twice_gives_the_same_summary() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;
    for (user, stars) in [(1, 5), (2, 4), (3, 4)] {
        delivered(&market, UserId(user), mug).await;
        market
            .reviews
            .create_review(UserId(user), mug, stars, None)
            .await
            .unwrap();
    }

    let first = market.reviews.retry_recalculate(mug).await.unwrap();
    let second = market.reviews.retry_recalculate(mug).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.display_average(), 4.3);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_review_without_delivered_order_is_rejected() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;
    let kettle = listed(&market, "Kettle").await;

    // Bought something else; bought the mug but it never arrived.
    delivered(&market, UserId(7), kettle).await;
    market
        .orders
        .place_order(OrderCreate {
            user_id: UserId(7),
            lines: vec![OrderLine {
                product_id: mug,
                quantity: 1,
                unit_price: 0.0,
            }],
        })
        .await
        .unwrap();

    let err = market
        .reviews
        .create_review(UserId(7), mug, 5, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ReviewError::NotPurchased {
            user: UserId(7),
            product: mug
        }
    );
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(stored_summary(&market, mug).await.review_count, 0);
    assert!(market.review_client.reviews_for(mug).await.unwrap().is_empty());

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_recomputes_from_remaining_reviews() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;
    let (alice, bob) = (UserId(1), UserId(2));
    delivered(&market, alice, mug).await;
    delivered(&market, bob, mug).await;

    let alice_review = market
        .reviews
        .create_review(alice, mug, 2, Some("Chipped".to_string()))
        .await
        .unwrap()
        .value;
    let receipt = market.reviews.create_review(bob, mug, 4, None).await.unwrap();
    assert_eq!(receipt.summary.unwrap().average_rating, 3.0);

    let receipt = market.reviews.delete_review(alice, alice_review).await.unwrap();
    assert_eq!(receipt.value.rating.stars(), 2);
    let summary = receipt.summary.unwrap();
    assert_eq!(summary.average_rating, 4.0);
    assert_eq!(summary.review_count, 1);
    assert_eq!(stored_summary(&market, mug).await, summary);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_review_conflicts() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;
    delivered(&market, UserId(1), mug).await;
    market
        .reviews
        .create_review(UserId(1), mug, 5, None)
        .await
        .unwrap();

    let err = market
        .reviews
        .create_review(UserId(1), mug, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::AlreadyReviewed(_)));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(stored_summary(&market, mug).await.average_rating, 5.0);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_out_of_range_rating_is_a_validation_error() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;
    delivered(&market, UserId(1), mug).await;

    for stars in [0, 6] {
        let err = market
            .reviews
            .create_review(UserId(1), mug, stars, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_only_the_author_may_edit_or_delete() {
    let market = Marketplace::new(MarketConfig::default());
    let mug = listed(&market, "Mug").await;
    let (alice, mallory) = (UserId(1), UserId(66));
    delivered(&market, alice, mug).await;
    let review_id = market
        .reviews
        .create_review(alice, mug, 3, None)
        .await
        .unwrap()
        .value;

    let changes = ReviewChanges {
        rating: Some(1),
        comment: None,
    };
    let err = market
        .reviews
        .update_review(mallory, review_id, changes)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    let err = market
        .reviews
        .delete_review(mallory, review_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(stored_summary(&market, mug).await.average_rating, 3.0);

    let receipt = market
        .reviews
        .update_review(
            alice,
            review_id,
            ReviewChanges {
                rating: Some(5),
                comment: Some("Grew on me".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(receipt.value.comment.as_deref(), Some("Grew on me"));
    assert_eq!(receipt.summary.unwrap().average_rating, 5.0);

    market.shutdown().await.unwrap();
}
