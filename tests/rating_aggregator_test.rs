use chrono::Utc;
use marketplace_core::clients::{ProductClient, ReviewClient};
use marketplace_core::error::{ErrorKind, HasErrorKind};
use marketplace_core::framework::mock::MockClient;
use marketplace_core::framework::FrameworkError;
use marketplace_core::model::{
    Product, ProductId, Rating, RatingSummary, Review, ReviewId, UserId,
};
use marketplace_core::product_actor::{ProductActionResult, ProductError};
use marketplace_core::rating::{RatingAggregator, RatingError, ReviewService};

const MUG: ProductId = ProductId(1);

fn review(id: u32, stars: u8) -> Review {
    let now = Utc::now();
    Review {
        id: ReviewId(id),
        product_id: MUG,
        user_id: UserId(id),
        rating: Rating::try_from(stars).unwrap(),
        comment: None,
        created_at: now,
        updated_at: now,
    }
}

fn mug() -> Product {
    Product::new(MUG, "Mug", "Clay & Co", 12.0, 10)
}

/// Aggregator logic against mocked Product and Review actors.
#[tokio::test]
async fn test_recalculate_reads_all_reviews_and_writes_the_summary() {
    let mut products = MockClient::<Product>::new();
    let mut reviews = MockClient::<Review>::new();

    let expected = RatingSummary {
        average_rating: 4.0,
        review_count: 3,
    };
    products.expect_get(MUG).return_ok(Some(mug()));
    reviews
        .expect_list()
        .return_ok(vec![review(1, 5), review(2, 3), review(3, 4)]);
    products
        .expect_action(MUG)
        .return_ok(ProductActionResult::ApplyRatingSummary(expected));

    let aggregator = RatingAggregator::new(
        ProductClient::new(products.client()),
        ReviewClient::new(reviews.client()),
    );
    let summary = aggregator.recalculate(MUG).await.unwrap();

    assert_eq!(summary, expected);
    products.verify();
    reviews.verify();
}

#[tokio::test]
async fn test_unknown_product_is_not_found_and_reads_nothing() {
    let mut products = MockClient::<Product>::new();
    let reviews = MockClient::<Review>::new();
    products.expect_get(MUG).return_ok(None);

    let aggregator = RatingAggregator::new(
        ProductClient::new(products.client()),
        ReviewClient::new(reviews.client()),
    );
    let err = aggregator.recalculate(MUG).await.unwrap_err();

    assert!(matches!(err, RatingError::Product(ProductError::NotFound(_))));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    products.verify();
    reviews.verify();
}

#[tokio::test]
async fn test_failed_write_is_retryable() {
    let mut products = MockClient::<Product>::new();
    let mut reviews = MockClient::<Review>::new();
    products.expect_get(MUG).return_ok(Some(mug()));
    reviews.expect_list().return_ok(vec![review(1, 2)]);
    products
        .expect_action(MUG)
        .return_err(FrameworkError::ActorDropped);

    let aggregator = RatingAggregator::new(
        ProductClient::new(products.client()),
        ReviewClient::new(reviews.client()),
    );
    let err = aggregator.recalculate(MUG).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert!(err.kind().is_retryable());
    products.verify();
}

#[tokio::test]
async fn test_failed_recompute_does_not_fail_the_review() {
    let mut products = MockClient::<Product>::new();
    let mut reviews = MockClient::<Review>::new();

    reviews.expect_create().return_ok(ReviewId(1));
    products
        .expect_get(MUG)
        .return_err(FrameworkError::ActorClosed);

    let aggregator = RatingAggregator::new(
        ProductClient::new(products.client()),
        ReviewClient::new(reviews.client()),
    );
    let service = ReviewService::new(ReviewClient::new(reviews.client()), aggregator);

    let receipt = service
        .create_review(UserId(1), MUG, 4, None)
        .await
        .unwrap();
    assert_eq!(receipt.value, ReviewId(1));
    assert!(receipt.summary_is_stale());

    // The recompute is retried on its own.
    let expected = RatingSummary {
        average_rating: 4.0,
        review_count: 1,
    };
    products.expect_get(MUG).return_ok(Some(mug()));
    reviews.expect_list().return_ok(vec![review(1, 4)]);
    products
        .expect_action(MUG)
        .return_ok(ProductActionResult::ApplyRatingSummary(expected));

    assert_eq!(service.retry_recalculate(MUG).await.unwrap(), expected);
    products.verify();
    reviews.verify();
}

#[tokio::test]
async fn test_invalid_rating_never_reaches_the_store() {
    let products = MockClient::<Product>::new();
    let reviews = MockClient::<Review>::new();
    let aggregator = RatingAggregator::new(
        ProductClient::new(products.client()),
        ReviewClient::new(reviews.client()),
    );
    let service = ReviewService::new(ReviewClient::new(reviews.client()), aggregator);

    let err = service
        .create_review(UserId(1), MUG, 9, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    // Any request would have panicked the mock responder.
    assert_eq!(reviews.remaining(), 0);
}
