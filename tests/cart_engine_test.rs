use marketplace_core::cart_actor::CartLineError;
use marketplace_core::cart_engine::mock::{BackendCall, BackendOp, MockCartBackend};
use marketplace_core::cart_engine::{CartError, CartSession, CartStatus};
use marketplace_core::config::MarketConfig;
use marketplace_core::error::{ErrorKind, HasErrorKind};
use marketplace_core::model::{Identity, ItemId, ProductId, Role, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const ALICE: UserId = UserId(1);
const MUG: ProductId = ProductId(1);
const KETTLE: ProductId = ProductId(2);

fn backend() -> Arc<MockCartBackend> {
    Arc::new(
        MockCartBackend::new()
            .with_product(MUG, "Mug", 10.0)
            .with_product(KETTLE, "Kettle", 45.0),
    )
}

fn login(backend: &Arc<MockCartBackend>) -> CartSession {
    CartSession::login(
        Identity::consumer(ALICE),
        backend.clone(),
        &MarketConfig::default(),
    )
}

fn down() -> CartLineError {
    CartLineError::ActorCommunicationError("connection reset".to_string())
}

fn item_of(session: &CartSession, product_id: ProductId) -> ItemId {
    session
        .engine()
        .view()
        .snapshot
        .items
        .iter()
        .find(|l| l.product_id == product_id)
        .map(|l| l.item_id)
        .expect("product in cart")
}

#[tokio::test(start_paused = true)]
async fn test_first_refresh_moves_to_ready() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    assert_eq!(engine.view().status, CartStatus::Uninitialized);

    engine.refresh().await.unwrap();

    let view = engine.view();
    assert_eq!(view.status, CartStatus::Ready);
    assert!(view.snapshot.is_empty());
    assert_eq!(view.totals.map(|t| t.total_items), Some(0));
    assert_eq!(backend.calls(), vec![BackendCall::FetchCart, BackendCall::FetchTotals]);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_add_to_empty_cart() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();

    engine.add_item(MUG, 2).await.unwrap();

    let view = engine.view();
    assert_eq!(engine.total_items(), 2);
    let totals = view.totals.as_ref().expect("totals after refresh");
    assert_eq!(totals.total_items, 2);
    assert_eq!(totals.subtotal, 20.00);
    assert!(view.is_consistent());
    // Add is followed by an immediate refresh.
    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::Add {
                product_id: MUG,
                quantity: 2
            },
            BackendCall::FetchCart,
            BackendCall::FetchTotals,
        ]
    );
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_zero_quantity_update_is_rejected_without_a_call() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 1).await.unwrap();
    let item = item_of(&session, MUG);
    let before = engine.view();
    backend.clear_journal();

    let err = engine.update_quantity(item, 0).await.unwrap_err();

    assert_eq!(err, CartError::InvalidQuantity(0));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(backend.calls().is_empty());
    assert_eq!(engine.view(), before);

    let err = engine.add_item(MUG, 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(backend.calls().is_empty());
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_mutations_reach_the_server_in_issue_order() {
    let backend = Arc::new(
        MockCartBackend::new()
            .with_product(MUG, "Mug", 10.0)
            .with_product(KETTLE, "Kettle", 45.0)
            .with_latency(Duration::from_millis(40)),
    );
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 1).await.unwrap();
    let mug_item = item_of(&session, MUG);
    backend.clear_journal();

    // Neither call is awaited before the other is issued.
    let other = engine.clone();
    let (a, b) = tokio::join!(
        engine.add_item(KETTLE, 1),
        other.update_quantity(mug_item, 3)
    );
    a.unwrap();
    b.unwrap();

    // B's call only starts once A (including its refresh) is done.
    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::Add {
                product_id: KETTLE,
                quantity: 1
            },
            BackendCall::FetchCart,
            BackendCall::FetchTotals,
            BackendCall::Update {
                item_id: mug_item,
                quantity: 3
            },
        ]
    );
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_add_rolls_back_the_optimistic_count() {
    let backend = Arc::new(
        MockCartBackend::new()
            .with_product(MUG, "Mug", 10.0)
            .with_latency(Duration::from_millis(50)),
    );
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 2).await.unwrap();
    assert_eq!(engine.total_items(), 2);

    backend.fail_next(BackendOp::Add, down());
    backend.clear_journal();

    let observer = engine.clone();
    let (result, during) = tokio::join!(engine.add_item(MUG, 3), async move {
        sleep(Duration::from_millis(10)).await;
        observer.total_items()
    });

    // Shown immediately while the call was in flight.
    assert_eq!(during, 5);
    let err = result.unwrap_err();
    assert_eq!(err, CartError::Collaborator(down()));
    assert_eq!(err.kind(), ErrorKind::Collaborator);

    // Back to the pre-call value, via a resynchronizing refresh.
    assert_eq!(engine.total_items(), 2);
    assert!(engine.view().is_consistent());
    assert_eq!(backend.refresh_count(), 1);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_quantity_burst_collapses_into_one_refresh() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 1).await.unwrap();
    let item = item_of(&session, MUG);
    backend.clear_journal();

    for quantity in 2..=6 {
        engine.update_quantity(item, quantity).await.unwrap();
        sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(backend.count(BackendOp::Update), 5);
    assert_eq!(backend.refresh_count(), 0);

    // Quiet period runs from the last edit (which was 50ms ago).
    sleep(Duration::from_millis(200)).await;
    assert_eq!(backend.refresh_count(), 0);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(backend.refresh_count(), 1);
    assert_eq!(engine.view().totals.map(|t| t.total_items), Some(6));

    sleep(Duration::from_secs(5)).await;
    assert_eq!(backend.refresh_count(), 1);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_update_refreshes_immediately() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 1).await.unwrap();
    let item = item_of(&session, MUG);

    engine.update_quantity(item, 2).await.unwrap();
    backend.fail_next(BackendOp::Update, down());
    backend.clear_journal();

    let err = engine.update_quantity(item, 3).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert_eq!(backend.refresh_count(), 1);
    assert_eq!(engine.view().totals.map(|t| t.total_items), Some(2));

    // The debounced refresh from the first edit was cancelled.
    sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.refresh_count(), 1);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_remove_is_optimistic_then_debounced() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 2).await.unwrap();
    engine.add_item(KETTLE, 1).await.unwrap();
    let mug_item = item_of(&session, MUG);
    backend.clear_journal();

    engine.remove_item(mug_item).await.unwrap();

    // Server totals are stale until the refresh, the confirmed delta covers the gap.
    assert_eq!(engine.total_items(), 1);
    assert!(!engine.view().is_consistent());
    assert_eq!(backend.refresh_count(), 0);

    sleep(Duration::from_millis(350)).await;
    let view = engine.view();
    assert_eq!(backend.refresh_count(), 1);
    assert!(view.is_consistent());
    assert_eq!(view.totals.map(|t| t.total_items), Some(1));
    assert_eq!(view.snapshot.items.len(), 1);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_remove_restores_the_line() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 4).await.unwrap();
    let item = item_of(&session, MUG);
    backend.fail_next(BackendOp::Remove, down());

    assert!(engine.remove_item(item).await.is_err());
    assert_eq!(engine.total_items(), 4);
    assert!(engine.view().snapshot.line(item).is_some());
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_clear_empties_the_view_without_refresh() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 2).await.unwrap();
    let item = item_of(&session, MUG);
    engine.update_quantity(item, 3).await.unwrap();
    backend.clear_journal();

    engine.clear_cart().await.unwrap();

    let view = engine.view();
    assert_eq!(view.status, CartStatus::Empty);
    assert!(view.snapshot.is_empty());
    assert!(view.totals.is_none());
    assert_eq!(engine.total_items(), 0);

    // Clearing cancels the pending debounced refresh too.
    sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.calls(), vec![BackendCall::Clear]);

    engine.refresh().await.unwrap();
    assert_eq!(engine.view().status, CartStatus::Ready);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_clear_resyncs_and_reraises() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();
    engine.add_item(MUG, 2).await.unwrap();
    backend.fail_next(BackendOp::Clear, down());

    let err = engine.clear_cart().await.unwrap_err();
    assert_eq!(err, CartError::Collaborator(down()));
    assert_eq!(engine.view().status, CartStatus::Ready);
    assert_eq!(engine.total_items(), 2);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_counts_match_lines_after_a_mixed_sequence() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine();

    engine.add_item(MUG, 1).await.unwrap();
    engine.add_item(KETTLE, 2).await.unwrap();
    engine.add_item(MUG, 2).await.unwrap();
    let mug_item = item_of(&session, MUG);
    let kettle_item = item_of(&session, KETTLE);
    engine.update_quantity(kettle_item, 5).await.unwrap();
    engine.remove_item(mug_item).await.unwrap();
    engine.update_quantity(kettle_item, 4).await.unwrap();

    sleep(Duration::from_millis(400)).await;

    let view = engine.view();
    let totals = view.totals.clone().expect("totals");
    assert_eq!(totals.total_items, view.snapshot.total_quantity());
    assert_eq!(totals.total_items, 4);
    assert_eq!(engine.total_items(), 4);
    assert!(view.is_consistent());
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_non_consumers_never_reach_the_server() {
    let backend = backend();
    let vendor = Identity::User {
        user_id: UserId(9),
        role: Role::Vendor,
    };

    for identity in [Identity::Anonymous, vendor] {
        let session = CartSession::login(identity, backend.clone(), &MarketConfig::default());
        let engine = session.engine();

        let err = engine.add_item(MUG, 1).await.unwrap_err();
        assert_eq!(err, CartError::Unauthorized);
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(engine.total_items(), 0);
        assert!(engine.update_quantity(ItemId(1), 2).await.is_err());
        assert!(engine.remove_item(ItemId(1)).await.is_err());
        assert!(engine.clear_cart().await.is_err());

        // Refresh short-circuits to an empty view.
        engine.refresh().await.unwrap();
        assert_eq!(engine.view().status, CartStatus::Uninitialized);
        session.logout().await;
    }

    assert!(backend.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_first_refresh_stays_uninitialized() {
    let backend = backend();
    let session = login(&backend);
    backend.fail_next(BackendOp::FetchTotals, down());

    let err = session.engine().refresh().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert_eq!(session.engine().view().status, CartStatus::Uninitialized);

    session.engine().refresh().await.unwrap();
    assert_eq!(session.engine().view().status, CartStatus::Ready);
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_logout_closes_every_handle() {
    let backend = backend();
    let session = login(&backend);
    let engine = session.engine().clone();
    engine.add_item(MUG, 1).await.unwrap();

    session.logout().await;

    assert_eq!(engine.total_items(), 0);
    assert_eq!(engine.add_item(MUG, 1).await, Err(CartError::EngineClosed));
    assert_eq!(backend.count(BackendOp::Add), 1);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_the_refreshed_view() {
    let backend = backend();
    let session = login(&backend);
    let mut changes = session.engine().subscribe();

    session.engine().add_item(KETTLE, 1).await.unwrap();

    assert!(changes.has_changed().unwrap());
    let view = changes.borrow_and_update().clone();
    assert_eq!(view.totals.map(|t| t.subtotal), Some(45.0));
    session.logout().await;
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_add_on_a_full_queue_leaves_no_adjustment() {
    let backend = Arc::new(
        MockCartBackend::new()
            .with_product(MUG, "Mug", 10.0)
            .with_latency(Duration::from_millis(100)),
    );
    let config = MarketConfig {
        channel_capacity: 1,
        ..MarketConfig::default()
    };
    let session = CartSession::login(Identity::consumer(ALICE), backend.clone(), &config);
    let engine = session.engine().clone();

    // One refresh in the worker, one waiting in the queue.
    let busy = engine.clone();
    let first = tokio::spawn(async move { busy.refresh().await });
    sleep(Duration::from_millis(1)).await;
    let queued = engine.clone();
    let second = tokio::spawn(async move { queued.refresh().await });
    sleep(Duration::from_millis(1)).await;

    let abandoned = tokio::time::timeout(Duration::from_millis(10), engine.add_item(MUG, 3)).await;
    assert!(abandoned.is_err());
    assert_eq!(engine.total_items(), 0);
    assert!(engine.view().pending.is_empty());

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();
    engine.refresh().await.unwrap();
    sleep(Duration::from_secs(5)).await;

    let view = engine.view();
    assert_eq!(view.totals.as_ref().map(|t| t.total_items), Some(0));
    assert_eq!(engine.total_items(), 0);
    assert!(view.is_consistent());
    assert_eq!(backend.count(BackendOp::Add), 0);
    session.logout().await;
}
