//! Status lifecycle tests against the orders API stand-in.
//!
//! The interesting property is traffic: an eligible transition produces
//! exactly one status update call, a refused one produces none.

use creperie_admin::api::AdminApiClient;
use creperie_admin::lifecycle::{LifecycleController, TransitionError};
use creperie_core::OrderStatus;
use creperie_integration_tests::MockOrdersApi;

#[tokio::test]
async fn test_forward_step_sends_one_update() {
    let api = MockOrdersApi::start().await;
    let reference = api.seed_order(OrderStatus::Processing);

    let client = AdminApiClient::new(api.base_url());
    let controller = LifecycleController::new(client.clone());

    let mut order = client.get_order(&reference).await.expect("fetch order");
    controller
        .request_transition(&mut order, OrderStatus::Preparing)
        .await
        .expect("transition");

    assert_eq!(api.patch_calls(), 1);
    assert_eq!(order.status, OrderStatus::Preparing);
    assert_eq!(api.status_of(&reference), Some(OrderStatus::Preparing));
}

#[tokio::test]
async fn test_skip_sends_no_update() {
    let api = MockOrdersApi::start().await;
    let reference = api.seed_order(OrderStatus::Processing);

    let client = AdminApiClient::new(api.base_url());
    let controller = LifecycleController::new(client.clone());

    let mut order = client.get_order(&reference).await.expect("fetch order");
    let err = controller
        .request_transition(&mut order, OrderStatus::Delivered)
        .await
        .expect_err("skip must be refused");

    assert!(matches!(err, TransitionError::Rejected { .. }));
    assert_eq!(api.patch_calls(), 0);
    assert_eq!(api.status_of(&reference), Some(OrderStatus::Processing));
}

#[tokio::test]
async fn test_backward_step_sends_no_update() {
    let api = MockOrdersApi::start().await;
    let reference = api.seed_order(OrderStatus::Delivering);

    let client = AdminApiClient::new(api.base_url());
    let controller = LifecycleController::new(client.clone());

    let mut order = client.get_order(&reference).await.expect("fetch order");
    let err = controller
        .request_transition(&mut order, OrderStatus::Preparing)
        .await
        .expect_err("backward must be refused");

    assert!(matches!(err, TransitionError::Rejected { .. }));
    assert_eq!(api.patch_calls(), 0);
}

#[tokio::test]
async fn test_delivered_is_terminal() {
    let api = MockOrdersApi::start().await;
    let reference = api.seed_order(OrderStatus::Delivered);

    let client = AdminApiClient::new(api.base_url());
    let controller = LifecycleController::new(client.clone());

    let mut order = client.get_order(&reference).await.expect("fetch order");
    for target in [
        OrderStatus::Processing,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
    ] {
        let err = controller
            .request_transition(&mut order, target)
            .await
            .expect_err("delivered is terminal");
        assert!(matches!(err, TransitionError::Rejected { .. }));
    }
    assert_eq!(api.patch_calls(), 0);
}

#[tokio::test]
async fn test_full_lifecycle_walk() {
    let api = MockOrdersApi::start().await;
    let reference = api.seed_order(OrderStatus::Processing);

    let client = AdminApiClient::new(api.base_url());
    let controller = LifecycleController::new(client.clone());

    let mut order = client.get_order(&reference).await.expect("fetch order");
    for target in [
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ] {
        controller
            .request_transition(&mut order, target)
            .await
            .expect("next step");
        assert_eq!(order.status, target);
    }

    assert_eq!(api.patch_calls(), 3);
    assert_eq!(api.status_of(&reference), Some(OrderStatus::Delivered));
}
