//! Storefront order placement and tracking against the stand-in.

use creperie_core::{MenuItemId, NewOrder, OrderReference, OrderStatus};
use creperie_integration_tests::MockOrdersApi;
use creperie_storefront::api::{ApiError, OrdersClient};

fn sample_order() -> NewOrder {
    NewOrder {
        item_id: MenuItemId::new(1),
        item_name: "Crêpe Nutella".to_string(),
        size: "Double".to_string(),
        quantity: 2,
        total_price: 3600,
        customer_name: "Awa Diop".to_string(),
        customer_contact: "+221771234567".to_string(),
        delivery_location: "Plateau, Dakar".to_string(),
        additional_notes: "Sans sucre ajouté".to_string(),
    }
}

#[tokio::test]
async fn test_place_then_track() {
    let api = MockOrdersApi::start().await;
    let client = OrdersClient::new(api.base_url());

    let reference = client
        .place_order(&sample_order())
        .await
        .expect("place order");
    assert!(!reference.is_empty());

    let order = client.get_order(&reference).await.expect("track order");
    assert_eq!(order.reference, reference);
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.total_price, 3600);
    assert_eq!(order.additional_notes, "Sans sucre ajouté");
}

#[tokio::test]
async fn test_unknown_reference_is_not_found() {
    let api = MockOrdersApi::start().await;
    let client = OrdersClient::new(api.base_url());

    let err = client
        .get_order(&OrderReference::from("CMD-TEST-9999"))
        .await
        .expect_err("unknown reference");

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_new_orders_start_processing() {
    let api = MockOrdersApi::start().await;
    let client = OrdersClient::new(api.base_url());

    let reference = client
        .place_order(&sample_order())
        .await
        .expect("place order");

    assert_eq!(api.status_of(&reference), Some(OrderStatus::Processing));
}
