//! Order lifecycle transitions.
//!
//! Status changes are checked against the fulfillment sequence before any
//! network traffic: a rejected transition never reaches the orders API, and
//! the local copy of an order only changes once the API has confirmed the
//! update.

use std::future::Future;

use tracing::instrument;

use creperie_core::{Order, OrderReference, OrderStatus};

use crate::api::{AdminApiClient, ApiError};

/// Backend that persists order status changes.
pub trait OrderStore: Send + Sync {
    /// Persist a new status, returning the updated order.
    fn persist_status(
        &self,
        reference: &OrderReference,
        status: OrderStatus,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;
}

impl OrderStore for AdminApiClient {
    async fn persist_status(
        &self,
        reference: &OrderReference,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.update_status(reference, status).await
    }
}

/// Why a requested transition did not happen.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    /// The target status is not reachable from the current one.
    #[error("Cannot move order from {from} to {to}")]
    Rejected { from: OrderStatus, to: OrderStatus },

    /// The orders API refused or failed the update.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives orders through the fulfillment sequence.
#[derive(Debug, Clone)]
pub struct LifecycleController<S> {
    store: S,
}

impl<S: OrderStore> LifecycleController<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Move `order` to `target`.
    ///
    /// Staying in place or stepping to the immediate successor is allowed;
    /// everything else is rejected before the store is contacted. On success
    /// the order carries the status the store confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Rejected`] for an illegal transition, or
    /// [`TransitionError::Api`] if the store fails the update.
    #[instrument(skip(self, order), fields(reference = %order.reference, from = %order.status, to = %target))]
    pub async fn request_transition(
        &self,
        order: &mut Order,
        target: OrderStatus,
    ) -> Result<(), TransitionError> {
        if !order.status.can_transition(target) {
            return Err(TransitionError::Rejected {
                from: order.status,
                to: target,
            });
        }

        let updated = self.store.persist_status(&order.reference, target).await?;
        order.status = updated.status;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use creperie_core::OrderId;

    /// Store that counts calls and echoes the requested status back.
    #[derive(Default)]
    struct RecordingStore {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl RecordingStore {
        fn counted(fail: bool) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                    fail,
                },
                calls,
            )
        }
    }

    impl OrderStore for RecordingStore {
        async fn persist_status(
            &self,
            reference: &OrderReference,
            status: OrderStatus,
        ) -> Result<Order, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(order_with(reference.clone(), status))
        }
    }

    fn order_with(reference: OrderReference, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(1),
            reference,
            status,
            item_name: "Crêpe Nutella".to_string(),
            size: "Simple".to_string(),
            quantity: 1,
            total_price: 1000,
            customer_name: "Awa".to_string(),
            customer_contact: "+221770000000".to_string(),
            delivery_location: "Dakar".to_string(),
            additional_notes: String::new(),
            created_at: Utc::now(),
        }
    }

    fn order(status: OrderStatus) -> Order {
        order_with(OrderReference::from("CMD-2024-0001"), status)
    }

    #[tokio::test]
    async fn test_forward_step_hits_store_once() {
        let (store, calls) = RecordingStore::counted(false);
        let controller = LifecycleController::new(store);
        let mut order = order(OrderStatus::Processing);

        controller
            .request_transition(&mut order, OrderStatus::Preparing)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_skip_rejected_without_store_call() {
        let (store, calls) = RecordingStore::counted(false);
        let controller = LifecycleController::new(store);
        let mut order = order(OrderStatus::Processing);

        let err = controller
            .request_transition(&mut order, OrderStatus::Delivered)
            .await
            .unwrap_err();

        assert!(matches!(err, TransitionError::Rejected { .. }));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backward_rejected_without_store_call() {
        let (store, calls) = RecordingStore::counted(false);
        let controller = LifecycleController::new(store);
        let mut order = order(OrderStatus::Delivering);

        let err = controller
            .request_transition(&mut order, OrderStatus::Processing)
            .await
            .unwrap_err();

        assert!(matches!(err, TransitionError::Rejected { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_status_untouched() {
        let (store, calls) = RecordingStore::counted(true);
        let controller = LifecycleController::new(store);
        let mut order = order(OrderStatus::Preparing);

        let err = controller
            .request_transition(&mut order, OrderStatus::Delivering)
            .await
            .unwrap_err();

        assert!(matches!(err, TransitionError::Api(_)));
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
