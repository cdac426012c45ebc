//! The consumer-facing reconciliation loops: order lists, single-order
//! tracking, and the restaurant review feed, all built on [`Poller`].
//!
//! Snapshots are replaced wholesale on every successful fetch
//! (last-write-wins); a mutation racing a poll tick is tolerated, the next
//! tick converges.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::clients::{OrderClient, ReviewClient};
use crate::domain::status::{can_cancel, next_status, sort_orders};
use crate::domain::{Order, OrderStatus, Review};
use crate::error::ApiError;
use crate::poller::{Poller, ORDER_LIST_INTERVAL, ORDER_TRACKING_INTERVAL, REVIEW_LIST_INTERVAL};
use crate::review_gate::ReviewGate;

/// Which list endpoint a feed reads; the backend scopes visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    Customer,
    Restaurant(u64),
    Admin,
}

async fn list(client: &OrderClient, scope: OrderScope) -> Result<Vec<Order>, ApiError> {
    match scope {
        OrderScope::Customer => client.list_mine().await,
        OrderScope::Restaurant(id) => client.list_for_restaurant(id).await,
        OrderScope::Admin => client.list_all().await,
    }
}

/// A live, sorted order list for one role's view.
///
/// A failed refresh keeps the previous snapshot but records a visible error;
/// screens render it instead of silently showing stale data as fresh.
pub struct OrderFeed {
    orders: Arc<RwLock<Vec<Order>>>,
    last_error: Arc<RwLock<Option<String>>>,
    poller: Poller,
}

impl OrderFeed {
    pub fn start(client: OrderClient, scope: OrderScope) -> Self {
        let orders = Arc::new(RwLock::new(Vec::new()));
        let last_error = Arc::new(RwLock::new(None));
        let (orders_w, errors_w) = (Arc::clone(&orders), Arc::clone(&last_error));
        let poller = Poller::start("order-feed", ORDER_LIST_INTERVAL, move || {
            let client = client.clone();
            let orders = Arc::clone(&orders_w);
            let errors = Arc::clone(&errors_w);
            async move {
                match list(&client, scope).await {
                    Ok(mut fresh) => {
                        sort_orders(&mut fresh);
                        *orders.write().await = fresh;
                        *errors.write().await = None;
                        Ok(())
                    }
                    Err(e) => {
                        *errors.write().await = Some(e.to_string());
                        Err(e)
                    }
                }
            }
        });
        Self {
            orders,
            last_error,
            poller,
        }
    }

    /// Current snapshot: active orders first, newest first within a rank.
    pub async fn snapshot(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// At most one review prompt per cycle, picked from the current snapshot.
    /// The caller shows it and calls [`ReviewGate::mark_prompted`] on
    /// dismissal; the next delivered order surfaces on a later cycle.
    pub async fn due_review(&self, gate: &ReviewGate) -> Option<Order> {
        let orders = self.orders.read().await;
        gate.next_due(&orders).cloned()
    }

    pub async fn stop(self) {
        self.poller.stop().await;
    }
}

/// A live view of a single order, for the tracking screen.
pub struct OrderTracker {
    client: OrderClient,
    order: Arc<RwLock<Option<Order>>>,
    poller: Poller,
}

impl OrderTracker {
    pub fn start(client: OrderClient, order_id: u64) -> Self {
        let order = Arc::new(RwLock::new(None));
        let target = Arc::clone(&order);
        let poll_client = client.clone();
        let poller = Poller::start("order-tracker", ORDER_TRACKING_INTERVAL, move || {
            let client = poll_client.clone();
            let target = Arc::clone(&target);
            async move {
                let fresh = client.get(order_id).await?;
                *target.write().await = Some(fresh);
                Ok::<(), ApiError>(())
            }
        });
        Self {
            client,
            order,
            poller,
        }
    }

    pub async fn latest(&self) -> Option<Order> {
        self.order.read().await.clone()
    }

    /// The next legal forward transition, which is what the action button
    /// offers; `None` once terminal (or before the first fetch resolves).
    pub async fn next_action(&self) -> Option<OrderStatus> {
        self.order
            .read()
            .await
            .as_ref()
            .and_then(|o| next_status(o.status))
    }

    pub async fn can_cancel(&self) -> bool {
        self.order
            .read()
            .await
            .as_ref()
            .is_some_and(|o| can_cancel(o.status))
    }

    /// Requests the machine-computed next transition and adopts the response.
    /// Returns the updated order, or `None` when the order is terminal or not
    /// yet loaded.
    pub async fn advance(&self) -> Result<Option<Order>, ApiError> {
        let Some(current) = self.latest().await else {
            return Ok(None);
        };
        let Some(next) = next_status(current.status) else {
            return Ok(None);
        };
        let updated = self.client.update_status(current.id, next).await?;
        *self.order.write().await = Some(updated.clone());
        Ok(Some(updated))
    }

    pub async fn stop(self) {
        self.poller.stop().await;
    }
}

/// The restaurant dashboard's live review list (10s interval).
pub struct ReviewFeed {
    reviews: Arc<RwLock<Vec<Review>>>,
    poller: Poller,
}

impl ReviewFeed {
    pub fn start(client: ReviewClient, restaurant_id: u64) -> Self {
        let reviews = Arc::new(RwLock::new(Vec::new()));
        let target = Arc::clone(&reviews);
        let poller = Poller::start("review-feed", REVIEW_LIST_INTERVAL, move || {
            let client = client.clone();
            let target = Arc::clone(&target);
            async move {
                let fresh = client.list_for_restaurant(restaurant_id).await?;
                *target.write().await = fresh;
                Ok::<(), ApiError>(())
            }
        });
        Self { reviews, poller }
    }

    pub async fn snapshot(&self) -> Vec<Review> {
        self.reviews.read().await.clone()
    }

    pub async fn stop(self) {
        self.poller.stop().await;
    }
}
