use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::http::Api;
use crate::domain::status::can_cancel;
use crate::domain::{Cart, CartItem, Order, OrderStatus, PaymentMethod};
use crate::error::{ApiError, OrderError};

/// Fixed business rule: a coupon takes 10% off the subtotal, capped.
pub const DISCOUNT_RATE: f64 = 0.10;
pub const DISCOUNT_CAP: f64 = 50.0;
/// Charged whenever anything is ordered at all.
pub const DELIVERY_FEE: f64 = 5.0;

/// Money values are rounded to cents before they hit the wire.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Discount for an applied coupon: `min(subtotal * 0.10, CAP)`, zero for an
/// empty subtotal or no coupon.
pub fn discount_for(subtotal: f64, coupon: Option<&str>) -> f64 {
    match coupon {
        Some(code) if !code.is_empty() && subtotal > 0.0 => {
            round_cents((subtotal * DISCOUNT_RATE).min(DISCOUNT_CAP))
        }
        _ => 0.0,
    }
}

#[derive(Debug, Serialize)]
struct PlaceOrderRequest<'a> {
    items: Vec<CartItem>,
    address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon: Option<&'a str>,
    payment: PaymentMethod,
    discount: f64,
    total: f64,
}

#[derive(Debug, Serialize)]
struct UpdateStatusRequest {
    status: OrderStatus,
}

/// Client for order CRUD and status updates. Single source of truth for
/// request shaping: line sanitization, discount and fee computation.
///
/// Visibility of the list endpoints is the backend's job; nothing is filtered
/// client-side.
#[derive(Clone)]
pub struct OrderClient {
    api: Arc<Api>,
}

impl OrderClient {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Submits the staged cart as an order. Fails fast (no network call) when
    /// no restaurant id is resolvable or the cart is empty. On success the
    /// caller owns clearing the cart.
    #[instrument(skip(self, cart, coupon))]
    pub async fn place_order(
        &self,
        cart: &Cart,
        coupon: Option<&str>,
        payment: PaymentMethod,
    ) -> Result<Order, OrderError> {
        if cart.items.is_empty() {
            return Err(OrderError::InvalidCart("cart is empty".into()));
        }
        let restaurant_id = cart
            .restaurant_id()
            .ok_or_else(|| OrderError::InvalidCart("no restaurant found in cart".into()))?;

        // Every submitted line carries a concrete restaurant id.
        let items: Vec<CartItem> = cart
            .items
            .iter()
            .cloned()
            .map(|mut line| {
                line.restaurant_id.get_or_insert(restaurant_id);
                line
            })
            .collect();

        let subtotal = cart.subtotal();
        let discount = discount_for(subtotal, coupon);
        let fee = if subtotal > 0.0 { DELIVERY_FEE } else { 0.0 };
        let total = round_cents(subtotal - discount + fee);

        info!(restaurant_id, subtotal, discount, total, "Placing order");
        let order: Order = self
            .api
            .post(
                "/api/orders",
                &PlaceOrderRequest {
                    items,
                    address: &cart.address,
                    coupon,
                    payment,
                    discount,
                    total,
                },
            )
            .await?;
        info!(order_id = order.id, "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn list_mine(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        self.api.get("/api/orders/my").await
    }

    #[instrument(skip(self))]
    pub async fn list_for_restaurant(&self, restaurant_id: u64) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        self.api.get(&format!("/api/restaurants/{restaurant_id}/orders")).await
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        self.api.get("/api/admin/orders").await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, order_id: u64) -> Result<Order, ApiError> {
        debug!("Sending request");
        self.api.get(&format!("/api/orders/{order_id}")).await
    }

    /// Thin pass-through; the backend enforces legality, but callers are
    /// expected to request only transitions computed by the status machine.
    /// Always PATCH.
    #[instrument(skip(self))]
    pub async fn update_status(&self, order_id: u64, status: OrderStatus) -> Result<Order, ApiError> {
        info!(order_id, %status, "Requesting status update");
        self.api
            .patch(&format!("/api/orders/{order_id}/status"), &UpdateStatusRequest { status })
            .await
    }

    /// Cancels an order, guarded client-side by the one legal branch.
    #[instrument(skip(self, order))]
    pub async fn cancel(&self, order: &Order) -> Result<Order, OrderError> {
        if !can_cancel(order.status) {
            return Err(OrderError::CannotCancel(order.status));
        }
        Ok(self.update_status(order.id, OrderStatus::Cancelled).await?)
    }
}
