//! The order status machine. Pure functions, no I/O: the backend is the
//! authority on transition legality, but the client only ever requests
//! transitions computed here, so obviously-illegal requests never leave the
//! process.

use std::cmp::Reverse;

use super::order::{Order, OrderStatus};

/// The next status in the forward chain, or `None` once the order is terminal.
pub fn next_status(current: OrderStatus) -> Option<OrderStatus> {
    match current {
        OrderStatus::New => Some(OrderStatus::Accepted),
        OrderStatus::Accepted => Some(OrderStatus::Preparing),
        OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
        OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
        OrderStatus::Delivered | OrderStatus::Cancelled => None,
    }
}

/// Cancellation is only legal before the restaurant has accepted.
pub fn can_cancel(current: OrderStatus) -> bool {
    current == OrderStatus::New
}

pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

/// Display priority: active statuses (0..=3) before Delivered (4) before
/// Cancelled (5).
pub fn rank(status: OrderStatus) -> u8 {
    match status {
        OrderStatus::New => 0,
        OrderStatus::Accepted => 1,
        OrderStatus::Preparing => 2,
        OrderStatus::OutForDelivery => 3,
        OrderStatus::Delivered => 4,
        OrderStatus::Cancelled => 5,
    }
}

/// Sort key for order lists: active before terminal, newest first within a
/// rank. A UI convenience invariant, not a server contract.
pub fn sort_key(order: &Order) -> (u8, Reverse<i64>) {
    (rank(order.status), Reverse(order.created_at))
}

pub fn sort_orders(orders: &mut [Order]) {
    orders.sort_by_key(sort_key);
}
